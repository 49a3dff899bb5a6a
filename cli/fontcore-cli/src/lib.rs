//! Library side of the `fontcore` command-line front end: the driver/
//! renderer wiring and the text-to-canvas pipeline the `info`, `render`,
//! and `batch` subcommands share.

pub mod canvas;
pub mod engine;
pub mod jsonl;

pub use canvas::Canvas;
pub use engine::{Engine, PlacedGlyph, RenderRequest};
