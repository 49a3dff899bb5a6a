//! The module registry, face/size/slot lifecycle, and glyph loading
//! pipeline at the center of the fontcore rendering engine.
//!
//! This crate does not parse any font format itself — that is the job of
//! a [`driver::Driver`] implementation such as `fontcore-sfnt` — and it
//! does not rasterize outlines itself — that is a [`renderer::Renderer`]
//! such as `fontcore-raster`. What lives here is the glue: the registry
//! that drivers and renderers plug into, and the state machine that
//! drives one glyph from a driver's raw outline through hinting and
//! rendering into a face's [`slot::GlyphSlot`].

pub mod driver;
pub mod error;
pub mod face;
pub mod glyph;
pub mod hint;
pub mod loader;
pub mod registry;
pub mod renderer;
pub mod size;
pub mod slot;

pub use driver::{Driver, DriverFace, Kerning, LoadFlags, RawGlyph};
pub use error::{Error, ErrorKind, Module, Result};
pub use face::{CharMap, Encoding, Face, FaceAttrs, FaceId};
pub use glyph::{BitmapGlyph, Glyph, GlyphFormat, OutlineGlyph, PixelMode};
pub use hint::{DiagSink, HintEvent, Hinter};
pub use loader::{char_index, load_glyph, request_size};
pub use registry::{DebugHook, LoaderState, Library, Version, LIBRARY_VERSION, MAX_DRIVERS};
pub use renderer::{select_renderer, RenderMode, Renderer};
pub use size::{Size, SizeId, SizeMetrics, SizeRequest};
pub use slot::GlyphSlot;
