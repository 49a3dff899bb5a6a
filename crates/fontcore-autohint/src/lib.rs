//! Format-independent outline auto-hinter: outline analysis,
//! segment and edge construction, blue-zone alignment, and grid fitting,
//! wired up behind `fontcore`'s [`Hinter`](fontcore::Hinter) trait.

pub mod analysis;
pub mod blue;
pub mod config;
pub mod edge;
pub mod globals;
pub mod gridfit;
pub mod hinter;
pub mod point;
pub mod segment;

pub use analysis::{analyze, AnalyzedOutline};
pub use config::HintConfig;
pub use edge::{build_edges, link_edges, Edge};
pub use globals::{AxisMetrics, BlueZoneKind, FaceGlobals, BLUE_MAX, MAX_HEIGHTS, MAX_WIDTHS};
pub use hinter::AutoHinter;
pub use point::{classify_direction, vector_angle, AnalyzedPoint, Direction, PointFlags};
pub use segment::{build_segments, link_stems, Segment};
