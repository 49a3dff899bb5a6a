//! The hinting capability:
//! both the PostScript-style stem hinter and the format-independent
//! auto-hinter are consumed through this one contract.

use crate::error::Result;
use fontcore_geom::{Fixed, Outline};

/// A diagnostic event a hinter may emit while it runs, for debug overlays.
/// The auto-hinter's segment/edge builder is the main producer of these.
#[derive(Debug, Clone)]
pub enum HintEvent {
    SegmentBuilt { axis_is_vertical: bool, position: i32 },
    EdgeBuilt { axis_is_vertical: bool, position: i32 },
    BlueZoneSnap { edge_position: i32, snapped_to: i32 },
}

/// Receives [`HintEvent`]s as a hinter runs. Optional: passing `None`
/// disables diagnostics entirely with no cost beyond the branch.
pub type DiagSink<'a> = Option<&'a mut dyn FnMut(HintEvent)>;

/// Shared contract for "consume an outline and a pair of scale factors,
/// emit a hinted outline". Implemented by the auto-hinter; a
/// PostScript stem-hint executor would implement it the same way, but its
/// internals are out of scope here.
pub trait Hinter: Send + Sync {
    fn hint(
        &self,
        outline: &Outline,
        x_scale: Fixed,
        y_scale: Fixed,
        diag: DiagSink<'_>,
    ) -> Result<Outline>;
}
