//! Renderer contract and selection.

use crate::error::Result;
use crate::glyph::{BitmapGlyph, GlyphFormat, OutlineGlyph};
use fontcore_geom::{BBox, Matrix, Vector};

/// Which target a `render` call is producing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Normal,
    Light,
    Mono,
    Lcd,
    LcdV,
}

/// A module exposing outline-to-bitmap rasterization for one glyph format.
/// The set of renderers is open (a library may register more than
/// one raster backend), so this is a trait object like [`crate::driver::Driver`].
pub trait Renderer: Send + Sync {
    /// The glyph format this renderer consumes.
    fn glyph_format(&self) -> GlyphFormat;

    /// Which render modes this renderer can produce.
    fn supports(&self, mode: RenderMode) -> bool;

    /// Rasterize `outline` (already scaled to subpixel units) at `origin`
    /// using `mode`.
    fn render(&self, outline: &OutlineGlyph, mode: RenderMode, origin: Vector) -> Result<BitmapGlyph>;

    /// Apply a transform to an as-yet-unrendered outline glyph, used by
    /// the loader before rasterization when a face transform is active.
    fn transform(&self, outline: &mut OutlineGlyph, m: &Matrix, delta: Vector) {
        outline.transform(m, delta);
    }

    /// Control box of the glyph as this renderer would see it, in
    /// subpixel units.
    fn get_cbox(&self, outline: &OutlineGlyph) -> Option<BBox> {
        outline.control_box()
    }
}

/// Select the first registered renderer whose input format and declared
/// mode support match.
pub fn select_renderer<'a>(
    renderers: &'a [Box<dyn Renderer>],
    format: GlyphFormat,
    mode: RenderMode,
) -> Option<&'a dyn Renderer> {
    renderers
        .iter()
        .map(|r| r.as_ref())
        .find(|r| r.glyph_format() == format && r.supports(mode))
}
