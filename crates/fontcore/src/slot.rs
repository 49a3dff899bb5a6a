//! The glyph slot: a face's reusable working area for the last load.

use crate::glyph::{BitmapGlyph, Glyph, GlyphFormat, OutlineGlyph, PixelMode};
use fontcore_geom::Vector;

/// The working area attached to a face, overwritten by every
/// `load_glyph` call on that face.
#[derive(Clone, Debug)]
pub struct GlyphSlot {
    content: SlotContent,
    pub advance: Vector,
    pub linear_horizontal_advance: Vector,
    pub linear_vertical_advance: Vector,
    pub bitmap_left: i32,
    pub bitmap_top: i32,
    /// Tracks whether this slot owns a rasterized buffer it must drop
    /// before a subsequent load replaces it.
    own_bitmap: bool,
}

#[derive(Clone, Debug)]
enum SlotContent {
    Empty,
    Outline(OutlineGlyph),
    Bitmap(BitmapGlyph),
}

impl Default for GlyphSlot {
    fn default() -> Self {
        GlyphSlot {
            content: SlotContent::Empty,
            advance: Vector::ZERO,
            linear_horizontal_advance: Vector::ZERO,
            linear_vertical_advance: Vector::ZERO,
            bitmap_left: 0,
            bitmap_top: 0,
            own_bitmap: false,
        }
    }
}

impl GlyphSlot {
    pub fn format(&self) -> Option<GlyphFormat> {
        match &self.content {
            SlotContent::Empty => None,
            SlotContent::Outline(_) => Some(GlyphFormat::Outline),
            SlotContent::Bitmap(_) => Some(GlyphFormat::Bitmap),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.content, SlotContent::Empty)
    }

    pub fn outline(&self) -> Option<&OutlineGlyph> {
        match &self.content {
            SlotContent::Outline(o) => Some(o),
            _ => None,
        }
    }

    pub fn bitmap(&self) -> Option<&BitmapGlyph> {
        match &self.content {
            SlotContent::Bitmap(b) => Some(b),
            _ => None,
        }
    }

    /// Reset to the "known-empty state" every failure path transitions to.
    pub fn clear(&mut self) {
        self.content = SlotContent::Empty;
        self.own_bitmap = false;
        self.advance = Vector::ZERO;
        self.linear_horizontal_advance = Vector::ZERO;
        self.linear_vertical_advance = Vector::ZERO;
    }

    pub fn set_outline(&mut self, outline: OutlineGlyph) {
        self.content = SlotContent::Outline(outline);
        self.own_bitmap = false;
    }

    /// Replace the slot's content with a freshly rendered bitmap, freeing
    /// any previously owned buffer first.
    pub fn set_bitmap(&mut self, bitmap: BitmapGlyph) {
        self.content = SlotContent::Bitmap(bitmap);
        self.own_bitmap = true;
    }

    pub fn owns_bitmap(&self) -> bool {
        self.own_bitmap
    }

    /// Copy the slot's content into a retained, independently owned
    /// [`Glyph`] (the caller's escape hatch before the next load
    /// overwrites this slot).
    pub fn to_retained_glyph(&self) -> Option<Glyph> {
        match &self.content {
            SlotContent::Empty => None,
            SlotContent::Outline(o) => Some(Glyph::Outline(o.clone())),
            SlotContent::Bitmap(b) => Some(Glyph::Bitmap(b.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcore_geom::{F26Dot6, Outline};

    fn triangle() -> Outline {
        let pt = |x, y| Vector::new(F26Dot6::from_int(x), F26Dot6::from_int(y));
        Outline::new(vec![pt(0, 0), pt(10, 0), pt(5, 10)], vec![0, 0, 0], vec![2]).unwrap()
    }

    #[test]
    fn fresh_slot_is_empty() {
        let slot = GlyphSlot::default();
        assert!(slot.is_empty());
        assert!(slot.format().is_none());
    }

    #[test]
    fn setting_bitmap_marks_ownership_and_clears_outline_format() {
        let mut slot = GlyphSlot::default();
        slot.set_outline(OutlineGlyph {
            outline: triangle(),
            advance: Vector::ZERO,
        });
        slot.set_bitmap(BitmapGlyph {
            buffer: vec![0u8; 4],
            pixel_mode: PixelMode::Gray,
            pitch: 2,
            width: 2,
            rows: 2,
            bitmap_left: 0,
            bitmap_top: 0,
            advance: Vector::ZERO,
        });
        assert!(slot.owns_bitmap());
        assert_eq!(slot.format(), Some(GlyphFormat::Bitmap));
        assert!(slot.outline().is_none());
    }

    #[test]
    fn clear_returns_slot_to_empty_state() {
        let mut slot = GlyphSlot::default();
        slot.set_outline(OutlineGlyph {
            outline: triangle(),
            advance: Vector::ZERO,
        });
        slot.clear();
        assert!(slot.is_empty());
    }
}
