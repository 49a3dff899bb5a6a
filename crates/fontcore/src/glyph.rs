//! Glyph payloads: a closed,
//! tagged union over bitmap and outline glyphs, plus the retained
//! [`Glyph`] helper object with copy/transform/render operations.

use crate::error::{Error, Module, Result};
use fontcore_geom::{BBox, Matrix, Outline, Vector};

/// Which of the two closed glyph shapes a slot or retained glyph holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GlyphFormat {
    Outline,
    Bitmap,
}

/// Pixel layout of a [`BitmapGlyph`]'s buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelMode {
    Mono,
    Gray,
    LcdRgb,
    LcdBgr,
    LcdVRgb,
    LcdVBgr,
}

/// A rasterized glyph image.
#[derive(Clone, Debug)]
pub struct BitmapGlyph {
    pub buffer: Vec<u8>,
    pub pixel_mode: PixelMode,
    /// Signed: positive means the buffer is stored top-down (row 0 is the
    /// topmost scanline), negative means bottom-up.
    pub pitch: i32,
    pub width: u32,
    pub rows: u32,
    pub bitmap_left: i32,
    pub bitmap_top: i32,
    pub advance: Vector,
}

impl BitmapGlyph {
    /// Byte length `pitch.abs() * rows` should occupy; used to sanity
    /// check driver/renderer output before handing a buffer to a slot.
    pub fn expected_len(&self) -> usize {
        self.pitch.unsigned_abs() as usize * self.rows as usize
    }

    /// Trim empty border rows and columns down to the tightest bounding
    /// box that still covers every nonzero sample, shifting
    /// `bitmap_left`/`bitmap_top` so the glyph origin doesn't move.
    /// Limited to `Gray`: a `Mono` crop would need bit-level column
    /// slicing and an LCD crop would risk splitting an RGB triplet, so
    /// both are returned unchanged.
    pub fn cropped(&self) -> BitmapGlyph {
        if self.pixel_mode != PixelMode::Gray || self.width == 0 || self.rows == 0 {
            return self.clone();
        }
        let stride = self.pitch.unsigned_abs() as usize;
        let mut min_row = None;
        let mut max_row = 0usize;
        let mut min_col = self.width as usize;
        let mut max_col = 0usize;
        for row in 0..self.rows as usize {
            for col in 0..self.width as usize {
                if self.buffer[row * stride + col] != 0 {
                    min_row.get_or_insert(row);
                    max_row = row;
                    min_col = min_col.min(col);
                    max_col = max_col.max(col);
                }
            }
        }
        let Some(min_row) = min_row else { return self.clone() };
        let new_width = (max_col - min_col + 1) as u32;
        let new_rows = (max_row - min_row + 1) as u32;
        let mut buffer = vec![0u8; (new_width * new_rows) as usize];
        for row in 0..new_rows as usize {
            for col in 0..new_width as usize {
                buffer[row * new_width as usize + col] =
                    self.buffer[(row + min_row) * stride + col + min_col];
            }
        }
        BitmapGlyph {
            buffer,
            pixel_mode: self.pixel_mode,
            pitch: new_width as i32,
            width: new_width,
            rows: new_rows,
            bitmap_left: self.bitmap_left + min_col as i32,
            bitmap_top: self.bitmap_top - min_row as i32,
            advance: self.advance,
        }
    }
}

/// A scalable glyph outline plus its advance.
#[derive(Clone, Debug)]
pub struct OutlineGlyph {
    pub outline: Outline,
    pub advance: Vector,
}

impl OutlineGlyph {
    /// Apply an affine transform in place: scalable outlines can be
    /// transformed without loss, unlike rasterized bitmaps.
    pub fn transform(&mut self, m: &Matrix, delta: Vector) {
        self.outline = self.outline.map_points(|p| m.apply(p) + delta);
    }

    pub fn control_box(&self) -> Option<BBox> {
        self.outline.control_box()
    }
}

/// The polymorphic glyph container:
/// dispatch for operations that know the closed variant set is a plain
/// `match`, not a vtable.
#[derive(Clone, Debug)]
pub enum Glyph {
    Outline(OutlineGlyph),
    Bitmap(BitmapGlyph),
}

impl Glyph {
    pub fn format(&self) -> GlyphFormat {
        match self {
            Glyph::Outline(_) => GlyphFormat::Outline,
            Glyph::Bitmap(_) => GlyphFormat::Bitmap,
        }
    }

    pub fn advance(&self) -> Vector {
        match self {
            Glyph::Outline(g) => g.advance,
            Glyph::Bitmap(g) => g.advance,
        }
    }

    /// Transform an outline glyph in place. Bitmap glyphs cannot be
    /// transformed losslessly and report `cannot_render_glyph`.
    pub fn transform(&mut self, m: &Matrix, delta: Vector) -> Result<()> {
        match self {
            Glyph::Outline(g) => {
                g.transform(m, delta);
                Ok(())
            }
            Glyph::Bitmap(_) => Err(Error::cannot_render_glyph(Module::Base)),
        }
    }

    /// The approximate weight in bytes this glyph would occupy in a cache
    /// node: point/tag bytes plus contour-end and advance overhead.
    pub fn cache_weight(&self) -> usize {
        match self {
            Glyph::Bitmap(b) => b.buffer.len(),
            Glyph::Outline(g) => {
                let o = &g.outline;
                o.n_points() * (std::mem::size_of::<Vector>() + 1)
                + o.n_contours() * std::mem::size_of::<i16>()
                + std::mem::size_of::<Vector>()
            }
        }
    }

    pub fn control_box(&self) -> Option<BBox> {
        match self {
            Glyph::Outline(g) => g.control_box(),
            Glyph::Bitmap(b) => Some(BBox {
                x_min: fontcore_geom::F26Dot6::from_int(b.bitmap_left),
                y_min: fontcore_geom::F26Dot6::from_int(b.bitmap_top - b.rows as i32),
                x_max: fontcore_geom::F26Dot6::from_int(b.bitmap_left + b.width as i32),
                y_max: fontcore_geom::F26Dot6::from_int(b.bitmap_top),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcore_geom::F26Dot6;

    fn triangle() -> Outline {
        let pt = |x, y| Vector::new(F26Dot6::from_int(x), F26Dot6::from_int(y));
        Outline::new(vec![pt(0, 0), pt(10, 0), pt(5, 10)], vec![0, 0, 0], vec![2]).unwrap()
    }

    #[test]
    fn bitmap_glyph_cannot_be_transformed() {
        let mut g = Glyph::Bitmap(BitmapGlyph {
            buffer: vec![],
            pixel_mode: PixelMode::Gray,
            pitch: 1,
            width: 1,
            rows: 1,
            bitmap_left: 0,
            bitmap_top: 0,
            advance: Vector::ZERO,
        });
        assert!(g.transform(&Matrix::IDENTITY, Vector::ZERO).is_err());
    }

    #[test]
    fn outline_glyph_transform_preserves_topology() {
        let mut g = Glyph::Outline(OutlineGlyph {
            outline: triangle(),
            advance: Vector::ZERO,
        });
        assert!(g.transform(&Matrix::IDENTITY, Vector::ZERO).is_ok());
    }

    #[test]
    fn cropped_trims_a_gray_bitmap_to_its_nonzero_bounding_box() {
        // 4x4 grid with a single 2x2 block of nonzero samples at (1,1)..(2,2).
        let mut buffer = vec![0u8; 16];
        buffer[1 * 4 + 1] = 100;
        buffer[1 * 4 + 2] = 100;
        buffer[2 * 4 + 1] = 100;
        buffer[2 * 4 + 2] = 100;
        let bitmap = BitmapGlyph {
            buffer,
            pixel_mode: PixelMode::Gray,
            pitch: 4,
            width: 4,
            rows: 4,
            bitmap_left: 0,
            bitmap_top: 4,
            advance: Vector::ZERO,
        };
        let cropped = bitmap.cropped();
        assert_eq!(cropped.width, 2);
        assert_eq!(cropped.rows, 2);
        assert_eq!(cropped.bitmap_left, 1);
        assert_eq!(cropped.bitmap_top, 3);
        assert!(cropped.buffer.iter().all(|&b| b == 100));
    }

    #[test]
    fn cropped_leaves_an_all_zero_bitmap_unchanged() {
        let bitmap = BitmapGlyph {
            buffer: vec![0u8; 9],
            pixel_mode: PixelMode::Gray,
            pitch: 3,
            width: 3,
            rows: 3,
            bitmap_left: 0,
            bitmap_top: 3,
            advance: Vector::ZERO,
        };
        let cropped = bitmap.cropped();
        assert_eq!(cropped.width, 3);
        assert_eq!(cropped.rows, 3);
    }

    #[test]
    fn cropped_leaves_non_gray_bitmaps_untouched() {
        let bitmap = BitmapGlyph {
            buffer: vec![1u8; 4],
            pixel_mode: PixelMode::Mono,
            pitch: 1,
            width: 4,
            rows: 1,
            bitmap_left: 0,
            bitmap_top: 1,
            advance: Vector::ZERO,
        };
        let cropped = bitmap.cropped();
        assert_eq!(cropped.width, 4);
    }

    #[test]
    fn outline_cache_weight_counts_points_contours_and_advance() {
        let g = Glyph::Outline(OutlineGlyph {
            outline: triangle(),
            advance: Vector::ZERO,
        });
        let expected = 3 * (std::mem::size_of::<Vector>() + 1)
        + 1 * std::mem::size_of::<i16>()
        + std::mem::size_of::<Vector>();
        assert_eq!(g.cache_weight(), expected);
    }
}
