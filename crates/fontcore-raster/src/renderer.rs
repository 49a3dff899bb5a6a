//! Renderer implementations: outline → bitmap for the five render
//! targets, registered with `fontcore::select_renderer`.

use crate::flatten::flatten_outline;
use crate::gray::{render_grayscale, GrayscaleLevel};
use crate::lcd::{render_lcd, render_lcd_v, DefaultLcdFilter, LcdFilter};
use crate::scan::FillRule;
use fontcore::error::{Error, Module, Result};
use fontcore::{BitmapGlyph, ErrorKind, GlyphFormat, OutlineGlyph, PixelMode, RenderMode, Renderer};
use fontcore_geom::{BBox, Outline, Vector};

/// The oversampled canvas (logical pixels × oversample factor, per axis)
/// above which a request is rejected rather than materializing a
/// multi-megabyte scratch buffer.
const MAX_CANVAS_DIM: usize = 4096;

fn empty_bitmap(advance: Vector) -> BitmapGlyph {
    BitmapGlyph {
        buffer: Vec::new(),
        pixel_mode: PixelMode::Gray,
        pitch: 0,
        width: 0,
        rows: 0,
        bitmap_left: 0,
        bitmap_top: 0,
        advance,
    }
}

/// Translate `outline` by `origin`, compute its pixel-aligned control
/// box, and re-express every contour in local top-down pixel space with
/// `(0, 0)` at the box's top-left corner. Returns `None` for an outline
/// with no contours or a degenerate (zero-area) box.
fn local_contours(outline: &Outline, origin: Vector) -> Option<(Vec<Vec<Vector>>, BBox, usize, usize)> {
    let translated = outline.map_points(|p| p + origin);
    let cbox = translated.control_box()?;
    let pixel_box = cbox.pixel_aligned();
    let width = (pixel_box.x_max.to_int() - pixel_box.x_min.to_int()).max(0) as usize;
    let height = (pixel_box.y_max.to_int() - pixel_box.y_min.to_int()).max(0) as usize;
    if width == 0 || height == 0 {
        return None;
    }
    let polys: Vec<Vec<Vector>> = flatten_outline(&translated)
        .into_iter()
        .map(|contour| {
            contour
                .into_iter()
                .map(|p| Vector::new(p.x - pixel_box.x_min, pixel_box.y_max - p.y))
                .collect()
    })
        .collect();
    Some((polys, pixel_box, width, height))
}

fn check_canvas_bound(width: usize, height: usize, oversample: usize) -> Result<()> {
    if width * oversample > MAX_CANVAS_DIM || height * oversample > MAX_CANVAS_DIM {
        return Err(Error::new(Module::Smooth, ErrorKind::RasterOverflow));
    }
    Ok(())
}

/// Software rasterizer for the grayscale and monochrome render targets.
pub struct SmoothRasterizer {
    level: GrayscaleLevel,
}

impl SmoothRasterizer {
    pub fn new() -> SmoothRasterizer {
        SmoothRasterizer {
            level: GrayscaleLevel::Level4x4,
        }
    }

    pub fn with_level(level: GrayscaleLevel) -> SmoothRasterizer {
        SmoothRasterizer { level }
    }
}

impl Default for SmoothRasterizer {
    fn default() -> Self {
        SmoothRasterizer::new()
    }
}

impl Renderer for SmoothRasterizer {
    fn glyph_format(&self) -> GlyphFormat {
        GlyphFormat::Outline
    }

    fn supports(&self, mode: RenderMode) -> bool {
        matches!(mode, RenderMode::Normal | RenderMode::Light | RenderMode::Mono)
    }

    fn render(&self, outline: &OutlineGlyph, mode: RenderMode, origin: Vector) -> Result<BitmapGlyph> {
        if !self.supports(mode) {
            return Err(Error::cannot_render_glyph(Module::Smooth));
        }
        let Some((polys, pixel_box, width, height)) = local_contours(&outline.outline, origin) else {
            return Ok(empty_bitmap(outline.advance));
        };
        match mode {
            RenderMode::Mono => {
                check_canvas_bound(width, height, GrayscaleLevel::Level2x2.oversample())?;
                let gray = render_grayscale(&polys, width, height, GrayscaleLevel::Level2x2, FillRule::NonZero);
                let stride = width.div_ceil(8);
                let mut buffer = vec![0u8; stride * height];
                for row in 0..height {
                    for col in 0..width {
                        if gray[row * width + col] >= 128 {
                            buffer[row * stride + col / 8] |= 0x80 >> (col % 8);
                        }
                    }
                }
                Ok(BitmapGlyph {
                    buffer,
                    pixel_mode: PixelMode::Mono,
                    pitch: stride as i32,
                    width: width as u32,
                    rows: height as u32,
                    bitmap_left: pixel_box.x_min.to_int(),
                    bitmap_top: pixel_box.y_max.to_int(),
                    advance: outline.advance,
                })
            }
            RenderMode::Normal | RenderMode::Light => {
                check_canvas_bound(width, height, self.level.oversample())?;
                let buffer = render_grayscale(&polys, width, height, self.level, FillRule::NonZero);
                Ok(BitmapGlyph {
                    buffer,
                    pixel_mode: PixelMode::Gray,
                    pitch: width as i32,
                    width: width as u32,
                    rows: height as u32,
                    bitmap_left: pixel_box.x_min.to_int(),
                    bitmap_top: pixel_box.y_max.to_int(),
                    advance: outline.advance,
                })
            }
            RenderMode::Lcd | RenderMode::LcdV => unreachable!("guarded by supports()"),
        }
    }
}

/// Software rasterizer for the two LCD subpixel render targets.
pub struct LcdRasterizer {
    level: GrayscaleLevel,
    filter: Box<dyn LcdFilter>,
    bgr: bool,
}

impl LcdRasterizer {
    pub fn new() -> LcdRasterizer {
        LcdRasterizer {
            level: GrayscaleLevel::Level4x4,
            filter: Box::new(DefaultLcdFilter),
            bgr: false,
        }
    }

    pub fn with_filter(filter: Box<dyn LcdFilter>) -> LcdRasterizer {
        LcdRasterizer {
            level: GrayscaleLevel::Level4x4,
            filter,
            bgr: false,
        }
    }

    /// Report subpixel order as BGR (some panel layouts) rather than RGB.
    pub fn bgr(mut self, bgr: bool) -> Self {
        self.bgr = bgr;
        self
    }
}

impl Default for LcdRasterizer {
    fn default() -> Self {
        LcdRasterizer::new()
    }
}

impl Renderer for LcdRasterizer {
    fn glyph_format(&self) -> GlyphFormat {
        GlyphFormat::Outline
    }

    fn supports(&self, mode: RenderMode) -> bool {
        matches!(mode, RenderMode::Lcd | RenderMode::LcdV)
    }

    fn render(&self, outline: &OutlineGlyph, mode: RenderMode, origin: Vector) -> Result<BitmapGlyph> {
        if !self.supports(mode) {
            return Err(Error::cannot_render_glyph(Module::Smooth));
        }
        let Some((polys, pixel_box, width, height)) = local_contours(&outline.outline, origin) else {
            return Ok(empty_bitmap(outline.advance));
        };
        // The striping axis is tripled ahead of the oversample/downsample
        // pass, so the canvas bound is checked against the tripled side.
        let (tripled_w, tripled_h) = match mode {
            RenderMode::Lcd => (width * 3, height),
            RenderMode::LcdV => (width, height * 3),
            _ => unreachable!(),
        };
        check_canvas_bound(tripled_w, tripled_h, self.level.oversample())?;

        let buffer = match mode {
            RenderMode::Lcd => render_lcd(&polys, width, height, self.level, FillRule::NonZero, self.filter.as_ref()),
            RenderMode::LcdV => {
                render_lcd_v(&polys, width, height, self.level, FillRule::NonZero, self.filter.as_ref())
            }
            _ => unreachable!(),
        };
        let (out_width, out_rows, pixel_mode) = match mode {
            RenderMode::Lcd if self.bgr => (width * 3, height, PixelMode::LcdBgr),
            RenderMode::Lcd => (width * 3, height, PixelMode::LcdRgb),
            RenderMode::LcdV if self.bgr => (width, height * 3, PixelMode::LcdVBgr),
            RenderMode::LcdV => (width, height * 3, PixelMode::LcdVRgb),
            _ => unreachable!(),
        };
        Ok(BitmapGlyph {
            buffer,
            pixel_mode,
            pitch: out_width as i32,
            width: out_width as u32,
            rows: out_rows as u32,
            bitmap_left: pixel_box.x_min.to_int(),
            bitmap_top: pixel_box.y_max.to_int(),
            advance: outline.advance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcore_geom::F26Dot6;

    fn pt(x: i32, y: i32) -> Vector {
        Vector::new(F26Dot6::from_int(x), F26Dot6::from_int(y))
    }

    fn triangle_glyph() -> OutlineGlyph {
        OutlineGlyph {
            outline: Outline::new(vec![pt(0, 0), pt(16, 0), pt(8, 16)], vec![0, 0, 0], vec![2]).unwrap(),
            advance: Vector::new(F26Dot6::from_int(16), F26Dot6::ZERO),
        }
    }

    #[test]
    fn normal_mode_produces_a_positive_pitch_gray_bitmap() {
        let r = SmoothRasterizer::new();
        let bmp = r.render(&triangle_glyph(), RenderMode::Normal, Vector::ZERO).unwrap();
        assert_eq!(bmp.pixel_mode, PixelMode::Gray);
        assert!(bmp.rows >= 1);
        assert!(bmp.pitch > 0);
    }

    #[test]
    fn mono_mode_thresholds_to_one_bit_per_pixel() {
        let r = SmoothRasterizer::new();
        let bmp = r.render(&triangle_glyph(), RenderMode::Mono, Vector::ZERO).unwrap();
        assert_eq!(bmp.pixel_mode, PixelMode::Mono);
        assert_eq!(bmp.pitch as usize, (bmp.width as usize).div_ceil(8));
    }

    #[test]
    fn smooth_rasterizer_rejects_lcd_modes() {
        let r = SmoothRasterizer::new();
        assert!(!r.supports(RenderMode::Lcd));
        assert!(r.render(&triangle_glyph(), RenderMode::Lcd, Vector::ZERO).is_err());
    }

    #[test]
    fn lcd_mode_triples_logical_width() {
        let r = LcdRasterizer::new();
        let bmp = r.render(&triangle_glyph(), RenderMode::Lcd, Vector::ZERO).unwrap();
        assert_eq!(bmp.pixel_mode, PixelMode::LcdRgb);
        assert_eq!(bmp.pitch, bmp.width as i32);
        assert_eq!(bmp.width as usize % 3, 0);
    }

    #[test]
    fn lcd_v_mode_triples_rows() {
        let r = LcdRasterizer::new();
        let bmp = r.render(&triangle_glyph(), RenderMode::LcdV, Vector::ZERO).unwrap();
        assert_eq!(bmp.pixel_mode, PixelMode::LcdVRgb);
        assert_eq!(bmp.rows as usize % 3, 0);
    }

    #[test]
    fn empty_outline_renders_an_empty_bitmap() {
        let g = OutlineGlyph {
            outline: Outline::new(vec![], vec![], vec![]).unwrap(),
            advance: Vector::ZERO,
        };
        let r = SmoothRasterizer::new();
        let bmp = r.render(&g, RenderMode::Normal, Vector::ZERO).unwrap();
        assert_eq!(bmp.width, 0);
        assert_eq!(bmp.rows, 0);
        assert!(bmp.buffer.is_empty());
    }

    #[test]
    fn oversized_request_reports_raster_overflow() {
        let huge = Outline::new(
            vec![pt(0, 0), pt(2_000_000, 0), pt(1_000_000, 2_000_000)],
            vec![0, 0, 0],
            vec![2],
        )
            .unwrap();
        let g = OutlineGlyph {
            outline: huge,
            advance: Vector::ZERO,
        };
        let r = SmoothRasterizer::new();
        let err = r.render(&g, RenderMode::Normal, Vector::ZERO).unwrap_err();
        assert_eq!(err.kind, ErrorKind::RasterOverflow);
    }
}
