//! Grayscale rendering: rasterize at an oversampled grid, then box-filter
//! down to one coverage byte per device pixel.

use crate::scan::{FillRule, ScanConverter};
use fontcore_geom::Vector;

/// Oversampling factor applied in both axes before downsampling to an
/// 8-bit coverage value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GrayscaleLevel {
    Level2x2,
    Level4x4,
    Level8x8,
}

impl GrayscaleLevel {
    pub fn oversample(self) -> usize {
        match self {
            GrayscaleLevel::Level2x2 => 2,
            GrayscaleLevel::Level4x4 => 4,
            GrayscaleLevel::Level8x8 => 8,
        }
    }
}

/// Rasterize `contours` (already translated into this function's pixel
/// space, not yet oversampled) into a `width × height` grid of 8-bit
/// coverage values, antialiasing by oversampling at `level` and
/// averaging each block back down to one output byte.
pub fn render_grayscale(
    contours: &[Vec<Vector>],
    width: usize,
    height: usize,
    level: GrayscaleLevel,
    rule: FillRule,
) -> Vec<u8> {
    let oversample = level.oversample();
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let scaled: Vec<Vec<Vector>> = contours
        .iter()
        .map(|c| c.iter().map(|p| scale_point(*p, oversample)).collect())
        .collect();
    let mut sc = ScanConverter::new(width * oversample, height * oversample);
    sc.fill(&scaled, rule);

    let max = (oversample * oversample) as u32;
    let mut out = vec![0u8; width * height];
    for oy in 0..height {
        for ox in 0..width {
            let mut sum = 0u32;
            for dy in 0..oversample {
                for dx in 0..oversample {
                    if sc.is_covered(ox * oversample + dx, oy * oversample + dy) {
                        sum += 1;
                    }
                }
            }
            out[oy * width + ox] = ((sum * 255 + max / 2) / max) as u8;
        }
    }
    out
}

fn scale_point(p: Vector, oversample: usize) -> Vector {
    use fontcore_geom::F26Dot6;
    let scale = oversample as i32;
    Vector::new(
        F26Dot6::from_raw(p.x.raw() * scale),
        F26Dot6::from_raw(p.y.raw() * scale),
    )
}
