//! LCD subpixel rendering: triples the effective resolution along the
//! striping axis by rendering three subpixel-offset coverage columns
//! (or rows, for vertical striping) into one wide grayscale buffer, then
//! runs a low-pass filter across each row's triplets.

use crate::gray::{render_grayscale, GrayscaleLevel};
use crate::scan::FillRule;
use fontcore_geom::Vector;

/// A low-pass filter applied once per output row of an LCD bitmap,
/// smoothing color fringing across RGB triplets.
pub trait LcdFilter: Send + Sync {
    /// Filter one row in place. `row` holds `3 * logical_width` bytes.
    fn apply(&self, row: &mut [u8]);
}

/// The default five-tap LCD filter weights, summing to 256.
pub struct DefaultLcdFilter;

impl LcdFilter for DefaultLcdFilter {
    fn apply(&self, row: &mut [u8]) {
        const WEIGHTS: [u32; 5] = [0x08, 0x4D, 0x56, 0x4D, 0x08];
        let input = row.to_vec();
        let n = input.len();
        for i in 0..n {
            let mut sum = 0u32;
            for (tap, &w) in WEIGHTS.iter().enumerate() {
                let offset = tap as isize - 2;
                let j = i as isize + offset;
                if j >= 0 && (j as usize) < n {
                    sum += input[j as usize] as u32 * w;
                }
            }
            row[i] = (sum >> 8).min(255) as u8;
        }
    }
}

/// Render an LCD (horizontal-striping) bitmap: `width` is the logical
/// pixel width; the returned buffer is `3 * width * height` bytes, one
/// grayscale sample per subpixel column, filtered row by row.
pub fn render_lcd(
    contours: &[Vec<Vector>],
    width: usize,
    height: usize,
    level: GrayscaleLevel,
    rule: FillRule,
    filter: &dyn LcdFilter,
) -> Vec<u8> {
    let mut buf = render_grayscale(contours, width * 3, height, level, rule);
    for row in buf.chunks_mut(width * 3) {
        filter.apply(row);
    }
    buf
}

/// Render an LCD-V (vertical-striping) bitmap: `height` is the logical
/// pixel height; the returned buffer is `width * 3 * height` bytes,
/// row-major over `width` columns and `3 * height` physical sub-rows.
/// One logical pixel's RGB triplet is the three sub-rows stacked at a
/// fixed column, so the filter runs column by column rather than row by
/// row as in [`render_lcd`].
pub fn render_lcd_v(
    contours: &[Vec<Vector>],
    width: usize,
    height: usize,
    level: GrayscaleLevel,
    rule: FillRule,
    filter: &dyn LcdFilter,
) -> Vec<u8> {
    let mut buf = render_grayscale(contours, width, height * 3, level, rule);
    let mut column = vec![0u8; height * 3];
    for x in 0..width {
        for (row, slot) in column.iter_mut().enumerate() {
            *slot = buf[row * width + x];
        }
        filter.apply(&mut column);
        for (row, &v) in column.iter().enumerate() {
            buf[row * width + x] = v;
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcore_geom::F26Dot6;

    fn pt(x: i32, y: i32) -> Vector {
        Vector::new(F26Dot6::from_int(x), F26Dot6::from_int(y))
    }

    #[test]
    fn lcd_output_is_three_times_the_logical_width() {
        let square = vec![vec![pt(0, 0), pt(4, 0), pt(4, 4), pt(0, 4), pt(0, 0)]];
        let out = render_lcd(&square, 4, 4, GrayscaleLevel::Level4x4, FillRule::NonZero, &DefaultLcdFilter);
        assert_eq!(out.len(), 3 * 4 * 4);
    }

    #[test]
    fn lcd_v_output_is_three_times_the_logical_height() {
        let square = vec![vec![pt(0, 0), pt(4, 0), pt(4, 4), pt(0, 4), pt(0, 0)]];
        let out = render_lcd_v(&square, 4, 4, GrayscaleLevel::Level4x4, FillRule::NonZero, &DefaultLcdFilter);
        assert_eq!(out.len(), 4 * 3 * 4);
    }

    /// A filter that marks whatever slice it was handed by writing a
    /// sentinel into its first byte, so the test can tell whether
    /// `render_lcd_v` invoked it on a column's three stacked sub-rows
    /// or (incorrectly) on a single physical row's columns.
    struct MarkerFilter;

    impl LcdFilter for MarkerFilter {
        fn apply(&self, row: &mut [u8]) {
            row[0] = row.len() as u8;
        }
    }

    #[test]
    fn lcd_v_filter_runs_once_per_column_over_three_stacked_sub_rows() {
        let square = vec![vec![pt(0, 0), pt(4, 0), pt(4, 4), pt(0, 4), pt(0, 0)]];
        let width = 4;
        let height = 4;
        let out = render_lcd_v(&square, width, height, GrayscaleLevel::Level4x4, FillRule::NonZero, &MarkerFilter);
        // Each of the `width` columns got filtered with a 3*height-byte
        // slice, so the marker (slice length) lands at row 0 of every
        // column, not just the start of each physical row.
        for x in 0..width {
            assert_eq!(out[x], (3 * height) as u8);
        }
    }

    #[test]
    fn default_filter_preserves_uniform_rows() {
        let mut row = vec![200u8; 12];
        DefaultLcdFilter.apply(&mut row);
        for &b in &row {
            assert!((195..=200).contains(&b), "got {b}");
        }
    }

    #[test]
    fn default_filter_smooths_a_sharp_edge() {
        let mut row = vec![0u8; 6];
        row[3] = 255;
        row[4] = 255;
        row[5] = 255;
        DefaultLcdFilter.apply(&mut row);
        // The edge at index 3 should no longer be a hard 0 -> 255 jump.
        assert!(row[2] > 0);
    }
}
