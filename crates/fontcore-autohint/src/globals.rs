//! Face-global hinter metrics: standard widths/heights and blue
//! zones, kept in both font-unit ("design") and subpixel ("scaled") form.

use fontcore_geom::Fixed;

/// Upper bound on tracked standard stem widths.
pub const MAX_WIDTHS: usize = 12;
/// Upper bound on tracked standard stem heights.
pub const MAX_HEIGHTS: usize = 12;
/// Number of blue zones: capital-top, capital-bottom, small-top,
/// small-bottom, small-descender.
pub const BLUE_MAX: usize = 5;

/// Which of the five fixed blue zones a reference/shoot pair describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlueZoneKind {
    CapitalTop,
    CapitalBottom,
    SmallTop,
    SmallBottom,
    SmallDescender,
}

pub const BLUE_ZONE_KINDS: [BlueZoneKind; BLUE_MAX] = [
    BlueZoneKind::CapitalTop,
    BlueZoneKind::CapitalBottom,
    BlueZoneKind::SmallTop,
    BlueZoneKind::SmallBottom,
    BlueZoneKind::SmallDescender,
];

/// One "twin" of the face-global metrics: either design (font units) or
/// scaled (subpixels), recomputed whenever the scale changes.
#[derive(Clone, Debug, Default)]
pub struct AxisMetrics {
    pub widths: Vec<i32>,
    pub heights: Vec<i32>,
    pub blue_refs: [i32; BLUE_MAX],
    pub blue_shoots: [i32; BLUE_MAX],
    pub blue_active: [bool; BLUE_MAX],
}

impl AxisMetrics {
    pub fn push_width(&mut self, width: i32) {
        if self.widths.len() < MAX_WIDTHS {
            self.widths.push(width);
            self.widths.sort_unstable();
        }
    }

    pub fn push_height(&mut self, height: i32) {
        if self.heights.len() < MAX_HEIGHTS {
            self.heights.push(height);
            self.heights.sort_unstable();
        }
    }

    /// Nearest standard width to `value`, within `tolerance` (font units
    /// or subpixels, matching `value`'s space). `None` if nothing is
    /// close enough.
    pub fn nearest_width(&self, value: i32, tolerance: i32) -> Option<i32> {
        self.widths
            .iter()
            .copied()
            .min_by_key(|w| (w - value).abs())
            .filter(|w| (w - value).abs() <= tolerance)
    }
}

/// Design and scaled twin structures for one face.
#[derive(Clone, Debug, Default)]
pub struct FaceGlobals {
    pub design: AxisMetrics,
    pub scaled: AxisMetrics,
}

impl FaceGlobals {
    /// Recompute `scaled` from `design` for a new pair of scale factors.
    pub fn rescale(&mut self, x_scale: Fixed, y_scale: Fixed) {
        use fontcore_geom::F26Dot6;
        self.scaled.widths = self
            .design
            .widths
            .iter()
            .map(|&w| F26Dot6::from_int(w).scale_by(x_scale).raw())
            .collect();
        self.scaled.heights = self
            .design
            .heights
            .iter()
            .map(|&h| F26Dot6::from_int(h).scale_by(y_scale).raw())
            .collect();
        for i in 0..BLUE_MAX {
            self.scaled.blue_refs[i] =
            F26Dot6::from_int(self.design.blue_refs[i]).scale_by(y_scale).raw();
            self.scaled.blue_shoots[i] =
            F26Dot6::from_int(self.design.blue_shoots[i]).scale_by(y_scale).raw();
            self.scaled.blue_active[i] = self.design.blue_active[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescale_applies_scale_to_widths_and_blues() {
        use fontcore_geom::F26Dot6;
        let mut g = FaceGlobals::default();
        g.design.push_width(100);
        g.design.blue_refs[0] = 700;
        g.design.blue_active[0] = true;
        let scale = Fixed::from_f64(0.016);
        g.rescale(scale, scale);
        assert_eq!(g.scaled.widths[0], F26Dot6::from_int(100).scale_by(scale).raw());
        assert_eq!(g.scaled.blue_refs[0], F26Dot6::from_int(700).scale_by(scale).raw());
        assert!(g.scaled.blue_active[0]);
    }

    #[test]
    fn nearest_width_respects_tolerance() {
        let mut m = AxisMetrics::default();
        m.push_width(80);
        m.push_width(120);
        assert_eq!(m.nearest_width(85, 10), Some(80));
        assert_eq!(m.nearest_width(100, 5), None);
    }

    #[test]
    fn widths_are_bounded_by_max_widths() {
        let mut m = AxisMetrics::default();
        for i in 0..(MAX_WIDTHS + 5) {
            m.push_width(i as i32);
        }
        assert_eq!(m.widths.len(), MAX_WIDTHS);
    }
}
