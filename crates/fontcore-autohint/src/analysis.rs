//! Outline analysis: builds an [`AnalyzedOutline`] from a scaled
//! [`Outline`], classifying each point's in/out direction and angle.

use crate::point::{classify_direction, vector_angle, AnalyzedPoint, Direction, PointFlags};
use fontcore_geom::{Fixed, Outline, PointTag};

/// The hinter's working view of one outline.
pub struct AnalyzedOutline {
    pub points: Vec<AnalyzedPoint>,
    /// Index of the first point of each contour.
    pub contour_starts: Vec<usize>,
    /// Index one past the last point of each contour (exclusive end).
    pub contour_ends: Vec<usize>,
    pub x_scale: Fixed,
    pub y_scale: Fixed,
    pub edge_distance_threshold: i32,
}

impl AnalyzedOutline {
    /// Index of the contour containing point `i`.
    pub fn contour_of(&self, i: usize) -> usize {
        self.contour_starts
            .iter()
            .enumerate()
            .filter(|(_, &start)| start <= i)
            .last()
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }

    pub fn next_in_contour(&self, i: usize, contour: usize) -> usize {
        let start = self.contour_starts[contour];
        let end = self.contour_ends[contour];
        if i + 1 >= end {
            start
        } else {
            i + 1
        }
    }

    pub fn prev_in_contour(&self, i: usize, contour: usize) -> usize {
        let start = self.contour_starts[contour];
        let end = self.contour_ends[contour];
        if i == start {
            end - 1
        } else {
            i - 1
        }
    }
}

/// Build an [`AnalyzedOutline`] from a scaled outline, the matching
/// font-unit (unscaled) outline, and the scale factors used to produce
/// the scaled one.
pub fn analyze(
    font_unit_outline: &Outline,
    scaled_outline: &Outline,
    x_scale: Fixed,
    y_scale: Fixed,
) -> AnalyzedOutline {
    let n = scaled_outline.n_points();
    let mut contour_starts = Vec::with_capacity(scaled_outline.n_contours());
    let mut contour_ends = Vec::with_capacity(scaled_outline.n_contours());
    let mut start = 0usize;
    for &end in scaled_outline.contour_ends() {
        contour_starts.push(start);
        contour_ends.push(end as usize + 1);
        start = end as usize + 1;
    }

    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let fp = font_unit_outline.points()[i];
        let sp = scaled_outline.points()[i];
        let tag = scaled_outline.tags()[i];
        let mut flags = PointFlags::NONE;
        match tag {
            PointTag::ConicOffCurve => flags |= PointFlags::CONIC,
            PointTag::CubicOffCurve => flags |= PointFlags::CUBIC,
            PointTag::OnCurve => {}
        }
        points.push(AnalyzedPoint {
            fx: fp.x.to_int(),
            fy: fp.y.to_int(),
            ox: sp.x,
            oy: sp.y,
            x: sp.x,
            y: sp.y,
            u: sp.x,
            v: sp.y,
            in_dir: Direction::None,
            out_dir: Direction::None,
            in_angle: Fixed::ZERO,
            out_angle: Fixed::ZERO,
            flags,
        });
    }

    // Edge distance threshold: the font-unit gap that scales to 1/8 pixel,
    // so segments within it stay below a pixel apart once hinted. `scale_by` maps `F26Dot6::from_int(t)` through
    // `x_scale`; solving for `t` at a target of 8 raw units (1/8 px)
    // gives `t = 8192 / x_scale.raw()`.
    let edge_distance_threshold = if x_scale.raw() != 0 {
        (8192i64 / x_scale.raw() as i64).max(1) as i32
    } else {
        1
    };

    let mut outline = AnalyzedOutline {
        points,
        contour_starts,
        contour_ends,
        x_scale,
        y_scale,
        edge_distance_threshold,
    };

    for contour in 0..outline.contour_starts.len() {
        let start = outline.contour_starts[contour];
        let end = outline.contour_ends[contour];
        for i in start..end {
            let next = outline.next_in_contour(i, contour);
            let prev = outline.prev_in_contour(i, contour);
            let (fx, fy) = (outline.points[i].fx, outline.points[i].fy);
            let (nfx, nfy) = (outline.points[next].fx, outline.points[next].fy);
            let (pfx, pfy) = (outline.points[prev].fx, outline.points[prev].fy);
            let out_dx = nfx - fx;
            let out_dy = nfy - fy;
            let in_dx = fx - pfx;
            let in_dy = fy - pfy;
            outline.points[i].out_dir = classify_direction(out_dx, out_dy);
            outline.points[i].in_dir = classify_direction(in_dx, in_dy);
            outline.points[i].out_angle = vector_angle(out_dx, out_dy);
            outline.points[i].in_angle = vector_angle(in_dx, in_dy);
        }
    }

    outline
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcore_geom::{F26Dot6, Vector};

    fn square_outline(scale: i32) -> Outline {
        let pt = |x: i32, y: i32| Vector::new(F26Dot6::from_int(x * scale), F26Dot6::from_int(y * scale));
        Outline::new(
            vec![pt(0, 0), pt(10, 0), pt(10, 10), pt(0, 10)],
            vec![0, 0, 0, 0],
            vec![3],
        )
            .unwrap()
    }

    #[test]
    fn analysis_classifies_square_edges_as_axis_aligned() {
        let design = square_outline(1);
        let scaled = square_outline(1);
        let analyzed = analyze(&design, &scaled, Fixed::from_int(1), Fixed::from_int(1));
        assert_eq!(analyzed.points[0].out_dir, Direction::Right);
        assert_eq!(analyzed.points[1].out_dir, Direction::Up);
        assert_eq!(analyzed.points[2].out_dir, Direction::Left);
        assert_eq!(analyzed.points[3].out_dir, Direction::Down);
    }

    #[test]
    fn contour_wrap_around_is_cyclic() {
        let design = square_outline(1);
        let scaled = square_outline(1);
        let analyzed = analyze(&design, &scaled, Fixed::from_int(1), Fixed::from_int(1));
        assert_eq!(analyzed.next_in_contour(3, 0), 0);
        assert_eq!(analyzed.prev_in_contour(0, 0), 3);
    }
}
