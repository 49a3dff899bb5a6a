//! Translates skrifa's pen callbacks directly into a [`fontcore_geom::Outline`]:
//! quadratic spans keep their single conic off-curve point, cubic spans
//! their pair of cubic off-curve points, matching the on/off-curve tagging
//! both glyf and CFF outlines are recorded into.

use fontcore_geom::{F26Dot6, Outline, OutlineError, Vector};
use skrifa::outline::OutlinePen;

#[derive(Default)]
pub(crate) struct OutlineBuilder {
    points: Vec<Vector>,
    tags: Vec<u8>,
    contour_ends: Vec<i32>,
    contour_start: usize,
}

impl OutlineBuilder {
    pub(crate) fn new() -> Self {
        OutlineBuilder::default()
    }

    fn push(&mut self, x: f32, y: f32, tag: u8) {
        self.points
            .push(Vector::new(F26Dot6::from_f64(x as f64), F26Dot6::from_f64(y as f64)));
        self.tags.push(tag);
    }

    pub(crate) fn finish(self) -> Result<Outline, OutlineError> {
        Outline::new(self.points, self.tags, self.contour_ends)
    }
}

impl OutlinePen for OutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.contour_start = self.points.len();
        self.push(x, y, 0);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push(x, y, 0);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.push(cx0, cy0, 1);
        self.push(x, y, 0);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.push(cx0, cy0, 2);
        self.push(cx1, cy1, 2);
        self.push(x, y, 0);
    }

    fn close(&mut self) {
        // A subpath that never advanced past its move_to is empty; don't
        // record a zero-length contour for it.
        if self.points.len() > self.contour_start {
            self.contour_ends.push(self.points.len() as i32 - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_pen_sequence_produces_a_valid_outline() {
        let mut b = OutlineBuilder::new();
        b.move_to(0.0, 0.0);
        b.line_to(10.0, 0.0);
        b.line_to(5.0, 10.0);
        b.close();
        let outline = b.finish().unwrap();
        assert_eq!(outline.n_contours(), 1);
        assert_eq!(outline.n_points(), 3);
    }

    #[test]
    fn quad_to_emits_one_conic_off_curve_point() {
        let mut b = OutlineBuilder::new();
        b.move_to(0.0, 0.0);
        b.quad_to(5.0, 10.0, 10.0, 0.0);
        b.close();
        let outline = b.finish().unwrap();
        assert_eq!(outline.tags(), &[fontcore_geom::PointTag::OnCurve, fontcore_geom::PointTag::ConicOffCurve, fontcore_geom::PointTag::OnCurve]);
    }

    #[test]
    fn curve_to_emits_two_cubic_off_curve_points() {
        let mut b = OutlineBuilder::new();
        b.move_to(0.0, 0.0);
        b.curve_to(2.0, 5.0, 8.0, 5.0, 10.0, 0.0);
        b.close();
        let outline = b.finish().unwrap();
        assert_eq!(
            outline.tags(),
            &[
                fontcore_geom::PointTag::OnCurve,
                fontcore_geom::PointTag::CubicOffCurve,
                fontcore_geom::PointTag::CubicOffCurve,
                fontcore_geom::PointTag::OnCurve,
            ]
        );
    }

    #[test]
    fn a_move_to_without_further_commands_records_no_contour() {
        let mut b = OutlineBuilder::new();
        b.move_to(0.0, 0.0);
        b.close();
        let outline = b.finish().unwrap();
        assert_eq!(outline.n_contours(), 0);
    }

    #[test]
    fn two_contours_close_independently() {
        let mut b = OutlineBuilder::new();
        b.move_to(0.0, 0.0);
        b.line_to(10.0, 0.0);
        b.line_to(5.0, 10.0);
        b.close();
        b.move_to(20.0, 0.0);
        b.line_to(30.0, 0.0);
        b.line_to(25.0, 10.0);
        b.close();
        let outline = b.finish().unwrap();
        assert_eq!(outline.n_contours(), 2);
        assert_eq!(outline.contour_ends(), &[2, 5]);
    }
}
