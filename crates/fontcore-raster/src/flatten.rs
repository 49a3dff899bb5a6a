//! Curve flattening: walks an outline's on/off-curve point stream and
//! emits closed polylines, subdividing quadratic and cubic spans with
//! de Casteljau's algorithm.
//!
//! Consecutive conic (quadratic) off-curve points are legal in an
//! `Outline` and imply an on-curve point at their midpoint, the TrueType
//! convention; consecutive cubic off-curve points are not (the outline's
//! own invariant already rejects those).

use fontcore_geom::{F26Dot6, Outline, PointTag, Vector};

/// Control-point deviation, in 26.6 units, below which a curve span is
/// treated as straight.
pub const FLATNESS_THRESHOLD: F26Dot6 = F26Dot6::from_raw(4);
const MAX_DEPTH: u32 = 16;

fn mid(a: F26Dot6, b: F26Dot6) -> F26Dot6 {
    F26Dot6::from_raw((a.raw() + b.raw()) / 2)
}

fn midpoint(a: Vector, b: Vector) -> Vector {
    Vector::new(mid(a.x, b.x), mid(a.y, b.y))
}

fn manhattan(a: Vector, b: Vector) -> F26Dot6 {
    F26Dot6::from_raw((a.x.raw() - b.x.raw()).abs() + (a.y.raw() - b.y.raw()).abs())
}

fn subdivide_quadratic(p0: Vector, p1: Vector, p2: Vector, depth: u32, out: &mut Vec<Vector>) {
    let flatness = manhattan(p1, midpoint(p0, p2));
    if depth >= MAX_DEPTH || flatness <= FLATNESS_THRESHOLD {
        out.push(p2);
        return;
    }
    let m01 = midpoint(p0, p1);
    let m12 = midpoint(p1, p2);
    let m012 = midpoint(m01, m12);
    subdivide_quadratic(p0, m01, m012, depth + 1, out);
    subdivide_quadratic(m012, m12, p2, depth + 1, out);
}

fn subdivide_cubic(p0: Vector, p1: Vector, p2: Vector, p3: Vector, depth: u32, out: &mut Vec<Vector>) {
    let chord = midpoint(p0, p3);
    let flatness = manhattan(p1, chord).max(manhattan(p2, chord));
    if depth >= MAX_DEPTH || flatness <= FLATNESS_THRESHOLD {
        out.push(p3);
        return;
    }
    let m01 = midpoint(p0, p1);
    let m12 = midpoint(p1, p2);
    let m23 = midpoint(p2, p3);
    let m012 = midpoint(m01, m12);
    let m123 = midpoint(m12, m23);
    let m0123 = midpoint(m012, m123);
    subdivide_cubic(p0, m01, m012, m0123, depth + 1, out);
    subdivide_cubic(m0123, m123, m23, p3, depth + 1, out);
}

fn contour_range(outline: &Outline, i: usize) -> std::ops::Range<usize> {
    let start = if i == 0 {
        0
    } else {
        outline.contour_ends()[i - 1] as usize + 1
    };
    let end = outline.contour_ends()[i] as usize + 1;
    start..end
}

/// Flatten a single contour's points/tags into a closed polyline: the
/// first and last points of the returned `Vec` coincide.
fn flatten_contour(points: &[Vector], tags: &[PointTag]) -> Vec<Vector> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }
    let on_curve_start = tags.iter().position(|t| t.is_on_curve());
    let (start_point, first_idx, steps) = match on_curve_start {
        Some(i) => (points[i], i, n - 1),
        None => (midpoint(points[n - 1], points[0]), 0, n),
    };

    let mut out = vec![start_point];
    let mut pen = start_point;
    let mut pending: Vec<(Vector, PointTag)> = Vec::new();

    let flush = |pending: &mut Vec<(Vector, PointTag)>, pen: Vector, target: Vector, out: &mut Vec<Vector>| {
        match pending.as_slice() {
            [] => out.push(target),
            [(c, _)] => subdivide_quadratic(pen, *c, target, 0, out),
            [(c1, _), (c2, _)] => subdivide_cubic(pen, *c1, *c2, target, 0, out),
            // Malformed per `Outline::validate`; fall back to a straight
            // line rather than panicking on untrusted driver output.
            _ => out.push(target),
        }
        pending.clear();
    };

    for step in 1..=steps {
        let idx = (first_idx + step) % n;
        let (p, tag) = (points[idx], tags[idx]);
        match tag {
            PointTag::OnCurve => {
                flush(&mut pending, pen, p, &mut out);
                pen = p;
            }
            PointTag::ConicOffCurve => {
                if let Some(&(prev, PointTag::ConicOffCurve)) = pending.last() {
                    let implied = midpoint(prev, p);
                    subdivide_quadratic(pen, prev, implied, 0, &mut out);
                    pen = implied;
                    pending.clear();
                }
                pending.push((p, tag));
            }
            PointTag::CubicOffCurve => pending.push((p, tag)),
        }
    }
    flush(&mut pending, pen, start_point, &mut out);
    out
}

/// Flatten every contour of `outline` into closed polylines.
pub fn flatten_outline(outline: &Outline) -> Vec<Vec<Vector>> {
    (0..outline.n_contours())
        .map(|i| {
            let range = contour_range(outline, i);
            flatten_contour(&outline.points()[range.clone()], &outline.tags()[range])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: i32, y: i32) -> Vector {
        Vector::new(F26Dot6::from_int(x), F26Dot6::from_int(y))
    }

    #[test]
    fn triangle_flattens_to_its_own_three_points() {
        let o = Outline::new(vec![pt(0, 0), pt(10, 0), pt(5, 10)], vec![0, 0, 0], vec![2]).unwrap();
        let polys = flatten_outline(&o);
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].first(), polys[0].last());
        assert_eq!(polys[0][0], pt(0, 0));
    }

    #[test]
    fn single_conic_arc_is_subdivided() {
        // on(0,0) off(10,10) on(20,0): a bowed curve, not a straight line.
        let o = Outline::new(vec![pt(0, 0), pt(10, 10), pt(20, 0)], vec![0, 1, 0], vec![2]).unwrap();
        let polys = flatten_outline(&o);
        assert!(polys[0].len() > 3, "curved contour should subdivide into several segments");
        assert_eq!(*polys[0].last().unwrap(), pt(0, 0));
    }

    #[test]
    fn consecutive_conics_imply_an_on_curve_midpoint() {
        // All-conic contour (e.g. some TrueType "o" glyphs): off, off, off.
        let o = Outline::new(
            vec![pt(0, 10), pt(10, 0), pt(0, -10), pt(-10, 0)],
            vec![1, 1, 1, 1],
            vec![3],
        )
        .unwrap();
        let polys = flatten_outline(&o);
        assert_eq!(polys[0].first(), polys[0].last());
        assert!(polys[0].len() > 4);
    }

    #[test]
    fn cubic_span_closes_back_to_start() {
        let o = Outline::new(
            vec![pt(0, 0), pt(0, 10), pt(10, 10), pt(10, 0)],
            vec![0, 2, 2, 0],
            vec![3],
        )
        .unwrap();
        let polys = flatten_outline(&o);
        assert_eq!(polys[0].first(), polys[0].last());
    }

    #[test]
    fn straight_line_is_not_subdivided() {
        let o = Outline::new(vec![pt(0, 0), pt(5, 5), pt(10, 10)], vec![0, 1, 0], vec![2]).unwrap();
        let polys = flatten_outline(&o);
        // The control point sits on the chord, so the curved span is flat
        // immediately: start, the span's endpoint, then the closing edge
        // back to start (three points, not a subdivided fan).
        assert_eq!(polys[0].len(), 3);
    }
}
