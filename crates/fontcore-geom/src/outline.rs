//! Outlines: the point/tag/contour representation shared by every driver
//! and by the auto-hinter.

use crate::bbox::BBox;
use crate::vector::Vector;
use thiserror::Error;

/// What a given outline point means to the curve evaluator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointTag {
    /// On the curve.
    OnCurve,
    /// Off-curve, quadratic (conic) control point.
    ConicOffCurve,
    /// Off-curve, cubic control point.
    CubicOffCurve,
}

impl PointTag {
    fn from_byte(b: u8) -> Option<PointTag> {
        match b {
            0 => Some(PointTag::OnCurve),
            1 => Some(PointTag::ConicOffCurve),
            2 => Some(PointTag::CubicOffCurve),
            _ => None,
        }
    }

    fn to_byte(self) -> u8 {
        match self {
            PointTag::OnCurve => 0,
            PointTag::ConicOffCurve => 1,
            PointTag::CubicOffCurve => 2,
        }
    }

    /// Whether this tag marks a point lying on the contour itself.
    pub fn is_on_curve(self) -> bool {
        matches!(self, PointTag::OnCurve)
    }
}

/// Why an [`Outline`] failed to validate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OutlineError {
    #[error("point count ({points}) does not match tag count ({tags})")]
    PointTagMismatch { points: usize, tags: usize },
    #[error("contour end indices are not strictly increasing")]
    ContourEndsNotIncreasing,
    #[error("last contour end ({last}) does not equal n_points-1 ({expected})")]
    LastContourEndMismatch { last: i32, expected: i32 },
    #[error("unrecognized point tag byte {0}")]
    BadTag(u8),
    #[error("two consecutive cubic off-curve points ending a contour without an on-curve point")]
    DanglingCubicPair,
    #[error("outline has no contours")]
    Empty,
}

/// A glyph outline: points in font units (or subpixel units once scaled),
/// their on/off-curve tags, and the index of each contour's last point.
///
/// Invariants (validated by [`Outline::validate`]):
/// - `tags.len() == points.len()`.
/// - `contour_ends` is strictly increasing.
/// - `contour_ends.last() == points.len() - 1`.
/// - no two consecutive cubic off-curve points end a contour without a
///   trailing on-curve point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outline {
    points: Vec<Vector>,
    tags: Vec<PointTag>,
    contour_ends: Vec<i32>,
}

impl Outline {
    /// Build an outline from raw parts, validating point/tag/contour invariants.
    pub fn new(
        points: Vec<Vector>,
        tag_bytes: Vec<u8>,
        contour_ends: Vec<i32>,
    ) -> Result<Outline, OutlineError> {
        if points.len() != tag_bytes.len() {
            return Err(OutlineError::PointTagMismatch {
                points: points.len(),
                tags: tag_bytes.len(),
            });
        }
        let tags = tag_bytes
            .iter()
            .map(|&b| PointTag::from_byte(b).ok_or(OutlineError::BadTag(b)))
            .collect::<Result<Vec<_>, _>>()?;
        let outline = Outline {
            points,
            tags,
            contour_ends,
        };
        outline.validate()?;
        Ok(outline)
    }

    /// Re-check every spec invariant against the current contents.
    pub fn validate(&self) -> Result<(), OutlineError> {
        if self.tags.len() != self.points.len() {
            return Err(OutlineError::PointTagMismatch {
                points: self.points.len(),
                tags: self.tags.len(),
            });
        }
        let Some(&last) = self.contour_ends.last() else {
            return if self.points.is_empty() {
                Ok(())
            } else {
                Err(OutlineError::Empty)
            };
        };
        for pair in self.contour_ends.windows(2) {
            if pair[0] >= pair[1] {
                return Err(OutlineError::ContourEndsNotIncreasing);
            }
        }
        let expected = self.points.len() as i32 - 1;
        if last != expected {
            return Err(OutlineError::LastContourEndMismatch { last, expected });
        }
        let mut start = 0usize;
        for &end in &self.contour_ends {
            let end = end as usize;
            if end >= 1 && self.tags[end] == PointTag::CubicOffCurve {
                let prev = if end == start { end } else { end - 1 };
                if self.tags[prev] == PointTag::CubicOffCurve {
                    return Err(OutlineError::DanglingCubicPair);
                }
            }
            start = end + 1;
        }
        Ok(())
    }

    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    pub fn tags(&self) -> &[PointTag] {
        &self.tags
    }

    pub fn contour_ends(&self) -> &[i32] {
        &self.contour_ends
    }

    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    pub fn n_contours(&self) -> usize {
        self.contour_ends.len()
    }

    /// Points belonging to contour `i` (0-based).
    pub fn contour_points(&self, i: usize) -> &[Vector] {
        let start = if i == 0 {
            0
        } else {
            self.contour_ends[i - 1] as usize + 1
        };
        let end = self.contour_ends[i] as usize + 1;
        &self.points[start..end]
    }

    /// Control-box: the bounding box of the raw point set, including
    /// off-curve control points (as opposed to the tighter curve bbox).
    pub fn control_box(&self) -> Option<BBox> {
        BBox::from_points(&self.points)
    }

    /// Produce a new outline with every point scaled, preserving tags and
    /// contour structure. Used when mapping a font-unit outline into
    /// subpixel space via `Size`'s scale factors.
    pub fn map_points(&self, f: impl Fn(Vector) -> Vector) -> Outline {
        Outline {
            points: self.points.iter().copied().map(f).collect(),
            tags: self.tags.clone(),
            contour_ends: self.contour_ends.clone(),
        }
    }

    /// Mutable access to points in place, for hinting passes that adjust
    /// coordinates without changing topology.
    pub fn points_mut(&mut self) -> &mut [Vector] {
        &mut self.points
    }

    /// Serialize tags back to the legal byte subset, e.g. for drivers that
    /// hand raw bytes to a rasterizer.
    pub fn tag_bytes(&self) -> Vec<u8> {
        self.tags.iter().map(|t| t.to_byte()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::F26Dot6;

    fn pt(x: i32, y: i32) -> Vector {
        Vector::new(F26Dot6::from_int(x), F26Dot6::from_int(y))
    }

    #[test]
    fn a_triangle_is_valid() {
        let points = vec![pt(0, 0), pt(10, 0), pt(5, 10)];
        let tags = vec![0, 0, 0];
        let o = Outline::new(points, tags, vec![2]).unwrap();
        assert_eq!(o.n_contours(), 1);
        assert_eq!(o.contour_points(0).len(), 3);
    }

    #[test]
    fn mismatched_point_and_tag_counts_are_rejected() {
        let err = Outline::new(vec![pt(0, 0)], vec![0, 0], vec![0]).unwrap_err();
        assert_eq!(
            err,
            OutlineError::PointTagMismatch { points: 1, tags: 2 }
        );
    }

    #[test]
    fn non_increasing_contour_ends_are_rejected() {
        let points = vec![pt(0, 0), pt(1, 0), pt(1, 1), pt(0, 1)];
        let tags = vec![0, 0, 0, 0];
        let err = Outline::new(points, tags, vec![1, 1, 3]).unwrap_err();
        assert_eq!(err, OutlineError::ContourEndsNotIncreasing);
    }

    #[test]
    fn last_contour_end_must_cover_all_points() {
        let points = vec![pt(0, 0), pt(1, 0), pt(1, 1)];
        let tags = vec![0, 0, 0];
        let err = Outline::new(points, tags, vec![1]).unwrap_err();
        assert_eq!(
            err,
            OutlineError::LastContourEndMismatch { last: 1, expected: 2 }
        );
    }

    #[test]
    fn unrecognized_tag_byte_is_rejected() {
        let err = Outline::new(vec![pt(0, 0)], vec![9], vec![0]).unwrap_err();
        assert_eq!(err, OutlineError::BadTag(9));
    }

    #[test]
    fn dangling_cubic_pair_at_contour_end_is_rejected() {
        let points = vec![pt(0, 0), pt(1, 1), pt(2, 2)];
        let tags = vec![0, 2, 2];
        let err = Outline::new(points, tags, vec![2]).unwrap_err();
        assert_eq!(err, OutlineError::DanglingCubicPair);
    }

    #[test]
    fn map_points_preserves_tags_and_contours() {
        let points = vec![pt(0, 0), pt(10, 0), pt(5, 10)];
        let tags = vec![0, 0, 0];
        let o = Outline::new(points, tags, vec![2]).unwrap();
        let moved = o.map_points(|v| v + pt(1, 1));
        assert_eq!(moved.tags(), o.tags());
        assert_eq!(moved.contour_ends(), o.contour_ends());
        assert_eq!(moved.points()[0], pt(1, 1));
    }
}
