//! Segment construction: maximal runs of points moving along one
//! axis in one direction.

use crate::analysis::AnalyzedOutline;
use crate::point::Direction;

/// A maximal run of points along one axis, a candidate member of an edge.
#[derive(Clone, Debug)]
pub struct Segment {
    pub dir: Direction,
    pub first: usize,
    pub last: usize,
    pub contour: usize,
    /// Axis position in font units: x for a vertical segment, y for a
    /// horizontal one.
    pub pos: i32,
    pub min_coord: i32,
    pub max_coord: i32,
    pub edge: Option<usize>,
    pub link: Option<usize>,
    pub serif: Option<usize>,
    pub num_linked: i32,
    pub score: i32,
}

/// Build segments for one axis. `vertical` selects segments formed by
/// runs moving up/down (used to build vertical stem edges, keyed by x);
/// otherwise runs moving left/right (used to build horizontal edges used
/// for blue zones, keyed by y).
pub fn build_segments(outline: &AnalyzedOutline, vertical: bool) -> Vec<Segment> {
    let mut segments = Vec::new();
    for contour in 0..outline.contour_starts.len() {
        let start = outline.contour_starts[contour];
        let end = outline.contour_ends[contour];
        let len = end - start;
        if len < 2 {
            continue;
        }
        let wants = |d: Direction| {
            if vertical {
                matches!(d, Direction::Up | Direction::Down)
            } else {
                matches!(d, Direction::Left | Direction::Right)
            }
        };

        let mut visited = vec![false; len];
        // Find a starting offset not mid-run, by scanning for a direction
        // change; if the whole contour is one run (a closed stem), start
        // at index 0.
        let mut cursor = 0usize;
        while cursor < len {
            let i = start + cursor;
            if visited[cursor] || !wants(outline.points[i].out_dir) {
                cursor += 1;
                continue;
            }
            let dir = outline.points[i].out_dir;
            let mut j = i;
            loop {
                let idx_in_contour = j - start;
                if outline.points[j].out_dir != dir {
                    break;
                }
                visited[idx_in_contour] = true;
                let next = outline.next_in_contour(j, contour);
                if next == i {
                    j = next;
                    break;
                }
                j = next;
            }
            let first = i;
            let last = j;
            let (pos, min_coord, max_coord) = axis_extent(outline, first, last, contour, vertical);
            segments.push(Segment {
                dir,
                first,
                last,
                contour,
                pos,
                min_coord,
                max_coord,
                edge: None,
                link: None,
                serif: None,
                num_linked: 0,
                score: 0,
            });
            cursor += 1;
        }
    }
    segments
}

fn axis_extent(
    outline: &AnalyzedOutline,
    first: usize,
    last: usize,
    contour: usize,
    vertical: bool,
) -> (i32, i32, i32) {
    let mut i = first;
    let (mut lo, mut hi);
    let first_pos = if vertical {
        outline.points[first].fx
    } else {
        outline.points[first].fy
    };
    lo = if vertical {
        outline.points[first].fy
    } else {
        outline.points[first].fx
    };
    hi = lo;
    loop {
        let v = if vertical {
            outline.points[i].fy
        } else {
            outline.points[i].fx
        };
        lo = lo.min(v);
        hi = hi.max(v);
        if i == last {
            break;
        }
        i = outline.next_in_contour(i, contour);
    }
    (first_pos, lo, hi)
}

/// Pair up segments of opposite direction into stems: for each segment,
/// link it to the nearest segment of opposite direction. Deterministic: segments are visited
/// in index order and ties broken by the smaller index.
pub fn link_stems(segments: &mut [Segment]) {
    for i in 0..segments.len() {
        if segments[i].link.is_some() {
            continue;
        }
        let mut best: Option<(usize, i32)> = None;
        for j in 0..segments.len() {
            if i == j || !segments[i].dir.is_opposite(segments[j].dir) {
                continue;
            }
            let dist = (segments[j].pos - segments[i].pos).abs();
            if best.map(|(_, d)| dist < d).unwrap_or(true) {
                best = Some((j, dist));
            }
        }
        if let Some((j, _)) = best {
            segments[i].link = Some(j);
            segments[j].link = Some(i);
            segments[i].num_linked += 1;
            segments[j].num_linked += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use fontcore_geom::{F26Dot6, Fixed, Outline, Vector};

    fn square_outline() -> Outline {
        let pt = |x: i32, y: i32| Vector::new(F26Dot6::from_int(x), F26Dot6::from_int(y));
        Outline::new(
            vec![pt(0, 0), pt(10, 0), pt(10, 10), pt(0, 10)],
            vec![0, 0, 0, 0],
            vec![3],
        )
            .unwrap()
    }

    #[test]
    fn vertical_segments_are_the_left_and_right_stems() {
        let design = square_outline();
        let scaled = square_outline();
        let analyzed = analyze(&design, &scaled, Fixed::from_int(1), Fixed::from_int(1));
        let verticals = build_segments(&analyzed, true);
        assert_eq!(verticals.len(), 2);
        let mut positions: Vec<i32> = verticals.iter().map(|s| s.pos).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![0, 10]);
    }

    #[test]
    fn horizontal_segments_are_top_and_bottom() {
        let design = square_outline();
        let scaled = square_outline();
        let analyzed = analyze(&design, &scaled, Fixed::from_int(1), Fixed::from_int(1));
        let horizontals = build_segments(&analyzed, false);
        assert_eq!(horizontals.len(), 2);
        let mut positions: Vec<i32> = horizontals.iter().map(|s| s.pos).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![0, 10]);
    }

    #[test]
    fn link_stems_pairs_opposite_direction_segments() {
        let design = square_outline();
        let scaled = square_outline();
        let analyzed = analyze(&design, &scaled, Fixed::from_int(1), Fixed::from_int(1));
        let mut verticals = build_segments(&analyzed, true);
        link_stems(&mut verticals);
        assert!(verticals.iter().all(|s| s.link.is_some()));
    }
}
