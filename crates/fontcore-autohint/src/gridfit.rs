//! Grid fitting: snaps anchor edges to the pixel grid, matches
//! linked stem pairs against standard widths, positions serifs, and
//! interpolates everything else; then places points between hinted edges.

use crate::analysis::AnalyzedOutline;
use crate::config::HintConfig;
use crate::edge::Edge;
use crate::point::{AnalyzedPoint, PointFlags};
use fontcore_geom::F26Dot6;

/// Minimum stem-width match tolerance: a quarter pixel, in raw subpixel
/// units.
const WIDTH_TOLERANCE: i32 = F26Dot6::HALF.raw() / 2;

/// Snap anchors, match stems, position serifs, then interpolate the rest
/// of `edges` (already sorted by `pos`). Edges already marked `done` (by
/// blue-zone alignment) are left untouched. `standard_sizes` is the
/// scaled standard widths for a vertical-edge call, heights for a
/// horizontal-edge call.
pub fn fit_edges(edges: &mut [Edge], standard_sizes: &[i32], config: &HintConfig) {
    if edges.is_empty() {
        return;
    }

    snap_anchor(edges);

    if config.metric_hinting_enabled() {
        match_stem_pairs(edges, standard_sizes);
    }

    position_serifs(edges);
    interpolate_remaining(edges);
}

fn nearest_size(sizes: &[i32], value: i32, tolerance: i32) -> Option<i32> {
    sizes
        .iter()
        .copied()
        .min_by_key(|w| (w - value).abs())
        .filter(|w| (w - value).abs() <= tolerance)
}

/// The anchor is the first not-yet-`done` edge in position order; every
/// other pass measures relative to it.
fn snap_anchor(edges: &mut [Edge]) {
    let Some(anchor) = edges.iter().position(|e| !e.done) else {
        return;
    };
    let e = &mut edges[anchor];
    e.pos = if e.round { e.opos.round_to_half() } else { e.opos.round() };
    e.done = true;
}

/// For each linked pair not yet positioned, find the nearest standard
/// width to the stem's font-unit span, round it to whole pixels (minimum
/// one), and place the second edge that distance from the first.
fn match_stem_pairs(edges: &mut [Edge], standard_sizes: &[i32]) {
    for i in 0..edges.len() {
        let Some(j) = edges[i].link else { continue };
        if edges[i].done && edges[j].done {
            continue;
        }
        let (anchor, other) = if edges[i].done { (i, j) } else if edges[j].done { (j, i) } else { continue };

        let span_raw = (edges[other].opos.raw() - edges[anchor].opos.raw()).abs();
        let matched = nearest_size(standard_sizes, span_raw, WIDTH_TOLERANCE).unwrap_or(span_raw);
        let pixels = F26Dot6::from_raw(matched).to_int_round().max(1);
        let sign = if edges[other].opos.raw() >= edges[anchor].opos.raw() { 1 } else { -1 };
        edges[other].pos = edges[anchor].pos + F26Dot6::from_int(sign * pixels);
        edges[other].done = true;
    }
}

/// Serif edges sit a preserved, half-pixel-rounded offset from their
/// parent.
fn position_serifs(edges: &mut [Edge]) {
    for i in 0..edges.len() {
        let Some(parent) = edges[i].serif else { continue };
        if edges[i].done {
            continue;
        }
        let offset = edges[i].opos - edges[parent].opos;
        edges[i].pos = edges[parent].pos + offset.round_to_half();
        edges[i].done = true;
    }
}

/// Every still-unpositioned edge is placed by linear interpolation
/// between its two nearest already-hinted neighbors in font-unit order.
/// Edges must already be sorted by `fpos`.
fn interpolate_remaining(edges: &mut [Edge]) {
    loop {
        let mut progressed = false;
        for i in 0..edges.len() {
            if edges[i].done {
                continue;
            }
            let before = (0..i).rev().find(|&k| edges[k].done);
            let after = (i + 1..edges.len()).find(|&k| edges[k].done);
            match (before, after) {
                (Some(b), Some(a)) => {
                    edges[i].pos = interpolate(&edges[b], &edges[a], edges[i].opos);
                    edges[i].done = true;
                    progressed = true;
                }
                (Some(b), None) => {
                    edges[i].pos = edges[b].pos + (edges[i].opos - edges[b].opos);
                    edges[i].done = true;
                    progressed = true;
                }
                (None, Some(a)) => {
                    edges[i].pos = edges[a].pos + (edges[i].opos - edges[a].opos);
                    edges[i].done = true;
                    progressed = true;
                }
                (None, None) => {}
            }
        }
        if !progressed {
            break;
        }
    }
}

fn interpolate(before: &Edge, after: &Edge, opos: F26Dot6) -> F26Dot6 {
    let span = after.opos.raw() - before.opos.raw();
    if span == 0 {
        return before.pos;
    }
    let offset = opos.raw() - before.opos.raw();
    let hinted_span = (after.pos.raw() - before.pos.raw()) as i64;
    let scaled = (hinted_span * offset as i64) / span as i64;
    before.pos + F26Dot6::from_raw(scaled as i32)
}

/// Place every point's hinted coordinate on one axis given the edges that
/// now carry `pos`. Strong interpolation maps each point's original
/// coordinate through the same before/after edge pair used for
/// un-hinted edges; weak-interpolation points additionally preserve
/// their local tangent.
pub fn place_points(
    points: &mut [AnalyzedPoint],
    outline: &AnalyzedOutline,
    edges: &[Edge],
    vertical: bool,
    config: &HintConfig,
) {
    if edges.is_empty() {
        return;
    }
    let mut sorted: Vec<usize> = (0..edges.len()).collect();
    sorted.sort_by_key(|&i| edges[i].opos);

    for idx in 0..points.len() {
        let opos = if vertical { points[idx].ox } else { points[idx].oy };
        let (before, after) = bracketing_edges(edges, &sorted, opos);
        let hinted = match (before, after) {
            (Some(b), Some(a)) if config.strong_interpolation_enabled() => {
                interpolate(&edges[b], &edges[a], opos)
            }
            (Some(b), Some(_)) => opos + (edges[b].pos - edges[b].opos),
            (Some(b), None) => edges[b].pos + (opos - edges[b].opos),
            (None, Some(a)) => edges[a].pos + (opos - edges[a].opos),
            (None, None) => opos,
        };
        if vertical {
            points[idx].x = hinted;
        } else {
            points[idx].y = hinted;
        }
    }

    if config.weak_interpolation_enabled() {
        apply_weak_interpolation(points, outline, vertical);
    }
}

fn bracketing_edges(edges: &[Edge], sorted: &[usize], opos: F26Dot6) -> (Option<usize>, Option<usize>) {
    let mut before = None;
    let mut after = None;
    for &i in sorted {
        if edges[i].opos.raw() <= opos.raw() {
            before = Some(i);
        } else {
            after = Some(i);
            break;
        }
    }
    (before, after)
}

/// For points flagged `WEAK_INTERPOLATION`, nudge the strong-interpolated
/// coordinate back toward the line implied by its neighbors' hinted
/// positions, preserving the local tangent direction.
fn apply_weak_interpolation(points: &mut [AnalyzedPoint], outline: &AnalyzedOutline, vertical: bool) {
    for contour in 0..outline.contour_starts.len() {
        let start = outline.contour_starts[contour];
        let end = outline.contour_ends[contour];
        for i in start..end {
            if !points[i].flags.contains(PointFlags::WEAK_INTERPOLATION) {
                continue;
            }
            let prev = outline.prev_in_contour(i, contour);
            let next = outline.next_in_contour(i, contour);
            let (prev_o, prev_h, next_o, next_h) = if vertical {
                (points[prev].ox, points[prev].x, points[next].ox, points[next].x)
            } else {
                (points[prev].oy, points[prev].y, points[next].oy, points[next].y)
            };
            let span = next_o.raw() - prev_o.raw();
            if span == 0 {
                continue;
            }
            let opos = if vertical { points[i].ox } else { points[i].oy };
            let offset = opos.raw() - prev_o.raw();
            let hinted_span = (next_h.raw() - prev_h.raw()) as i64;
            let tangent = prev_h + F26Dot6::from_raw(((hinted_span * offset as i64) / span as i64) as i32);
            if vertical {
                points[i].x = tangent;
            } else {
                points[i].y = tangent;
            }
        }
    }
}
