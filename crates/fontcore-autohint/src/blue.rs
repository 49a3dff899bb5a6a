//! Blue-zone alignment: pins horizontal edges that fall inside a
//! blue zone's overshoot band before general grid fitting runs.

use crate::edge::Edge;
use crate::globals::{AxisMetrics, BLUE_MAX};
use fontcore_geom::F26Dot6;

/// Minimum `|shoot - ref|`, in raw subpixel units, for overshoot to be
/// honored at all; zones narrower than this snap straight to `ref`.
/// One pixel.
const CONTROL_OVERSHOOT_THRESHOLD: i32 = 64;

/// Snap every horizontal edge that falls inside one of the scaled blue
/// zones. Must run before [`crate::gridfit::fit_edges`] on the same axis.
pub fn apply_blue_zones(edges: &mut [Edge], scaled: &AxisMetrics) {
    for edge in edges.iter_mut() {
        if edge.done {
            continue;
        }
        let Some((zone, ref_pos)) = matching_zone(edge.pos, scaled) else {
            continue;
        };
        edge.blue_zone = Some(zone);
        edge.pos = ref_pos;
        edge.done = true;
    }
}

/// Find the blue zone (if any) whose `[ref, shoot]` (or `[shoot, ref]` for
/// zones that overshoot downward) band contains `pos`, and the pixel
/// position the edge should snap to.
fn matching_zone(pos: F26Dot6, scaled: &AxisMetrics) -> Option<(usize, F26Dot6)> {
    for i in 0..BLUE_MAX {
        if !scaled.blue_active[i] {
            continue;
        }
        let zone_ref = F26Dot6::from_raw(scaled.blue_refs[i]);
        let zone_shoot = F26Dot6::from_raw(scaled.blue_shoots[i]);
        let (lo, hi) = if zone_ref.raw() <= zone_shoot.raw() {
            (zone_ref, zone_shoot)
        } else {
            (zone_shoot, zone_ref)
        };
        if pos.raw() < lo.raw() || pos.raw() > hi.raw() {
            continue;
        }
        let span = (zone_shoot.raw() - zone_ref.raw()).abs();
        if span <= CONTROL_OVERSHOOT_THRESHOLD {
            // Zone too narrow for overshoot to matter; leave the edge for
            // ordinary grid fitting.
            continue;
        }
        return Some((i, zone_ref.round()));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Direction;

    fn edge_at(pos: i32) -> Edge {
        Edge {
            dir: Direction::Left,
            segments: vec![],
            fpos: pos,
            opos: F26Dot6::from_int(pos),
            pos: F26Dot6::from_int(pos),
            link: None,
            serif: None,
            num_linked: 0,
            score: 0,
            blue_zone: None,
            round: false,
            done: false,
        }
    }

    #[test]
    fn edge_inside_overshoot_band_snaps_to_ref() {
        let mut scaled = AxisMetrics::default();
        scaled.blue_refs[0] = F26Dot6::from_int(700).raw();
        scaled.blue_shoots[0] = F26Dot6::from_int(710).raw();
        scaled.blue_active[0] = true;

        let mut edges = vec![edge_at(705)];
        apply_blue_zones(&mut edges, &scaled);
        assert!(edges[0].done);
        assert_eq!(edges[0].blue_zone, Some(0));
        assert_eq!(edges[0].pos, F26Dot6::from_int(700).round());
    }

    #[test]
    fn edge_outside_every_zone_is_untouched() {
        let mut scaled = AxisMetrics::default();
        scaled.blue_refs[0] = F26Dot6::from_int(700).raw();
        scaled.blue_shoots[0] = F26Dot6::from_int(710).raw();
        scaled.blue_active[0] = true;

        let mut edges = vec![edge_at(0)];
        apply_blue_zones(&mut edges, &scaled);
        assert!(!edges[0].done);
        assert_eq!(edges[0].blue_zone, None);
    }

    #[test]
    fn inactive_zone_is_ignored() {
        let mut scaled = AxisMetrics::default();
        scaled.blue_refs[0] = F26Dot6::from_int(700).raw();
        scaled.blue_shoots[0] = F26Dot6::from_int(710).raw();
        scaled.blue_active[0] = false;

        let mut edges = vec![edge_at(705)];
        apply_blue_zones(&mut edges, &scaled);
        assert!(!edges[0].done);
    }
}
