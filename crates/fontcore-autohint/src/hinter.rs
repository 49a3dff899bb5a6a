//! The auto-hinter proper: wires outline analysis, segment/edge
//! construction, blue-zone alignment, and grid fitting together into one
//! [`fontcore::Hinter`] implementation.

use crate::analysis::analyze;
use crate::blue::apply_blue_zones;
use crate::config::HintConfig;
use crate::edge::{build_edges, link_edges, Edge};
use crate::globals::FaceGlobals;
use crate::gridfit::{fit_edges, place_points};
use crate::segment::{build_segments, link_stems};
use fontcore::error::{Error, Result};
use fontcore::hint::{DiagSink, HintEvent, Hinter};
use fontcore_geom::{Fixed, Outline, PointTag};
use log::trace;

/// Format-independent outline hinter. Holds the face-global
/// metrics (standard widths/heights, blue zones) and a configuration of
/// which passes are enabled.
pub struct AutoHinter {
    globals: FaceGlobals,
    config: HintConfig,
}

impl AutoHinter {
    pub fn new(globals: FaceGlobals, config: HintConfig) -> AutoHinter {
        AutoHinter { globals, config }
    }

    pub fn globals(&self) -> &FaceGlobals {
        &self.globals
    }

    pub fn config(&self) -> &HintConfig {
        &self.config
    }
}

impl Hinter for AutoHinter {
    fn hint(
        &self,
        outline: &Outline,
        x_scale: Fixed,
        y_scale: Fixed,
        mut diag: DiagSink<'_>,
    ) -> Result<Outline> {
        let font_unit_outline = outline.map_points(|p| {
                fontcore_geom::Vector::new(unscale(p.x, x_scale), unscale(p.y, y_scale))
        });

        let mut globals = self.globals.clone();
        globals.rescale(x_scale, y_scale);

        let mut analyzed = analyze(&font_unit_outline, outline, x_scale, y_scale);

        trace!(
            "autohint: {} points, x_scale={:?} y_scale={:?}",
            analyzed.points.len(),
            x_scale,
            y_scale
        );

        let mut vert_segments = build_segments(&analyzed, true);
        link_stems(&mut vert_segments);
        let mut horz_segments = build_segments(&analyzed, false);
        link_stems(&mut horz_segments);

        if let Some(sink) = diag.as_deref_mut() {
            for s in &vert_segments {
                sink(HintEvent::SegmentBuilt { axis_is_vertical: true, position: s.pos });
            }
            for s in &horz_segments {
                sink(HintEvent::SegmentBuilt { axis_is_vertical: false, position: s.pos });
            }
        }

        let mut vert_edges = build_edges(&vert_segments, analyzed.edge_distance_threshold, x_scale);
        link_edges(&mut vert_edges, &vert_segments);
        let mut horz_edges = build_edges(&horz_segments, analyzed.edge_distance_threshold, y_scale);
        link_edges(&mut horz_edges, &horz_segments);

        if let Some(sink) = diag.as_deref_mut() {
            for e in &vert_edges {
                sink(HintEvent::EdgeBuilt { axis_is_vertical: true, position: e.fpos });
            }
            for e in &horz_edges {
                sink(HintEvent::EdgeBuilt { axis_is_vertical: false, position: e.fpos });
            }
        }

        if self.config.metric_hinting_enabled() {
            apply_blue_zones(&mut horz_edges, &globals.scaled);
            if let Some(sink) = diag.as_deref_mut() {
                for e in horz_edges.iter().filter(|e| e.blue_zone.is_some()) {
                    sink(HintEvent::BlueZoneSnap {
                        edge_position: e.fpos,
                        snapped_to: e.pos.to_int(),
                    });
                }
            }
        }

        sort_by_original_position(&mut vert_edges);
        sort_by_original_position(&mut horz_edges);
        fit_edges(&mut vert_edges, &globals.scaled.widths, &self.config);
        fit_edges(&mut horz_edges, &globals.scaled.heights, &self.config);

        let bounds = analyzed_ref(&analyzed);
        place_points(&mut analyzed.points, &bounds, &vert_edges, true, &self.config);
        place_points(&mut analyzed.points, &bounds, &horz_edges, false, &self.config);

        build_output_outline(outline, &analyzed.points).map_err(|_| {
                Error::invalid_argument(fontcore::error::Module::AutoHint)
        })
    }
}

/// Invert [`fontcore_geom::F26Dot6::scale_by`]: recover the font-unit
/// coordinate a scaled point came from. The hinter only ever sees an
/// already-scaled outline plus the scale that produced it (the loader
/// scales before hinting), so outline analysis needs this to rebuild the
/// font-unit view keys segment/edge positions on.
fn unscale(v: fontcore_geom::F26Dot6, scale: Fixed) -> fontcore_geom::F26Dot6 {
    if scale.raw() == 0 {
        return fontcore_geom::F26Dot6::ZERO;
    }
    let numerator = (v.raw() as i64) << Fixed::FRAC_BITS;
    let half = scale.raw() as i64 / 2;
    let rounded = if numerator >= 0 {
        (numerator + half) / scale.raw() as i64
    } else {
        (numerator - half) / scale.raw() as i64
    };
    fontcore_geom::F26Dot6::from_raw(rounded as i32)
}

/// `place_points` only reads contour bounds from the analyzed outline, so
/// a shallow alias avoids holding two mutable/immutable borrows at once.
fn analyzed_ref(outline: &crate::analysis::AnalyzedOutline) -> crate::analysis::AnalyzedOutline {
    crate::analysis::AnalyzedOutline {
        points: Vec::new(),
        contour_starts: outline.contour_starts.clone(),
        contour_ends: outline.contour_ends.clone(),
        x_scale: outline.x_scale,
        y_scale: outline.y_scale,
        edge_distance_threshold: outline.edge_distance_threshold,
    }
}

fn sort_by_original_position(edges: &mut [Edge]) {
    edges.sort_by_key(|e| e.fpos);
}

fn build_output_outline(
    source: &Outline,
    points: &[crate::point::AnalyzedPoint],
) -> std::result::Result<Outline, fontcore_geom::OutlineError> {
    let hinted_points: Vec<fontcore_geom::Vector> = points
        .iter()
        .map(|p| fontcore_geom::Vector::new(p.x, p.y))
        .collect();
    let tag_bytes: Vec<u8> = source
        .tags()
        .iter()
        .map(|t| match t {
            PointTag::OnCurve => 0,
            PointTag::ConicOffCurve => 1,
            PointTag::CubicOffCurve => 2,
    })
        .collect();
    Outline::new(hinted_points, tag_bytes, source.contour_ends().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcore_geom::{F26Dot6, Vector};

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
    fn hinting_a_unit_square_produces_a_valid_outline() {
        let hinter = AutoHinter::new(FaceGlobals::default(), HintConfig::default());
        let outline = square_outline();
        let hinted = hinter
            .hint(&outline, Fixed::from_int(1), Fixed::from_int(1), None)
            .unwrap();
        assert_eq!(hinted.n_points(), outline.n_points());
        assert_eq!(hinted.n_contours(), outline.n_contours());
    }

    #[test]
    fn disabling_metric_hinting_skips_blue_zones() {
        let config = HintConfig::new().with_metric_hinting_disabled(true);
        let hinter = AutoHinter::new(FaceGlobals::default(), config);
        let outline = square_outline();
        assert!(hinter
            .hint(&outline, Fixed::from_int(1), Fixed::from_int(1), None)
            .is_ok());
    }

    #[test]
    fn hinting_is_deterministic() {
        let hinter = AutoHinter::new(FaceGlobals::default(), HintConfig::default());
        let outline = square_outline();
        let a = hinter
            .hint(&outline, Fixed::from_int(2), Fixed::from_int(2), None)
            .unwrap();
        let b = hinter
            .hint(&outline, Fixed::from_int(2), Fixed::from_int(2), None)
            .unwrap();
        assert_eq!(a.points(), b.points());
    }
}
