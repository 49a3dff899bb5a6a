//! Sizes: a scaling context for a face at one resolution.

use fontcore_geom::Fixed;

/// Identifies a [`Size`] within its owning face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SizeId(pub(crate) u64);

/// How the caller asked for a resolution.
#[derive(Copy, Clone, Debug)]
pub enum SizeRequest {
    /// Nominal pixel width/height, applied directly as ppem.
    NominalPixels { x_ppem: u32, y_ppem: u32 },
    /// Character point size at a given device resolution.
    CharSize {
        width_pt: f64,
        height_pt: f64,
        horz_dpi: u32,
        vert_dpi: u32,
    },
    /// Caller-supplied scale factors, bypassing ppem derivation entirely.
    Custom { x_scale: Fixed, y_scale: Fixed },
}

impl SizeRequest {
    /// The effective nominal pixel width this request implies, 0 for a
    /// `Custom` request (no ppem to report).
    pub fn x_ppem(&self) -> u32 {
        match self {
            SizeRequest::NominalPixels { x_ppem, .. } => *x_ppem,
            SizeRequest::CharSize {
                width_pt, horz_dpi, ..
            } => ((*width_pt / 72.0) * *horz_dpi as f64).round() as u32,
            SizeRequest::Custom { .. } => 0,
        }
    }

    pub fn y_ppem(&self) -> u32 {
        match self {
            SizeRequest::NominalPixels { y_ppem, .. } => *y_ppem,
            SizeRequest::CharSize {
                height_pt, vert_dpi, ..
            } => ((*height_pt / 72.0) * *vert_dpi as f64).round() as u32,
            SizeRequest::Custom { .. } => 0,
        }
    }
}

/// Scale factors and driver-recomputed metrics for one face/resolution
/// pair.
#[derive(Copy, Clone, Debug, Default)]
pub struct SizeMetrics {
    pub x_ppem: u32,
    pub y_ppem: u32,
    pub x_scale: Fixed,
    pub y_scale: Fixed,
    pub ascender: i32,
    pub descender: i32,
    pub height: i32,
    pub max_advance: i32,
}

impl SizeMetrics {
    /// Compute the base (unhinted) scale factors per: `x_scale =
    /// (x_ppem << 6) / units_per_EM`.
    pub fn from_ppem(x_ppem: u32, y_ppem: u32, units_per_em: u16) -> Option<SizeMetrics> {
        let x_scale = Fixed::scale_from_ppem(x_ppem as i32, units_per_em)?;
        let y_scale = Fixed::scale_from_ppem(y_ppem as i32, units_per_em)?;
        Some(SizeMetrics {
            x_ppem,
            y_ppem,
            x_scale,
            y_scale,
            ascender: 0,
            descender: 0,
            height: 0,
            max_advance: 0,
        })
    }
}

/// A scaling context for a face.
pub struct Size {
    id: SizeId,
    pub metrics: SizeMetrics,
}

impl Size {
    pub(crate) fn new(id: SizeId, metrics: SizeMetrics) -> Size {
        Size { id, metrics }
    }

    pub fn id(&self) -> SizeId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_pixels_reports_its_own_ppem() {
        let r = SizeRequest::NominalPixels {
            x_ppem: 16,
            y_ppem: 16,
        };
        assert_eq!(r.x_ppem(), 16);
        assert_eq!(r.y_ppem(), 16);
    }

    #[test]
    fn char_size_derives_ppem_from_dpi() {
        let r = SizeRequest::CharSize {
            width_pt: 12.0,
            height_pt: 12.0,
            horz_dpi: 96,
            vert_dpi: 96,
        };
        assert_eq!(r.x_ppem(), 16);
    }

    #[test]
    fn from_ppem_scales_by_units_per_em() {
        let m = SizeMetrics::from_ppem(16, 16, 1000).unwrap();
        assert_eq!(m.x_scale, Fixed::scale_from_ppem(16, 1000).unwrap());
    }

    #[test]
    fn from_ppem_rejects_zero_units_per_em() {
        assert!(SizeMetrics::from_ppem(16, 16, 0).is_none());
    }
}
