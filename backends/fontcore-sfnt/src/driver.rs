//! The TrueType/OpenType driver: implements [`fontcore::Driver`] on top of
//! `read-fonts` for table access and `skrifa` for outline extraction,
//! covering both glyf (quadratic) and CFF (cubic) glyph data through one
//! code path since both arrive via skrifa's [`skrifa::outline::OutlinePen`].

use crate::face_data::{build_charmaps, face_attrs, resolve_font, SfntFaceData};
use crate::outline_builder::OutlineBuilder;
use fontcore::{Driver, DriverFace, Error, ErrorKind, GlyphFormat, LoadFlags, Module, RawGlyph, Result, SizeMetrics, SizeRequest};
use fontcore_geom::{F26Dot6, Outline};
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::DrawSettings;
use skrifa::{GlyphId, MetadataProvider};
use std::sync::Arc;

/// TrueType/OpenType format driver.
pub struct SfntDriver;

impl SfntDriver {
    pub fn new() -> SfntDriver {
        SfntDriver
    }

    fn payload<'a>(&self, face: &'a DriverFace) -> Result<&'a SfntFaceData> {
        face.downcast_ref::<SfntFaceData>()
            .ok_or_else(|| Error::new(Module::Sfnt, ErrorKind::InvalidFaceHandle))
    }
}

impl Default for SfntDriver {
    fn default() -> Self {
        SfntDriver::new()
    }
}

impl Driver for SfntDriver {
    fn name(&self) -> &str {
        "sfnt"
    }

    fn face_init(&self, data: &[u8], face_index: u32) -> Result<Option<DriverFace>> {
        let font = match resolve_font(data, face_index) {
            Ok(Some(font)) => font,
            Ok(None) => return Ok(None),
            Err(()) => return Err(Error::invalid_argument(Module::Sfnt)),
        };
        let attrs = face_attrs(&font).map_err(|_| Error::new(Module::Sfnt, ErrorKind::InvalidFileFormat))?;
        let charmaps = build_charmaps(&font);
        let payload = SfntFaceData {
            bytes: Arc::from(data),
            face_index,
        };
        Ok(Some(DriverFace::new(attrs, charmaps, Box::new(payload))))
    }

    fn size_request(&self, face: &DriverFace, request: &SizeRequest) -> Result<SizeMetrics> {
        let mut metrics = SizeMetrics::from_ppem(request.x_ppem(), request.y_ppem(), face.attrs.units_per_em)
            .ok_or_else(|| Error::invalid_pixel_size(Module::Sfnt))?;
        let scale_y = |v: i32| F26Dot6::from_int(v).scale_by(metrics.y_scale).to_int_round();
        metrics.ascender = scale_y(face.attrs.ascender);
        metrics.descender = scale_y(face.attrs.descender);
        metrics.height = scale_y(face.attrs.height);
        metrics.max_advance = F26Dot6::from_int(face.attrs.max_advance_width)
            .scale_by(metrics.x_scale)
            .to_int_round();
        Ok(metrics)
    }

    fn load_glyph(&self, face: &DriverFace, gindex: u32, _flags: LoadFlags) -> Result<RawGlyph> {
        let payload = self.payload(face)?;
        let font = payload
            .font_ref()
            .map_err(|_| Error::new(Module::Sfnt, ErrorKind::InvalidFileFormat))?;
        let glyph_id = GlyphId::new(gindex);

        let outline = match font.outline_glyphs().get(glyph_id) {
            Some(glyph) => {
                let settings = DrawSettings::unhinted(Size::unscaled(), LocationRef::default());
                let mut builder = OutlineBuilder::new();
                glyph
                    .draw(settings, &mut builder)
                    .map_err(|_| Error::new(Module::Sfnt, ErrorKind::InvalidOutline))?;
                builder.finish().map_err(|_| Error::new(Module::Sfnt, ErrorKind::InvalidOutline))?
            }
            // No outline for this glyph id (e.g. whitespace): an empty
            // outline with no contours, still a legal `RawGlyph`.
            None => Outline::new(Vec::new(), Vec::new(), Vec::new())
                .map_err(|_| Error::new(Module::Sfnt, ErrorKind::InvalidOutline))?,
        };

        let advance_x = font
            .glyph_metrics(Size::unscaled(), LocationRef::default())
            .advance_width(glyph_id)
            .unwrap_or(0.0)
            .round() as i32;

        Ok(RawGlyph {
            outline,
            advance_x,
            advance_y: 0,
            format: GlyphFormat::Outline,
        })
    }

    fn get_char_index(&self, face: &DriverFace, charcode: u32) -> Result<u32> {
        let Some(ch) = char::from_u32(charcode) else {
            return Err(Error::new(Module::Sfnt, ErrorKind::InvalidCharacterCode));
        };
        let payload = self.payload(face)?;
        let font = payload
            .font_ref()
            .map_err(|_| Error::new(Module::Sfnt, ErrorKind::InvalidFileFormat))?;
        // Unmapped characters resolve to glyph 0 (.notdef), not an error,
        // matching FT_Get_Char_Index.
        Ok(font.charmap().map(ch).map(|id| id.to_u32()).unwrap_or(0))
    }

    fn get_advances(&self, face: &DriverFace, gindices: &[u32]) -> Result<Vec<i32>> {
        let payload = self.payload(face)?;
        let font = payload
            .font_ref()
            .map_err(|_| Error::new(Module::Sfnt, ErrorKind::InvalidFileFormat))?;
        let metrics = font.glyph_metrics(Size::unscaled(), LocationRef::default());
        Ok(gindices
            .iter()
            .map(|&g| metrics.advance_width(GlyphId::new(g)).unwrap_or(0.0).round() as i32)
            .collect())
    }

    // `get_kerning` is left at the default unimplemented_feature: this
    // driver doesn't parse the legacy `kern` table or GPOS pair
    // adjustments. `attach_file` is likewise left at its default (sfnt
    // resources carry their metrics in-line, no AFM-style sidecar).
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_reported_as_not_mine() {
        let driver = SfntDriver::new();
        let result = driver.face_init(b"not a font", 0);
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn get_char_index_rejects_codes_outside_the_unicode_range() {
        let driver = SfntDriver::new();
        let payload = SfntFaceData {
            bytes: Arc::from(&b""[..]),
            face_index: 0,
        };
        let face = DriverFace::new(Default::default(), vec![], Box::new(payload));
        let err = driver.get_char_index(&face, 0xFFFF_FFFF).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCharacterCode);
    }
}
