//! Face-level metadata extraction: `head`/`hhea`/`maxp`/`post`/`name`/`cmap`
//! table reads that populate a [`fontcore::FaceAttrs`] and its char-maps,
//! and the driver-owned payload each opened face carries.

use fontcore::{CharMap, Encoding, FaceAttrs};
use fontcore_geom::{BBox, F26Dot6};
use read_fonts::tables::name::Name;
use read_fonts::types::NameId;
use read_fonts::{FileRef, FontRef, ReadError, TableProvider};
use std::sync::Arc;

/// Owned font bytes plus the index of the face within a collection.
/// `read-fonts`/`skrifa` parsing is effectively free, so every driver call
/// re-derives a borrowed `FontRef` from this rather than holding one
/// across calls.
pub(crate) struct SfntFaceData {
    pub(crate) bytes: Arc<[u8]>,
    pub(crate) face_index: u32,
}

impl SfntFaceData {
    pub(crate) fn font_ref(&self) -> Result<FontRef<'_>, ReadError> {
        match FileRef::new(&self.bytes)? {
            FileRef::Font(font) => Ok(font),
            FileRef::Collection(collection) => collection.get(self.face_index),
        }
    }
}

/// Resolve `data`/`face_index` to a borrowed font view, distinguishing
/// "not an sfnt resource at all" (caller should keep scanning) from "sfnt,
/// but this index doesn't exist" (caller's mistake).
pub(crate) fn resolve_font(data: &[u8], face_index: u32) -> Result<Option<FontRef<'_>>, ()> {
    match FileRef::new(data) {
        Err(_) => Ok(None),
        Ok(FileRef::Font(font)) => {
            if face_index == 0 {
                Ok(Some(font))
            } else {
                Err(())
            }
        }
        Ok(FileRef::Collection(collection)) => collection.get(face_index).map(Some).map_err(|_| ()),
    }
}

pub(crate) fn face_attrs(font: &FontRef) -> Result<FaceAttrs, ReadError> {
    let head = font.head()?;
    let hhea = font.hhea()?;
    let maxp = font.maxp()?;

    let ascender = hhea.ascender().to_i16() as i32;
    let descender = hhea.descender().to_i16() as i32;
    let line_gap = hhea.line_gap().to_i16() as i32;

    let is_fixed_pitch = font.post().map(|post| post.is_fixed_pitch() != 0).unwrap_or(false);
    let (family_name, style_name) = font
        .name()
        .ok()
        .map(|name| (resolve_name(&name, NameId::FAMILY_NAME), resolve_name(&name, NameId::SUBFAMILY_NAME)))
        .unwrap_or((None, None));

    Ok(FaceAttrs {
        num_glyphs: maxp.num_glyphs() as u32,
        units_per_em: head.units_per_em(),
        design_bbox: Some(BBox {
            x_min: F26Dot6::from_int(head.x_min() as i32),
            y_min: F26Dot6::from_int(head.y_min() as i32),
            x_max: F26Dot6::from_int(head.x_max() as i32),
            y_max: F26Dot6::from_int(head.y_max() as i32),
        }),
        ascender,
        descender,
        height: ascender - descender + line_gap,
        max_advance_width: hhea.advance_width_max().to_u16() as i32,
        family_name: family_name.unwrap_or_default(),
        style_name: style_name.unwrap_or_default(),
        is_fixed_pitch,
    })
}

fn resolve_name(name: &Name, id: NameId) -> Option<String> {
    let records = name.name_record();
    let preferred = records
        .iter()
        .find(|r| r.name_id() == id && r.platform_id() == 3 && r.encoding_id() == 1);
    let record = preferred.or_else(|| records.iter().find(|r| r.name_id() == id))?;
    record.string(name.string_data()).ok().map(|s| s.to_string())
}

/// Published char-maps. The closed [`Encoding`] taxonomy fontcore exposes
/// (Adobe/CJK legacy encodings, per the glyph-flags table) has no distinct
/// tag for Mac-Roman or symbol cmaps, so every subtable here is reported as
/// `Unicode`; actual character lookup goes through skrifa's own
/// Unicode-preferring charmap selection regardless of what's listed.
pub(crate) fn build_charmaps(font: &FontRef) -> Vec<CharMap> {
    let Ok(cmap) = font.cmap() else {
        return Vec::new();
    };
    cmap.encoding_records()
        .iter()
        .map(|record| CharMap {
            encoding: Encoding::Unicode,
            platform_id: record.platform_id() as u16,
            encoding_id: record.encoding_id() as u16,
        })
        .collect()
}
