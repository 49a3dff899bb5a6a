//! Face lifecycle: a long-lived handle to one decoded font
//! resource, its char-maps, and the sizes opened against it.

use crate::driver::DriverFace;
use crate::error::{Error, Module, Result};
use crate::size::{Size, SizeId, SizeRequest};
use crate::slot::GlyphSlot;
use fontcore_geom::{BBox, Matrix, Vector};

/// Character code spaces a face's char-maps may use.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    Unicode,
    AdobeStandard,
    AdobeExpert,
    AdobeCustom,
    Sjis,
    Gb2312,
    Big5,
    Wansung,
    Johab,
}

/// A single published character-to-glyph mapping.
#[derive(Clone, Debug)]
pub struct CharMap {
    pub encoding: Encoding,
    pub platform_id: u16,
    pub encoding_id: u16,
}

/// Attributes populated by a successful `face_init`.
#[derive(Clone, Debug, Default)]
pub struct FaceAttrs {
    pub num_glyphs: u32,
    pub units_per_em: u16,
    pub design_bbox: Option<BBox>,
    pub ascender: i32,
    pub descender: i32,
    pub height: i32,
    pub max_advance_width: i32,
    pub family_name: String,
    pub style_name: String,
    pub is_fixed_pitch: bool,
}

/// Opaque identifier a face resolver uses to name a font resource; owned
/// by the caller (e.g. a file path hash or database key), never
/// interpreted by the engine itself.
pub type FaceId = u64;

/// A long-lived handle to one decoded typeface.
pub struct Face {
    pub(crate) driver_name: String,
    pub(crate) driver_face: DriverFace,
    pub(crate) sizes: Vec<Size>,
    pub(crate) active_size: Option<SizeId>,
    pub(crate) active_charmap: usize,
    pub(crate) slot: GlyphSlot,
    transform: Option<(Matrix, Vector)>,
    next_size_id: u64,
}

impl std::fmt::Debug for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Face")
            .field("driver_name", &self.driver_name)
            .field("active_size", &self.active_size)
            .field("active_charmap", &self.active_charmap)
            .finish_non_exhaustive()
    }
}

impl Face {
    pub(crate) fn new(driver_name: String, driver_face: DriverFace) -> Face {
        Face {
            driver_name,
            driver_face,
            sizes: Vec::new(),
            active_size: None,
            active_charmap: 0,
            slot: GlyphSlot::default(),
            transform: None,
            next_size_id: 0,
        }
    }

    /// Set a matrix/delta pair applied to every scaled outline and its
    /// advance from here on, unless a `load_glyph` call sets
    /// `ignore_transform`. `None` clears it back to the identity.
    pub fn set_transform(&mut self, transform: Option<(Matrix, Vector)>) {
        self.transform = transform;
    }

    pub(crate) fn transform(&self) -> Option<(Matrix, Vector)> {
        self.transform
    }

    pub fn attrs(&self) -> &FaceAttrs {
        &self.driver_face.attrs
    }

    pub fn num_glyphs(&self) -> u32 {
        self.driver_face.attrs.num_glyphs
    }

    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    pub fn charmaps(&self) -> &[CharMap] {
        &self.driver_face.charmaps
    }

    pub fn active_charmap(&self) -> Option<&CharMap> {
        self.driver_face.charmaps.get(self.active_charmap)
    }

    /// Select a published char-map by index. Out-of-range is rejected, not
    /// silently clamped.
    pub fn select_charmap(&mut self, index: usize) -> Result<()> {
        if index >= self.driver_face.charmaps.len() {
            return Err(Error::invalid_argument(Module::Base));
        }
        self.active_charmap = index;
        Ok(())
    }

    pub fn slot(&self) -> &GlyphSlot {
        &self.slot
    }

    pub(crate) fn slot_mut(&mut self) -> &mut GlyphSlot {
        &mut self.slot
    }

    pub fn sizes(&self) -> &[Size] {
        &self.sizes
    }

    pub fn active_size(&self) -> Option<&Size> {
        let id = self.active_size?;
        self.sizes.iter().find(|s| s.id() == id)
    }

    pub(crate) fn active_size_mut(&mut self) -> Option<&mut Size> {
        let id = self.active_size?;
        self.sizes.iter_mut().find(|s| s.id() == id)
    }

    /// Reject a pixel size of zero before any driver work happens.
    pub(crate) fn validate_request(request: &SizeRequest) -> Result<()> {
        if request.x_ppem() == 0 || request.y_ppem() == 0 {
            return Err(Error::invalid_pixel_size(Module::Base));
        }
        Ok(())
    }

    pub(crate) fn push_size(&mut self, size: Size) -> SizeId {
        let id = size.id();
        self.sizes.push(size);
        self.active_size = Some(id);
        id
    }

    pub(crate) fn alloc_size_id(&mut self) -> SizeId {
        let id = SizeId(self.next_size_id);
        self.next_size_id += 1;
        id
    }

    pub(crate) fn driver_face(&self) -> &DriverFace {
        &self.driver_face
    }
}
