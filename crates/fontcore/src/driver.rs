//! The driver contract: the uniform interface every font-format
//! module exposes to the registry and loader.

use crate::error::Result;
use crate::face::{CharMap, FaceAttrs};
use crate::glyph::GlyphFormat;
use crate::size::{SizeMetrics, SizeRequest};
use fontcore_geom::Outline;
use std::ops::{BitOr, BitOrAssign};

/// Bits controlling a single `load_glyph` call.
/// Stored as a plain `u32` bitset rather than pulling in a flags crate the
/// rest of the stack doesn't otherwise need.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadFlags(u32);

impl LoadFlags {
    pub const DEFAULT: LoadFlags = LoadFlags(0);
    pub const NO_SCALE: LoadFlags = LoadFlags(1 << 0);
    pub const NO_HINTING: LoadFlags = LoadFlags(1 << 1);
    pub const RENDER: LoadFlags = LoadFlags(1 << 2);
    pub const VERTICAL_LAYOUT: LoadFlags = LoadFlags(1 << 4);
    pub const FORCE_AUTOHINT: LoadFlags = LoadFlags(1 << 5);
    pub const CROP_BITMAP: LoadFlags = LoadFlags(1 << 6);
    pub const IGNORE_GLOBAL_ADVANCE_WIDTH: LoadFlags = LoadFlags(1 << 8);
    pub const IGNORE_TRANSFORM: LoadFlags = LoadFlags(1 << 10);
    pub const MONOCHROME: LoadFlags = LoadFlags(1 << 11);
    pub const LINEAR_DESIGN: LoadFlags = LoadFlags(1 << 12);
    pub const NO_AUTOHINT: LoadFlags = LoadFlags(1 << 13);
    pub const TARGET_NORMAL: LoadFlags = LoadFlags(1 << 14);
    pub const TARGET_LIGHT: LoadFlags = LoadFlags(1 << 15);
    pub const TARGET_MONO: LoadFlags = LoadFlags(1 << 16);
    pub const TARGET_LCD: LoadFlags = LoadFlags(1 << 17);
    pub const TARGET_LCD_V: LoadFlags = LoadFlags(1 << 18);

    pub const fn contains(self, bit: LoadFlags) -> bool {
        self.0 & bit.0 == bit.0
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for LoadFlags {
    type Output = LoadFlags;
    fn bitor(self, rhs: LoadFlags) -> LoadFlags {
        LoadFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for LoadFlags {
    fn bitor_assign(&mut self, rhs: LoadFlags) {
        self.0 |= rhs.0;
    }
}

/// Driver-agnostic outline + advance pair a driver produces for one glyph,
/// in font units, before the loader scales or hints it.
#[derive(Clone, Debug)]
pub struct RawGlyph {
    pub outline: Outline,
    pub advance_x: i32,
    pub advance_y: i32,
    pub format: GlyphFormat,
}

/// Kerning between an ordered glyph pair, in font units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Kerning {
    pub x: i32,
    pub y: i32,
}

/// The per-format driver contract. The set of font formats is
/// open-ended (plug-in drivers), so this is a trait object stored in the
/// registry rather than a closed enum.
pub trait Driver: Send + Sync {
    /// Stable name used for registration and reverse lookup.
    fn name(&self) -> &str;

    /// Probe `data` (a complete, in-memory font resource) for `face_index`.
    /// Returns `Ok(None)` for "not mine" (scanning continues), `Err` for a
    /// parse failure the caller should treat as fatal, `Ok(Some(_))` on
    /// success.
    fn face_init(&self, data: &[u8], face_index: u32) -> Result<Option<DriverFace>>;

    /// Recompute driver-specific metrics (e.g. hinted blues) for a new
    /// scale, returning the fresh size metrics.
    fn size_request(&self, face: &DriverFace, request: &SizeRequest) -> Result<SizeMetrics>;

    /// Produce the unscaled, unhinted outline (or bitmap format marker)
    /// for one glyph index.
    fn load_glyph(&self, face: &DriverFace, gindex: u32, flags: LoadFlags) -> Result<RawGlyph>;

    /// Whether this driver applies its own hinting (e.g. a bundled
    /// PostScript stem-hint executor), making the loader skip the
    /// auto-hinter unless `force_autohint` is set. Default: no native
    /// hinting, so the auto-hinter runs whenever hinting is requested.
    fn hints_natively(&self) -> bool {
        false
    }

    /// Map a character code in the face's currently selected char-map to a
    /// glyph index. Default: unimplemented (no cmap support).
    fn get_char_index(&self, face: &DriverFace, charcode: u32) -> Result<u32> {
        let _ = (face, charcode);
        Err(crate::error::Error::unimplemented_feature(
                crate::error::Module::Base,
        ))
    }

    /// Kerning between two glyphs. Default: unimplemented.
    fn get_kerning(&self, face: &DriverFace, left: u32, right: u32) -> Result<Kerning> {
        let _ = (face, left, right);
        Err(crate::error::Error::unimplemented_feature(
                crate::error::Module::Base,
        ))
    }

    /// Unhinted advances for a run of glyphs, in font units. Default:
    /// unimplemented.
    fn get_advances(&self, face: &DriverFace, gindices: &[u32]) -> Result<Vec<i32>> {
        let _ = (face, gindices);
        Err(crate::error::Error::unimplemented_feature(
                crate::error::Module::Base,
        ))
    }

    /// Attach an auxiliary resource (e.g. an AFM metrics file) to an
    /// already-opened face. Default: unimplemented.
    fn attach_file(&self, face: &mut DriverFace, data: &[u8]) -> Result<()> {
        let _ = (face, data);
        Err(crate::error::Error::unimplemented_feature(
                crate::error::Module::Base,
        ))
    }
}

/// Opaque, driver-owned state plus the attributes the registry needs to
/// populate a [`crate::face::Face`]. Drivers downcast their own payload
/// out of `data` using `Any`.
pub struct DriverFace {
    pub attrs: FaceAttrs,
    pub charmaps: Vec<CharMap>,
    pub data: Box<dyn std::any::Any + Send + Sync>,
}

impl DriverFace {
    pub fn new(attrs: FaceAttrs, charmaps: Vec<CharMap>, data: Box<dyn std::any::Any + Send + Sync>) -> Self {
        DriverFace {
            attrs,
            charmaps,
            data,
        }
    }

    /// Downcast the driver-owned payload.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_flags_combine_and_test_containment() {
        let f = LoadFlags::RENDER | LoadFlags::TARGET_LCD;
        assert!(f.contains(LoadFlags::RENDER));
        assert!(f.contains(LoadFlags::TARGET_LCD));
        assert!(!f.contains(LoadFlags::NO_HINTING));
    }
}
