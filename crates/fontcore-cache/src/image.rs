//! Image cache: keys a single rendered or
//! scaled [`Glyph`] by face, pixel size, rendering flags, and glyph
//! index.

use crate::generic::{FaceScoped, TypedCache, Weighted};
use fontcore::error::Result;
use fontcore::{FaceId, Glyph};
use std::sync::Arc;

/// Packs the format/mono-vs-gray/hinting-mode/unscaled/no-sbits switches
/// an image cache entry is keyed on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypeFlags(u32);

impl TypeFlags {
    pub const NONE: TypeFlags = TypeFlags(0);
    pub const BITMAP_FORMAT: TypeFlags = TypeFlags(1 << 0);
    pub const MONOCHROME: TypeFlags = TypeFlags(1 << 1);
    pub const HINTED: TypeFlags = TypeFlags(1 << 2);
    pub const UNSCALED: TypeFlags = TypeFlags(1 << 3);
    pub const NO_SBITS: TypeFlags = TypeFlags(1 << 4);

    pub const fn contains(self, bit: TypeFlags) -> bool {
        self.0 & bit.0 == bit.0
    }

    pub const fn with(self, bit: TypeFlags) -> TypeFlags {
        TypeFlags(self.0 | bit.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageCacheKey {
    pub face_id: FaceId,
    pub pix_width: u16,
    pub pix_height: u16,
    pub type_flags: TypeFlags,
    pub gindex: u32,
}

impl FaceScoped for ImageCacheKey {
    fn face_id(&self) -> FaceId {
        self.face_id
    }
}

impl Weighted for Glyph {
    fn cache_weight(&self) -> usize {
        Glyph::cache_weight(self)
    }
}

pub type ImageCache = TypedCache<ImageCacheKey, Glyph>;

/// Build a fresh image cache. Entries are bounded only by the manager's
/// shared weight budget, not by a fixed slot count.
pub fn new_image_cache() -> Arc<ImageCache> {
    TypedCache::new("image")
}

/// Look up (or render) the glyph for `key`, running `render` only on a
/// miss.
pub fn lookup_image(
    cache: &ImageCache,
    key: ImageCacheKey,
    render: impl FnOnce() -> Result<Glyph>,
) -> Result<(Arc<Glyph>, usize)> {
    cache.lookup(key, render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcore::OutlineGlyph;
    use fontcore_geom::{F26Dot6, Outline, Vector};

    fn glyph() -> Glyph {
        let pt = |x, y| Vector::new(F26Dot6::from_int(x), F26Dot6::from_int(y));
        Glyph::Outline(OutlineGlyph {
            outline: Outline::new(vec![pt(0, 0), pt(10, 0), pt(5, 10)], vec![0, 0, 0], vec![2])
                .unwrap(),
            advance: Vector::ZERO,
        })
    }

    #[test]
    fn repeated_lookup_reuses_the_cached_node() {
        let cache = new_image_cache();
        let key = ImageCacheKey {
            face_id: 1,
            pix_width: 16,
            pix_height: 16,
            type_flags: TypeFlags::NONE,
            gindex: 5,
        };
        let mut renders = 0;
        let (_, w1) = lookup_image(&cache, key.clone(), || {
                renders += 1;
                Ok(glyph())
        })
            .unwrap();
        assert!(w1 > 0);
        let (_, w2) = lookup_image(&cache, key, || {
                renders += 1;
                Ok(glyph())
        })
            .unwrap();
        assert_eq!(w2, 0);
        assert_eq!(renders, 1);
    }
}
