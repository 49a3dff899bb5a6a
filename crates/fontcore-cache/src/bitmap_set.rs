//! Bitmap-set cache: one node per `(face, pixel
//! size, flags)` triple, holding a sparse, lazily-materialized page of
//! bitmaps for every glyph index requested against it.

use crate::generic::{FaceScoped, TypedCache, Weighted};
use crate::image::TypeFlags;
use dashmap::DashMap;
use fontcore::error::Result;
use fontcore::{BitmapGlyph, FaceId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitmapSetKey {
    pub face_id: FaceId,
    pub pix_width: u16,
    pub pix_height: u16,
    pub type_flags: TypeFlags,
}

impl FaceScoped for BitmapSetKey {
    fn face_id(&self) -> FaceId {
        self.face_id
    }
}

/// A page-indexed sparse array of bitmaps sharing one `BitmapSetKey`.
/// Entries are materialized one at a time on first request. Backed by a
/// `DashMap` rather than the `lru::LruCache` the manager's own face/size
/// tables use: pages within one set have no eviction order of their own,
/// they're just sharded concurrent storage for whichever glyphs the set
/// has been asked to materialize.
pub struct BitmapSet {
    pages: DashMap<u32, Arc<BitmapGlyph>>,
    weight: AtomicUsize,
}

impl BitmapSet {
    pub fn empty() -> BitmapSet {
        BitmapSet {
            pages: DashMap::new(),
            weight: AtomicUsize::new(0),
        }
    }

    /// Return the bitmap for `gindex`, materializing it via `render` the
    /// first time it's requested.
    pub fn get_or_materialize(
        &self,
        gindex: u32,
        render: impl FnOnce() -> Result<BitmapGlyph>,
    ) -> Result<Arc<BitmapGlyph>> {
        if let Some(bmp) = self.pages.get(&gindex) {
            return Ok(bmp.clone());
        }
        let bmp = Arc::new(render()?);
        self.weight.fetch_add(bmp.buffer.len(), Ordering::Relaxed);
        let entry = self.pages.entry(gindex).or_insert_with(|| bmp.clone());
        Ok(entry.clone())
    }

    pub fn materialized_len(&self) -> usize {
        self.pages.len()
    }

    fn total_weight(&self) -> usize {
        self.weight.load(Ordering::Relaxed)
    }
}

impl Weighted for BitmapSet {
    fn cache_weight(&self) -> usize {
        self.total_weight()
    }
}

pub type BitmapSetCache = TypedCache<BitmapSetKey, BitmapSet>;

pub fn new_bitmap_set_cache() -> Arc<BitmapSetCache> {
    TypedCache::new("bitmap_set")
}

/// Fetch the set for `key` (creating an empty one on a miss), then
/// materialize `gindex` within it, re-weighing the node in `cache` to
/// reflect the set's new aggregate size.
pub fn lookup_bitmap(
    cache: &BitmapSetCache,
    key: BitmapSetKey,
    gindex: u32,
    render: impl FnOnce() -> Result<BitmapGlyph>,
) -> Result<Arc<BitmapGlyph>> {
    let (set, _) = cache.lookup(key.clone(), || Ok(BitmapSet::empty()))?;
    let bmp = set.get_or_materialize(gindex, render)?;
    cache.reweigh(&key, set.total_weight());
    Ok(bmp)
}
