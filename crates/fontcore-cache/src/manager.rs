//! The cache manager: face and size LRUs plus a weight-bounded
//! pool of typed glyph caches, all sharing one eviction budget.

use crate::bitmap_set::{new_bitmap_set_cache, BitmapSet, BitmapSetCache, BitmapSetKey};
use crate::generic::ErasedCache;
use crate::image::{new_image_cache, ImageCache, ImageCacheKey};
use crate::node::PinnedNode;
use fontcore::error::{Error, ErrorKind, Module, Result};
use fontcore::{BitmapGlyph, Face, FaceId, Glyph, SizeId, SizeRequest};
use log::{debug, warn};
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Upper bound on client-registered extension caches, beyond the two
/// built-in concrete caches.
pub const MAX_CACHES: usize = 16;

/// Opens a fresh [`Face`] for a [`FaceId`] the manager hasn't seen yet
/// (or has evicted). Supplied once at construction; typically wraps `Library::open_face`.
pub type FaceResolver = Box<dyn Fn(FaceId) -> Result<Face> + Send + Sync>;

/// Opens a new [`SizeId`] against an already-resident face. Kept
/// separate from [`FaceResolver`] because requesting a size needs the
/// driver that opened the face, which the manager does not itself own;
/// the caller's closure typically resolves it from `face.driver_name()`
/// against its own `Library`.
pub type SizeResolver = Box<dyn Fn(&mut Face, &SizeRequest) -> Result<SizeId> + Send + Sync>;

type SizeMapKey = (FaceId, u32, u32);

fn size_map_key(face_id: FaceId, request: &SizeRequest) -> SizeMapKey {
    (face_id, request.x_ppem(), request.y_ppem())
}

pub struct CacheManager {
    max_weight: usize,
    face_resolver: FaceResolver,
    size_resolver: SizeResolver,
    faces: Mutex<LruCache<FaceId, Arc<Mutex<Face>>>>,
    sizes: Mutex<LruCache<SizeMapKey, SizeId>>,
    image_cache: Arc<ImageCache>,
    bitmap_set_cache: Arc<BitmapSetCache>,
    extensions: Mutex<Vec<Arc<dyn ErasedCache>>>,
}

impl CacheManager {
    pub fn new(
        max_faces: usize,
        max_sizes: usize,
        max_weight: usize,
        face_resolver: FaceResolver,
        size_resolver: SizeResolver,
    ) -> CacheManager {
        let faces_cap = NonZeroUsize::new(max_faces).unwrap_or(NonZeroUsize::new(1).unwrap());
        let sizes_cap = NonZeroUsize::new(max_sizes).unwrap_or(NonZeroUsize::new(1).unwrap());
        CacheManager {
            max_weight,
            face_resolver,
            size_resolver,
            faces: Mutex::new(LruCache::new(faces_cap)),
            sizes: Mutex::new(LruCache::new(sizes_cap)),
            image_cache: new_image_cache(),
            bitmap_set_cache: new_bitmap_set_cache(),
            extensions: Mutex::new(Vec::new()),
        }
    }

    pub fn image_cache(&self) -> &Arc<ImageCache> {
        &self.image_cache
    }

    pub fn bitmap_set_cache(&self) -> &Arc<BitmapSetCache> {
        &self.bitmap_set_cache
    }

    /// Look up (or render) one glyph image, compressing the manager back
    /// under budget afterward.
    pub fn lookup_image(
        &self,
        key: ImageCacheKey,
        render: impl FnOnce() -> Result<Glyph>,
    ) -> Result<Arc<Glyph>> {
        let (glyph, _) = crate::image::lookup_image(&self.image_cache, key, render)?;
        self.compress_if_over_budget();
        Ok(glyph)
    }

    /// Pin a cached glyph image so it survives eviction until the handle
    /// is dropped.
    pub fn pin_image(&self, key: &ImageCacheKey) -> Option<PinnedNode<Glyph>> {
        self.image_cache.pin(key)
    }

    pub fn lookup_bitmap(
        &self,
        key: BitmapSetKey,
        gindex: u32,
        render: impl FnOnce() -> Result<BitmapGlyph>,
    ) -> Result<Arc<BitmapGlyph>> {
        let bmp = crate::bitmap_set::lookup_bitmap(&self.bitmap_set_cache, key, gindex, render)?;
        self.compress_if_over_budget();
        Ok(bmp)
    }

    pub fn pin_bitmap_set(&self, key: &BitmapSetKey) -> Option<PinnedNode<BitmapSet>> {
        self.bitmap_set_cache.pin(key)
    }

    /// Register a client-supplied cache for the shared eviction budget.
    pub fn register_cache(&self, cache: Arc<dyn ErasedCache>) -> Result<()> {
        let mut extensions = self.extensions.lock();
        if extensions.len() >= MAX_CACHES {
            return Err(Error::new(Module::Cache, ErrorKind::TooManyCaches));
        }
        debug!("registering cache {}", cache.name());
        extensions.push(cache);
        Ok(())
    }

    /// `lookup_face`: a hit promotes to LRU front; a miss opens a
    /// fresh face via the resolver and may evict the coldest entry.
    pub fn lookup_face(&self, face_id: FaceId) -> Result<Arc<Mutex<Face>>> {
        {
            let mut faces = self.faces.lock();
            if let Some(face) = faces.get(&face_id) {
                return Ok(face.clone());
            }
        }
        let face = Arc::new(Mutex::new((self.face_resolver)(face_id)?));
        let mut faces = self.faces.lock();
        if let Some(existing) = faces.get(&face_id) {
            return Ok(existing.clone());
        }
        let evicted = faces.push(face_id, face.clone());
        drop(faces);
        if let Some((evicted_id, _)) = evicted {
            if evicted_id != face_id {
                self.reset_face(evicted_id);
            }
        }
        Ok(face)
    }

    /// `lookup_size`: resolves the face first, then the size
    /// within it, caching the `(face, ppem) -> SizeId` mapping so a
    /// repeat request skips the driver entirely.
    pub fn lookup_size(
        &self,
        face_id: FaceId,
        request: SizeRequest,
    ) -> Result<(Arc<Mutex<Face>>, SizeId)> {
        let face = self.lookup_face(face_id)?;
        let map_key = size_map_key(face_id, &request);

        {
            let mut sizes = self.sizes.lock();
            if let Some(&id) = sizes.get(&map_key) {
                return Ok((face, id));
            }
        }

        let id = {
            let mut guard = face.lock();
            (self.size_resolver)(&mut guard, &request)?
        };
        self.sizes.lock().put(map_key, id);
        Ok((face, id))
    }

    /// Evict `face_id` and every node anywhere that depends on it.
    pub fn reset_face(&self, face_id: FaceId) {
        self.faces.lock().pop(&face_id);
        let mut sizes = self.sizes.lock();
        let doomed: Vec<SizeMapKey> = sizes
            .iter()
            .filter(|((fid, _, _), _)| *fid == face_id)
            .map(|(k, _)| *k)
            .collect();
        for key in doomed {
            sizes.pop(&key);
        }
        drop(sizes);
        self.image_cache.invalidate_face(face_id);
        self.bitmap_set_cache.invalidate_face(face_id);
        for cache in self.extensions.lock().iter() {
            cache.invalidate_face(face_id);
        }
    }

    pub fn cur_weight(&self) -> usize {
        let mut total = self.image_cache.total_weight() + self.bitmap_set_cache.total_weight();
        for cache in self.extensions.lock().iter() {
            total += cache.total_weight();
        }
        total
    }

    pub fn num_nodes(&self) -> usize {
        let mut total = self.image_cache.num_nodes() + self.bitmap_set_cache.num_nodes();
        for cache in self.extensions.lock().iter() {
            total += cache.num_nodes();
        }
        total
    }

    /// `compress_if_over_budget`: walk every registered cache,
    /// evicting unpinned nodes until the manager is back under budget or
    /// nothing more can be freed.
    pub fn compress_if_over_budget(&self) {
        let mut freed_anything = true;
        while self.cur_weight() > self.max_weight && freed_anything {
            freed_anything = false;
            if self.image_cache.evict_one().is_some() {
                freed_anything = true;
                continue;
            }
            if self.bitmap_set_cache.evict_one().is_some() {
                freed_anything = true;
                continue;
            }
            for cache in self.extensions.lock().iter() {
                if cache.evict_one().is_some() {
                    freed_anything = true;
                    break;
                }
            }
        }
        if self.cur_weight() > self.max_weight {
            warn!(
                "cache manager stayed over budget: {} > {}",
                self.cur_weight(),
                self.max_weight
            );
        }
    }
}
