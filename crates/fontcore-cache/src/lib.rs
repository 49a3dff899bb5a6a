//! The cache manager: bounded, weight-tracked caches of faces,
//! sizes, and glyph artifacts, sitting in front of `fontcore`'s loader so
//! repeated glyph requests skip scaling, hinting, and rendering entirely.

pub mod bitmap_set;
pub mod generic;
pub mod image;
pub mod manager;
pub mod node;

pub use bitmap_set::{lookup_bitmap, new_bitmap_set_cache, BitmapSet, BitmapSetCache, BitmapSetKey};
pub use generic::{ErasedCache, FaceScoped, TypedCache, Weighted};
pub use image::{lookup_image, new_image_cache, ImageCache, ImageCacheKey, TypeFlags};
pub use manager::{CacheManager, FaceResolver, SizeResolver, MAX_CACHES};
pub use node::{Node, PinnedNode};
