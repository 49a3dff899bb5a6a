//! Outline rasterization: curve flattening, scanline scan-conversion,
//! and the grayscale/mono/LCD renderers registered against
//! `fontcore::Renderer`.

pub mod flatten;
pub mod gray;
pub mod lcd;
pub mod renderer;
pub mod scan;

pub use flatten::flatten_outline;
pub use gray::{render_grayscale, GrayscaleLevel};
pub use lcd::{render_lcd, render_lcd_v, DefaultLcdFilter, LcdFilter};
pub use renderer::{LcdRasterizer, SmoothRasterizer};
pub use scan::{FillRule, ScanConverter};
