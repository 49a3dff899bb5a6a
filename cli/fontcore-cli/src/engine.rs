//! A pre-wired [`Library`] plus the text-shaping-free run loop shared by
//! the `info`, `render`, and `batch` subcommands: open a face, size it,
//! walk a string one character at a time, and collect advances/bitmaps.

use fontcore::{
    char_index, load_glyph, request_size, BitmapGlyph, Face, LoadFlags, Library, RenderMode,
    Result, SizeRequest, Version,
};
use fontcore_autohint::{AutoHinter, FaceGlobals, HintConfig};
use fontcore_raster::{LcdRasterizer, SmoothRasterizer};
use fontcore_sfnt::SfntDriver;

/// Owns the registry and the auto-hinter every opened face shares.
/// Trimmed relative to a full shaping engine: no cmap fallback chain, no
/// bidi reordering, no GSUB/GPOS — one driver, one hinter, three
/// rasterizers, walking a string left to right by `char`.
pub struct Engine {
    library: Library,
    hinter: AutoHinter,
}

/// One render job: the font bytes, the requested pixel size, the text to
/// lay out, and which render target to rasterize into.
pub struct RenderRequest<'a> {
    pub font_data: &'a [u8],
    pub face_index: u32,
    pub ppem: u32,
    pub text: &'a str,
    pub mode: RenderMode,
}

/// One positioned glyph from a render pass: the bitmap (empty for glyphs
/// with no ink, e.g. space) and the pen advance that produced the next
/// glyph's origin.
pub struct PlacedGlyph {
    pub bitmap: BitmapGlyph,
    pub pen_x: i32,
    pub pen_y: i32,
}

impl Engine {
    pub fn new() -> Result<Engine> {
        let mut library = Library::new();
        library.register_driver(Box::new(SfntDriver::new()), Version(1, 0, 0))?;
        library.register_renderer(Box::new(SmoothRasterizer::new()));
        library.register_renderer(Box::new(LcdRasterizer::new()));
        let hinter = AutoHinter::new(FaceGlobals::default(), HintConfig::default());
        Ok(Engine { library, hinter })
    }

    pub fn open_face(&self, data: &[u8], face_index: u32) -> Result<Face> {
        self.library.open_face(data, face_index)
    }

    fn driver(&self, face: &Face) -> Result<&dyn fontcore::Driver> {
        self.library
            .driver_named(face.driver_name())
            .ok_or_else(|| fontcore::Error::new(fontcore::Module::Base, fontcore::ErrorKind::InvalidFaceHandle))
    }

    pub fn size_face(&self, face: &mut Face, ppem: u32) -> Result<()> {
        let driver = self.driver(face)?;
        request_size(
            driver,
            face,
            SizeRequest::NominalPixels {
                x_ppem: ppem,
                y_ppem: ppem,
            },
        )
    }

    /// Lay out `request.text` left to right with no shaping: each `char`
    /// maps to one glyph via the face's active char-map, rendered and
    /// advanced by its own scaled advance width.
    pub fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<PlacedGlyph>> {
        let mut face = self.open_face(request.font_data, request.face_index)?;
        self.size_face(&mut face, request.ppem)?;
        let driver = self.driver(&face)?;

        let flags = match request.mode {
            RenderMode::Mono => LoadFlags::RENDER | LoadFlags::TARGET_MONO,
            RenderMode::Light => LoadFlags::RENDER | LoadFlags::TARGET_LIGHT,
            RenderMode::Lcd => LoadFlags::RENDER | LoadFlags::TARGET_LCD,
            RenderMode::LcdV => LoadFlags::RENDER | LoadFlags::TARGET_LCD_V,
            RenderMode::Normal => LoadFlags::RENDER,
        };

        let mut placed = Vec::new();
        let mut pen_x = 0i32;
        let pen_y = 0i32;
        for ch in request.text.chars() {
            let gindex = char_index(driver, &face, ch as u32)?;
            load_glyph(
                &self.library,
                driver,
                &mut face,
                gindex,
                flags,
                Some(&self.hinter),
                None,
            )?;
            let bitmap = face
                .slot()
                .bitmap()
                .cloned()
                .ok_or_else(|| fontcore::Error::cannot_render_glyph(fontcore::Module::Base))?;
            let advance_x = bitmap.advance.x.to_int_round();
            placed.push(PlacedGlyph {
                bitmap,
                pen_x,
                pen_y,
            });
            pen_x += advance_x;
        }
        Ok(placed)
    }
}
