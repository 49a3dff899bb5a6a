//! End-to-end glyph loads through the full pipeline: a driver, the
//! auto-hinter, and a rasterizer wired together the way a real caller
//! (the `fontcore-cli` `Engine`) assembles them, rather than exercising
//! the loader's state machine against a bare stub renderer.

use fontcore::driver::{DriverFace, LoadFlags, RawGlyph};
use fontcore::{
    load_glyph, request_size, Driver, Error, FaceAttrs, GlyphFormat, Library, Module, Result,
    SizeRequest, Version,
};
use fontcore_autohint::{AutoHinter, FaceGlobals, HintConfig};
use fontcore_geom::{F26Dot6, Outline, Vector};
use fontcore_raster::SmoothRasterizer;

/// A driver with one glyph: a 600x600-unit triangle on a 1000-unit em,
/// standing in for a real sfnt face the way the other example repos'
/// integration tests stand a `StubFont`/`TestFont` in for a real one.
struct TriangleDriver;

impl Driver for TriangleDriver {
    fn name(&self) -> &str {
        "triangle"
    }

    fn face_init(&self, _data: &[u8], _face_index: u32) -> Result<Option<DriverFace>> {
        Ok(Some(DriverFace::new(
            FaceAttrs {
                num_glyphs: 2,
                units_per_em: 1000,
                ascender: 800,
                descender: -200,
                ..Default::default()
            },
            vec![],
            Box::new(()),
        )))
    }

    fn size_request(
        &self,
        _face: &DriverFace,
        request: &SizeRequest,
    ) -> Result<fontcore::SizeMetrics> {
        fontcore::SizeMetrics::from_ppem(request.x_ppem(), request.y_ppem(), 1000)
            .ok_or_else(|| Error::invalid_pixel_size(Module::Base))
    }

    fn load_glyph(&self, _face: &DriverFace, gindex: u32, _flags: LoadFlags) -> Result<RawGlyph> {
        let pt = |x, y| Vector::new(F26Dot6::from_int(x), F26Dot6::from_int(y));
        let outline = if gindex == 0 {
            Outline::new(vec![], vec![], vec![]).unwrap()
        } else {
            Outline::new(vec![pt(0, 0), pt(600, 0), pt(300, 600)], vec![0, 0, 0], vec![2]).unwrap()
        };
        Ok(RawGlyph {
            outline,
            advance_x: 650,
            advance_y: 0,
            format: GlyphFormat::Outline,
        })
    }
}

fn engine() -> (Library, TriangleDriver, AutoHinter) {
    let mut library = Library::new();
    library
        .register_driver(Box::new(TriangleDriver), Version(1, 0, 0))
        .unwrap();
    library.register_renderer(Box::new(SmoothRasterizer::new()));
    let hinter = AutoHinter::new(FaceGlobals::default(), HintConfig::default());
    (library, TriangleDriver, hinter)
}

#[test]
fn loading_and_rendering_a_glyph_produces_a_gray_bitmap() {
    let (library, driver, hinter) = engine();
    let mut face = library.open_face(&[], 0).unwrap();
    request_size(&driver, &mut face, SizeRequest::NominalPixels { x_ppem: 32, y_ppem: 32 })
        .unwrap();

    load_glyph(
        &library,
        &driver,
        &mut face,
        1,
        LoadFlags::RENDER,
        Some(&hinter),
        None,
    )
        .unwrap();

    let bitmap = face.slot().bitmap().expect("render flag should leave a bitmap");
    assert!(bitmap.width > 0);
    assert!(bitmap.rows > 0);
    assert!(bitmap.buffer.iter().any(|&b| b > 0), "triangle should cover some pixels");
}

#[test]
fn notdef_loads_and_renders_without_failing_the_whole_call() {
    let (library, driver, hinter) = engine();
    let mut face = library.open_face(&[], 0).unwrap();
    request_size(&driver, &mut face, SizeRequest::NominalPixels { x_ppem: 32, y_ppem: 32 })
        .unwrap();

    load_glyph(
        &library,
        &driver,
        &mut face,
        0,
        LoadFlags::RENDER,
        Some(&hinter),
        None,
    )
        .unwrap();

    let bitmap = face.slot().bitmap().expect("render flag should leave a bitmap");
    assert_eq!(bitmap.width, 0);
    assert_eq!(bitmap.rows, 0);
}

#[test]
fn no_scale_skips_hinting_and_rendering_entirely() {
    let (library, driver, _hinter) = engine();
    let mut face = library.open_face(&[], 0).unwrap();

    load_glyph(&library, &driver, &mut face, 1, LoadFlags::NO_SCALE, None, None).unwrap();

    assert!(face.slot().bitmap().is_none());
    let outline = face.slot().outline().unwrap();
    assert_eq!(outline.outline.points().len(), 3);
}
