//! The glyph loading pipeline: the state machine that composes
//! driver dispatch, scaling, hinting, and rendering.

use crate::driver::{Driver, LoadFlags};
use crate::error::{Error, ErrorKind, Module, Result};
use crate::face::Face;
use crate::glyph::{GlyphFormat, OutlineGlyph};
use crate::hint::{DiagSink, Hinter};
use crate::registry::{Library, LoaderState};
use crate::renderer::{select_renderer, RenderMode};
use crate::size::SizeRequest;
use fontcore_geom::Vector;

fn render_mode_from_flags(flags: LoadFlags) -> RenderMode {
    if flags.contains(LoadFlags::TARGET_LCD) {
        RenderMode::Lcd
    } else if flags.contains(LoadFlags::TARGET_LCD_V) {
        RenderMode::LcdV
    } else if flags.contains(LoadFlags::TARGET_MONO) || flags.contains(LoadFlags::MONOCHROME) {
        RenderMode::Mono
    } else if flags.contains(LoadFlags::TARGET_LIGHT) {
        RenderMode::Light
    } else {
        RenderMode::Normal
    }
}

/// Open a size against `face` if one doesn't match `request` already,
/// recomputing driver-specific metrics on every scale change.
pub fn request_size(
    driver: &dyn Driver,
    face: &mut Face,
    request: SizeRequest,
) -> Result<()> {
    Face::validate_request(&request)?;
    let metrics = driver.size_request(face.driver_face(), &request)?;
    let id = face.alloc_size_id();
    let size = crate::size::Size::new(id, metrics);
    face.push_size(size);
    Ok(())
}

/// Map a character code through the face's active char-map to a glyph
/// index, delegating to the owning driver.
pub fn char_index(driver: &dyn Driver, face: &Face, charcode: u32) -> Result<u32> {
    driver.get_char_index(face.driver_face(), charcode)
}

/// Run the loader state machine for one glyph. `hinter` supplies
/// the auto-hinter when the driver doesn't hint natively (or
/// `force_autohint` is set); it may be `None` if no hinter is wired up,
/// in which case hinting is silently skipped (equivalent to `no_hinting`).
pub fn load_glyph(
    library: &Library,
    driver: &dyn Driver,
    face: &mut Face,
    gindex: u32,
    flags: LoadFlags,
    hinter: Option<&dyn Hinter>,
    mut diag: DiagSink<'_>,
) -> Result<()> {
    face.slot_mut().clear();
    library.notify(LoaderState::Start, face.slot());

    if gindex >= face.num_glyphs() && gindex != 0 {
        return Err(Error::invalid_glyph_index(Module::Base));
    }

    let raw = match driver.load_glyph(face.driver_face(), gindex, flags) {
        Ok(raw) => raw,
        Err(e) => {
            face.slot_mut().clear();
            library.notify(LoaderState::End, face.slot());
            return Err(e);
        }
    };

    if raw.format != GlyphFormat::Outline {
        return Err(Error::unimplemented_feature(Module::Base));
    }

    if flags.contains(LoadFlags::NO_SCALE) {
        library.notify(LoaderState::LoadUnscaled, face.slot());
        face.slot_mut().set_outline(OutlineGlyph {
            outline: raw.outline,
            advance: Vector::new(
                fontcore_geom::F26Dot6::from_int(raw.advance_x),
                fontcore_geom::F26Dot6::from_int(raw.advance_y),
            ),
        });
        library.notify(LoaderState::End, face.slot());
        return Ok(());
    }

    let size = face
        .active_size()
        .ok_or_else(|| Error::new(Module::Base, ErrorKind::InvalidSizeHandle))?;
    let x_scale = size.metrics.x_scale;
    let y_scale = size.metrics.y_scale;

    library.notify(LoaderState::LoadScaled, face.slot());
    let scaled = raw.outline.map_points(|p| p.scaled(x_scale, y_scale));

    let hinting_enabled = !flags.contains(LoadFlags::NO_HINTING)
    && (flags.contains(LoadFlags::FORCE_AUTOHINT)
        || (!driver.hints_natively() && !flags.contains(LoadFlags::NO_AUTOHINT)));

    let hinted = if hinting_enabled {
        library.notify(LoaderState::Autohint, face.slot());
        match hinter {
            Some(h) => h.hint(&scaled, x_scale, y_scale, diag.take())?,
            None => scaled,
        }
    } else {
        scaled
    };

    let advance_x_units = if !flags.contains(LoadFlags::IGNORE_GLOBAL_ADVANCE_WIDTH)
        && face.attrs().is_fixed_pitch
    {
        face.attrs().max_advance_width
    } else {
        raw.advance_x
    };

    let mut advance = if flags.contains(LoadFlags::VERTICAL_LAYOUT) {
        Vector::new(
            fontcore_geom::F26Dot6::ZERO,
            fontcore_geom::F26Dot6::from_int(raw.advance_y).scale_by(y_scale),
        )
    } else {
        Vector::new(
            fontcore_geom::F26Dot6::from_int(advance_x_units).scale_by(x_scale),
            fontcore_geom::F26Dot6::from_int(raw.advance_y).scale_by(y_scale),
        )
    };

    let mut outline = hinted;
    if let Some((matrix, delta)) = face.transform() {
        if !flags.contains(LoadFlags::IGNORE_TRANSFORM) {
            outline = outline.map_points(|p| matrix.apply(p) + delta);
            advance = matrix.apply(advance);
        }
    }

    // `clear()` at the top of this call already zeroed both fields, so a
    // `load_glyph` without `linear_design` leaves them at `Vector::ZERO`.
    if flags.contains(LoadFlags::LINEAR_DESIGN) {
        face.slot_mut().linear_horizontal_advance =
            Vector::new(fontcore_geom::F26Dot6::from_int(raw.advance_x), fontcore_geom::F26Dot6::ZERO);
        face.slot_mut().linear_vertical_advance =
            Vector::new(fontcore_geom::F26Dot6::ZERO, fontcore_geom::F26Dot6::from_int(raw.advance_y));
    }

    face.slot_mut().set_outline(OutlineGlyph {
        outline,
        advance,
    });
    face.slot_mut().advance = advance;

    library.notify(LoaderState::RenderOrDone, face.slot());

    if !flags.contains(LoadFlags::RENDER) {
        library.notify(LoaderState::End, face.slot());
        return Ok(());
    }

    library.notify(LoaderState::SelectRenderer, face.slot());
    let mode = render_mode_from_flags(flags);
    let renderer = select_renderer(library.renderers(), GlyphFormat::Outline, mode)
        .ok_or_else(|| Error::cannot_render_glyph(Module::Base))?;

    library.notify(LoaderState::Rasterize, face.slot());
    let outline_glyph = face
        .slot()
        .outline()
        .ok_or_else(|| Error::new(Module::Base, ErrorKind::InvalidGlyphIndex))?
        .clone();
    match renderer.render(&outline_glyph, mode, Vector::ZERO) {
        Ok(bitmap) => {
            let bitmap = if flags.contains(LoadFlags::CROP_BITMAP) {
                bitmap.cropped()
            } else {
                bitmap
            };
            face.slot_mut().set_bitmap(bitmap);
            library.notify(LoaderState::End, face.slot());
            Ok(())
        }
        Err(e) => {
            face.slot_mut().clear();
            library.notify(LoaderState::End, face.slot());
            Err(e)
        }
    }
}
