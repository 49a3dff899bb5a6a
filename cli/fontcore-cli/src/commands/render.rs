//! `render` command: shape-free (char-by-char) text layout, rasterized
//! into a [`fontcore_cli::Canvas`] and written out as PGM or PNG.

use crate::cli::{Mode, OutputFormat, RenderArgs};
use anyhow::{bail, Context, Result};
use fontcore::RenderMode;
use fontcore_cli::{Canvas, Engine, RenderRequest};
use std::io::{self, Read, Write};
use std::path::Path;

const MARGIN: i32 = 4;

fn render_mode(mode: Mode) -> RenderMode {
    match mode {
        Mode::Normal => RenderMode::Normal,
        Mode::Light => RenderMode::Light,
        Mode::Mono => RenderMode::Mono,
        Mode::Lcd => RenderMode::Lcd,
        Mode::LcdV => RenderMode::LcdV,
    }
}

fn resolve_format(args: &RenderArgs) -> OutputFormat {
    if let Some(format) = args.format {
        return format;
    }
    match args.output_file.as_deref().and_then(Path::extension) {
        Some(ext) if ext.eq_ignore_ascii_case("pgm") => OutputFormat::Pgm,
        _ => OutputFormat::Png,
    }
}

fn read_text(args: &RenderArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("reading text from stdin")?;
    Ok(text.trim_end_matches('\n').to_string())
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let data = std::fs::read(&args.font_file)
        .with_context(|| format!("reading {}", args.font_file.display()))?;
    let text = read_text(args)?;
    if text.is_empty() {
        bail!("nothing to render: no text given and stdin was empty");
    }

    let engine = Engine::new().context("initializing rendering engine")?;
    let request = RenderRequest {
        font_data: &data,
        face_index: args.face_index,
        ppem: args.ppem,
        text: &text,
        mode: render_mode(args.mode),
    };
    let placed = engine.render(&request).context("rendering text")?;

    let baseline_y = (args.ppem as f32 * 0.85) as i32 + MARGIN;
    let height = args.ppem as i32 + 2 * MARGIN;
    let width = placed
        .last()
        .map(|g| g.pen_x + g.bitmap.advance.x.to_int_round())
        .unwrap_or(0)
        + 2 * MARGIN;

    let mut canvas = Canvas::new(width.max(1) as u32, height.max(1) as u32);
    for glyph in &placed {
        canvas.blit(&glyph.bitmap, glyph.pen_x + MARGIN, baseline_y);
    }

    let bytes = match resolve_format(args) {
        OutputFormat::Png => canvas.to_png().context("encoding PNG")?,
        OutputFormat::Pgm => canvas.to_pgm(),
    };

    if let Some(path) = &args.output_file {
        std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    } else {
        io::stdout().write_all(&bytes)?;
    }

    if !args.quiet {
        eprintln!(
            "rendered {} glyph(s), {}x{} canvas",
            placed.len(),
            canvas.width(),
            canvas.height()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args_with(format: Option<OutputFormat>, output_file: Option<&str>) -> RenderArgs {
        RenderArgs {
            text: None,
            font_file: PathBuf::from("unused.ttf"),
            face_index: 0,
            ppem: 32,
            mode: Mode::Normal,
            format,
            output_file: output_file.map(PathBuf::from),
            quiet: true,
        }
    }

    #[test]
    fn render_mode_maps_every_cli_mode_one_to_one() {
        assert_eq!(render_mode(Mode::Normal), RenderMode::Normal);
        assert_eq!(render_mode(Mode::Light), RenderMode::Light);
        assert_eq!(render_mode(Mode::Mono), RenderMode::Mono);
        assert_eq!(render_mode(Mode::Lcd), RenderMode::Lcd);
        assert_eq!(render_mode(Mode::LcdV), RenderMode::LcdV);
    }

    #[test]
    fn resolve_format_honors_an_explicit_flag_over_the_output_extension() {
        let args = args_with(Some(OutputFormat::Pgm), Some("out.png"));
        assert!(matches!(resolve_format(&args), OutputFormat::Pgm));
    }

    #[test]
    fn resolve_format_infers_pgm_from_the_output_file_extension() {
        let args = args_with(None, Some("out.pgm"));
        assert!(matches!(resolve_format(&args), OutputFormat::Pgm));
    }

    #[test]
    fn resolve_format_defaults_to_png_with_no_flag_or_recognized_extension() {
        assert!(matches!(resolve_format(&args_with(None, None)), OutputFormat::Png));
        assert!(matches!(
            resolve_format(&args_with(None, Some("out.bmp"))),
            OutputFormat::Png
        ));
    }
}
