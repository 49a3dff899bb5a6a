//! `batch` command: one render job per input line, one result per output
//! line, streamed rather than collected so a single bad job doesn't hold
//! up the rest.

use crate::cli::BatchArgs;
use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use fontcore::RenderMode;
use fontcore_cli::jsonl::{ImageOutput, Job, JobFormat, JobMode, JobResult};
use fontcore_cli::{Canvas, Engine, RenderRequest};
use std::io::{self, BufRead, BufReader, Write};
use std::time::Instant;

const MARGIN: i32 = 4;

fn render_mode(mode: JobMode) -> RenderMode {
    match mode {
        JobMode::Normal => RenderMode::Normal,
        JobMode::Light => RenderMode::Light,
        JobMode::Mono => RenderMode::Mono,
        JobMode::Lcd => RenderMode::Lcd,
        JobMode::LcdV => RenderMode::LcdV,
    }
}

fn run_job(engine: &Engine, job: &Job) -> Result<ImageOutput> {
    let data = std::fs::read(&job.font_path)
        .with_context(|| format!("reading {}", job.font_path.display()))?;
    let request = RenderRequest {
        font_data: &data,
        face_index: job.face_index,
        ppem: job.ppem,
        text: &job.text,
        mode: render_mode(job.mode),
    };
    let placed = engine.render(&request)?;

    let baseline_y = (job.ppem as f32 * 0.85) as i32 + MARGIN;
    let height = job.ppem as i32 + 2 * MARGIN;
    let width = placed
        .last()
        .map(|g| g.pen_x + g.bitmap.advance.x.to_int_round())
        .unwrap_or(0)
        + 2 * MARGIN;

    let mut canvas = Canvas::new(width.max(1) as u32, height.max(1) as u32);
    for glyph in &placed {
        canvas.blit(&glyph.bitmap, glyph.pen_x + MARGIN, baseline_y);
    }

    let (bytes, format) = match job.format {
        JobFormat::Png => (canvas.to_png()?, "png"),
        JobFormat::Pgm => (canvas.to_pgm(), "pgm"),
    };

    Ok(ImageOutput {
        format,
        encoding: "base64",
        data: BASE64.encode(&bytes),
        width: canvas.width(),
        height: canvas.height(),
    })
}

pub fn run(args: &BatchArgs) -> Result<()> {
    let engine = Engine::new().context("initializing rendering engine")?;
    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut stdout = io::stdout().lock();
    let mut count = 0usize;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        count += 1;
        let start = Instant::now();

        let result = match serde_json::from_str::<Job>(&line) {
            Ok(job) => {
                let id = job.id.clone();
                match run_job(&engine, &job) {
                    Ok(image) => JobResult::success(id, image, start.elapsed().as_secs_f64() * 1000.0),
                    Err(e) => JobResult::error(id, e, start.elapsed().as_secs_f64() * 1000.0),
                }
            }
            Err(e) => JobResult::error(
                format!("line-{count}"),
                format_args!("invalid job: {e}"),
                start.elapsed().as_secs_f64() * 1000.0,
            ),
        };

        serde_json::to_writer(&mut stdout, &result)?;
        writeln!(&mut stdout)?;
    }

    if !args.quiet {
        eprintln!("processed {count} job(s)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_mode_maps_every_job_mode_one_to_one() {
        assert_eq!(render_mode(JobMode::Normal), RenderMode::Normal);
        assert_eq!(render_mode(JobMode::Light), RenderMode::Light);
        assert_eq!(render_mode(JobMode::Mono), RenderMode::Mono);
        assert_eq!(render_mode(JobMode::Lcd), RenderMode::Lcd);
        assert_eq!(render_mode(JobMode::LcdV), RenderMode::LcdV);
    }
}
