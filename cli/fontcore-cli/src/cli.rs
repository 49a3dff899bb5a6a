//! Command-line argument definitions, trimmed to the pipeline this crate
//! actually drives: load one glyph at a time, print metrics, rasterize.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fontcore - exercise the font rendering engine from the command line
#[derive(Parser, Debug)]
#[command(name = "fontcore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print face attributes and size metrics for a font
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Render text to a bitmap file
    #[command(alias = "r")]
    Render(RenderArgs),

    /// Process a JSONL file of render jobs
    Batch(BatchArgs),
}

/// Which render target to rasterize into, mirroring
/// `fontcore::RenderMode`.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
#[value(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Light,
    Mono,
    Lcd,
    LcdV,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Pgm,
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Font file path (.ttf, .otf, .ttc, .otc)
    #[arg(short = 'f', long = "font-file")]
    pub font_file: PathBuf,

    /// Face index for TTC/OTC collections
    #[arg(short = 'y', long = "face-index", default_value = "0")]
    pub face_index: u32,

    /// Also report metrics at this pixel size
    #[arg(short = 's', long = "ppem")]
    pub ppem: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Text to render (reads a single line from stdin if omitted)
    pub text: Option<String>,

    /// Font file path (.ttf, .otf, .ttc, .otc)
    #[arg(short = 'f', long = "font-file")]
    pub font_file: PathBuf,

    /// Face index for TTC/OTC collections
    #[arg(short = 'y', long = "face-index", default_value = "0")]
    pub face_index: u32,

    /// Pixel size (square ppem)
    #[arg(short = 's', long = "ppem", default_value = "32")]
    pub ppem: u32,

    /// Render target
    #[arg(short = 'm', long = "mode", default_value = "normal")]
    pub mode: Mode,

    /// Output format: png or pgm, inferred from `--output-file`'s
    /// extension when omitted
    #[arg(short = 'O', long = "format")]
    pub format: Option<OutputFormat>,

    /// Output file path (stdout if omitted)
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Silent mode (no progress info)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Input JSONL file (one job per line, stdin if omitted)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Silent mode
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}
