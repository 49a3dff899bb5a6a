//! JSONL job/result types for batch rendering.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One rendering job read from a line of the batch input.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub id: String,
    pub font_path: PathBuf,
    #[serde(default)]
    pub face_index: u32,
    pub text: String,
    #[serde(default = "default_ppem")]
    pub ppem: u32,
    #[serde(default)]
    pub mode: JobMode,
    #[serde(default)]
    pub format: JobFormat,
}

fn default_ppem() -> u32 {
    32
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobMode {
    #[default]
    Normal,
    Light,
    Mono,
    Lcd,
    LcdV,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobFormat {
    #[default]
    Png,
    Pgm,
}

/// One result line written back for a job, success or failure.
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    pub id: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timing_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageOutput {
    pub format: &'static str,
    pub encoding: &'static str,
    pub data: String,
    pub width: u32,
    pub height: u32,
}

impl JobResult {
    pub fn error(id: impl Into<String>, message: impl std::fmt::Display, timing_ms: f64) -> Self {
        JobResult {
            id: id.into(),
            status: "error",
            image: None,
            error: Some(message.to_string()),
            timing_ms,
        }
    }

    pub fn success(id: impl Into<String>, image: ImageOutput, timing_ms: f64) -> Self {
        JobResult {
            id: id.into(),
            status: "success",
            image: Some(image),
            error: None,
            timing_ms,
        }
    }
}
