use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// A whisper-style transcript: the full concatenated text plus
/// time-stamped segments, ordered by non-decreasing start time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Transcript {
    pub text: String,
    // A transcript without a "segments" key is treated as empty, not malformed.
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Segment {
    pub id: i64,
    pub start: f64, // seconds
    pub end: f64,   // seconds
    pub text: String,
}

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("transcript file not found: {0}")]
    NotFound(String),

    #[error("transcript has no segments")]
    EmptySegments,

    #[error("failed to parse transcript: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read transcript: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads a transcript JSON file. A missing file or an empty segment list
/// is terminal for the current extraction call; the caller logs and
/// produces zero clips. No retries.
pub fn load_transcript(path: &Path) -> Result<Transcript, TranscriptError> {
    if !path.exists() {
        return Err(TranscriptError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let transcript: Transcript = serde_json::from_str(&content)?;

    if transcript.segments.is_empty() {
        return Err(TranscriptError::EmptySegments);
    }

    Ok(transcript)
}
