use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipError {
    /// ffmpeg ran and failed (bad range, codec error, unreadable input).
    /// Recovered by the pipeline: the clip is skipped, processing
    /// continues.
    #[error("ffmpeg failed to encode clip: {stderr}")]
    Encode { stderr: String },

    /// ffmpeg could not be started or a path is not representable.
    /// Propagated: nothing later in the run would succeed either.
    #[error("failed to launch ffmpeg: {0}")]
    Launch(#[from] std::io::Error),

    #[error("path is not valid UTF-8: {0}")]
    InvalidPath(String),
}

/// Encodes a single subclip of a source video. The seam exists so the
/// pipeline can be exercised without a real encoder.
pub trait ClipEncoder {
    fn encode(&self, source: &Path, start: f64, end: f64, dest: &Path) -> Result<(), ClipError>;
}

/// Shells out to the `ffmpeg` binary, re-encoding the range with
/// libx264/aac for broad playback compatibility.
pub struct FfmpegEncoder;

fn path_str(path: &Path) -> Result<&str, ClipError> {
    path.to_str()
        .ok_or_else(|| ClipError::InvalidPath(path.display().to_string()))
}

// Global options must come before -i: ffmpeg attaches options to the
// following filename and silently drops any that trail the last output,
// so a trailing -y would leave reruns prompting for overwrite on a null
// stdin and failing.
fn ffmpeg_args(source: &str, start: f64, end: f64, dest: &str) -> Vec<String> {
    vec![
        "-hide_banner".into(),
        "-y".into(),
        "-loglevel".into(),
        "error".into(),
        "-i".into(),
        source.into(),
        "-ss".into(),
        format!("{start}"),
        "-to".into(),
        format!("{end}"),
        "-c:v".into(),
        "libx264".into(),
        "-c:a".into(),
        "aac".into(),
        dest.into(),
    ]
}

impl ClipEncoder for FfmpegEncoder {
    fn encode(&self, source: &Path, start: f64, end: f64, dest: &Path) -> Result<(), ClipError> {
        debug!("encoding clip {:?} [{start:.3}s - {end:.3}s]", dest);

        // Range validity is ffmpeg's problem: an inverted range surfaces
        // as its native encode error.
        let output = Command::new("ffmpeg")
            .args(ffmpeg_args(path_str(source)?, start, end, path_str(dest)?))
            .stdin(Stdio::null())
            .output()?;

        if output.status.success() {
            Ok(())
        } else {
            Err(ClipError::Encode {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
