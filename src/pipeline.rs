//! End-to-end extraction: transcript -> sentences -> highlight matches ->
//! numbered clip files. Single-threaded and blocking; one extraction call
//! is expected to be in flight at a time.

use crate::clipper::{ClipEncoder, ClipError, FfmpegEncoder};
use crate::config::HighlightConfig;
use crate::selector::{HighlightMatch, HighlightSelector};
use crate::sentence::SentenceSplitter;
use crate::transcript::{TranscriptError, load_transcript};
use indicatif::ProgressBar;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    /// A non-recoverable encoder failure (missing ffmpeg, bad path).
    /// Per-clip encode failures are handled inside the run instead.
    #[error(transparent)]
    Clip(#[from] ClipError),
}

#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Highlight matches selected from the transcript.
    pub matched: usize,
    /// Clip files actually written, in creation order.
    pub clips: Vec<PathBuf>,
}

/// Runs the full extraction with a caller-supplied encoder.
///
/// Clips are named `clip_<n>.mp4` with `n` starting at 1; the counter
/// advances only on successful writes, so a failed encode leaves no gap
/// in the sequence. Encode failures are logged and skipped; loader and
/// launch failures abort the run.
pub fn run_extraction(
    video_path: &Path,
    config: &HighlightConfig,
    encoder: &dyn ClipEncoder,
    progress: &ProgressBar,
) -> Result<ExtractionReport, PipelineError> {
    let transcript = load_transcript(&config.transcript_path)?;

    let splitter = SentenceSplitter::default();
    let selector = HighlightSelector::new(&config.keywords);
    let matches = selector.select(&transcript, &splitter);
    info!("selected {} highlight match(es)", matches.len());
    progress.set_length(matches.len() as u64);

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| PipelineError::Clip(ClipError::Launch(e)))?;

    let mut report = ExtractionReport {
        matched: matches.len(),
        ..Default::default()
    };

    for HighlightMatch {
        segment_id,
        start,
        end,
    } in matches
    {
        let dest = config
            .output_dir
            .join(format!("clip_{}.mp4", report.clips.len() + 1));

        match encoder.encode(video_path, start, end, &dest) {
            Ok(()) => {
                info!(
                    "wrote {:?} for segment {segment_id} [{start:.2}s - {end:.2}s]",
                    dest
                );
                report.clips.push(dest);
            }
            Err(ClipError::Encode { stderr }) => {
                warn!("skipping segment {segment_id}: encode failed: {stderr}");
            }
            Err(err) => return Err(err.into()),
        }
        progress.inc(1);
    }

    Ok(report)
}

/// The single entry point for external shells. Failures are logged and
/// swallowed; success is observed by listing the output directory.
pub fn extract_smart_clips(video_path: &Path, config: &HighlightConfig) {
    match run_extraction(video_path, config, &FfmpegEncoder, &ProgressBar::hidden()) {
        Ok(report) => info!("created {} smart clip(s)", report.clips.len()),
        Err(err) => error!("extraction failed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Write;
    use std::path::PathBuf;

    /// Records encode calls and fails the attempts whose (zero-based)
    /// index is listed in `fail_on`.
    struct MockEncoder {
        fail_on: Vec<usize>,
        calls: RefCell<Vec<(f64, f64, PathBuf)>>,
    }

    impl MockEncoder {
        fn new(fail_on: Vec<usize>) -> Self {
            Self {
                fail_on,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ClipEncoder for MockEncoder {
        fn encode(
            &self,
            _source: &Path,
            start: f64,
            end: f64,
            dest: &Path,
        ) -> Result<(), ClipError> {
            let index = self.calls.borrow().len();
            self.calls.borrow_mut().push((start, end, dest.to_path_buf()));
            if self.fail_on.contains(&index) {
                Err(ClipError::Encode {
                    stderr: "injected failure".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn config_with_transcript(dir: &tempfile::TempDir, json: &str) -> HighlightConfig {
        let transcript_path = dir.path().join("transcript.json");
        let mut file = std::fs::File::create(&transcript_path).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        HighlightConfig {
            transcript_path,
            output_dir: dir.path().join("shorts"),
            ..Default::default()
        }
    }

    const TWO_MATCH_TRANSCRIPT: &str = r#"{
        "text": "We discovered gold. The experiment ended.",
        "segments": [
            {"id": 1, "start": 0.0, "end": 2.0, "text": "We discovered gold."},
            {"id": 2, "start": 2.0, "end": 4.0, "text": "The experiment ended."}
        ]
    }"#;

    #[test]
    fn writes_sequentially_numbered_clips() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_transcript(&dir, TWO_MATCH_TRANSCRIPT);
        let encoder = MockEncoder::new(vec![]);

        let report = run_extraction(Path::new("video.mp4"), &config, &encoder, &ProgressBar::hidden()).unwrap();

        assert_eq!(report.matched, 2);
        let names: Vec<_> = report
            .clips
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["clip_1.mp4", "clip_2.mp4"]);
    }

    #[test]
    fn failed_encode_does_not_consume_a_sequence_number() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_transcript(&dir, TWO_MATCH_TRANSCRIPT);
        let encoder = MockEncoder::new(vec![0]);

        let report = run_extraction(Path::new("video.mp4"), &config, &encoder, &ProgressBar::hidden()).unwrap();

        // First attempt fails, second match still becomes clip_1.
        assert_eq!(report.matched, 2);
        assert_eq!(report.clips.len(), 1);
        assert_eq!(report.clips[0].file_name().unwrap(), "clip_1.mp4");

        let calls = encoder.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].2.file_name().unwrap(), "clip_1.mp4");
    }

    #[test]
    fn missing_transcript_aborts_with_zero_clips() {
        let dir = tempfile::tempdir().unwrap();
        let config = HighlightConfig {
            transcript_path: dir.path().join("absent.json"),
            output_dir: dir.path().join("shorts"),
            ..Default::default()
        };
        let encoder = MockEncoder::new(vec![]);

        let err = run_extraction(Path::new("video.mp4"), &config, &encoder, &ProgressBar::hidden()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transcript(TranscriptError::NotFound(_))
        ));
        assert!(encoder.calls.borrow().is_empty());
    }

    #[test]
    fn extract_smart_clips_swallows_loader_failures() {
        let dir = tempfile::tempdir().unwrap();
        let config = HighlightConfig {
            transcript_path: dir.path().join("absent.json"),
            output_dir: dir.path().join("shorts"),
            ..Default::default()
        };

        // Must not panic or propagate; the output directory simply stays
        // absent.
        extract_smart_clips(Path::new("video.mp4"), &config);
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn encoder_receives_clamped_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_transcript(
            &dir,
            r#"{
                "text": "Researchers were stunned.",
                "segments": [
                    {"id": 1, "start": -3.0, "end": 5.0, "text": "Researchers were stunned."}
                ]
            }"#,
        );
        let encoder = MockEncoder::new(vec![]);

        run_extraction(Path::new("video.mp4"), &config, &encoder, &ProgressBar::hidden()).unwrap();

        let calls = encoder.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, 0.0);
        assert_eq!(calls[0].1, 5.0);
    }
}
