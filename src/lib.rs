pub mod clipper;
pub mod config;
pub mod pipeline;
pub mod selector;
pub mod sentence;
pub mod transcript;

// Re-export the pieces an embedding shell needs at the crate root.
pub use clipper::{ClipEncoder, ClipError, FfmpegEncoder};
pub use config::HighlightConfig;
pub use pipeline::{ExtractionReport, PipelineError, extract_smart_clips, run_extraction};
pub use selector::{DEFAULT_KEYWORDS, HighlightMatch, HighlightSelector};
pub use transcript::{Segment, Transcript, TranscriptError, load_transcript};
