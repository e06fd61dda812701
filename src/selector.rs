//! Highlight selection: maps keyword-bearing sentences to transcript
//! segments by substring containment, claiming each segment at most once.

use crate::sentence::SentenceSplitter;
use crate::transcript::Transcript;
use std::collections::HashSet;

/// Keywords that mark a sentence as highlight-worthy.
pub const DEFAULT_KEYWORDS: [&str; 12] = [
    "why",
    "important",
    "discovered",
    "scientific",
    "found",
    "researchers",
    "experiment",
    "dream",
    "REM",
    "lucid",
    "theory",
    "explained",
];

/// A segment selected for clipping. `start` is clamped to zero; `end` is
/// taken from the segment as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightMatch {
    pub segment_id: i64,
    pub start: f64,
    pub end: f64,
}

pub struct HighlightSelector {
    keywords: Vec<String>,
}

impl Default for HighlightSelector {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS)
    }
}

impl HighlightSelector {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Selects highlight matches for a transcript.
    ///
    /// Sentences are processed in document order. Each sentence containing
    /// a keyword (case-insensitive) is assigned the first unclaimed segment
    /// whose raw text contains the sentence's trimmed text, scanning
    /// segments in stored order. A claimed segment is never matched again,
    /// and a sentence claims at most one segment. Sentences with no
    /// matching segment are skipped silently.
    ///
    /// The result follows sentence order, not time order: a later sentence
    /// can claim an earlier unclaimed segment, so matches are not
    /// necessarily sorted by start time.
    pub fn select(&self, transcript: &Transcript, splitter: &SentenceSplitter) -> Vec<HighlightMatch> {
        let mut matches = Vec::new();
        let mut used_ids: HashSet<i64> = HashSet::new();

        let highlight_sentences = splitter.split(&transcript.text).filter(|sentence| {
            let lowered = sentence.to_lowercase();
            self.keywords.iter().any(|kw| lowered.contains(kw.as_str()))
        });

        for sentence in highlight_sentences {
            let trimmed = sentence.trim();
            for segment in &transcript.segments {
                if used_ids.contains(&segment.id) {
                    continue;
                }
                if segment.text.contains(trimmed) {
                    matches.push(HighlightMatch {
                        segment_id: segment.id,
                        start: segment.start.max(0.0),
                        end: segment.end,
                    });
                    used_ids.insert(segment.id);
                    break;
                }
            }
        }

        matches
    }
}
