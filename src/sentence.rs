//! Punctuation-based sentence boundary detection over transcript text.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static DEFAULT_ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["mr.", "ms.", "mrs.", "dr.", "prof.", "st.", "vs.", "etc.", "e.g.", "i.e."]
        .into_iter()
        .collect()
});

/// Splits text into sentence spans at terminal punctuation, skipping
/// periods that belong to known abbreviations or initialisms.
///
/// The abbreviation set is built once at process start and is immutable
/// afterwards; construct with [`SentenceSplitter::default`] unless a
/// custom set is needed.
pub struct SentenceSplitter {
    abbreviations: HashSet<String>,
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SentenceSplitter {
    pub fn with_abbreviations<I, S>(abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            abbreviations: abbreviations
                .into_iter()
                .map(|s| s.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Returns a lazy iterator of sentence spans in document order.
    /// Whitespace-only spans are never yielded. The iterator borrows the
    /// input, so splitting can be restarted by calling `split` again.
    pub fn split<'a>(&'a self, text: &'a str) -> Sentences<'a> {
        Sentences {
            splitter: self,
            chars: text.char_indices().collect(),
            text,
            pos: 0,
        }
    }

    fn is_abbreviation(&self, chars: &[(usize, char)], dot_idx: usize) -> bool {
        let mut start = dot_idx;
        while start > 0 && chars[start - 1].1.is_alphabetic() {
            start -= 1;
        }
        if start == dot_idx {
            return false;
        }

        let token: String = chars[start..dot_idx].iter().map(|(_, c)| c).collect();
        let lookup = format!("{}.", token.to_ascii_lowercase());
        if self.abbreviations.contains(&lookup) {
            return true;
        }

        // Single letters: interior periods of initialisms like "U.S."
        // are not sentence boundaries.
        if token.chars().count() == 1 {
            if start >= 2 && chars[start - 1].1 == '.' && chars[start - 2].1.is_alphabetic() {
                return true;
            }

            let mut next = dot_idx + 1;
            while next < chars.len() && chars[next].1.is_whitespace() {
                next += 1;
            }
            if next + 1 < chars.len() && chars[next].1.is_alphabetic() && chars[next + 1].1 == '.' {
                return true;
            }
        }

        false
    }
}

pub struct Sentences<'a> {
    splitter: &'a SentenceSplitter,
    chars: Vec<(usize, char)>,
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.pos < self.chars.len() {
            let span_start = self.pos;

            let mut end = None;
            for idx in span_start..self.chars.len() {
                let (_, ch) = self.chars[idx];
                if matches!(ch, '.' | '!' | '?')
                    && !(ch == '.' && self.splitter.is_abbreviation(&self.chars, idx))
                {
                    end = Some(idx);
                    break;
                }
            }

            let span = match end {
                Some(idx) => {
                    self.pos = idx + 1;
                    let byte_start = self.chars[span_start].0;
                    let byte_end = self.chars[idx].0 + self.chars[idx].1.len_utf8();
                    &self.text[byte_start..byte_end]
                }
                None => {
                    // Trailing text without terminal punctuation.
                    self.pos = self.chars.len();
                    let byte_start = self.chars[span_start].0;
                    &self.text[byte_start..]
                }
            };

            if span.chars().any(|c| !c.is_whitespace()) {
                return Some(span);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::SentenceSplitter;

    fn split(text: &str) -> Vec<String> {
        let splitter = SentenceSplitter::default();
        splitter.split(text).map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let sentences = split("We discovered something. The sky is blue.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "We discovered something.");
        assert_eq!(sentences[1], " The sky is blue.");
    }

    #[test]
    fn does_not_split_common_abbreviations() {
        let sentences = split("Dr. Smith walked in. Mrs. Jones stayed.");
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn keeps_initialism_together() {
        let sentences = split("This uses U.S. spelling. Next sentence.");
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn handles_question_and_exclamation_marks() {
        let sentences = split("Why does this work? It just does!");
        assert_eq!(sentences, vec!["Why does this work?", " It just does!"]);
    }

    #[test]
    fn yields_trailing_unterminated_text() {
        let sentences = split("First sentence. and then it trails off");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1], " and then it trails off");
    }

    #[test]
    fn skips_whitespace_only_spans() {
        let sentences = split("One.   ");
        assert_eq!(sentences, vec!["One."]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(split("").is_empty());
    }

    #[test]
    fn iteration_is_restartable() {
        let splitter = SentenceSplitter::default();
        let text = "First. Second.";
        let once: Vec<_> = splitter.split(text).collect();
        let twice: Vec<_> = splitter.split(text).collect();
        assert_eq!(once, twice);
    }
}
