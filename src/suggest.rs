//! Prefix-based keyword autocompletion with tab-acceptance semantics.
//!
//! The vocabulary is the set of existing record names, in whatever order the
//! store returned them; callers refresh it once per editing session and
//! stale reads are acceptable. Matching is first-match in that order — a
//! deliberate, preserved behavior, not a bug (sorting the candidates first
//! would change which name wins a shared prefix).

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Longest in-progress segment that still triggers a suggestion. Anything
/// longer is assumed not to be a keyword-in-progress.
pub const MAX_PARTIAL_LEN: usize = 20;

// ─────────────────────────────────────────────────────────────────────────────
// KeywordMatcher
// ─────────────────────────────────────────────────────────────────────────────

/// Incremental matcher over a candidate vocabulary.
///
/// Input is a comma-separated list whose last segment is "in progress";
/// [`suggest`](Self::suggest) completes that segment and
/// [`accept`](Self::accept) commits the completion.
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    /// Case-preserving candidates, in insertion order.
    candidates: Vec<String>,
}

impl KeywordMatcher {
    /// Creates a matcher over the given candidates.
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    /// Replaces the vocabulary, e.g. at the start of an editing session.
    pub fn refresh(&mut self, candidates: Vec<String>) {
        self.candidates = candidates;
    }

    /// The current vocabulary.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Suggests a completion for the in-progress segment of `input`.
    ///
    /// The last comma-delimited segment is trimmed and lowercased; an empty
    /// or overlong segment yields no suggestion. Otherwise the first
    /// candidate whose lowercased form starts with the segment wins.
    pub fn suggest(&self, input: &str) -> Option<&str> {
        let partial = input
            .split(',')
            .next_back()
            .unwrap_or("")
            .trim()
            .to_lowercase();

        if partial.is_empty() || partial.chars().count() > MAX_PARTIAL_LEN {
            return None;
        }

        self.candidates
            .iter()
            .find(|candidate| candidate.to_lowercase().starts_with(&partial))
            .map(String::as_str)
    }

    /// Replaces the in-progress segment of `input` with `suggestion` and
    /// primes entry of the next keyword with a trailing `", "`.
    pub fn accept(input: &str, suggestion: &str) -> String {
        let mut segments: Vec<&str> = input.split(',').collect();
        segments.pop();
        let mut parts: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
        parts.push(suggestion.to_string());
        format!("{}, ", parts.join(", "))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
