//! Draft character counter.

use std::fmt;

use super::{COUNTER_WARNING_THRESHOLD, MAX_MESSAGE_CHARS};

/// Color of the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterTone {
    Neutral,
    Warning,
}

impl CounterTone {
    /// CSS color for the tone.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Neutral => "#6c757d",
            Self::Warning => "#dc3545",
        }
    }
}

/// Derived counter value for a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCount {
    pub length: usize,
    pub tone: CounterTone,
}

impl CharCount {
    /// Count the characters of `draft`, untrimmed.
    #[must_use]
    pub fn of(draft: &str) -> Self {
        let length = draft.chars().count();
        let tone = if length > COUNTER_WARNING_THRESHOLD {
            CounterTone::Warning
        } else {
            CounterTone::Neutral
        };
        Self { length, tone }
    }
}

impl fmt::Display for CharCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{MAX_MESSAGE_CHARS}", self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_switches_above_threshold() {
        assert_eq!(CharCount::of(&"a".repeat(450)).tone, CounterTone::Neutral);
        assert_eq!(CharCount::of(&"a".repeat(451)).tone, CounterTone::Warning);
        assert_eq!(CharCount::of("").tone, CounterTone::Neutral);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let count = CharCount::of("héllo ✓");
        assert_eq!(count.length, 7);
        assert_eq!(count.to_string(), "7/500");
    }

    #[test]
    fn test_counts_untrimmed_draft() {
        assert_eq!(CharCount::of("  hi  ").length, 6);
    }
}
