use std::time::{Duration, Instant};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParagraphError {
    #[error("reference text must not be empty")]
    EmptyText,
    #[error("cursor is already at the beginning")]
    AtBeginning,
}

/// judgment recorded for one reference character slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharOutcome {
    Pending,
    Correct,
    /// correct on a revisit, after the slot had been missed before
    Amended,
    Wrong,
}

/// per-character state machine for one paragraph of reference text
///
/// The cursor moves forward on `type_char` and back on `backspace`. Outcomes
/// are only ever overwritten by typing; backspacing over a slot leaves its
/// last judgment in place until the slot is retyped, so the statistics keep
/// seeing errors that were stepped over but not yet fixed.
#[derive(Debug)]
pub struct ParagraphTracker {
    chars: Vec<char>,
    outcomes: Vec<CharOutcome>,
    cursor: usize,
    chars_touched: usize,
    error_count: usize,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl ParagraphTracker {
    pub fn new(text: &str) -> Result<Self, ParagraphError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Err(ParagraphError::EmptyText);
        }
        let outcomes = vec![CharOutcome::Pending; chars.len()];
        Ok(Self {
            chars,
            outcomes,
            cursor: 0,
            chars_touched: 0,
            error_count: 0,
            started_at: None,
            finished_at: None,
        })
    }

    /// judges `c` against the reference character under the cursor and
    /// advances; panics if the paragraph is already complete (callers gate
    /// on `is_complete`)
    pub fn type_char(&mut self, c: char) -> CharOutcome {
        assert!(
            self.cursor < self.chars.len(),
            "type_char called on a completed paragraph"
        );

        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }

        let outcome = if c == self.chars[self.cursor] {
            match self.outcomes[self.cursor] {
                CharOutcome::Pending | CharOutcome::Correct => CharOutcome::Correct,
                CharOutcome::Amended | CharOutcome::Wrong => CharOutcome::Amended,
            }
        } else {
            self.error_count += 1;
            CharOutcome::Wrong
        };

        self.outcomes[self.cursor] = outcome;
        self.cursor += 1;
        self.chars_touched = self.chars_touched.max(self.cursor);

        if self.cursor == self.chars.len() && self.finished_at.is_none() {
            self.finished_at = Some(Instant::now());
        }

        outcome
    }

    /// rewinds the cursor one slot and returns the reference character that
    /// now sits under it, so the caller can repaint it as pending again
    pub fn backspace(&mut self) -> Result<char, ParagraphError> {
        if self.cursor == 0 {
            return Err(ParagraphError::AtBeginning);
        }
        self.cursor -= 1;
        Ok(self.chars[self.cursor])
    }

    pub fn is_complete(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// time spent typing: zero before the first keystroke, frozen once the
    /// paragraph is complete, live otherwise
    pub fn elapsed(&self) -> Duration {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// high-water mark of the cursor; never decreases
    pub fn chars_touched(&self) -> usize {
        self.chars_touched
    }

    /// every miss ever made, including repeated misses on the same slot
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn outcomes(&self) -> &[CharOutcome] {
        &self.outcomes
    }
}
