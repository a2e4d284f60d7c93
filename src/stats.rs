use crate::paragraph::{CharOutcome, ParagraphTracker};

const CHARS_PER_STD_WORD: f64 = 5.0;
// one character is 0.2 standard words; subtracting it keeps the very first
// keystroke from reading as near-infinite WPM
const ONE_CHAR_IN_WORDS: f64 = 0.2;

/// derived statistics for a single paragraph
///
/// Formulas follow <https://www.speedtypingonline.com/typing-equations>:
/// gross WPM counts everything typed, net WPM penalizes each still-wrong
/// character as a whole word, result accuracy looks at what is on screen now
/// while real accuracy also charges misses that were later amended.
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphStats {
    pub length_chars: usize,
    pub length_std_words: f64,
    pub time_secs: f64,
    pub error_count: usize,
    pub uncorrected_error_count: usize,
    pub gross_wpm: f64,
    pub net_wpm: f64,
    pub result_accuracy: f64,
    pub real_accuracy: f64,
    pub all_correct: bool,
    pub progress_pct: f64,
}

impl ParagraphStats {
    /// reads a tracker and derives its current statistics; live while the
    /// paragraph is in progress, final once it has completed
    pub fn measure(tracker: &ParagraphTracker) -> Self {
        let uncorrected = tracker
            .outcomes()
            .iter()
            .filter(|o| **o == CharOutcome::Wrong)
            .count();

        Self::from_counts(
            tracker.len(),
            tracker.chars_touched(),
            tracker.error_count(),
            uncorrected,
            tracker.elapsed().as_secs_f64(),
        )
    }

    /// the formula layer, separated from any clock so exact values are testable
    pub fn from_counts(
        length_chars: usize,
        chars_touched: usize,
        error_count: usize,
        uncorrected_error_count: usize,
        time_secs: f64,
    ) -> Self {
        let touched = chars_touched as f64;
        let uncorrected = uncorrected_error_count as f64;
        let length_std_words = touched / CHARS_PER_STD_WORD;
        let time_mins = time_secs / 60.0;

        let gross_wpm = if time_mins > 0.0 {
            (length_std_words - ONE_CHAR_IN_WORDS) / time_mins
        } else {
            0.0
        };
        // net WPM would go negative under enough uncorrected errors
        let net_wpm = if time_mins > 0.0 {
            (gross_wpm - uncorrected / time_mins).max(0.0)
        } else {
            0.0
        };
        let result_accuracy = if chars_touched > 0 {
            (touched - uncorrected) * 100.0 / touched
        } else {
            0.0
        };
        // real accuracy would go negative under repeated misses on the same slots
        let real_accuracy = if chars_touched > 0 {
            ((touched - error_count as f64) * 100.0 / touched).max(0.0)
        } else {
            0.0
        };

        Self {
            length_chars,
            length_std_words,
            time_secs,
            error_count,
            uncorrected_error_count,
            gross_wpm,
            net_wpm,
            result_accuracy,
            real_accuracy,
            all_correct: uncorrected_error_count == 0,
            progress_pct: touched * 100.0 / length_chars as f64,
        }
    }
}

/// running totals over the finished paragraphs of a session
///
/// Rates are recomputed from the summed totals after every recorded
/// paragraph, so a session reads as one long exercise rather than an average
/// of per-paragraph rates (which would overweight short paragraphs).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStats {
    pub total_paragraphs: usize,
    pub correct_paragraphs: usize,
    pub correct_paragraphs_pct: f64,
    pub total_length_chars: usize,
    pub total_length_std_words: f64,
    pub time_secs: f64,
    pub time_mins: f64,
    pub error_count: usize,
    pub uncorrected_error_count: usize,
    pub gross_wpm: f64,
    pub net_wpm: f64,
    pub result_accuracy: f64,
    pub real_accuracy: f64,
}

impl SessionStats {
    /// folds one finished paragraph into the totals and refreshes the
    /// session-wide rates
    pub fn record(&mut self, stats: &ParagraphStats) {
        self.total_paragraphs += 1;
        if stats.all_correct {
            self.correct_paragraphs += 1;
        }
        self.correct_paragraphs_pct =
            self.correct_paragraphs as f64 * 100.0 / self.total_paragraphs as f64;

        self.total_length_chars += stats.length_chars;
        self.total_length_std_words = self.total_length_chars as f64 / CHARS_PER_STD_WORD;
        self.time_secs += stats.time_secs;
        self.time_mins = self.time_secs / 60.0;
        self.error_count += stats.error_count;
        self.uncorrected_error_count += stats.uncorrected_error_count;

        let chars = self.total_length_chars as f64;
        let uncorrected = self.uncorrected_error_count as f64;

        self.gross_wpm = if self.time_mins > 0.0 {
            (self.total_length_std_words - ONE_CHAR_IN_WORDS) / self.time_mins
        } else {
            0.0
        };
        self.net_wpm = if self.time_mins > 0.0 {
            (self.gross_wpm - uncorrected / self.time_mins).max(0.0)
        } else {
            0.0
        };
        self.result_accuracy = if self.total_length_chars > 0 {
            (chars - uncorrected) * 100.0 / chars
        } else {
            0.0
        };
        self.real_accuracy = if self.total_length_chars > 0 {
            ((chars - self.error_count as f64) * 100.0 / chars).max(0.0)
        } else {
            0.0
        };
    }

    pub fn from_paragraphs<'a, I>(stats: I) -> Self
    where
        I: IntoIterator<Item = &'a ParagraphStats>,
    {
        let mut acc = Self::default();
        for s in stats {
            acc.record(s);
        }
        acc
    }
}
