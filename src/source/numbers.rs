use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{ExerciseKind, ParagraphSource};

/// endless paragraphs of zero-padded random numbers
#[derive(Debug)]
pub struct NumbersSource {
    words_per_paragraph: usize,
    digits_per_word: u32,
    rng: StdRng,
}

impl NumbersSource {
    pub fn new(words_per_paragraph: usize, digits_per_word: u32) -> Self {
        Self::with_rng(words_per_paragraph, digits_per_word, StdRng::from_entropy())
    }

    fn with_rng(words_per_paragraph: usize, digits_per_word: u32, rng: StdRng) -> Self {
        Self {
            // a zero word count would make every paragraph the empty string;
            // the digit cap matches the flag range and keeps 10^digits in u64
            words_per_paragraph: words_per_paragraph.max(1),
            digits_per_word: digits_per_word.clamp(1, 18),
            rng,
        }
    }
}

impl ParagraphSource for NumbersSource {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Numbers
    }

    fn next_paragraph(&mut self) -> Option<String> {
        let width = self.digits_per_word as usize;
        // inclusive upper bound, so one word in 10^digits+1 runs a digit wide
        let limit = 10u64.pow(self.digits_per_word);
        let paragraph = (0..self.words_per_paragraph)
            .map(|_| format!("{:0width$}", self.rng.gen_range(0..=limit)))
            .join(" ");
        Some(paragraph)
    }
}
