use std::path::Path;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{read_trimmed_lines, ExerciseKind, ParagraphSource, SourceError};

const LETTERS_AND_DOT: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ.";

/// endless paragraphs of random serial numbers, optionally intercalated with
/// words drawn from a user-supplied wordlist at every other position
#[derive(Debug)]
pub struct SerialsSource {
    words_per_paragraph: usize,
    chars_per_serial: usize,
    wordlist: Option<Vec<String>>,
    rng: StdRng,
}

impl SerialsSource {
    pub fn new(
        words_per_paragraph: usize,
        chars_per_serial: usize,
        words_file: Option<&Path>,
    ) -> Result<Self, SourceError> {
        Self::with_rng(
            words_per_paragraph,
            chars_per_serial,
            words_file,
            StdRng::from_entropy(),
        )
    }

    fn with_rng(
        words_per_paragraph: usize,
        chars_per_serial: usize,
        words_file: Option<&Path>,
        rng: StdRng,
    ) -> Result<Self, SourceError> {
        let wordlist = match words_file {
            Some(path) => {
                let words: Vec<String> = read_trimmed_lines(path)?
                    .into_iter()
                    .filter(|w| !w.is_empty())
                    .collect();
                if words.is_empty() {
                    return Err(SourceError::NoWords(path.to_path_buf()));
                }
                Some(words)
            }
            None => None,
        };

        Ok(Self {
            // zero counts would make every paragraph the empty string
            words_per_paragraph: words_per_paragraph.max(1),
            chars_per_serial: chars_per_serial.max(1),
            wordlist,
            rng,
        })
    }

    fn generate_serial(&mut self) -> String {
        let hyphen_at = self.chars_per_serial / 2;
        (0..self.chars_per_serial)
            .map(|i| {
                if i == hyphen_at {
                    '-'
                } else if self.rng.gen_range(0..10) < 2 {
                    LETTERS_AND_DOT[self.rng.gen_range(0..LETTERS_AND_DOT.len())] as char
                } else {
                    char::from_digit(self.rng.gen_range(0..10), 10).unwrap_or('0')
                }
            })
            .collect()
    }

    fn word_from_list(&mut self) -> Option<String> {
        let words = self.wordlist.as_ref()?;
        Some(words[self.rng.gen_range(0..words.len())].clone())
    }
}

impl ParagraphSource for SerialsSource {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Serials
    }

    fn next_paragraph(&mut self) -> Option<String> {
        let paragraph = (0..self.words_per_paragraph)
            .map(|i| {
                if i % 2 == 1 {
                    match self.word_from_list() {
                        Some(word) => word,
                        None => self.generate_serial(),
                    }
                } else {
                    self.generate_serial()
                }
            })
            .join(" ");
        Some(paragraph)
    }
}
