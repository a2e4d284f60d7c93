use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::{read_trimmed_lines, ExerciseKind, ParagraphSource, SourceError};

/// the non-blank lines of a file in shuffled order
///
/// Shuffling means there is no stable notion of "where you left off", so
/// this source never skips ahead.
#[derive(Debug)]
pub struct RandomFileSource {
    paragraphs: Vec<String>,
    next: usize,
}

impl RandomFileSource {
    pub fn new(path: &Path) -> Result<Self, SourceError> {
        Self::with_rng(path, StdRng::from_entropy())
    }

    fn with_rng(path: &Path, mut rng: StdRng) -> Result<Self, SourceError> {
        let mut paragraphs: Vec<String> = read_trimmed_lines(path)?
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect();
        if paragraphs.is_empty() {
            return Err(SourceError::NoParagraphs(path.to_path_buf()));
        }
        paragraphs.shuffle(&mut rng);
        Ok(Self {
            paragraphs,
            next: 0,
        })
    }
}

impl ParagraphSource for RandomFileSource {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::RandomFile
    }

    fn next_paragraph(&mut self) -> Option<String> {
        let paragraph = self.paragraphs.get(self.next)?.clone();
        self.next += 1;
        Some(paragraph)
    }
}
