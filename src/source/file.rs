use std::path::Path;

use super::{read_trimmed_lines, ExerciseKind, ParagraphSource, SourceError};

/// one paragraph per non-blank line of a file, in file order
#[derive(Debug)]
pub struct FileSource {
    paragraphs: Vec<String>,
    next: usize,
}

impl FileSource {
    /// `skip` is the number of already-practiced paragraphs to jump over,
    /// usually the count recorded by past sessions; it wraps around once the
    /// whole file has been completed
    pub fn new(path: &Path, skip: usize) -> Result<Self, SourceError> {
        let paragraphs: Vec<String> = read_trimmed_lines(path)?
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect();
        if paragraphs.is_empty() {
            return Err(SourceError::NoParagraphs(path.to_path_buf()));
        }
        let next = skip % paragraphs.len();
        Ok(Self { paragraphs, next })
    }
}

impl ParagraphSource for FileSource {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::File
    }

    fn next_paragraph(&mut self) -> Option<String> {
        let paragraph = self.paragraphs.get(self.next)?.clone();
        self.next += 1;
        Some(paragraph)
    }
}
