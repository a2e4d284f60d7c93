mod file;
mod numbers;
mod random_file;
mod serials;
mod song;

pub use file::FileSource;
pub use numbers::NumbersSource;
pub use random_file::RandomFileSource;
pub use serials::SerialsSource;
pub use song::SongSource;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{} does not exist", .0.display())]
    Missing(PathBuf),
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} contains no usable paragraphs", .0.display())]
    NoParagraphs(PathBuf),
    #[error("{} contains no words", .0.display())]
    NoWords(PathBuf),
}

/// which flavor of exercise produced the paragraphs; shows up in the session
/// log and on the summary screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ExerciseKind {
    Numbers,
    Serials,
    File,
    Song,
    RandomFile,
}

/// a stream of exercise paragraphs
///
/// Implementations yield trimmed, non-empty strings, so every paragraph can
/// back a tracker directly. `None` means the source is exhausted; the
/// generator-backed sources never are.
pub trait ParagraphSource {
    fn kind(&self) -> ExerciseKind;
    fn next_paragraph(&mut self) -> Option<String>;
}

fn read_trimmed_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    if !path.exists() {
        return Err(SourceError::Missing(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents.lines().map(|line| line.trim().to_string()).collect())
}
