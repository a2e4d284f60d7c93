use std::path::Path;

use itertools::Itertools;

use super::{read_trimmed_lines, ExerciseKind, ParagraphSource, SourceError};

/// one paragraph per stanza of a lyrics file
///
/// A stanza is a run of contiguous non-blank lines, joined with `\n`; blank
/// lines separate stanzas. Typing the embedded newlines is part of the
/// exercise.
#[derive(Debug)]
pub struct SongSource {
    stanzas: Vec<String>,
    next: usize,
}

impl SongSource {
    /// `skip` works like [`super::FileSource::new`]: stanzas completed in
    /// past sessions are jumped over, wrapping once the song is done
    pub fn new(path: &Path, skip: usize) -> Result<Self, SourceError> {
        let lines = read_trimmed_lines(path)?;
        let stanzas: Vec<String> = lines
            .iter()
            .chunk_by(|line| line.is_empty())
            .into_iter()
            .filter_map(|(is_blank, mut group)| (!is_blank).then(move || group.join("\n")))
            .collect();
        if stanzas.is_empty() {
            return Err(SourceError::NoParagraphs(path.to_path_buf()));
        }
        let next = skip % stanzas.len();
        Ok(Self { stanzas, next })
    }
}

impl ParagraphSource for SongSource {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Song
    }

    fn next_paragraph(&mut self) -> Option<String> {
        let stanza = self.stanzas.get(self.next)?.clone();
        self.next += 1;
        Some(stanza)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    fn song_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_blank_lines_separate_stanzas() {
        let file = song_file("verse one line one\nverse one line two\n\nverse two\n");
        let mut source = SongSource::new(file.path(), 0).unwrap();

        assert_eq!(
            source.next_paragraph().as_deref(),
            Some("verse one line one\nverse one line two")
        );
        assert_eq!(source.next_paragraph().as_deref(), Some("verse two"));
        assert_eq!(source.next_paragraph(), None);
    }

    #[test]
    fn test_final_stanza_without_trailing_blank() {
        let file = song_file("a\n\nb\nc");
        let mut source = SongSource::new(file.path(), 0).unwrap();

        assert_eq!(source.next_paragraph().as_deref(), Some("a"));
        assert_eq!(source.next_paragraph().as_deref(), Some("b\nc"));
        assert_eq!(source.next_paragraph(), None);
    }

    #[test]
    fn test_consecutive_blank_lines_collapse() {
        let file = song_file("a\n\n\n\nb\n");
        let mut source = SongSource::new(file.path(), 0).unwrap();

        assert_eq!(source.next_paragraph().as_deref(), Some("a"));
        assert_eq!(source.next_paragraph().as_deref(), Some("b"));
        assert_eq!(source.next_paragraph(), None);
    }

    #[test]
    fn test_skip_resumes_at_later_stanza() {
        let file = song_file("a\n\nb\n\nc\n");
        let mut source = SongSource::new(file.path(), 1).unwrap();

        assert_eq!(source.next_paragraph().as_deref(), Some("b"));
    }

    #[test]
    fn test_all_blank_file_has_no_stanzas() {
        let file = song_file("\n\n  \n");
        assert_matches!(
            SongSource::new(file.path(), 0),
            Err(SourceError::NoParagraphs(_))
        );
    }
}
