use crate::source::ExerciseKind;
use crate::stats::{ParagraphStats, SessionStats};

/// the finished paragraphs of one practice run, in completion order
///
/// A paragraph abandoned mid-way (the user bailed out) is never recorded, so
/// the aggregate only ever sees finished work.
#[derive(Debug)]
pub struct Session {
    kind: ExerciseKind,
    completed: Vec<ParagraphStats>,
}

impl Session {
    pub fn new(kind: ExerciseKind) -> Self {
        Self {
            kind,
            completed: Vec::new(),
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    pub fn record_paragraph(&mut self, stats: ParagraphStats) {
        self.completed.push(stats);
    }

    /// also the resume point: how far into the source this run got
    pub fn completed_paragraphs(&self) -> usize {
        self.completed.len()
    }

    pub fn paragraph_stats(&self) -> &[ParagraphStats] {
        &self.completed
    }

    pub fn summary(&self) -> SessionStats {
        SessionStats::from_paragraphs(&self.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new(ExerciseKind::Numbers);

        assert_eq!(session.completed_paragraphs(), 0);
        assert_eq!(session.summary(), SessionStats::default());
    }

    #[test]
    fn test_records_in_completion_order() {
        let mut session = Session::new(ExerciseKind::File);
        session.record_paragraph(ParagraphStats::from_counts(10, 10, 0, 0, 30.0));
        session.record_paragraph(ParagraphStats::from_counts(20, 20, 1, 1, 60.0));

        assert_eq!(session.completed_paragraphs(), 2);
        assert_eq!(session.paragraph_stats()[0].length_chars, 10);
        assert_eq!(session.paragraph_stats()[1].length_chars, 20);
    }

    #[test]
    fn test_summary_folds_recorded_paragraphs() {
        let mut session = Session::new(ExerciseKind::Song);
        session.record_paragraph(ParagraphStats::from_counts(50, 50, 0, 0, 60.0));
        session.record_paragraph(ParagraphStats::from_counts(50, 50, 2, 1, 60.0));

        let summary = session.summary();
        assert_eq!(summary.total_paragraphs, 2);
        assert_eq!(summary.correct_paragraphs, 1);
        assert_eq!(summary.total_length_chars, 100);
        assert_eq!(summary.time_secs, 120.0);
    }
}
