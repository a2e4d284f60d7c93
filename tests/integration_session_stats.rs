use std::fs;

use tempfile::tempdir;
use typetrain::history::{source_key, FileHistoryStore, HistoryStore};
use typetrain::paragraph::ParagraphTracker;
use typetrain::report::{append_session, SessionLogRow};
use typetrain::session::Session;
use typetrain::source::{ExerciseKind, FileSource, ParagraphSource, RandomFileSource, SongSource};
use typetrain::stats::{ParagraphStats, SessionStats};

/// Integration tests for whole practice sessions: sources feeding trackers,
/// per-paragraph statistics folding into session totals, and the session log
/// and resume history round-tripping through disk.

fn type_through(tracker: &mut ParagraphTracker, input: &str) {
    for c in input.chars() {
        tracker.type_char(c);
    }
}

#[test]
fn file_session_with_mistakes_folds_into_totals() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("drill.txt");
    fs::write(&path, "cat\ndog\n").unwrap();

    let mut source = FileSource::new(&path, 0).unwrap();
    let mut session = Session::new(source.kind());

    // first paragraph: miss the 'a', back up, retype it
    let mut tracker = ParagraphTracker::new(&source.next_paragraph().unwrap()).unwrap();
    tracker.type_char('c');
    tracker.type_char('x');
    let _ = tracker.backspace();
    tracker.type_char('a');
    tracker.type_char('t');
    assert!(tracker.is_complete());
    session.record_paragraph(ParagraphStats::measure(&tracker));

    // second paragraph: leave one error standing
    let mut tracker = ParagraphTracker::new(&source.next_paragraph().unwrap()).unwrap();
    type_through(&mut tracker, "dxg");
    assert!(tracker.is_complete());
    session.record_paragraph(ParagraphStats::measure(&tracker));

    assert!(source.next_paragraph().is_none());

    let summary = session.summary();
    assert_eq!(summary.total_paragraphs, 2);
    assert_eq!(summary.correct_paragraphs, 1);
    assert_eq!(summary.correct_paragraphs_pct, 50.0);
    assert_eq!(summary.total_length_chars, 6);
    assert_eq!(summary.error_count, 2);
    assert_eq!(summary.uncorrected_error_count, 1);
    assert!((summary.result_accuracy - 5.0 * 100.0 / 6.0).abs() < 1e-9);
    assert!((summary.real_accuracy - 4.0 * 100.0 / 6.0).abs() < 1e-9);
}

#[test]
fn session_log_rows_follow_the_counting_rules() {
    let stats = vec![
        ParagraphStats::from_counts(25, 25, 1, 1, 60.0),
        ParagraphStats::from_counts(25, 25, 1, 1, 60.0),
    ];
    let summary = SessionStats::from_paragraphs(&stats);
    let row = SessionLogRow::new(ExerciseKind::File, &summary);

    // totals: 50 chars in 2 minutes, 2 errors, none corrected
    assert_eq!(row.exercise, "file");
    assert_eq!(row.paragraphs, 2);
    assert_eq!(row.length_chars, 50);
    assert_eq!(row.elapsed_secs, 120.0);
    assert_eq!(row.gross_wpm, 4.9);
    assert_eq!(row.net_wpm, 3.9);
    assert_eq!(row.result_accuracy, 96.0);
    assert_eq!(row.real_accuracy, 96.0);
}

#[test]
fn session_log_grows_across_sessions_with_one_header() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("log.csv");

    for _ in 0..2 {
        let stats = vec![ParagraphStats::from_counts(25, 25, 0, 0, 60.0)];
        let summary = SessionStats::from_paragraphs(&stats);
        let row = SessionLogRow::new(ExerciseKind::Numbers, &summary);
        append_session(&log, &row).unwrap();
    }

    let contents = fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3, "one header plus one row per session");
    assert!(lines[0].starts_with("date,exercise,paragraphs"));

    let mut reader = csv::Reader::from_path(&log).unwrap();
    let rows: Vec<SessionLogRow> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.exercise == "numbers"));
}

#[test]
fn resume_history_round_trips_across_sessions() {
    let dir = tempdir().unwrap();
    let drill = dir.path().join("drill.txt");
    fs::write(&drill, "one\ntwo\nthree\n").unwrap();
    let key = source_key(ExerciseKind::File, Some(&drill));
    let store = FileHistoryStore::with_path(dir.path().join("history.json"));

    // session 1: two paragraphs done
    let mut history = store.load();
    history.record_run(&key, 2);
    store.save(&history).unwrap();

    // session 2 resumes at the third paragraph
    let loaded = FileHistoryStore::with_path(dir.path().join("history.json")).load();
    assert_eq!(loaded.resume_point(&key), 2);
    let mut source = FileSource::new(&drill, loaded.resume_point(&key)).unwrap();
    assert_eq!(source.next_paragraph().as_deref(), Some("three"));

    // finishing the file wraps the resume point back to the start
    let mut history = loaded;
    history.record_run(&key, 1);
    store.save(&history).unwrap();
    let wrapped = store.load().resume_point(&key) % 3;
    let mut source = FileSource::new(&drill, wrapped).unwrap();
    assert_eq!(source.next_paragraph().as_deref(), Some("one"));
}

#[test]
fn song_stanzas_are_typed_with_their_line_breaks() {
    let dir = tempdir().unwrap();
    let lyrics = dir.path().join("lyrics.txt");
    fs::write(&lyrics, "la la\nla la la\n\nsecond verse\nhere\n").unwrap();

    let mut source = SongSource::new(&lyrics, 1).unwrap();
    let stanza = source.next_paragraph().unwrap();
    assert_eq!(stanza, "second verse\nhere");

    let mut tracker = ParagraphTracker::new(&stanza).unwrap();
    type_through(&mut tracker, &stanza);
    assert!(tracker.is_complete());
    assert!(ParagraphStats::measure(&tracker).all_correct);
}

#[test]
fn random_file_source_yields_every_line_exactly_once() {
    let dir = tempdir().unwrap();
    let drill = dir.path().join("drill.txt");
    fs::write(&drill, "alpha\nbravo\ncharlie\ndelta\necho\n").unwrap();

    let mut source = RandomFileSource::new(&drill).unwrap();
    let mut seen = Vec::new();
    while let Some(paragraph) = source.next_paragraph() {
        seen.push(paragraph);
    }
    seen.sort();

    assert_eq!(seen, ["alpha", "bravo", "charlie", "delta", "echo"]);
}
