use std::fs;
use std::fs::OpenOptions;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::source::ExerciseKind;
use crate::stats::SessionStats;

/// one `log.csv` row per finished session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionLogRow {
    pub date: String,
    pub exercise: String,
    pub paragraphs: usize,
    pub correct_paragraphs: usize,
    pub length_chars: usize,
    pub elapsed_secs: f64,
    pub gross_wpm: f64,
    pub net_wpm: f64,
    pub result_accuracy: f64,
    pub real_accuracy: f64,
}

impl SessionLogRow {
    pub fn new(kind: ExerciseKind, summary: &SessionStats) -> Self {
        Self {
            date: Local::now().format("%c").to_string(),
            exercise: kind.to_string(),
            paragraphs: summary.total_paragraphs,
            correct_paragraphs: summary.correct_paragraphs,
            length_chars: summary.total_length_chars,
            elapsed_secs: round2(summary.time_secs),
            gross_wpm: round2(summary.gross_wpm),
            net_wpm: round2(summary.net_wpm),
            result_accuracy: round2(summary.result_accuracy),
            real_accuracy: round2(summary.real_accuracy),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// appends a row, emitting the header only when the file is created
pub fn append_session(path: &Path, row: &SessionLogRow) -> Result<(), csv::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let needs_header = !path.exists();

    let log_file = OpenOptions::new()
        .write(true)
        .append(true)
        .create(true)
        .open(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(log_file);
    writer.serialize(row)?;
    writer.flush()?;
    Ok(())
}
