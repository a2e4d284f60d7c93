use crate::paragraph::{CharOutcome, ParagraphTracker};
use crate::stats::{ParagraphStats, SessionStats};
use crate::{App, AppState};
use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget, Wrap},
};
use time_humanize::HumanTime;
use unicode_width::UnicodeWidthStr;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Typing => render_typing(self, area, buf),
            AppState::ParagraphDone => render_paragraph_done(self, area, buf),
            AppState::Summary => render_summary(self, area, buf),
        }
    }
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let text: String = app.tracker.chars().iter().collect();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let occupied = occupied_lines(&text, max_chars_per_line);
    let body_height = area
        .height
        .saturating_sub(VERTICAL_MARGIN * 2)
        .saturating_sub(2);
    let top_pad = body_height.saturating_sub(occupied) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(top_pad),
            Constraint::Min(1),
        ])
        .split(area);

    let stats = ParagraphStats::measure(&app.tracker);
    Paragraph::new(stats_heading(&stats)).render(chunks[0], buf);

    Paragraph::new(Text::from(paragraph_lines(&app.tracker)))
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);
}

fn render_paragraph_done(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(area);

    let stats = ParagraphStats::measure(&app.tracker);
    Paragraph::new(stats_heading(&stats)).render(chunks[0], buf);

    let verdict_style = if stats.all_correct {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };
    let verdict = if stats.all_correct {
        "All correct!"
    } else {
        "Errors have been made..."
    };
    let hint_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC);

    let mut lines = paragraph_lines(&app.tracker);
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(verdict, verdict_style)));
    lines.push(Line::default());
    lines.extend(paragraph_stats_lines(&stats));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press <ENTER> to continue...",
        hint_style,
    )));

    Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);
}

fn render_summary(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(1)])
        .split(area);

    let heading_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC);

    let summary = app.summary.clone().unwrap_or_default();

    let mut lines = vec![
        Line::from(Span::styled(
            "Congratulations! Your exercise is done.",
            heading_style,
        )),
        Line::default(),
    ];
    lines.extend(summary_lines(&summary));

    if let Some(last) = app.last_practiced {
        let seconds_ago = (Local::now() - last).num_seconds();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Last practiced {}", HumanTime::from(-seconds_ago)),
            hint_style,
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Press <ENTER> to exit...",
        hint_style,
    )));

    Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);
}

fn stats_heading(stats: &ParagraphStats) -> Line<'static> {
    let heading_style = Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::BOLD);
    Line::from(Span::styled(
        format!(
            "WPM: {:.0} ({:.0})   Accuracy: {:.0}% ({:.0}%)   Progress: {:.0}%",
            stats.net_wpm,
            stats.gross_wpm,
            stats.result_accuracy,
            stats.real_accuracy,
            stats.progress_pct
        ),
        heading_style,
    ))
}

/// Paints the reference text with one span per character. Slots behind the
/// cursor carry the color of their recorded outcome; the cursor slot and
/// everything ahead of it read as untyped, so a backspaced character goes
/// back to looking pending even though its outcome is still on record.
fn paragraph_lines(tracker: &ParagraphTracker) -> Vec<Line<'static>> {
    let pending_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::DIM);
    let correct_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let amended_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let wrong_style = Style::default()
        .fg(Color::White)
        .bg(Color::Red)
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    let mut spans: Vec<Span> = Vec::new();

    for (idx, (&c, &outcome)) in tracker
        .chars()
        .iter()
        .zip(tracker.outcomes().iter())
        .enumerate()
    {
        let shown = if idx < tracker.cursor() {
            outcome
        } else {
            CharOutcome::Pending
        };
        let mut style = match shown {
            CharOutcome::Pending => pending_style,
            CharOutcome::Correct => correct_style,
            CharOutcome::Amended => amended_style,
            CharOutcome::Wrong => wrong_style,
        };
        if idx == tracker.cursor() {
            style = style
                .remove_modifier(Modifier::DIM)
                .add_modifier(Modifier::UNDERLINED);
        }

        let glyph = match c {
            ' ' if shown == CharOutcome::Wrong => "·".to_string(),
            '\n' => "⏎".to_string(),
            _ => c.to_string(),
        };
        spans.push(Span::styled(glyph, style));

        if c == '\n' {
            lines.push(Line::from(std::mem::take(&mut spans)));
        }
    }
    lines.push(Line::from(spans));
    lines
}

fn paragraph_stats_lines(stats: &ParagraphStats) -> Vec<Line<'static>> {
    vec![
        Line::from(format!(
            "WPM: {:.2}, {:.2} gross",
            stats.net_wpm, stats.gross_wpm
        )),
        Line::from(format!(
            "Accuracy: {:.2}%, {:.2}% real",
            stats.result_accuracy, stats.real_accuracy
        )),
        Line::from(format!(
            "Errors: {}, {} not corrected",
            stats.error_count, stats.uncorrected_error_count
        )),
        Line::from(format!(
            "Exercise length: {} chars, {:.2} \"standard\" words",
            stats.length_chars, stats.length_std_words
        )),
        Line::from(format!("Time: {:.2} s", stats.time_secs)),
    ]
}

fn summary_lines(summary: &SessionStats) -> Vec<Line<'static>> {
    vec![
        Line::from(format!(
            "Average WPM: {:.2} ({:.2} gross)",
            summary.net_wpm, summary.gross_wpm
        )),
        Line::from(format!(
            "Average accuracy: {:.2}% ({:.2}% real)",
            summary.result_accuracy, summary.real_accuracy
        )),
        Line::from(format!(
            "Errors: {} ({} not corrected)",
            summary.error_count, summary.uncorrected_error_count
        )),
        Line::from(format!(
            "Total exercises length: {} chars, {:.2} \"standard\" words",
            summary.total_length_chars, summary.total_length_std_words
        )),
        Line::from(format!("Total paragraphs: {}", summary.total_paragraphs)),
        Line::from(format!(
            "Correct paragraphs: {} ({:.2}%)",
            summary.correct_paragraphs, summary.correct_paragraphs_pct
        )),
        Line::from(format!("Total typing time: {:.2} minutes", summary.time_mins)),
    ]
}

/// How many terminal rows the reference text needs once wrapped, counting
/// hard line breaks. Wide glyphs are measured, not counted.
fn occupied_lines(text: &str, max_width: u16) -> u16 {
    text.split('\n')
        .map(|line| {
            let width = line.width() as u16;
            if width == 0 {
                1
            } else {
                width.div_ceil(max_width)
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::FileHistoryStore;
    use crate::session::Session;
    use crate::source::{ExerciseKind, ParagraphSource};

    struct OneShotSource {
        paragraph: Option<String>,
    }

    impl ParagraphSource for OneShotSource {
        fn kind(&self) -> ExerciseKind {
            ExerciseKind::File
        }

        fn next_paragraph(&mut self) -> Option<String> {
            self.paragraph.take()
        }
    }

    fn test_app(text: &str) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let app = App {
            source: Box::new(OneShotSource { paragraph: None }),
            tracker: ParagraphTracker::new(text).unwrap(),
            session: Session::new(ExerciseKind::File),
            state: AppState::Typing,
            summary: None,
            last_practiced: None,
            source_key: "file:test".to_string(),
            history_store: FileHistoryStore::with_path(dir.path().join("history.json")),
            log_path: None,
        };
        (app, dir)
    }

    fn rendered_text(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_typing_screen_shows_reference_text_and_heading() {
        let (app, _dir) = test_app("hello world");
        let rendered = rendered_text(&app, 60, 20);

        assert!(rendered.contains("hello world"));
        assert!(rendered.contains("WPM:"));
        assert!(rendered.contains("Accuracy:"));
        assert!(rendered.contains("Progress:"));
    }

    #[test]
    fn test_typing_screen_heading_shows_progress_percentage() {
        let (mut app, _dir) = test_app("ab");
        app.tracker.type_char('a');
        let rendered = rendered_text(&app, 60, 20);

        assert!(rendered.contains("Progress: 50%"));
    }

    #[test]
    fn test_wrong_space_renders_as_interpunct() {
        let (mut app, _dir) = test_app("a b");
        app.tracker.type_char('a');
        app.tracker.type_char('x');
        let rendered = rendered_text(&app, 60, 20);

        assert!(rendered.contains('·'));
    }

    #[test]
    fn test_backspaced_slot_reads_as_reference_char() {
        let (mut app, _dir) = test_app("ab");
        app.tracker.type_char('x');
        let _ = app.tracker.backspace();
        let rendered = rendered_text(&app, 60, 20);

        assert!(rendered.contains("ab"));
        assert!(!rendered.contains('x'));
    }

    #[test]
    fn test_newline_renders_as_return_glyph_on_its_own_line() {
        let (app, _dir) = test_app("ab\ncd");
        let rendered = rendered_text(&app, 60, 20);

        assert!(rendered.contains('⏎'));
        let ab_line = rendered
            .lines()
            .find(|line| line.contains("ab"))
            .unwrap_or_default();
        assert!(!ab_line.contains("cd"));
    }

    #[test]
    fn test_paragraph_done_shows_all_correct_verdict() {
        let (mut app, _dir) = test_app("ab");
        app.tracker.type_char('a');
        app.tracker.type_char('b');
        app.state = AppState::ParagraphDone;
        let rendered = rendered_text(&app, 60, 24);

        assert!(rendered.contains("All correct!"));
        assert!(rendered.contains("gross"));
        assert!(rendered.contains("not corrected"));
        assert!(rendered.contains("\"standard\" words"));
        assert!(rendered.contains("Press <ENTER> to continue..."));
    }

    #[test]
    fn test_paragraph_done_shows_error_verdict() {
        let (mut app, _dir) = test_app("ab");
        app.tracker.type_char('x');
        app.tracker.type_char('b');
        app.state = AppState::ParagraphDone;
        let rendered = rendered_text(&app, 60, 24);

        assert!(rendered.contains("Errors have been made..."));
    }

    #[test]
    fn test_summary_screen_shows_aggregate_lines() {
        let (mut app, _dir) = test_app("ab");
        app.state = AppState::Summary;
        app.summary = Some(SessionStats {
            total_paragraphs: 2,
            correct_paragraphs: 1,
            correct_paragraphs_pct: 50.0,
            total_length_chars: 10,
            total_length_std_words: 2.0,
            time_secs: 60.0,
            time_mins: 1.0,
            error_count: 3,
            uncorrected_error_count: 1,
            ..SessionStats::default()
        });
        let rendered = rendered_text(&app, 70, 24);

        assert!(rendered.contains("Congratulations! Your exercise is done."));
        assert!(rendered.contains("Average WPM:"));
        assert!(rendered.contains("Total paragraphs: 2"));
        assert!(rendered.contains("Correct paragraphs: 1 (50.00%)"));
        assert!(rendered.contains("Total typing time: 1.00 minutes"));
        assert!(rendered.contains("Press <ENTER> to exit..."));
    }

    #[test]
    fn test_summary_screen_mentions_last_practice() {
        let (mut app, _dir) = test_app("ab");
        app.state = AppState::Summary;
        app.summary = Some(SessionStats::default());
        app.last_practiced = Some(Local::now() - chrono::Duration::hours(2));
        let rendered = rendered_text(&app, 70, 24);

        assert!(rendered.contains("Last practiced"));
        assert!(rendered.contains("ago"));
    }

    #[test]
    fn test_render_survives_tiny_area() {
        let (app, _dir) = test_app("hello world this is a longer paragraph");
        let rendered = rendered_text(&app, 12, 4);

        assert!(!rendered.is_empty());
    }

    #[test]
    fn test_occupied_lines_counts_wrap_and_breaks() {
        assert_eq!(occupied_lines("abcd", 10), 1);
        assert_eq!(occupied_lines("abcdefghijk", 10), 2);
        assert_eq!(occupied_lines("ab\ncd", 10), 2);
        assert_eq!(occupied_lines("", 10), 1);
    }
}
