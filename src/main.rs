pub mod app_dirs;
pub mod config;
pub mod history;
pub mod paragraph;
pub mod report;
pub mod runtime;
pub mod session;
pub mod source;
pub mod stats;
pub mod ui;

use crate::app_dirs::AppDirs;
use crate::config::{Config, ConfigStore, FileConfigStore};
use crate::history::{source_key, FileHistoryStore, HistoryStore, PracticeHistory};
use crate::paragraph::ParagraphTracker;
use crate::report::{append_session, SessionLogRow};
use crate::runtime::{AppEvent, CrosstermEventSource, EventSource, Runner};
use crate::session::Session;
use crate::source::{
    ExerciseKind, FileSource, NumbersSource, ParagraphSource, RandomFileSource, SerialsSource,
    SongSource, SourceError,
};
use crate::stats::{ParagraphStats, SessionStats};
use chrono::{DateTime, Local};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// typing practice straight from your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Typing practice straight from your terminal. Drill random numbers, serial codes, text files, or song lyrics one paragraph at a time, with per-paragraph accuracy and words-per-minute and a running session log."
)]
pub struct Cli {
    #[clap(subcommand)]
    exercise: Exercise,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Exercise {
    /// type rows of random numbers
    Numbers {
        /// numbers per paragraph
        #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
        words: Option<u32>,

        /// digits per number
        #[clap(long, value_parser = clap::value_parser!(u32).range(1..=18))]
        digits: Option<u32>,
    },

    /// type serial codes, optionally mixed with real words
    Serials {
        /// serials per paragraph
        #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
        num: Option<u32>,

        /// characters per serial
        #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
        chars: Option<u32>,

        /// wordlist file; every other word is drawn from it
        #[clap(long)]
        words_file: Option<PathBuf>,
    },

    /// type the paragraphs of a text file, in order
    File {
        /// file to practice
        path: PathBuf,

        /// skip the paragraphs finished in earlier sessions
        #[clap(long)]
        resume: bool,
    },

    /// type song lyrics stanza by stanza
    Song {
        /// lyrics file; blank lines separate stanzas
        path: PathBuf,

        /// skip the stanzas finished in earlier sessions
        #[clap(long)]
        resume: bool,
    },

    /// type the paragraphs of a text file in random order
    RandomFile {
        /// file to practice
        path: PathBuf,
    },
}

impl Exercise {
    fn build_source(
        &self,
        config: &Config,
        history: &PracticeHistory,
    ) -> Result<Box<dyn ParagraphSource>, SourceError> {
        match self {
            Exercise::Numbers { words, digits } => Ok(Box::new(NumbersSource::new(
                words.map_or(config.numbers_words, |w| w as usize),
                digits.unwrap_or(config.numbers_digits),
            ))),
            Exercise::Serials {
                num,
                chars,
                words_file,
            } => Ok(Box::new(SerialsSource::new(
                num.map_or(config.serials_words, |n| n as usize),
                chars.map_or(config.serials_chars, |c| c as usize),
                words_file.as_deref(),
            )?)),
            Exercise::File { path, resume } => {
                let skip = if *resume {
                    history.resume_point(&self.history_key())
                } else {
                    0
                };
                Ok(Box::new(FileSource::new(path, skip)?))
            }
            Exercise::Song { path, resume } => {
                let skip = if *resume {
                    history.resume_point(&self.history_key())
                } else {
                    0
                };
                Ok(Box::new(SongSource::new(path, skip)?))
            }
            Exercise::RandomFile { path } => Ok(Box::new(RandomFileSource::new(path)?)),
        }
    }

    fn history_key(&self) -> String {
        match self {
            Exercise::Numbers { .. } => source_key(ExerciseKind::Numbers, None),
            Exercise::Serials { .. } => source_key(ExerciseKind::Serials, None),
            Exercise::File { path, .. } => source_key(ExerciseKind::File, Some(path)),
            Exercise::Song { path, .. } => source_key(ExerciseKind::Song, Some(path)),
            Exercise::RandomFile { path } => source_key(ExerciseKind::RandomFile, Some(path)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Typing,
    ParagraphDone,
    Summary,
}

pub struct App {
    pub source: Box<dyn ParagraphSource>,
    pub tracker: ParagraphTracker,
    pub session: Session,
    pub state: AppState,
    pub summary: Option<SessionStats>,
    pub last_practiced: Option<DateTime<Local>>,
    pub source_key: String,
    pub history_store: FileHistoryStore,
    pub log_path: Option<PathBuf>,
}

impl App {
    /// `None` means the source produced nothing typable.
    pub fn new(
        mut source: Box<dyn ParagraphSource>,
        source_key: String,
        last_practiced: Option<DateTime<Local>>,
        history_store: FileHistoryStore,
        log_path: Option<PathBuf>,
    ) -> Option<Self> {
        let kind = source.kind();
        let tracker = next_tracker(source.as_mut())?;
        Some(Self {
            source,
            tracker,
            session: Session::new(kind),
            state: AppState::Typing,
            summary: None,
            last_practiced,
            source_key,
            history_store,
            log_path,
        })
    }

    /// Returns `false` once the app wants to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Esc || ctrl_c {
            return match self.state {
                AppState::Summary => false,
                _ => {
                    self.finish_session();
                    true
                }
            };
        }

        match self.state {
            AppState::Typing => match key.code {
                KeyCode::Backspace => {
                    // at the very beginning there is nothing to undo
                    let _ = self.tracker.backspace();
                }
                KeyCode::Enter => self.type_char('\n'),
                KeyCode::Char(c) => {
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    {
                        self.type_char(c);
                    }
                }
                _ => {}
            },
            AppState::ParagraphDone => {
                if key.code == KeyCode::Enter {
                    self.advance_paragraph();
                }
            }
            AppState::Summary => {
                if key.code == KeyCode::Enter {
                    return false;
                }
            }
        }
        true
    }

    /// A paragraph counts the moment its last character is typed, so ending
    /// the session from the results screen still includes it.
    fn type_char(&mut self, c: char) {
        self.tracker.type_char(c);
        if self.tracker.is_complete() {
            self.session
                .record_paragraph(ParagraphStats::measure(&self.tracker));
            self.state = AppState::ParagraphDone;
        }
    }

    fn advance_paragraph(&mut self) {
        match next_tracker(self.source.as_mut()) {
            Some(tracker) => {
                self.tracker = tracker;
                self.state = AppState::Typing;
            }
            None => self.finish_session(),
        }
    }

    /// Folds the finished paragraphs into the session summary and persists
    /// the log row and resume point. A session with no finished paragraphs
    /// leaves no trace on disk.
    fn finish_session(&mut self) {
        let summary = self.session.summary();
        if summary.total_paragraphs > 0 {
            if let Some(path) = &self.log_path {
                let row = SessionLogRow::new(self.session.kind(), &summary);
                let _ = append_session(path, &row);
            }
            let mut history = self.history_store.load();
            history.record_run(&self.source_key, summary.total_paragraphs);
            let _ = self.history_store.save(&history);
        }
        self.summary = Some(summary);
        self.state = AppState::Summary;
    }
}

/// Pulls the next paragraph that can actually be typed; blank ones are
/// skipped rather than tracked.
fn next_tracker(source: &mut dyn ParagraphSource) -> Option<ParagraphTracker> {
    while let Some(paragraph) = source.next_paragraph() {
        if let Ok(tracker) = ParagraphTracker::new(&paragraph) {
            return Some(tracker);
        }
    }
    None
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = FileConfigStore::new().load();
    let history_store = FileHistoryStore::new();
    let history = history_store.load();
    let key = cli.exercise.history_key();
    let last_practiced = history.progress(&key).map(|p| p.last_practiced);

    let source = match cli.exercise.build_source(&config, &history) {
        Ok(source) => source,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, err.to_string()).exit();
        }
    };

    let Some(mut app) = App::new(source, key, last_practiced, history_store, AppDirs::log_path())
    else {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "nothing to practice").exit();
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    start_tui(&mut terminal, &mut app, &runner)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    Ok(())
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick => {
                // keeps the WPM heading moving between keystrokes
                if app.state == AppState::Typing && app.tracker.has_started() {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            AppEvent::Key(key) => {
                if !app.handle_key(key) {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
