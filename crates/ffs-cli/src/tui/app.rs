use std::io::{self, Stderr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::ListState;

use super::view;
use ffs_core::lister::DirectoryLister;
use ffs_core::session::{CandidateSource, Session};

pub struct PickerState {
    pub query: String,
    pub list: ListState,
    pub message: Option<String>,
}

impl PickerState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            list: ListState::default().with_selected(Some(0)),
            message: None,
        }
    }

    pub fn selected(&self) -> usize {
        self.list.selected().unwrap_or(0)
    }

    fn select_previous(&mut self) {
        let selected = self.selected();
        if selected > 0 {
            self.list.select(Some(selected - 1));
        }
    }

    fn select_next(&mut self, len: usize) {
        let selected = self.selected();
        if selected + 1 < len {
            self.list.select(Some(selected + 1));
        }
    }
}

impl Default for PickerState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Cancel,
    Select(PathBuf),
}

/// Run the fuzzy picker TUI on stderr. Returns the selected file path or None.
pub fn run_picker(session: &mut Session<DirectoryLister>) -> color_eyre::Result<Option<PathBuf>> {
    let root = session.source().root().to_path_buf();

    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen, cursor::Hide)?;
    terminal::enable_raw_mode()?;

    let backend = CrosstermBackend::new(io::stderr());
    let mut terminal = Terminal::new(backend)?;
    let result = picker_loop(&mut terminal, session, &root);

    terminal::disable_raw_mode()?;
    execute!(io::stderr(), LeaveAlternateScreen, cursor::Show)?;

    result
}

fn picker_loop(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    session: &mut Session<DirectoryLister>,
    root: &Path,
) -> color_eyre::Result<Option<PathBuf>> {
    let mut state = PickerState::new();

    loop {
        terminal.draw(|f| view::render_picker(f, &mut state, session, root))?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match handle_key(&mut state, session, key) {
                Outcome::Continue => {}
                Outcome::Cancel => return Ok(None),
                Outcome::Select(path) => return Ok(Some(path)),
            }
        }
    }
}

/// Apply one key press to the picker.
pub fn handle_key<S: CandidateSource>(
    state: &mut PickerState,
    session: &mut Session<S>,
    key: KeyEvent,
) -> Outcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => return Outcome::Cancel,
        KeyCode::Char('c') if ctrl => return Outcome::Cancel,
        KeyCode::Enter => {
            return match session.filtered().get(state.selected()) {
                Some(candidate) => Outcome::Select(candidate.full_path().to_path_buf()),
                None => Outcome::Cancel,
            };
        }
        KeyCode::Up => state.select_previous(),
        KeyCode::Char('p') if ctrl => state.select_previous(),
        KeyCode::Down => state.select_next(session.filtered().len()),
        KeyCode::Char('n') if ctrl => state.select_next(session.filtered().len()),
        KeyCode::Char('u') if ctrl => {
            state.query.clear();
            requery(state, session);
        }
        KeyCode::Char('r') if ctrl => {
            state.message = Some(match session.refresh_full_set() {
                Ok(()) => format!("Refreshed: {} files", session.full_set().len()),
                Err(e) => format!("Refresh failed: {e}"),
            });
            session.on_query_changed(&state.query);
            state.list.select(Some(0));
        }
        KeyCode::Backspace => {
            if state.query.pop().is_some() {
                requery(state, session);
            }
        }
        KeyCode::Char(c) if !ctrl => {
            state.query.push(c);
            requery(state, session);
        }
        _ => {}
    }

    Outcome::Continue
}

fn requery<S: CandidateSource>(state: &mut PickerState, session: &mut Session<S>) {
    session.on_query_changed(&state.query);
    state.list.select(Some(0));
    state.message = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffs_core::candidate::Candidate;
    use ffs_core::matcher::MatchOptions;
    use pretty_assertions::assert_eq;

    fn session() -> Session<Vec<Candidate>> {
        let full = ["/src/main.rs", "/src/lib.rs", "/readme.md"]
            .iter()
            .map(|k| Candidate::new(*k, format!("/work{k}")))
            .collect();
        Session::new(full, MatchOptions::default()).unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str<S: CandidateSource>(state: &mut PickerState, session: &mut Session<S>, s: &str) {
        for c in s.chars() {
            assert_eq!(handle_key(state, session, press(KeyCode::Char(c))), Outcome::Continue);
        }
    }

    #[test]
    fn typing_filters_and_resets_selection() {
        let (mut state, mut session) = (PickerState::new(), session());
        handle_key(&mut state, &mut session, press(KeyCode::Down));
        assert_eq!(state.selected(), 1);

        type_str(&mut state, &mut session, "ma");
        assert_eq!(state.query, "ma");
        assert_eq!(state.selected(), 0);
        assert_eq!(session.filtered().len(), 1);
    }

    #[test]
    fn selection_is_clamped_to_results() {
        let (mut state, mut session) = (PickerState::new(), session());
        handle_key(&mut state, &mut session, press(KeyCode::Up));
        assert_eq!(state.selected(), 0);
        for _ in 0..5 {
            handle_key(&mut state, &mut session, ctrl('n'));
        }
        assert_eq!(state.selected(), 2);
        handle_key(&mut state, &mut session, ctrl('p'));
        assert_eq!(state.selected(), 1);
    }

    #[test]
    fn enter_selects_highlighted_full_path() {
        let (mut state, mut session) = (PickerState::new(), session());
        type_str(&mut state, &mut session, "rs");
        handle_key(&mut state, &mut session, press(KeyCode::Down));
        assert_eq!(
            handle_key(&mut state, &mut session, press(KeyCode::Enter)),
            Outcome::Select(PathBuf::from("/work/src/main.rs"))
        );
    }

    #[test]
    fn enter_without_matches_cancels() {
        let (mut state, mut session) = (PickerState::new(), session());
        type_str(&mut state, &mut session, "zzz");
        assert!(session.filtered().is_empty());
        assert_eq!(
            handle_key(&mut state, &mut session, press(KeyCode::Enter)),
            Outcome::Cancel
        );
    }

    #[test]
    fn backspace_and_clear_widen_results() {
        let (mut state, mut session) = (PickerState::new(), session());
        type_str(&mut state, &mut session, "lib");
        assert_eq!(session.filtered().len(), 1);

        handle_key(&mut state, &mut session, press(KeyCode::Backspace));
        assert_eq!(state.query, "li");
        handle_key(&mut state, &mut session, ctrl('u'));
        assert_eq!(state.query, "");
        assert_eq!(session.filtered().len(), 3);
    }

    #[test]
    fn refresh_keeps_query_and_reports() {
        let (mut state, mut session) = (PickerState::new(), session());
        type_str(&mut state, &mut session, "main");
        handle_key(&mut state, &mut session, ctrl('r'));
        assert_eq!(state.query, "main");
        assert_eq!(state.message.as_deref(), Some("Refreshed: 3 files"));
        assert_eq!(session.filtered().len(), 1);
        assert_eq!(session.previous_query(), "main");
    }

    #[test]
    fn escape_and_ctrl_c_cancel_other_ctrl_keys_are_ignored() {
        let (mut state, mut session) = (PickerState::new(), session());
        assert_eq!(handle_key(&mut state, &mut session, ctrl('x')), Outcome::Continue);
        assert_eq!(state.query, "");
        assert_eq!(handle_key(&mut state, &mut session, ctrl('c')), Outcome::Cancel);
        assert_eq!(
            handle_key(&mut state, &mut session, press(KeyCode::Esc)),
            Outcome::Cancel
        );
    }
}
