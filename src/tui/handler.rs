//! Event handler for the TUI
//!
//! Routes keyboard events to the error overlay, the open dialog or the
//! roster, and feeds timer ticks and finished fetches into the app.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.tick(Instant::now());
            Ok(())
        }
        Event::Repartitions(outcome) => {
            app.apply_load(outcome);
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    if app.error.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            app.dismiss_error();
        }
        return Ok(());
    }

    match app.active_dialog {
        ActiveDialog::Help => {
            app.close_help();
            Ok(())
        }
        ActiveDialog::Collaborator(_) => {
            dialogs::collaborator::handle_key(app, key);
            Ok(())
        }
        ActiveDialog::None => handle_normal_key(app, key),
    }
}

/// Handle keys on the roster
fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    let now = Instant::now();
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('?') => app.open_help(),

        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),

        KeyCode::Char('a') | KeyCode::Char('n') => app.open_add_modal(now),
        KeyCode::Char('e') | KeyCode::Enter => {
            app.open_edit_modal(now);
        }
        KeyCode::Char('r') => app.reload_roster(),

        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AllocationBackend, SubmitReceipt};
    use crate::config::{Settings, StaffingPaths};
    use crate::error::{StaffingError, StaffingResult};
    use crate::form::{FormKind, FormSubmission};
    use crate::models::{AllocationRow, Matricule};
    use crate::storage::Storage;
    use crossterm::event::KeyEventState;
    use std::sync::{mpsc, Arc};
    use tempfile::TempDir;

    struct OfflineBackend;

    impl AllocationBackend for OfflineBackend {
        fn fetch_repartitions(&self, _m: &Matricule) -> StaffingResult<Vec<AllocationRow>> {
            Ok(Vec::new())
        }

        fn submit(&self, _s: &FormSubmission) -> StaffingResult<SubmitReceipt> {
            Err(StaffingError::Http("offline".into()))
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with_app(test: impl FnOnce(&mut App)) {
        let temp = TempDir::new().unwrap();
        let paths = StaffingPaths::with_base_dir(temp.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        let settings = Settings::default();
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(&storage, &settings, &paths, Arc::new(OfflineBackend), tx);
        test(&mut app);
    }

    #[test]
    fn test_add_key_opens_add_modal() {
        with_app(|app| {
            handle_event(app, Event::Key(press(KeyCode::Char('a')))).unwrap();
            assert_eq!(app.active_dialog, ActiveDialog::Collaborator(FormKind::Add));
            assert!(!app.add_dialog.modal.is_hidden());
        });
    }

    #[test]
    fn test_escape_closes_form() {
        with_app(|app| {
            handle_event(app, Event::Key(press(KeyCode::Char('n')))).unwrap();
            handle_event(app, Event::Key(press(KeyCode::Esc))).unwrap();
            assert!(!app.add_dialog.modal.is_interactive());
        });
    }

    #[test]
    fn test_edit_without_selection_sets_status() {
        with_app(|app| {
            handle_event(app, Event::Key(press(KeyCode::Char('e')))).unwrap();
            assert_eq!(app.active_dialog, ActiveDialog::None);
            assert!(app.status_message.is_some());
        });
    }

    #[test]
    fn test_help_closes_on_any_key() {
        with_app(|app| {
            handle_event(app, Event::Key(press(KeyCode::Char('?')))).unwrap();
            assert_eq!(app.active_dialog, ActiveDialog::Help);
            handle_event(app, Event::Key(press(KeyCode::Char('x')))).unwrap();
            assert_eq!(app.active_dialog, ActiveDialog::None);
        });
    }

    #[test]
    fn test_release_events_are_ignored() {
        with_app(|app| {
            let key = KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Release,
                state: KeyEventState::NONE,
            };
            handle_event(app, Event::Key(key)).unwrap();
            assert!(!app.should_quit);

            handle_event(app, Event::Key(press(KeyCode::Char('q')))).unwrap();
            assert!(app.should_quit);
        });
    }

    #[test]
    fn test_error_overlay_swallows_keys_until_dismissed() {
        with_app(|app| {
            app.show_error(&StaffingError::Http("boom".into()));
            handle_event(app, Event::Key(press(KeyCode::Char('q')))).unwrap();
            assert!(!app.should_quit);
            handle_event(app, Event::Key(press(KeyCode::Esc))).unwrap();
            assert!(app.error.is_none());
        });
    }
}
