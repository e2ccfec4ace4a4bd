//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events:
//! the roster list, both collaborator modals, the allocation loader and the
//! backend that receives submissions.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::api::{AllocationBackend, LoadOutcome, RepartitionLoader};
use crate::config::paths::StaffingPaths;
use crate::config::settings::Settings;
use crate::error::StaffingError;
use crate::form::{Field, FieldError, FormKind, FormSubmission, SubmitBlock};
use crate::models::{CollaboratorRecord, Matricule};
use crate::storage::Storage;

use super::dialogs::collaborator::CollaboratorDialog;
use super::event::Event;
use super::widgets::{ErrorInfo, Notification, NotificationQueue};

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Collaborator(FormKind),
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Paths configuration
    pub paths: &'a StaffingPaths,

    backend: Arc<dyn AllocationBackend>,
    loader: RepartitionLoader,

    /// Where background fetches report back
    events: mpsc::Sender<Event>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    pub add_dialog: CollaboratorDialog,
    pub edit_dialog: CollaboratorDialog,

    /// Roster snapshot shown in the main view
    pub roster: Vec<CollaboratorRecord>,

    /// Selected roster index
    pub selected_index: usize,

    pub notifications: NotificationQueue,

    /// Error shown over everything until dismissed
    pub error: Option<ErrorInfo>,

    /// Status message to display
    pub status_message: Option<String>,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(
        storage: &'a Storage,
        settings: &'a Settings,
        paths: &'a StaffingPaths,
        backend: Arc<dyn AllocationBackend>,
        events: mpsc::Sender<Event>,
    ) -> Self {
        let mut app = Self {
            storage,
            settings,
            paths,
            loader: RepartitionLoader::new(Arc::clone(&backend)),
            backend,
            events,
            should_quit: false,
            active_dialog: ActiveDialog::default(),
            add_dialog: CollaboratorDialog::new(FormKind::Add, &settings.timings),
            edit_dialog: CollaboratorDialog::new(FormKind::Edit, &settings.timings),
            roster: Vec::new(),
            selected_index: 0,
            notifications: NotificationQueue::new(),
            error: None,
            status_message: None,
        };
        app.refresh_roster();
        app
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn open_help(&mut self) {
        self.active_dialog = ActiveDialog::Help;
    }

    pub fn close_help(&mut self) {
        if self.active_dialog == ActiveDialog::Help {
            self.active_dialog = ActiveDialog::None;
        }
    }

    /// Show an error over the interface
    pub fn show_error(&mut self, err: &StaffingError) {
        self.error = Some(ErrorInfo::from_error(err));
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Re-read the roster snapshot from storage
    pub fn refresh_roster(&mut self) {
        match self.storage.roster.get_all() {
            Ok(records) => self.roster = records,
            Err(e) => {
                warn!(error = %e, "failed to read roster");
                self.roster.clear();
            }
        }
        self.selected_index = self.selected_index.min(self.roster.len().saturating_sub(1));
    }

    /// Reload the roster file from disk
    pub fn reload_roster(&mut self) {
        if let Err(e) = self.storage.roster.load() {
            error!(error = %e, "failed to reload roster");
            self.show_error(&e);
            return;
        }
        self.refresh_roster();
        self.set_status(format!("Roster reloaded ({} collaborators)", self.roster.len()));
    }

    fn in_roster(&self, matricule: &Matricule) -> bool {
        self.roster.iter().any(|r| &r.matricule == matricule)
    }

    pub fn selected_record(&self) -> Option<&CollaboratorRecord> {
        self.roster.get(self.selected_index)
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.roster.len() {
            self.selected_index += 1;
        }
    }

    pub fn dialog(&self, kind: FormKind) -> &CollaboratorDialog {
        match kind {
            FormKind::Add => &self.add_dialog,
            FormKind::Edit => &self.edit_dialog,
        }
    }

    pub fn dialog_mut(&mut self, kind: FormKind) -> &mut CollaboratorDialog {
        match kind {
            FormKind::Add => &mut self.add_dialog,
            FormKind::Edit => &mut self.edit_dialog,
        }
    }

    /// The collaborator modal that owns the keyboard, if any
    pub fn active_form_kind(&self) -> Option<FormKind> {
        match self.active_dialog {
            ActiveDialog::Collaborator(kind) => Some(kind),
            _ => None,
        }
    }

    /// Whether an allocation fetch for the edit modal is outstanding
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn open_add_modal(&mut self, now: Instant) {
        self.add_dialog.reset();
        self.add_dialog.modal.open(now);
        self.active_dialog = ActiveDialog::Collaborator(FormKind::Add);
        debug!("add modal opened");
    }

    pub fn close_add_modal(&mut self, now: Instant) {
        self.add_dialog.modal.close(now);
        debug!("add modal closing");
    }

    /// Open the edit modal on the selected collaborator
    ///
    /// The primary fields are filled at once; the secondary rows arrive
    /// later through `apply_load`. Returns false when nothing is selected.
    pub fn open_edit_modal(&mut self, now: Instant) -> bool {
        let Some(record) = self.selected_record().cloned() else {
            self.set_status("No collaborator selected");
            return false;
        };

        self.edit_dialog.reset();
        self.edit_dialog.form.populate(&record);

        let sender = self.events.clone();
        let generation = self.loader.request(record.matricule.clone(), move |outcome| {
            // The loop may already be gone when a slow fetch returns
            let _ = sender.send(Event::Repartitions(outcome));
        });

        self.edit_dialog.modal.open(now);
        self.active_dialog = ActiveDialog::Collaborator(FormKind::Edit);
        info!(matricule = %record.matricule, generation, "edit modal opened");
        true
    }

    /// Close the edit modal; any fetch still in flight is ignored on arrival
    pub fn close_edit_modal(&mut self, now: Instant) {
        self.loader.invalidate();
        self.edit_dialog.modal.close(now);
        debug!("edit modal closing");
    }

    pub fn close_modal(&mut self, kind: FormKind, now: Instant) {
        match kind {
            FormKind::Add => self.close_add_modal(now),
            FormKind::Edit => self.close_edit_modal(now),
        }
    }

    /// Apply a finished allocation fetch to the edit table
    ///
    /// Failures are logged and leave the table as it was.
    pub fn apply_load(&mut self, outcome: LoadOutcome) {
        let matricule = outcome.matricule.clone();
        match self.loader.accept(outcome) {
            Some(Ok(rows)) => {
                debug!(%matricule, count = rows.len(), "secondary allocations applied");
                self.edit_dialog.form.secondary.table.replace_with(&rows);
                self.edit_dialog.selected_row = 0;
            }
            Some(Err(e)) => {
                error!(%matricule, error = %e, "failed to load secondary allocations");
            }
            None => {}
        }
    }

    /// Validate the active form and post it when it passes
    pub fn submit_active_form(&mut self, now: Instant) {
        let Some(kind) = self.active_form_kind() else {
            return;
        };
        let highlight = self.settings.timings.highlight();

        let dialog = self.dialog_mut(kind);
        match dialog.form.prepare_submission() {
            Err(SubmitBlock::Invalid(errors)) => {
                warn!(count = errors.len(), "submission blocked by invalid fields");
                dialog.form.budget = None;
                dialog.form.set_errors(errors);
            }
            Err(SubmitBlock::OverBudget(check)) => {
                warn!(
                    build_available = check.build.available,
                    build_allocated = check.build.allocated,
                    run_available = check.run.available,
                    run_allocated = check.run.allocated,
                    "submission blocked: secondary CAF exceeds available CAF"
                );
                dialog.form.clear_errors();
                dialog.form.secondary.table.flag_error(now, highlight);
                dialog.form.budget = Some(check);
                self.notifications.push(Notification::warning(
                    "Secondary allocations exceed the available CAF",
                    now,
                ));
            }
            Ok(submission) => {
                let matricule = &submission.record.matricule;
                if kind == FormKind::Add && self.in_roster(matricule) {
                    warn!(%matricule, "add blocked: matricule already in the roster");
                    let form = &mut self.add_dialog.form;
                    form.budget = None;
                    form.set_errors(vec![FieldError::new(Field::Matricule, "already exists")]);
                    return;
                }
                self.send_submission(kind, submission, now);
            }
        }
    }

    fn send_submission(&mut self, kind: FormKind, submission: FormSubmission, now: Instant) {
        let receipt = match self.backend.submit(&submission) {
            Ok(receipt) => receipt,
            Err(e) => {
                error!(
                    path = %submission.target.path(),
                    remote = e.is_remote(),
                    error = %e,
                    "submission failed"
                );
                self.show_error(&e);
                return;
            }
        };
        info!(
            path = %submission.target.path(),
            status = receipt.status,
            location = receipt.location.as_deref().unwrap_or("-"),
            "collaborator form accepted"
        );

        let mut record = submission.record;
        record.touch();
        let label = record.to_string();
        let saved = self
            .storage
            .roster
            .upsert(record)
            .and_then(|_| self.storage.roster.save());
        match saved {
            Ok(()) => self
                .notifications
                .push(Notification::success(format!("Saved {}", label), now)),
            Err(e) => {
                error!(error = %e, "failed to update roster cache");
                self.show_error(&e);
            }
        }

        self.refresh_roster();
        self.close_modal(kind, now);
    }

    /// Advance every timer to `now`
    pub fn tick(&mut self, now: Instant) {
        for kind in [FormKind::Add, FormKind::Edit] {
            let dialog = self.dialog_mut(kind);
            dialog.form.secondary.table.tick(now);
            if dialog.modal.tick(now) && dialog.modal.is_hidden() {
                dialog.reset();
                if self.active_dialog == ActiveDialog::Collaborator(kind) {
                    self.active_dialog = ActiveDialog::None;
                }
            }
        }
        self.notifications.remove_expired(now);
    }
}
