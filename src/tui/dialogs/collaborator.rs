//! Collaborator dialog
//!
//! The add and edit modals: primary allocation fields, the secondary
//! allocation entry controls and the staged row table. Tab moves between
//! controls; Enter on the entry controls stages a row, anywhere else it
//! submits.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::config::{ModalTimings, Settings};
use crate::form::{CollaboratorForm, Field, FormKind, Modal, RowView};
use crate::models::numeric::accepts_char;
use crate::models::Axis;
use crate::tui::app::App;
use crate::tui::layout::centered_rect;
use crate::tui::widgets::{SelectInput, TextInput};

/// Which control has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    #[default]
    Matricule,
    Nom,
    Prenom,
    Profile,
    Assignment,
    BaseHours,
    Build,
    Run,
    EntryProfile,
    EntryBuild,
    EntryRun,
    Rows,
}

impl FormFocus {
    const ORDER: [FormFocus; 12] = [
        Self::Matricule,
        Self::Nom,
        Self::Prenom,
        Self::Profile,
        Self::Assignment,
        Self::BaseHours,
        Self::Build,
        Self::Run,
        Self::EntryProfile,
        Self::EntryBuild,
        Self::EntryRun,
        Self::Rows,
    ];

    /// First control of a form; the matricule is fixed when editing
    pub fn first(kind: FormKind) -> Self {
        match kind {
            FormKind::Add => Self::Matricule,
            FormKind::Edit => Self::Nom,
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn step(self, kind: FormKind, forward: bool) -> Self {
        let len = Self::ORDER.len();
        let mut index = self.position();
        loop {
            index = if forward {
                (index + 1) % len
            } else {
                (index + len - 1) % len
            };
            let candidate = Self::ORDER[index];
            if !(kind == FormKind::Edit && candidate == Self::Matricule) {
                return candidate;
            }
        }
    }

    pub fn next(self, kind: FormKind) -> Self {
        self.step(kind, true)
    }

    pub fn prev(self, kind: FormKind) -> Self {
        self.step(kind, false)
    }

    pub fn is_entry(self) -> bool {
        matches!(self, Self::EntryProfile | Self::EntryBuild | Self::EntryRun)
    }

    fn is_select(self) -> bool {
        matches!(self, Self::Profile | Self::Assignment | Self::EntryProfile)
    }

    fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::BaseHours | Self::Build | Self::Run | Self::EntryBuild | Self::EntryRun | Self::Rows
        )
    }
}

/// State of one collaborator modal
#[derive(Debug, Clone)]
pub struct CollaboratorDialog {
    pub form: CollaboratorForm,
    pub modal: Modal,
    pub focus: FormFocus,
    /// Row under the cursor when the table has focus
    pub selected_row: usize,
    /// Cell under the cursor when the table has focus
    pub row_axis: Axis,
}

impl CollaboratorDialog {
    pub fn new(kind: FormKind, timings: &ModalTimings) -> Self {
        Self {
            form: CollaboratorForm::new(kind),
            modal: Modal::new(timings),
            focus: FormFocus::first(kind),
            selected_row: 0,
            row_axis: Axis::Build,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.form.kind
    }

    /// Discard the form contents, keeping the modal phase
    pub fn reset(&mut self) {
        self.form.reset();
        self.focus = FormFocus::first(self.kind());
        self.selected_row = 0;
        self.row_axis = Axis::Build;
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        let form = &mut self.form;
        match self.focus {
            FormFocus::Matricule if form.kind == FormKind::Add => Some(&mut form.matricule),
            FormFocus::Nom => Some(&mut form.nom),
            FormFocus::Prenom => Some(&mut form.prenom),
            FormFocus::BaseHours => Some(&mut form.base_hours),
            FormFocus::Build => Some(&mut form.build),
            FormFocus::Run => Some(&mut form.run),
            FormFocus::EntryBuild => Some(&mut form.secondary.entry.build),
            FormFocus::EntryRun => Some(&mut form.secondary.entry.run),
            FormFocus::Rows => form
                .secondary
                .table
                .cell_mut(self.selected_row, self.row_axis),
            _ => None,
        }
    }

    /// Type a character into the focused control
    pub fn input_char(&mut self, c: char) {
        if self.focus.is_numeric() && !accepts_char(c) {
            return;
        }
        if let Some(text) = self.focused_text() {
            text.push(c);
            self.form.clear_errors();
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
            self.form.clear_errors();
        }
    }

    /// Move the focused picker to the next or previous option
    pub fn cycle_option(&mut self, settings: &Settings, forward: bool) {
        match self.focus {
            FormFocus::Profile => {
                let current = self
                    .form
                    .profile
                    .and_then(|id| settings.profiles.iter().position(|p| p.id == id));
                if let Some(i) = cycle(settings.profiles.len(), current, forward) {
                    self.form.select_profile(&settings.profiles[i]);
                }
            }
            FormFocus::Assignment => {
                let current = self
                    .form
                    .assignment
                    .and_then(|id| settings.assignments.iter().position(|a| a.id == id));
                if let Some(i) = cycle(settings.assignments.len(), current, forward) {
                    self.form.assignment = Some(settings.assignments[i].id);
                }
            }
            FormFocus::EntryProfile => {
                let current = self
                    .form
                    .secondary
                    .entry
                    .profile
                    .as_ref()
                    .and_then(|sel| settings.profiles.iter().position(|p| p.id == sel.id));
                if let Some(i) = cycle(settings.profiles.len(), current, forward) {
                    self.form.secondary.entry.profile = Some(settings.profiles[i].clone());
                }
            }
            _ => return,
        }
        self.form.clear_errors();
    }

    /// Stage the entry controls as a new row
    pub fn add_row(&mut self) -> bool {
        let added = self.form.add_secondary_row();
        if added {
            self.selected_row = self.form.secondary.table.len().saturating_sub(1);
            self.focus = FormFocus::EntryProfile;
        }
        added
    }

    pub fn move_row(&mut self, down: bool) {
        let len = self.form.secondary.table.len();
        if len == 0 {
            self.selected_row = 0;
        } else if down {
            self.selected_row = (self.selected_row + 1).min(len - 1);
        } else {
            self.selected_row = self.selected_row.saturating_sub(1);
        }
    }

    pub fn remove_selected_row(&mut self) {
        if self.form.secondary.remove_row(self.selected_row).is_some() {
            let len = self.form.secondary.table.len();
            self.selected_row = self.selected_row.min(len.saturating_sub(1));
            self.form.clear_errors();
        }
    }

    fn toggle_axis(&mut self) {
        self.row_axis = match self.row_axis {
            Axis::Build => Axis::Run,
            Axis::Run => Axis::Build,
        };
    }
}

/// Index after moving one step through `len` options, wrapping around
fn cycle(len: usize, current: Option<usize>, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    })
}

/// Render a collaborator dialog unless its modal is hidden
pub fn render(frame: &mut Frame, dialog: &CollaboratorDialog, settings: &Settings, loading: bool) {
    if dialog.modal.is_hidden() {
        return;
    }

    let area = centered_rect(70, 90, frame.area());
    frame.render_widget(Clear, area);

    // Entering and leaving share the dimmed style; only an open modal is bright
    let accent = if dialog.modal.is_revealed() {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(format!(" {} ", dialog.kind().title()))
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Matricule
            Constraint::Length(1), // Nom
            Constraint::Length(1), // Prenom
            Constraint::Length(1), // Profile
            Constraint::Length(1), // Assignment
            Constraint::Length(1), // Base hours
            Constraint::Length(1), // Build %
            Constraint::Length(1), // Run %
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Secondary header
            Constraint::Length(1), // Entry profile
            Constraint::Length(1), // Entry build / run
            Constraint::Min(4),    // Rows
            Constraint::Length(2), // Budget summary
            Constraint::Length(3), // Errors
            Constraint::Length(1), // Hints
        ])
        .split(inner);

    let form = &dialog.form;
    let focus = dialog.focus;
    let invalid = |field: Field| form.error_for(field).is_some();

    frame.render_widget(
        TextInput::new("Matricule", &form.matricule)
            .placeholder("e.g. M001")
            .focused(focus == FormFocus::Matricule)
            .read_only(form.kind == FormKind::Edit)
            .invalid(invalid(Field::Matricule)),
        chunks[0],
    );
    frame.render_widget(
        TextInput::new("Last name", &form.nom)
            .focused(focus == FormFocus::Nom)
            .invalid(invalid(Field::Nom)),
        chunks[1],
    );
    frame.render_widget(
        TextInput::new("First name", &form.prenom)
            .focused(focus == FormFocus::Prenom)
            .invalid(invalid(Field::Prenom)),
        chunks[2],
    );

    let profile_name = form
        .profile
        .and_then(|id| settings.profile(id))
        .map(|p| p.name.as_str());
    frame.render_widget(
        SelectInput::new("Profile", profile_name)
            .focused(focus == FormFocus::Profile)
            .invalid(invalid(Field::Profile)),
        chunks[3],
    );

    let assignment_name = form.assignment.and_then(|id| {
        settings
            .assignments
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.as_str())
    });
    frame.render_widget(
        SelectInput::new("Assignment", assignment_name)
            .focused(focus == FormFocus::Assignment)
            .invalid(invalid(Field::Assignment)),
        chunks[4],
    );

    frame.render_widget(
        TextInput::new("Base hours", &form.base_hours)
            .placeholder("0")
            .focused(focus == FormFocus::BaseHours)
            .invalid(invalid(Field::BaseHours)),
        chunks[5],
    );
    frame.render_widget(
        TextInput::new("Build %", &form.build)
            .placeholder("0")
            .focused(focus == FormFocus::Build)
            .invalid(invalid(Field::PrimaryBuild)),
        chunks[6],
    );
    frame.render_widget(
        TextInput::new("Run %", &form.run)
            .placeholder("0")
            .focused(focus == FormFocus::Run)
            .invalid(invalid(Field::PrimaryRun)),
        chunks[7],
    );

    let mut header = vec![Span::styled(
        "Secondary allocation",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    if loading {
        header.push(Span::styled(
            "  loading…",
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(header)), chunks[9]);

    let entry = &form.secondary.entry;
    frame.render_widget(
        SelectInput::new("  Profile", entry.profile.as_ref().map(|p| p.name.as_str()))
            .focused(focus == FormFocus::EntryProfile)
            .invalid(invalid(Field::EntryProfile)),
        chunks[10],
    );

    let entry_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[11]);
    frame.render_widget(
        TextInput::new("  Build %", &entry.build)
            .focused(focus == FormFocus::EntryBuild)
            .invalid(invalid(Field::EntryBuild)),
        entry_cols[0],
    );
    frame.render_widget(
        TextInput::new("Run %", &entry.run)
            .focused(focus == FormFocus::EntryRun)
            .invalid(invalid(Field::EntryRun)),
        entry_cols[1],
    );

    render_rows(frame, dialog, chunks[12]);

    if let Some(check) = &form.budget {
        let style = if check.is_within_budget() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Red)
        };
        let lines: Vec<Line> = check
            .summary()
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[13]);
    }

    if !form.errors.is_empty() {
        let lines: Vec<Line> = form
            .errors
            .iter()
            .map(|e| Line::from(Span::styled(e.to_string(), Style::default().fg(Color::Red))))
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[14]);
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::White)),
        Span::raw(" Next  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(if focus.is_entry() { " Add row  " } else { " Save  " }),
        Span::styled("[Del]", Style::default().fg(Color::White)),
        Span::raw(" Remove row  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[15]);
}

/// Render the staged rows table
fn render_rows(frame: &mut Frame, dialog: &CollaboratorDialog, area: Rect) {
    let table_focused = dialog.focus == FormFocus::Rows;
    let highlighted = dialog.form.secondary.table.is_highlighted();

    let border = if highlighted {
        Color::Red
    } else if table_focused {
        Color::Cyan
    } else {
        Color::White
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let cursor = Style::default().fg(Color::Black).bg(Color::Cyan);
    let cell_style = |index: usize, axis: Axis| {
        if table_focused && index == dialog.selected_row && axis == dialog.row_axis {
            cursor
        } else {
            Style::default()
        }
    };

    let rows: Vec<Row> = dialog
        .form
        .secondary
        .table
        .views()
        .into_iter()
        .enumerate()
        .map(|(index, view)| match view {
            RowView::Placeholder { text } => Row::new(vec![Cell::from(Span::styled(
                text,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))]),
            RowView::Data {
                label,
                build_value,
                run_value,
                ..
            } => Row::new(vec![
                Cell::from(label),
                Cell::from(build_value).style(cell_style(index, Axis::Build)),
                Cell::from(run_value).style(cell_style(index, Axis::Run)),
            ]),
        })
        .collect();

    let header = Row::new(vec![
        Cell::from("Profile").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Build %").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Run %").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .style(Style::default().fg(Color::Yellow));

    let widths = [
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let row_style = if highlighted {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .style(row_style)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if table_focused && !dialog.form.secondary.table.is_empty() {
        state.select(Some(dialog.selected_row));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

/// Handle key input for the active collaborator dialog
///
/// Returns false when no collaborator modal is taking input.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let now = Instant::now();
    let Some(kind) = app.active_form_kind() else {
        return false;
    };
    let settings = app.settings;

    if !app.dialog(kind).modal.is_interactive() {
        return false;
    }

    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.submit_active_form(now);
        return true;
    }

    match key.code {
        KeyCode::Esc => app.close_modal(kind, now),

        KeyCode::Enter => {
            if app.dialog(kind).focus.is_entry() {
                app.dialog_mut(kind).add_row();
            } else {
                app.submit_active_form(now);
            }
        }

        code => {
            let dialog = app.dialog_mut(kind);
            match code {
                KeyCode::Tab => dialog.focus = dialog.focus.next(kind),
                KeyCode::BackTab => dialog.focus = dialog.focus.prev(kind),
                KeyCode::Left | KeyCode::Right if dialog.focus.is_select() => {
                    dialog.cycle_option(settings, code == KeyCode::Right)
                }
                KeyCode::Left | KeyCode::Right if dialog.focus == FormFocus::Rows => {
                    dialog.toggle_axis()
                }
                KeyCode::Up if dialog.focus == FormFocus::Rows => dialog.move_row(false),
                KeyCode::Down if dialog.focus == FormFocus::Rows => dialog.move_row(true),
                KeyCode::Delete if dialog.focus == FormFocus::Rows => {
                    dialog.remove_selected_row()
                }
                KeyCode::Backspace => dialog.backspace(),
                KeyCode::Char(c) => dialog.input_char(c),
                _ => {}
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentId, AssignmentOption, ProfileId, ProfileOption};

    fn settings() -> Settings {
        let mut settings = Settings::default();
        settings.profiles = vec![
            ProfileOption::new(ProfileId::new(1), "Developer").with_base_hours(1600.0),
            ProfileOption::new(ProfileId::new(2), "Architect"),
        ];
        settings.assignments = vec![AssignmentOption::new(AssignmentId::new(10), "Platform")];
        settings
    }

    fn dialog(kind: FormKind) -> CollaboratorDialog {
        CollaboratorDialog::new(kind, &ModalTimings::default())
    }

    #[test]
    fn test_edit_focus_skips_matricule() {
        assert_eq!(FormFocus::first(FormKind::Edit), FormFocus::Nom);
        assert_eq!(FormFocus::Rows.next(FormKind::Edit), FormFocus::Nom);
        assert_eq!(FormFocus::Nom.prev(FormKind::Edit), FormFocus::Rows);
        assert_eq!(FormFocus::Rows.next(FormKind::Add), FormFocus::Matricule);
    }

    #[test]
    fn test_numeric_fields_reject_letters() {
        let mut d = dialog(FormKind::Add);
        d.focus = FormFocus::Build;
        for c in "4x2,5".chars() {
            d.input_char(c);
        }
        assert_eq!(d.form.build, "42,5");

        d.backspace();
        assert_eq!(d.form.build, "42,");
    }

    #[test]
    fn test_matricule_is_read_only_when_editing() {
        let mut d = dialog(FormKind::Edit);
        d.form.matricule = "M1".into();
        d.focus = FormFocus::Matricule;
        d.input_char('9');
        assert_eq!(d.form.matricule, "M1");
    }

    #[test]
    fn test_cycle_profile_prefills_hours() {
        let settings = settings();
        let mut d = dialog(FormKind::Add);
        d.focus = FormFocus::Profile;

        d.cycle_option(&settings, true);
        assert_eq!(d.form.profile, Some(ProfileId::new(1)));
        assert_eq!(d.form.base_hours, "1600");

        d.cycle_option(&settings, true);
        assert_eq!(d.form.profile, Some(ProfileId::new(2)));

        d.cycle_option(&settings, true);
        assert_eq!(d.form.profile, Some(ProfileId::new(1)));
    }

    #[test]
    fn test_cycle_with_no_options_is_noop() {
        let mut d = dialog(FormKind::Add);
        d.focus = FormFocus::Assignment;
        d.cycle_option(&Settings::default(), false);
        assert_eq!(d.form.assignment, None);
    }

    #[test]
    fn test_add_edit_and_remove_rows() {
        let settings = settings();
        let mut d = dialog(FormKind::Add);

        for (build, run) in [("20", "10"), ("5", "5")] {
            d.focus = FormFocus::EntryProfile;
            d.cycle_option(&settings, true);
            d.form.secondary.entry.build = build.into();
            d.form.secondary.entry.run = run.into();
            assert!(d.add_row());
        }
        assert_eq!(d.form.secondary.table.len(), 2);
        assert_eq!(d.selected_row, 1);

        d.focus = FormFocus::Rows;
        d.move_row(false);
        d.toggle_axis();
        d.input_char('0');
        assert_eq!(d.form.secondary.table.rows()[0].run, "100");

        d.remove_selected_row();
        assert_eq!(d.form.secondary.table.len(), 1);
        assert_eq!(d.form.secondary.table.rows()[0].build, "5");
        assert_eq!(d.selected_row, 0);
    }

    #[test]
    fn test_rejected_row_keeps_entry_and_reports() {
        let settings = settings();
        let mut d = dialog(FormKind::Add);
        d.focus = FormFocus::EntryProfile;
        d.cycle_option(&settings, true);
        d.form.secondary.entry.build = "60".into();
        d.form.secondary.entry.run = "50".into();

        assert!(!d.add_row());
        assert!(d.form.secondary.table.is_empty());
        assert_eq!(d.form.secondary.entry.build, "60");
        assert!(d.form.error_for(Field::EntryRun).is_some());
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        assert_eq!(cycle(3, None, true), Some(0));
        assert_eq!(cycle(3, None, false), Some(2));
        assert_eq!(cycle(3, Some(2), true), Some(0));
        assert_eq!(cycle(3, Some(0), false), Some(2));
        assert_eq!(cycle(0, None, true), None);
    }
}
