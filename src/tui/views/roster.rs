//! Roster view (main panel)
//!
//! Lists the cached collaborators with their primary allocation

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::numeric::format_input;
use crate::tui::app::App;

/// Render the roster table
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let border_color = if app.has_dialog() {
        Color::White
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if app.roster.is_empty() {
        let hint = Paragraph::new(" No collaborators yet. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let widths = [
        Constraint::Length(10), // Matricule
        Constraint::Min(20),    // Name
        Constraint::Length(16), // Profile
        Constraint::Length(8),  // Hours
        Constraint::Length(8),  // Build
        Constraint::Length(8),  // Run
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Matricule").style(bold),
        Cell::from("Name").style(bold),
        Cell::from("Profile").style(bold),
        Cell::from("Hours").style(bold),
        Cell::from("Build %").style(bold),
        Cell::from("Run %").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = app
        .roster
        .iter()
        .map(|record| {
            let profile = match record.profil_id {
                Some(id) => app
                    .settings
                    .profile(id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| format!("Profile #{}", id)),
                None => "-".to_string(),
            };
            let name_style = if record.is_incomplete() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(record.matricule.to_string()),
                Cell::from(record.full_name()).style(name_style),
                Cell::from(profile),
                Cell::from(format_input(record.heures_base)),
                Cell::from(format_input(record.pourcentage_build)),
                Cell::from(format_input(record.pourcentage_run)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}
