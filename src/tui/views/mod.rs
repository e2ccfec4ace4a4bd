//! TUI Views module
//!
//! The roster screen and its status bar, with dialogs, toasts and the error
//! overlay drawn on top.

pub mod roster;
pub mod status_bar;

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;
use super::widgets::{error_dialog_area, notification_area, ErrorDialog, NotificationWidget};
use crate::form::FormKind;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header);
    roster::render(frame, app, layout.main);
    status_bar::render(frame, app, layout.status_bar);

    match app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame),
        ActiveDialog::Collaborator(kind) => {
            let loading = kind == FormKind::Edit && app.is_loading();
            dialogs::collaborator::render(frame, app.dialog(kind), app.settings, loading);
        }
        ActiveDialog::None => {}
    }

    if let Some(notification) = app.notifications.current() {
        let area = notification_area(frame.area());
        frame.render_widget(NotificationWidget::new(notification), area);
    }

    if let Some(ref error) = app.error {
        let area = error_dialog_area(frame.area());
        frame.render_widget(ErrorDialog::new(error).with_technical(true), area);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let block = Block::default()
        .title(" Collaborators ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let text = Paragraph::new(format!(" Server: {}", app.settings.server.base_url))
        .style(Style::default().fg(Color::DarkGray))
        .block(block);

    frame.render_widget(text, area);
}
