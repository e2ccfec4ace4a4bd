//! Help dialog
//!
//! Shows keyboard shortcuts for the roster and the collaborator forms

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines())
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        heading("Roster"),
        Line::from(""),
        key_line("q", "Quit application"),
        key_line("?", "Show/hide help"),
        key_line("j/k", "Move selection up/down"),
        key_line("a/n", "Add a collaborator"),
        key_line("e/Enter", "Edit selected collaborator"),
        key_line("r", "Reload the roster"),
        Line::from(""),
        heading("Collaborator Form"),
        Line::from(""),
        key_line("Tab", "Next control (Shift+Tab: previous)"),
        key_line("←/→", "Change a selection, or Build/Run on a row"),
        key_line("Enter", "Add the secondary row / save"),
        key_line("Ctrl+S", "Save from any control"),
        key_line("↑/↓", "Pick a secondary row"),
        key_line("Del", "Remove the picked row"),
        key_line("Esc", "Close without saving"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )]),
    ]
}

/// Create a key binding line
fn key_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:12}", key),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(description),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_mentions_save_shortcut() {
        let text: Vec<String> = help_lines().iter().map(|l| l.to_string()).collect();
        assert!(text.iter().any(|l| l.contains("Ctrl+S")));
        assert!(text.iter().any(|l| l.starts_with("Esc")));
    }
}
