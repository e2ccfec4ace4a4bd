//! Error dialog widget
//!
//! Displays detailed error information with recovery suggestions.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::error::StaffingError;

/// An error dialog with details and suggestions
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// The error title/summary
    pub title: String,
    /// Detailed error message
    pub details: String,
    /// Suggested recovery actions
    pub suggestions: Vec<String>,
    /// Technical details (for advanced users)
    pub technical: Option<String>,
}

impl ErrorInfo {
    /// Create error info from a StaffingError
    pub fn from_error(error: &StaffingError) -> Self {
        let (title, details, suggestions, technical) = match error {
            StaffingError::Config(msg) => (
                "Configuration Error".to_string(),
                msg.clone(),
                vec![
                    "Check config.json for syntax errors".to_string(),
                    "Run 'staffing config' to see the effective settings".to_string(),
                ],
                None,
            ),
            StaffingError::Io(msg) => (
                "I/O Error".to_string(),
                msg.clone(),
                vec![
                    "Check that you have write permissions to the data directory".to_string(),
                    "Ensure there is enough disk space".to_string(),
                ],
                None,
            ),
            StaffingError::Json(msg) => (
                "Data File Error".to_string(),
                format!("Failed to read or write data: {}", msg),
                vec!["The roster cache may be corrupted".to_string()],
                Some(msg.clone()),
            ),
            StaffingError::Validation(msg) => (
                "Validation Error".to_string(),
                msg.clone(),
                vec!["Review the input values and try again".to_string()],
                None,
            ),
            StaffingError::Http(msg) => (
                "Server Error".to_string(),
                msg.clone(),
                vec![
                    "Check that the allocation server is running".to_string(),
                    "Verify server.base_url in config.json".to_string(),
                    "The form was not saved; submit it again once the server responds".to_string(),
                ],
                None,
            ),
            StaffingError::Schema(msg) => (
                "Unexpected Server Response".to_string(),
                "The server answered with data this version cannot read".to_string(),
                vec!["Check that the server and staffing-cli versions match".to_string()],
                Some(msg.clone()),
            ),
            StaffingError::Storage(msg) => (
                "Storage Error".to_string(),
                msg.clone(),
                vec!["Check that the data directory is accessible".to_string()],
                Some(msg.clone()),
            ),
        };

        Self {
            title,
            details,
            suggestions,
            technical,
        }
    }
}

/// Widget for rendering an error dialog
pub struct ErrorDialog<'a> {
    error: &'a ErrorInfo,
    show_technical: bool,
}

impl<'a> ErrorDialog<'a> {
    /// Create a new error dialog widget
    pub fn new(error: &'a ErrorInfo) -> Self {
        Self {
            error,
            show_technical: false,
        }
    }

    /// Show technical details
    pub fn with_technical(mut self, show: bool) -> Self {
        self.show_technical = show;
        self
    }
}

impl<'a> Widget for ErrorDialog<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" Error: {} ", self.error.title))
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        block.render(area, buf);

        // Calculate layout
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Details
                Constraint::Min(1),    // Suggestions
                Constraint::Length(2), // Technical
                Constraint::Length(1), // Close hint
            ])
            .split(inner);

        // Render details
        let details = Paragraph::new(self.error.details.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true });
        details.render(chunks[0], buf);

        // Render suggestions
        if !self.error.suggestions.is_empty() {
            let mut lines: Vec<Line> = vec![Line::from(Span::styled(
                "Suggestions:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))];

            for suggestion in &self.error.suggestions {
                lines.push(Line::from(vec![
                    Span::raw("  - "),
                    Span::raw(suggestion.as_str()),
                ]));
            }

            let suggestions = Paragraph::new(lines)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true });
            suggestions.render(chunks[1], buf);
        }

        if self.show_technical {
            if let Some(technical) = &self.error.technical {
                Paragraph::new(technical.as_str())
                    .style(Style::default().fg(Color::DarkGray))
                    .wrap(Wrap { trim: true })
                    .render(chunks[2], buf);
            }
        }

        // Render close hint
        let close_hint = Paragraph::new("Press Esc or Enter to close")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        close_hint.render(chunks[3], buf);
    }
}

/// Calculate the area for an error dialog (centered in parent)
pub fn error_dialog_area(parent: Rect) -> Rect {
    let width = (parent.width * 70 / 100).clamp(40, 80).min(parent.width);
    let height = (parent.height * 50 / 100).clamp(10, 20).min(parent.height);

    let x = parent.x + (parent.width - width) / 2;
    let y = parent.y + (parent.height - height) / 2;

    Rect::new(x, y, width, height)
}
