//! Form field widgets
//!
//! One-line labelled controls: free text, numeric text and option pickers.
//! The label turns red while the control has a validation error.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A labelled text control
#[derive(Debug, Clone, Default)]
pub struct TextInput<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    invalid: bool,
    read_only: bool,
}

impl<'a> TextInput<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            ..Self::default()
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    /// Shown dimmed and never with a cursor
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }
}

/// Label style shared by every control
pub fn label_style(focused: bool, invalid: bool) -> Style {
    if invalid {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            format!("{}: ", self.label),
            label_style(self.focused, self.invalid),
        )];

        if self.read_only {
            spans.push(Span::styled(
                self.value.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        } else if self.value.is_empty() && !self.focused {
            spans.push(Span::styled(
                self.placeholder.to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled(
                self.value.to_string(),
                Style::default().fg(Color::White),
            ));
        }

        if self.focused && !self.read_only {
            spans.push(Span::styled(
                " ",
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

/// A labelled option picker cycled with Left/Right
#[derive(Debug, Clone, Default)]
pub struct SelectInput<'a> {
    label: &'a str,
    selected: Option<&'a str>,
    focused: bool,
    invalid: bool,
}

impl<'a> SelectInput<'a> {
    pub fn new(label: &'a str, selected: Option<&'a str>) -> Self {
        Self {
            label,
            selected,
            ..Self::default()
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }
}

impl Widget for SelectInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let value = match self.selected {
            Some(name) => Span::styled(format!("< {} >", name), Style::default().fg(Color::White)),
            None => Span::styled("< choose >", Style::default().fg(Color::DarkGray)),
        };

        let mut spans = vec![
            Span::styled(
                format!("{}: ", self.label),
                label_style(self.focused, self.invalid),
            ),
            value,
        ];
        if self.focused {
            spans.push(Span::styled(
                "  (←/→ to change)",
                Style::default().fg(Color::DarkGray),
            ));
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(buf: &Buffer, width: u16) -> String {
        buf.content[..width as usize]
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_text_input_shows_placeholder_when_empty() {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        TextInput::new("Base hours", "")
            .placeholder("1600")
            .render(area, &mut buf);
        assert_eq!(line_text(&buf, 30), "Base hours: 1600");
    }

    #[test]
    fn test_invalid_label_is_red() {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        TextInput::new("Nom", "").invalid(true).render(area, &mut buf);
        assert_eq!(buf.content[0].fg, Color::Red);
    }

    #[test]
    fn test_select_without_choice() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        SelectInput::new("Profile", None).render(area, &mut buf);
        assert_eq!(line_text(&buf, 40), "Profile: < choose >");
    }
}
