//! Toast notification widget
//!
//! Short-lived messages about submissions and blocked actions. Expiry is
//! checked against the event loop's clock.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// How long a toast stays up unless told otherwise
pub const DEFAULT_TOAST: Duration = Duration::from_secs(3);

/// Type of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Success,
    Warning,
}

impl NotificationType {
    pub fn color(&self) -> Color {
        match self {
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Success => "Saved",
            Self::Warning => "Blocked",
        }
    }
}

/// A toast notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub expires_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, notification_type: NotificationType, now: Instant) -> Self {
        Self {
            message: message.into(),
            notification_type,
            expires_at: now + DEFAULT_TOAST,
        }
    }

    pub fn success(message: impl Into<String>, now: Instant) -> Self {
        Self::new(message, NotificationType::Success, now)
    }

    pub fn warning(message: impl Into<String>, now: Instant) -> Self {
        Self::new(message, NotificationType::Warning, now)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Widget for rendering a notification
pub struct NotificationWidget<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationWidget<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }
}

impl Widget for NotificationWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = self.notification.notification_type.color();

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", self.notification.notification_type.title()))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        Paragraph::new(self.notification.message.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

/// Area for a toast in the top-right corner
pub fn notification_area(parent: Rect) -> Rect {
    let width = 44.min(parent.width);
    let height = 4.min(parent.height);
    Rect::new(parent.x + parent.width - width, parent.y, width, height)
}

/// Pending notifications, oldest first
#[derive(Debug, Default)]
pub struct NotificationQueue {
    notifications: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn remove_expired(&mut self, now: Instant) {
        self.notifications.retain(|n| !n.is_expired(now));
    }

    /// The notification to display (if any)
    pub fn current(&self) -> Option<&Notification> {
        self.notifications.first()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_types() {
        assert_eq!(NotificationType::Success.color(), Color::Green);
        assert_eq!(NotificationType::Warning.color(), Color::Yellow);
        assert_eq!(NotificationType::Warning.title(), "Blocked");
    }

    #[test]
    fn test_queue_expires_on_the_loop_clock() {
        let now = Instant::now();
        let mut queue = NotificationQueue::new();
        assert!(queue.is_empty());

        queue.push(Notification::warning("First", now));
        queue.push(Notification::success("Second", now + Duration::from_secs(2)));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().unwrap().message, "First");

        queue.remove_expired(now + Duration::from_secs(3));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.current().unwrap().message, "Second");

        queue.remove_expired(now + Duration::from_secs(5));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_area_fits_small_terminal() {
        let area = notification_area(Rect::new(0, 0, 20, 3));
        assert_eq!(area, Rect::new(0, 0, 20, 3));
    }
}
