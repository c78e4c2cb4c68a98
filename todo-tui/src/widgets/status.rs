//! Status line widget showing the latest notification or a help hint.

use crate::notifications::{Notification, NotificationLevel};
use crate::theme::{notification_color, DarkTheme};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct StatusIndicator<'a> {
    pub notification: Option<&'a Notification>,
    pub fallback: &'a str,
    pub theme: &'a DarkTheme,
}

impl<'a> StatusIndicator<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let (text, style) = match self.notification {
            Some(note) => {
                let label = match note.level {
                    NotificationLevel::Info => "INFO",
                    NotificationLevel::Warning => "WARN",
                    NotificationLevel::Error => "ERROR",
                    NotificationLevel::Success => "OK",
                };
                (
                    format!("{}: {}", label, note.message),
                    Style::default().fg(notification_color(note.level, self.theme)),
                )
            }
            None => (
                self.fallback.to_string(),
                Style::default().fg(self.theme.text_dim),
            ),
        };

        let paragraph = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::TOP));
        f.render_widget(paragraph, area);
    }
}
