//! Dark theme and color utilities.

use crate::notifications::NotificationLevel;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct DarkTheme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl DarkTheme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(16, 16, 20),
            bg_highlight: Color::Rgb(44, 44, 52),
            primary: Color::Rgb(97, 175, 239),
            success: Color::Rgb(152, 195, 121),
            warning: Color::Rgb(229, 192, 123),
            error: Color::Rgb(224, 108, 117),
            info: Color::Rgb(86, 182, 194),
            text: Color::Rgb(220, 223, 228),
            text_dim: Color::Rgb(128, 131, 141),
            border: Color::Rgb(60, 64, 72),
            border_focus: Color::Rgb(97, 175, 239),
        }
    }
}

impl Default for DarkTheme {
    fn default() -> Self {
        Self::dark()
    }
}

pub fn notification_color(level: NotificationLevel, theme: &DarkTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
        NotificationLevel::Success => theme.success,
    }
}

pub fn completion_color(completed: bool, theme: &DarkTheme) -> Color {
    if completed {
        theme.success
    } else {
        theme.text
    }
}
