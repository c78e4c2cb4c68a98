//! Notification system for the TUI.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub ttl_ms: i64,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Utc::now(),
            ttl_ms: 3_000,
        }
    }

    pub fn with_ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::milliseconds(self.ttl_ms)
    }
}

/// Drop expired notifications, keeping arrival order.
pub fn prune(notifications: &mut Vec<Notification>, now: DateTime<Utc>) {
    notifications.retain(|n| !n.is_expired(now));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_expires_after_ttl() {
        let note = Notification::new(NotificationLevel::Info, "saved").with_ttl_ms(100);
        assert!(!note.is_expired(note.created_at));
        assert!(!note.is_expired(note.created_at + Duration::milliseconds(99)));
        assert!(note.is_expired(note.created_at + Duration::milliseconds(100)));
    }

    #[test]
    fn prune_keeps_live_notifications_in_order() {
        let old = Notification::new(NotificationLevel::Error, "boom").with_ttl_ms(10);
        let fresh = Notification::new(NotificationLevel::Success, "ok").with_ttl_ms(60_000);
        let mut all = vec![old.clone(), fresh.clone()];
        prune(&mut all, old.created_at + Duration::milliseconds(50));
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].message, "ok");
    }
}
