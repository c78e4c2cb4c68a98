//! Property tests for TUI configuration, keybindings, and debounce.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proptest::prelude::*;
use std::time::{Duration, Instant};
use todo_tui::config::{ThemeConfig, TuiConfig};
use todo_tui::debounce::Debouncer;
use todo_tui::keys::{map_key, Action};
use todo_tui::notifications::NotificationLevel;
use todo_tui::theme::{notification_color, DarkTheme};

fn base_config() -> TuiConfig {
    TuiConfig {
        api_base_url: "http://localhost:3000".to_string(),
        request_timeout_ms: 5_000,
        refresh_interval_ms: 10_000,
        debounce_ms: 500,
        toast_ttl_ms: 3_000,
        persistence_path: "tmp/todo-tui.json".into(),
        theme: ThemeConfig {
            name: "dark".to_string(),
        },
    }
}

#[test]
fn base_config_is_valid() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn config_requires_base_url() {
    let mut config = base_config();
    config.api_base_url = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn config_rejects_unknown_theme() {
    let mut config = base_config();
    config.theme.name = "light".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn config_parses_from_toml() {
    let raw = r#"
        api_base_url = "http://localhost:3000"
        request_timeout_ms = 5000
        refresh_interval_ms = 10000
        debounce_ms = 500
        toast_ttl_ms = 3000
        persistence_path = "/tmp/todo-tui.json"

        [theme]
        name = "dark"
    "#;
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, raw).expect("write config");

    let config = TuiConfig::from_path(&path).expect("parse config");
    assert!(config.validate().is_ok());
    assert_eq!(config.debounce_ms, 500);
}

#[test]
fn config_rejects_unknown_fields() {
    let raw = r#"
        api_base_url = "http://localhost:3000"
        request_timeout_ms = 5000
        refresh_interval_ms = 10000
        debounce_ms = 500
        toast_ttl_ms = 3000
        persistence_path = "/tmp/todo-tui.json"
        grpc_endpoint = "http://localhost:50051"

        [theme]
        name = "dark"
    "#;
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, raw).expect("write config");

    assert!(TuiConfig::from_path(&path).is_err());
}

proptest! {
    #[test]
    fn zero_intervals_are_rejected(field in 0usize..4) {
        let mut config = base_config();
        match field {
            0 => config.request_timeout_ms = 0,
            1 => config.refresh_interval_ms = 0,
            2 => config.debounce_ms = 0,
            _ => config.toast_ttl_ms = 0,
        }
        prop_assert!(config.validate().is_err());
    }

    #[test]
    fn navigation_keys_consistent(use_vim in prop::bool::ANY) {
        let key = if use_vim {
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)
        } else {
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)
        };
        prop_assert!(matches!(map_key(key), Some(Action::MoveDown)));
    }

    #[test]
    fn all_action_keys_mapped(key_char in "[qnedfr/ ]") {
        let c = key_char.chars().next().expect("one char");
        let event = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        prop_assert!(map_key(event).is_some(), "Key '{}' should map to an action", c);
    }

    #[test]
    fn unbound_keys_do_nothing(key_char in "[abcgimostuvwxyz]") {
        let c = key_char.chars().next().expect("one char");
        let event = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        prop_assert!(map_key(event).is_none());
    }

    #[test]
    fn debounce_releases_only_the_last_value(
        values in prop::collection::vec("[a-z]{0,8}", 1..10),
        delay_ms in 50u64..500,
    ) {
        let mut debouncer = Debouncer::new(Duration::from_millis(delay_ms));
        let start = Instant::now();

        // Keystrokes spaced closer than the delay.
        let step = Duration::from_millis(delay_ms / 2);
        let mut at = start;
        for value in &values {
            debouncer.input(value.clone(), at);
            prop_assert_eq!(debouncer.poll(at), None);
            at += step;
        }

        let settled = debouncer.poll(at + Duration::from_millis(delay_ms));
        prop_assert_eq!(settled.as_deref(), values.last().map(String::as_str));
    }
}

#[test]
fn ctrl_c_always_quits() {
    let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(map_key(event), Some(Action::Quit));
}

#[test]
fn space_toggles_completion() {
    let event = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
    assert_eq!(map_key(event), Some(Action::ToggleComplete));
}

#[test]
fn notification_levels_have_distinct_colors() {
    let theme = DarkTheme::dark();
    let colors = [
        notification_color(NotificationLevel::Info, &theme),
        notification_color(NotificationLevel::Warning, &theme),
        notification_color(NotificationLevel::Error, &theme),
        notification_color(NotificationLevel::Success, &theme),
    ];
    for (i, a) in colors.iter().enumerate() {
        for b in colors.iter().skip(i + 1) {
            assert_ne!(a, b);
        }
    }
}
