//! Todo TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use todo_tui::api_client::RestClient;
use todo_tui::config::TuiConfig;
use todo_tui::error::TuiError;
use todo_tui::events::TuiEvent;
use todo_tui::keys::{map_key, Action};
use todo_tui::notifications::NotificationLevel;
use todo_tui::persistence::{self, PersistedState};
use todo_tui::state::{App, FormField, Mode};
use todo_tui::views::render_view;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = TuiConfig::load().map_err(TuiError::from)?;
    let client = RestClient::new(&config).map_err(TuiError::from)?;
    let mut app = App::new(config, client);

    if let Ok(Some(state)) = persistence::load(&app.config.persistence_path) {
        app.search_input = state.search.clone();
        app.set_query(state.filter, &state.search);
    }

    let mut terminal = setup_terminal().map_err(TuiError::from)?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    if app.controller.store().ping().await.is_err() {
        app.server_reachable = false;
        app.notify(
            NotificationLevel::Warning,
            "Server unreachable, showing cached data",
        );
    }
    let _ = app.controller.refresh().await;
    app.clamp_selection();

    let mut ticker = tokio::time::interval(Duration::from_millis(200));
    let mut revalidate = tokio::time::interval(Duration::from_millis(
        app.config.refresh_interval_ms,
    ));

    loop {
        terminal.draw(|f| render_view(f, &app)).map_err(TuiError::from)?;

        tokio::select! {
            _ = ticker.tick() => {
                app.controller.prune_notifications(chrono::Utc::now());
                if let Some(term) = app.debouncer.poll(Instant::now()) {
                    apply_search(&mut app, &term).await;
                }
            }
            _ = revalidate.tick() => {
                if app.mode == Mode::List {
                    app.server_reachable = app.controller.refresh().await.is_ok();
                    app.clamp_selection();
                }
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event).await {
                    break;
                }
            }
        }
    }

    let persisted = PersistedState {
        filter: app.filter(),
        search: app.controller.active_query().search.clone(),
    };
    let _ = persistence::save(&app.config.persistence_path, &persisted);

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        let _ = sender.blocking_send(TuiEvent::Input(key));
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let _ = sender.blocking_send(TuiEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    });
}

async fn handle_event(app: &mut App, event: TuiEvent) -> bool {
    match event {
        TuiEvent::Input(key) => match app.mode {
            Mode::List => handle_list_key(app, key).await,
            Mode::Search => handle_search_key(app, key).await,
            Mode::Form => handle_form_key(app, key).await,
            Mode::ConfirmDelete => handle_confirm_key(app, key).await,
        },
        TuiEvent::Resize { .. } | TuiEvent::Tick => false,
    }
}

async fn handle_list_key(app: &mut App, key: KeyEvent) -> bool {
    let Some(action) = map_key(key) else {
        return false;
    };
    match action {
        Action::Quit => return true,
        Action::MoveDown => app.select_next(),
        Action::MoveUp => app.select_previous(),
        Action::ToggleComplete => {
            if let Some(id) = app.selected_todo().map(|t| t.id) {
                let _ = app.controller.toggle(id).await;
                app.clamp_selection();
            }
        }
        Action::NewItem => app.open_create_form(),
        Action::EditItem => app.open_edit_form(),
        Action::DeleteItem => {
            if let Some(id) = app.selected_todo().map(|t| t.id) {
                app.pending_delete = Some(id);
                app.mode = Mode::ConfirmDelete;
            }
        }
        Action::CycleFilter => {
            let next = app.filter().next();
            let search = app.controller.active_query().search.clone();
            app.set_query(next, &search);
            app.server_reachable = app.controller.refresh().await.is_ok();
            app.clamp_selection();
        }
        Action::OpenSearch => app.mode = Mode::Search,
        Action::Refresh => {
            app.server_reachable = app.controller.refresh().await.is_ok();
            app.clamp_selection();
        }
        Action::Confirm | Action::Cancel => {}
    }
    false
}

async fn handle_search_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.debouncer.cancel();
            app.search_input.clear();
            apply_search(app, "").await;
            app.mode = Mode::List;
        }
        KeyCode::Enter => {
            // Skip the remaining delay.
            app.debouncer.cancel();
            let term = app.search_input.clone();
            apply_search(app, &term).await;
            app.mode = Mode::List;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            let term = app.search_input.clone();
            app.debouncer.input(term, Instant::now());
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            let term = app.search_input.clone();
            app.debouncer.input(term, Instant::now());
        }
        _ => {}
    }
    false
}

async fn handle_form_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Tab => {
            if let Some(form) = app.form.as_mut() {
                form.focus_next();
            }
        }
        KeyCode::Enter
            if app
                .form
                .as_ref()
                .is_some_and(|form| form.focused == FormField::Title) =>
        {
            submit_form(app).await;
        }
        _ => {
            if let Some(form) = app.form.as_mut() {
                match form.focused {
                    FormField::Title => {
                        form.title.input(key);
                    }
                    FormField::Description => {
                        form.description.input(key);
                    }
                }
            }
        }
    }
    false
}

async fn handle_confirm_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => {
            if let Some(id) = app.pending_delete.take() {
                let _ = app.controller.delete(id).await;
                app.clamp_selection();
            }
            app.mode = Mode::List;
        }
        KeyCode::Esc => {
            app.pending_delete = None;
            app.mode = Mode::List;
        }
        _ => {}
    }
    false
}

async fn submit_form(app: &mut App) {
    let Some(form) = app.form.take() else {
        return;
    };
    let title = form.title_text();
    let description = form.description_text();

    let result = match form.editing {
        Some(id) => app
            .controller
            .update(id, &title, description.as_deref())
            .await
            .map(|_| ()),
        None => app
            .controller
            .create(&title, description.as_deref())
            .await
            .map(|_| ()),
    };

    match result {
        Ok(()) => {
            app.mode = Mode::List;
            app.clamp_selection();
        }
        Err(err) => {
            // Keep the form open with the errors inline.
            let mut form = form;
            form.field_errors = err.field_errors().to_vec();
            app.form = Some(form);
        }
    }
}

async fn apply_search(app: &mut App, term: &str) {
    let filter = app.filter();
    app.set_query(filter, term);
    if app.controller.todos().is_none() {
        app.server_reachable = app.controller.refresh().await.is_ok();
    } else {
        // Serve the cached rows immediately, then revalidate.
        let _ = app.controller.refresh().await;
    }
    app.clamp_selection();
}
