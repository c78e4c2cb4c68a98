//! Application state: active mode, selection, search, and the form.

use crate::api_client::RestClient;
use crate::config::TuiConfig;
use crate::controller::Controller;
use crate::debounce::Debouncer;
use crate::notifications::{Notification, NotificationLevel};
use crate::theme::DarkTheme;
use std::time::Duration;
use todo_core::{FieldError, StatusFilter, Todo, TodoId, TodoQuery};
use tui_textarea::TextArea;

/// What the keyboard is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Search,
    Form,
    ConfirmDelete,
}

/// Which form field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
}

/// Create/edit form backed by text areas. `editing` distinguishes an
/// edit (update) from a create.
pub struct TodoForm {
    pub editing: Option<TodoId>,
    pub title: TextArea<'static>,
    pub description: TextArea<'static>,
    pub focused: FormField,
    pub field_errors: Vec<FieldError>,
}

impl TodoForm {
    pub fn create() -> Self {
        Self {
            editing: None,
            title: TextArea::default(),
            description: TextArea::default(),
            focused: FormField::Title,
            field_errors: Vec::new(),
        }
    }

    pub fn edit(todo: &Todo) -> Self {
        let mut form = Self::create();
        form.editing = Some(todo.id);
        form.title.insert_str(&todo.title);
        if let Some(description) = &todo.description {
            form.description.insert_str(description);
        }
        form
    }

    pub fn title_text(&self) -> String {
        // Title is a single line; collapse any pasted newlines.
        self.title.lines().join(" ")
    }

    pub fn description_text(&self) -> Option<String> {
        let text = self.description.lines().join("\n");
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = match self.focused {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Title,
        };
    }

    /// Message for one field, if validation flagged it.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

pub struct App {
    pub config: TuiConfig,
    pub theme: DarkTheme,
    pub controller: Controller<RestClient>,
    pub mode: Mode,

    pub selected: usize,
    /// Live search text; the active query lags it by the debounce.
    pub search_input: String,
    pub debouncer: Debouncer,
    pub form: Option<TodoForm>,
    pub pending_delete: Option<TodoId>,
    pub server_reachable: bool,
}

impl App {
    pub fn new(config: TuiConfig, client: RestClient) -> Self {
        let debouncer = Debouncer::new(Duration::from_millis(config.debounce_ms));
        let mut controller = Controller::new(client, TodoQuery::default());
        controller.set_toast_ttl_ms(config.toast_ttl_ms as i64);
        Self {
            config,
            theme: DarkTheme::dark(),
            controller,
            mode: Mode::List,
            selected: 0,
            search_input: String::new(),
            debouncer,
            form: None,
            pending_delete: None,
            server_reachable: true,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        self.controller.todos().unwrap_or_default()
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.todos().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.todos().len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection inside the list after rows change.
    pub fn clamp_selection(&mut self) {
        let len = self.todos().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// `(total, active, completed)` for the visible rows.
    pub fn stats(&self) -> (usize, usize, usize) {
        let todos = self.todos();
        let completed = todos.iter().filter(|t| t.completed).count();
        (todos.len(), todos.len() - completed, completed)
    }

    pub fn filter(&self) -> StatusFilter {
        self.controller.active_query().filter
    }

    /// Point the controller at a new `(filter, search)` key. The caller
    /// refreshes afterwards.
    pub fn set_query(&mut self, filter: StatusFilter, search: &str) {
        self.controller.set_query(TodoQuery::new(filter, search));
        self.clamp_selection();
    }

    pub fn open_create_form(&mut self) {
        self.form = Some(TodoForm::create());
        self.mode = Mode::Form;
    }

    pub fn open_edit_form(&mut self) {
        if let Some(todo) = self.selected_todo() {
            self.form = Some(TodoForm::edit(todo));
            self.mode = Mode::Form;
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.mode = Mode::List;
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.controller.notify(level, message);
    }

    pub fn notifications(&self) -> &[Notification] {
        self.controller.notifications()
    }
}
