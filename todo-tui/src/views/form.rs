//! Create/edit form rendered as a centered modal.

use crate::state::{App, FormField, TodoForm};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, form: &TodoForm, area: Rect) {
    f.render_widget(Clear, area);

    let title = if form.editing.is_some() {
        "Edit todo"
    } else {
        "New todo"
    };
    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_focus));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    render_field(f, app, form, FormField::Title, "Title", rows[0]);
    render_error(f, app, form, "title", rows[1]);
    render_field(f, app, form, FormField::Description, "Description", rows[2]);
    render_error(f, app, form, "description", rows[3]);
}

fn render_field(
    f: &mut Frame<'_>,
    app: &App,
    form: &TodoForm,
    field: FormField,
    label: &str,
    area: Rect,
) {
    let focused = form.focused == field;
    let border = if focused {
        app.theme.border_focus
    } else {
        app.theme.border
    };

    let textarea = match field {
        FormField::Title => &form.title,
        FormField::Description => &form.description,
    };
    let mut widget = textarea.clone();
    widget.set_block(
        Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    if !focused {
        widget.set_cursor_style(Style::default());
    }
    f.render_widget(&widget, area);
}

fn render_error(f: &mut Frame<'_>, app: &App, form: &TodoForm, field: &str, area: Rect) {
    if let Some(message) = form.error_for(field) {
        let error = Paragraph::new(message.to_string()).style(Style::default().fg(app.theme.error));
        f.render_widget(error, area);
    }
}
