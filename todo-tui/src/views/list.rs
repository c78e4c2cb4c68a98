//! Todo list view: filter bar, search line, rows, and a detail pane.

use crate::state::{App, Mode};
use crate::theme::completion_color;
use crate::widgets::{DetailPanel, FilterBar, FilterOption};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use todo_core::StatusFilter;

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    render_filter_bar(f, app, rows[0]);
    render_search_line(f, app, rows[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[2]);

    render_rows(f, app, columns[0]);
    render_detail(f, app, columns[1]);
}

fn render_filter_bar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (total, active, completed) = app.stats();
    let current = app.filter();
    let filters: Vec<FilterOption> = StatusFilter::all()
        .iter()
        .map(|filter| FilterOption {
            label: filter.as_str().to_string(),
            count: match filter {
                StatusFilter::All => Some(total),
                StatusFilter::Active => Some(active),
                StatusFilter::Completed => Some(completed),
            },
            active: *filter == current,
        })
        .collect();

    let bar = FilterBar {
        title: "Filter",
        filters: &filters,
        search: app.controller.active_query().search_term(),
        active_style: Style::default()
            .fg(app.theme.primary)
            .add_modifier(Modifier::BOLD),
        inactive_style: Style::default().fg(app.theme.text_dim),
    };
    bar.render(f, area);
}

fn render_search_line(f: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.mode == Mode::Search;
    let border = if focused {
        app.theme.border_focus
    } else {
        app.theme.border
    };
    let mut text = app.search_input.clone();
    if focused {
        text.push('_');
    }
    if app.debouncer.is_pending() {
        text.push_str("  (typing...)");
    }
    let search = Paragraph::new(text)
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title("Search")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    f.render_widget(search, area);
}

fn render_rows(f: &mut Frame<'_>, app: &App, area: Rect) {
    let todos = app.todos();
    let items: Vec<ListItem> = todos
        .iter()
        .map(|todo| {
            let marker = if todo.completed { "[x]" } else { "[ ]" };
            let style = if todo.completed {
                Style::default()
                    .fg(completion_color(true, &app.theme))
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(completion_color(false, &app.theme))
            };
            ListItem::new(format!("{} {}", marker, todo.title)).style(style)
        })
        .collect();

    let title = if app.controller.todos().is_none() {
        "Todos (loading...)"
    } else if todos.is_empty() {
        "Todos (empty)"
    } else {
        "Todos"
    };

    let mut state = ListState::default();
    if !todos.is_empty() {
        state.select(Some(app.selected.min(todos.len() - 1)));
    }

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(app.theme.bg_highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state);
}

fn render_detail(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(todo) = app.selected_todo() else {
        let empty = Paragraph::new("Nothing selected")
            .style(Style::default().fg(app.theme.text_dim))
            .block(Block::default().title("Details").borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    };

    let fields = vec![
        ("Id", todo.id.to_string()),
        ("Title", todo.title.clone()),
        ("Done", if todo.completed { "yes" } else { "no" }.to_string()),
        ("Created", todo.created_at.to_rfc3339()),
        ("Updated", todo.updated_at.to_rfc3339()),
    ];

    let detail = DetailPanel {
        title: "Details",
        fields,
        body: todo.description.clone(),
        label_style: Style::default().fg(app.theme.primary),
        body_style: Style::default().fg(app.theme.text),
    };
    detail.render(f, area);
}
