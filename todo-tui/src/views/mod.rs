//! View rendering dispatch.

pub mod form;
pub mod list;

use crate::state::{App, Mode};
use crate::widgets::StatusIndicator;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);
    list::render(f, app, layout[1]);
    render_footer(f, app, layout[2]);

    match app.mode {
        Mode::Form => {
            if let Some(form) = &app.form {
                form::render(f, app, form, centered_rect(60, 70, f.size()));
            }
        }
        Mode::ConfirmDelete => render_confirm_delete(f, app),
        Mode::List | Mode::Search => {}
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (total, active, completed) = app.stats();
    let reachability = if app.server_reachable { "online" } else { "OFFLINE" };
    let title = format!(
        "Todos | {} total, {} active, {} done | {} | {}",
        total,
        active,
        completed,
        app.filter(),
        reachability
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(app.theme.primary)));
    f.render_widget(block, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = match app.mode {
        Mode::List => "j/k move • Space toggle • n new • e edit • d delete • f filter • / search • q quit",
        Mode::Search => "type to search • Enter apply • Esc clear",
        Mode::Form => "Tab switch field • Enter save • Esc cancel",
        Mode::ConfirmDelete => "Enter confirm delete • Esc cancel",
    };
    let status = StatusIndicator {
        notification: app.notifications().last(),
        fallback: help,
        theme: &app.theme,
    };
    status.render(f, area);
}

fn render_confirm_delete(f: &mut Frame<'_>, app: &App) {
    let title = app
        .pending_delete
        .and_then(|id| app.todos().iter().find(|t| t.id == id))
        .map(|t| t.title.clone())
        .unwrap_or_else(|| "this todo".to_string());

    let area = centered_rect(50, 20, f.size());
    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(format!("Delete \"{}\"?", title))
        .style(Style::default().fg(app.theme.warning))
        .block(
            Block::default()
                .title("Confirm")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focus)),
        );
    f.render_widget(paragraph, area);
}

/// Centered sub-rectangle, sized as percentages of the parent.
fn centered_rect(percent_x: u16, percent_y: u16, parent: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(parent);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
