//! Filter bar widget.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone)]
pub struct FilterOption {
    pub label: String,
    /// Row count shown next to the label, when known.
    pub count: Option<usize>,
    pub active: bool,
}

pub struct FilterBar<'a> {
    pub title: &'a str,
    pub filters: &'a [FilterOption],
    pub search: Option<&'a str>,
    pub active_style: Style,
    pub inactive_style: Style,
}

impl<'a> FilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans: Vec<Span> = self
            .filters
            .iter()
            .map(|filter| {
                let style = if filter.active {
                    self.active_style
                } else {
                    self.inactive_style
                };
                let label = match filter.count {
                    Some(count) => format!(" {} ({}) ", filter.label, count),
                    None => format!(" {} ", filter.label),
                };
                Span::styled(label, style)
            })
            .collect();

        if let Some(term) = self.search {
            spans.push(Span::styled(
                format!("  search: \"{}\"", term),
                self.inactive_style,
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().title(self.title).borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}
