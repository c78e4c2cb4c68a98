//! Detail panel widget: field/value rows plus an optional body.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct DetailPanel<'a> {
    pub title: &'a str,
    pub fields: Vec<(&'a str, String)>,
    /// Free-form text rendered below the fields (the description).
    pub body: Option<String>,
    pub label_style: Style,
    pub body_style: Style,
}

impl<'a> DetailPanel<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = self
            .fields
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{}: ", label), self.label_style),
                    Span::raw(value.clone()),
                ])
            })
            .collect();

        if let Some(body) = &self.body {
            lines.push(Line::default());
            for row in body.lines() {
                lines.push(Line::from(Span::styled(row.to_string(), self.body_style)));
            }
        }

        let widget = Paragraph::new(Text::from(lines))
            .block(Block::default().title(self.title).borders(Borders::ALL))
            .wrap(Wrap { trim: true });

        f.render_widget(widget, area);
    }
}
