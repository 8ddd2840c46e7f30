//! Knowledge-base pane: right panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, Screen};

/// Render the FAQ list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_faqs();
  let total = app.faqs.len();

  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Knowledge base ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Knowledge base ({total}) ")
  };
  let border = if app.screen == Screen::KnowledgeBase {
    Color::Cyan
  } else {
    Color::DarkGray
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));
  let mut inner = block.inner(area);
  f.render_widget(block, area);

  if total == 0 {
    f.render_widget(
      Paragraph::new("No FAQs yet. Press a to add one or t for a template.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  if (app.filter_active || !app.filter.is_empty()) && inner.height > 2 {
    let filter_area = Rect {
      y: inner.y + inner.height - 1,
      height: 1,
      ..inner
    };
    inner.height -= 1;

    let cursor = if app.filter_active { "_" } else { "" };
    f.render_widget(
      Paragraph::new(format!("/{}{cursor}", app.filter))
        .style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|(i, question, answer)| {
      ListItem::new(vec![
        Line::from(vec![
          Span::styled(format!("{:>3} ", i + 1), Style::default().fg(Color::DarkGray)),
          Span::styled(
            question.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
          ),
        ]),
        Line::styled(format!("    {answer}"), Style::default().fg(Color::Gray)),
      ])
    })
    .collect();

  let mut state = ListState::default();
  state.select((!filtered.is_empty()).then_some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner,
    &mut state,
  );
}
