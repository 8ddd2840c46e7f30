//! Chat pane: transcript above, input line below.

use chrono::Local;
use faqbot_core::chat::Role;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Screen};

/// Render the chat pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let focused = app.screen == Screen::Chat;
  let border = if focused { Color::Cyan } else { Color::DarkGray };

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(0), Constraint::Length(3)])
    .split(area);

  let block = Block::default()
    .title(" Chat ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));
  let inner = block.inner(rows[0]);
  f.render_widget(block, rows[0]);

  if app.messages.is_empty() {
    f.render_widget(
      Paragraph::new("Ask a question about your FAQs.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
  } else {
    let lines = transcript_lines(app);
    // Keep the newest messages in view.
    let scroll = (lines.len() as u16).saturating_sub(inner.height);
    f.render_widget(
      Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0)),
      inner,
    );
  }

  let cursor = if focused { "_" } else { "" };
  let input = Paragraph::new(format!("{}{cursor}", app.input)).block(
    Block::default()
      .title(" Message ")
      .borders(Borders::ALL)
      .border_style(Style::default().fg(border)),
  );
  f.render_widget(input, rows[1]);
}

fn transcript_lines(app: &App) -> Vec<Line<'_>> {
  let mut lines = Vec::new();
  for message in &app.messages {
    let (label, colour) = match message.role {
      Role::User => ("You", Color::Green),
      Role::Assistant => ("Bot", Color::Cyan),
    };
    let time = message.sent_at.with_timezone(&Local).format("%H:%M");
    lines.push(Line::from(vec![
      Span::styled(
        format!("{label} "),
        Style::default().fg(colour).add_modifier(Modifier::BOLD),
      ),
      Span::styled(time.to_string(), Style::default().fg(Color::DarkGray)),
    ]));
    for text in message.content.lines() {
      lines.push(Line::raw(text));
    }
    lines.push(Line::raw(""));
  }
  lines
}
