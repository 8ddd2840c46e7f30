//! TUI rendering: orchestrates all panes.

pub mod chat;
pub mod knowledge_base;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, FormField, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);

  // Chat on the left, knowledge base on the right.
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
    .split(rows[1]);
  chat::draw(f, cols[0], app);
  knowledge_base::draw(f, cols[1], app);

  match app.screen {
    Screen::AddFaq => draw_add_form(f, rows[1], app),
    Screen::Templates => draw_templates(f, rows[1], app),
    Screen::Chat | Screen::KnowledgeBase => {}
  }

  draw_status(f, rows[2], app);
}

/// A box centred in `area`, `percent_x` wide and `height` rows tall.
fn popup(area: Rect, percent_x: u16, height: u16) -> Rect {
  let width = area.width * percent_x / 100;
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let left = Span::styled(
    " faqbot  Universal FAQ Chatbot",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{} FAQs ", app.faqs.len()),
    Style::default().fg(Color::Gray),
  );

  let pad = area
    .width
    .saturating_sub(left.content.len() as u16)
    .saturating_sub(right.content.len() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Overlays ─────────────────────────────────────────────────────────────────

fn draw_add_form(f: &mut Frame, area: Rect, app: &App) {
  let area = popup(area, 70, 8);
  f.render_widget(Clear, area);

  let block = Block::default()
    .title(" Add FAQ ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let field = |label: &'static str, value: &str, active: bool| {
    let style = if active {
      Style::default().fg(Color::Yellow)
    } else {
      Style::default()
    };
    let cursor = if active { "_" } else { "" };
    Line::from(vec![
      Span::styled(
        format!("{label:<10}"),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
      ),
      Span::styled(format!("{value}{cursor}"), style),
    ])
  };

  let lines = vec![
    field("Question", &app.form.question, app.form.field == FormField::Question),
    Line::from(""),
    field("Answer", &app.form.answer, app.form.field == FormField::Answer),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

fn draw_templates(f: &mut Frame, area: Rect, app: &App) {
  let area = popup(area, 50, app.templates.len() as u16 + 2);
  f.render_widget(Clear, area);

  let block = Block::default()
    .title(" Load template ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let lines: Vec<Line> = app
    .templates
    .iter()
    .enumerate()
    .map(|(i, t)| {
      let style = if i == app.template_cursor {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default()
      };
      Line::styled(format!("{} ({} FAQs)", t.title, t.entries), style)
    })
    .collect();
  f.render_widget(Paragraph::new(lines), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.screen {
    _ if app.filter_active => ("SEARCH", "Type to filter  Esc cancel  Enter done"),
    Screen::Chat => ("CHAT", "Enter send  Tab knowledge base  Ctrl-C quit"),
    Screen::KnowledgeBase => (
      "FAQS",
      "jk move  / search  Enter ask  a add  d delete  t template  e/x export  c clear  Tab chat  q quit",
    ),
    Screen::AddFaq => ("ADD", "Tab switch field  Enter next/save  Esc cancel"),
    Screen::Templates => ("TEMPLATE", "jk move  Enter load  Esc back"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let line = Line::from(vec![
    Span::styled(
      format!(" {mode_label} "),
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    ),
    Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray)),
  ]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
