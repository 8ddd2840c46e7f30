//! Application state machine and event dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use faqbot_codec::Format;
use faqbot_core::{chat::ChatMessage, faq::FaqSet};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

use crate::client::{ApiClient, ImportReport, TemplateSummary};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Typing into the chat input.
  Chat,
  /// Focus on the knowledge-base list.
  KnowledgeBase,
  /// Adding a single question/answer pair.
  AddFaq,
  /// Picking a built-in template.
  Templates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
  #[default]
  Question,
  Answer,
}

/// The two-field "add FAQ" form.
#[derive(Debug, Default)]
pub struct AddForm {
  pub question: String,
  pub answer:   String,
  pub field:    FormField,
}

impl AddForm {
  fn current(&mut self) -> &mut String {
    match self.field {
      FormField::Question => &mut self.question,
      FormField::Answer => &mut self.answer,
    }
  }

  fn toggle(&mut self) {
    self.field = match self.field {
      FormField::Question => FormField::Answer,
      FormField::Answer => FormField::Question,
    };
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,

  /// Local copy of the session's FAQ set.
  pub faqs: FaqSet,

  /// Local copy of the session transcript, oldest first.
  pub messages: Vec<ChatMessage>,

  /// Pending chat input.
  pub input: String,

  pub form: AddForm,

  /// Templates offered by the server; fetched when the picker opens.
  pub templates:       Vec<TemplateSummary>,
  pub template_cursor: usize,

  /// Current fuzzy-filter string over the knowledge base.
  pub filter:        String,
  pub filter_active: bool,

  /// Cursor position within the *filtered* FAQ list.
  pub list_cursor: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub client: ApiClient,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::Chat,
      faqs: FaqSet::new(),
      messages: Vec::new(),
      input: String::new(),
      form: AddForm::default(),
      templates: Vec::new(),
      template_cursor: 0,
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      status_msg: String::new(),
      client,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Re-fetch the FAQ set and transcript.
  pub async fn refresh(&mut self) -> anyhow::Result<()> {
    self.faqs = self.client.faqs().await?;
    self.messages = self.client.transcript().await?;
    let len = self.filtered_faqs().len();
    if self.list_cursor >= len {
      self.list_cursor = len.saturating_sub(1);
    }
    Ok(())
  }

  /// Record `result` in the status bar instead of failing the event loop.
  async fn report<T>(&mut self, result: anyhow::Result<T>) -> Option<T> {
    match result {
      Ok(v) => {
        if let Err(e) = self.refresh().await {
          self.status_msg = format!("Error: {e}");
        }
        Some(v)
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        None
      }
    }
  }

  fn import_status(report: &ImportReport, what: &str) -> String {
    if let Some(notice) = &report.notice {
      return notice.clone();
    }
    let mut msg = format!(
      "Added {} FAQs from {what}, {} total",
      report.added, report.total
    );
    if report.skipped > 0 {
      msg.push_str(&format!(" ({} lines skipped)", report.skipped));
    }
    msg
  }

  /// Apply an import report produced at startup.
  pub fn note_import(&mut self, report: &ImportReport, what: &str) {
    self.status_msg = Self::import_status(report, what);
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// FAQs matching the current filter, with their index in the full set.
  pub fn filtered_faqs(&self) -> Vec<(usize, &str, &str)> {
    let all = self.faqs.iter().enumerate().map(|(i, (q, a))| (i, q, a));
    if self.filter.is_empty() {
      return all.collect();
    }
    let matcher = SkimMatcherV2::default();
    all
      .filter(|(_, q, a)| {
        matcher.fuzzy_match(q, &self.filter).is_some()
          || matcher.fuzzy_match(a, &self.filter).is_some()
      })
      .collect()
  }

  /// Index in the full set of the FAQ under the cursor, if any.
  pub fn cursor_index(&self) -> Option<usize> {
    self
      .filtered_faqs()
      .get(self.list_cursor)
      .map(|(i, _, _)| *i)
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return Ok(true);
    }

    match self.screen {
      Screen::Chat => self.handle_chat_key(key).await,
      Screen::KnowledgeBase => self.handle_list_key(key).await,
      Screen::AddFaq => self.handle_form_key(key).await,
      Screen::Templates => self.handle_template_key(key).await,
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
      }
      KeyCode::Enter => self.filter_active = false,
      KeyCode::Backspace => {
        self.filter.pop();
      }
      KeyCode::Char(c) => self.filter.push(c),
      _ => return,
    }
    self.list_cursor = 0;
  }

  async fn handle_chat_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Tab | KeyCode::Esc => self.screen = Screen::KnowledgeBase,
      KeyCode::Enter => {
        let message = std::mem::take(&mut self.input);
        if message.trim().is_empty() {
          return Ok(true);
        }
        let reply = self.client.ask(&message).await;
        if let Some(reply) = self.report(reply).await {
          self.status_msg = format!("confidence {:.2}", reply.confidence);
        }
      }
      KeyCode::Backspace => {
        self.input.pop();
      }
      KeyCode::Char(c) => self.input.push(c),
      _ => {}
    }
    Ok(true)
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Tab | KeyCode::Char('i') => self.screen = Screen::Chat,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_faqs().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      // Ask the stored question
      KeyCode::Enter => {
        if let Some(index) = self.cursor_index() {
          let reply = self.client.ask_faq(index).await;
          if self.report(reply).await.is_some() {
            self.screen = Screen::Chat;
          }
        }
      }

      KeyCode::Char('d') | KeyCode::Delete => {
        if let Some(index) = self.cursor_index() {
          let removed = self.client.remove_faq(index).await;
          if let Some(entry) = self.report(removed).await {
            self.status_msg = format!("Deleted \"{}\"", entry.question);
          }
        }
      }

      KeyCode::Char('a') => {
        self.form = AddForm::default();
        self.screen = Screen::AddFaq;
      }

      KeyCode::Char('t') => {
        let templates = self.client.templates().await;
        if let Some(templates) = self.report(templates).await {
          self.templates = templates;
          self.template_cursor = 0;
          self.screen = Screen::Templates;
        }
      }

      KeyCode::Char('c') => {
        let cleared = self.client.clear().await;
        if self.report(cleared).await.is_some() {
          self.list_cursor = 0;
          self.status_msg = "Cleared all FAQs".into();
        }
      }

      KeyCode::Char('e') => self.export(Format::Csv).await,
      KeyCode::Char('x') => self.export(Format::Json).await,

      KeyCode::Char('r') => {
        if let Err(e) = self.refresh().await {
          self.status_msg = format!("Error: {e}");
        }
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_form_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => self.screen = Screen::KnowledgeBase,
      KeyCode::Tab | KeyCode::BackTab => self.form.toggle(),
      KeyCode::Enter if self.form.field == FormField::Question => self.form.toggle(),
      KeyCode::Enter => {
        let added = self
          .client
          .add_faq(&self.form.question, &self.form.answer)
          .await;
        if let Some(total) = self.report(added).await {
          self.status_msg = format!("FAQ added ({total} total)");
          self.form = AddForm::default();
          self.screen = Screen::KnowledgeBase;
        }
      }
      KeyCode::Backspace => {
        self.form.current().pop();
      }
      KeyCode::Char(c) => self.form.current().push(c),
      _ => {}
    }
    Ok(true)
  }

  async fn handle_template_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc | KeyCode::Char('q') => self.screen = Screen::KnowledgeBase,
      KeyCode::Down | KeyCode::Char('j') => {
        if self.template_cursor + 1 < self.templates.len() {
          self.template_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.template_cursor = self.template_cursor.saturating_sub(1);
      }
      KeyCode::Enter => {
        if let Some(template) = self.templates.get(self.template_cursor).cloned() {
          let loaded = self.client.load_template(&template.slug).await;
          if let Some(report) = self.report(loaded).await {
            self.status_msg = Self::import_status(&report, &template.title);
            self.screen = Screen::KnowledgeBase;
          }
        }
      }
      _ => {}
    }
    Ok(true)
  }

  /// Download the FAQ set and write it next to the working directory.
  async fn export(&mut self, format: Format) {
    if self.faqs.is_empty() {
      self.status_msg = "Nothing to export".into();
      return;
    }
    let result = match self.client.export(format).await {
      Ok(body) => tokio::fs::write(format.file_name(), body)
        .await
        .map_err(anyhow::Error::from),
      Err(e) => Err(e),
    };
    self.status_msg = match result {
      Ok(()) => format!("Exported {} FAQs to {}", self.faqs.len(), format.file_name()),
      Err(e) => format!("Error: {e}"),
    };
  }
}
