//! Single-line gimmick search field.
//!
//! The field only edits text.  Every edit emits [`Message::Changed`] with the
//! full query and the parent decides when to actually run the search.  Left
//! and right arrows belong to the pager, so editing happens at the end of the
//! line only.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kayfabe_core::command::Command;
use kayfabe_core::component::Component;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Messages for the search field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key press forwarded to the field.
    KeyPress(KeyEvent),
    /// Bracketed paste content.
    Paste(String),
    /// Emitted after every edit with the whole query.
    Changed(String),
    /// Emitted when Esc empties the field.
    Cleared,
}

/// Style configuration for the search field.
#[derive(Debug, Clone)]
pub struct SearchStyle {
    /// Style for the prompt label.
    pub prompt: Style,
    /// Style for the query text.
    pub text: Style,
    /// Style for the cursor cell.
    pub cursor: Style,
    /// Style for the placeholder shown while empty.
    pub placeholder: Style,
}

impl Default for SearchStyle {
    fn default() -> Self {
        Self {
            prompt: Style::default().fg(Color::Yellow),
            text: Style::default(),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            placeholder: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Gimmick search input.
pub struct SearchBar {
    query: String,
    prompt: String,
    placeholder: String,
    style: SearchStyle,
}

impl SearchBar {
    /// Create an empty field with the given prompt and placeholder.
    pub fn new(prompt: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            query: String::new(),
            prompt: prompt.into(),
            placeholder: placeholder.into(),
            style: SearchStyle::default(),
        }
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: SearchStyle) -> Self {
        self.style = style;
        self
    }

    /// Start with pre-filled text.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// The text currently in the field.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Swap prompt and placeholder, e.g. after a language change.
    pub fn set_labels(&mut self, prompt: impl Into<String>, placeholder: impl Into<String>) {
        self.prompt = prompt.into();
        self.placeholder = placeholder.into();
    }

    fn changed(&self) -> Command<Message> {
        Command::message(Message::Changed(self.query.clone()))
    }

    /// Remove the last word and any whitespace after it.
    fn delete_word(&mut self) {
        let trimmed = self.query.trim_end().len();
        self.query.truncate(trimmed);
        let cut = self
            .query
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.query.truncate(cut);
    }
}

impl Component for SearchBar {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => match (key.code, key.modifiers) {
                (KeyCode::Esc, _) => {
                    if self.query.is_empty() {
                        return Command::none();
                    }
                    self.query.clear();
                    Command::message(Message::Cleared)
                }
                (KeyCode::Backspace, _) => {
                    if self.query.pop().is_none() {
                        return Command::none();
                    }
                    self.changed()
                }
                (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                    if self.query.is_empty() {
                        return Command::none();
                    }
                    self.delete_word();
                    self.changed()
                }
                (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                    if self.query.is_empty() {
                        return Command::none();
                    }
                    self.query.clear();
                    self.changed()
                }
                (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                    self.query.push(c);
                    self.changed()
                }
                _ => Command::none(),
            },
            Message::Paste(text) => {
                let line: String = text.chars().filter(|c| !c.is_control()).collect();
                if line.is_empty() {
                    return Command::none();
                }
                self.query.push_str(&line);
                self.changed()
            }
            Message::Changed(_) | Message::Cleared => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut spans = vec![Span::styled(format!("{}: ", self.prompt), self.style.prompt)];
        if self.query.is_empty() {
            spans.push(Span::styled(" ", self.style.cursor));
            spans.push(Span::styled(self.placeholder.as_str(), self.style.placeholder));
        } else {
            spans.push(Span::styled(self.query.as_str(), self.style.text));
            spans.push(Span::styled(" ", self.style.cursor));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn bar() -> SearchBar {
        SearchBar::new("Gimmick", "Search by gimmick…")
    }

    #[test]
    fn typing_emits_changed() {
        let mut search = bar();
        let cmd = search.update(Message::KeyPress(key(KeyCode::Char('o'))));
        assert_eq!(cmd.into_message(), Some(Message::Changed("o".into())));
        search.update(Message::KeyPress(key(KeyCode::Char('k'))));
        assert_eq!(search.query(), "ok");
    }

    #[test]
    fn shifted_characters_are_typed() {
        let mut search = bar();
        search.update(Message::KeyPress(KeyEvent::new(
            KeyCode::Char('R'),
            KeyModifiers::SHIFT,
        )));
        assert_eq!(search.query(), "R");
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut search = bar().with_query("棚橋");
        let cmd = search.update(Message::KeyPress(key(KeyCode::Backspace)));
        assert_eq!(search.query(), "棚");
        assert_eq!(cmd.into_message(), Some(Message::Changed("棚".into())));
    }

    #[test]
    fn backspace_on_empty_is_noop() {
        let mut search = bar();
        assert!(search.update(Message::KeyPress(key(KeyCode::Backspace))).is_none());
    }

    #[test]
    fn esc_clears() {
        let mut search = bar().with_query("ace");
        let cmd = search.update(Message::KeyPress(key(KeyCode::Esc)));
        assert!(search.query().is_empty());
        assert_eq!(cmd.into_message(), Some(Message::Cleared));
        assert!(search.update(Message::KeyPress(key(KeyCode::Esc))).is_none());
    }

    #[test]
    fn ctrl_w_deletes_word() {
        let mut search = bar().with_query("the rain maker  ");
        search.update(Message::KeyPress(ctrl('w')));
        assert_eq!(search.query(), "the rain ");
        search.update(Message::KeyPress(ctrl('w')));
        assert_eq!(search.query(), "the ");
        search.update(Message::KeyPress(ctrl('u')));
        assert_eq!(search.query(), "");
    }

    #[test]
    fn paste_strips_newlines() {
        let mut search = bar();
        let cmd = search.update(Message::Paste("Rain\nmaker".into()));
        assert_eq!(search.query(), "Rainmaker");
        assert_eq!(cmd.into_message(), Some(Message::Changed("Rainmaker".into())));
    }

    #[test]
    fn other_control_keys_ignored() {
        let mut search = bar();
        assert!(search.update(Message::KeyPress(ctrl('x'))).is_none());
        assert!(search.query().is_empty());
    }
}
