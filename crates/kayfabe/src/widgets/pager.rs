//! Numbered page controls with previous/next arrows.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kayfabe_core::command::Command;
use kayfabe_core::component::Component;
use kayfabe_rank::{PageControl, PageView};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// A navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    Previous,
    Next,
    /// Jump to a 1-based page.
    Goto(usize),
}

/// Messages for the pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key press forwarded to the pager.
    KeyPress(KeyEvent),
    /// Emitted when a key maps to a navigation request.
    Navigate(PageNav),
}

/// Style configuration for the pager.
#[derive(Debug, Clone)]
pub struct PagerStyle {
    /// Enabled, inactive controls.
    pub normal: Style,
    /// The active control.
    pub active: Style,
    /// Controls no visible item falls on.
    pub disabled: Style,
    /// Arrows and the summary text.
    pub text: Style,
}

impl Default for PagerStyle {
    fn default() -> Self {
        Self {
            normal: Style::default(),
            active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            disabled: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            text: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Page control strip.  Holds a snapshot of the control states from the last
/// rendered [`PageView`].
pub struct Pager {
    controls: Vec<PageControl>,
    summary: String,
    style: PagerStyle,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    /// A pager with no controls yet.
    pub fn new() -> Self {
        Self {
            controls: Vec::new(),
            summary: String::new(),
            style: PagerStyle::default(),
        }
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: PagerStyle) -> Self {
        self.style = style;
        self
    }

    /// Copy control states from a freshly rendered page.
    pub fn sync(&mut self, view: &PageView) {
        self.controls.clone_from(&view.controls);
    }

    /// Text drawn after the controls, e.g. "Page 2 of 3".
    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = summary.into();
    }

    /// Control states as last synced.
    pub fn controls(&self) -> &[PageControl] {
        &self.controls
    }

    /// Map a key to a navigation request, if it is one.
    ///
    /// F1..F9 and Alt+1..Alt+9 jump to the matching control; keys for
    /// controls that do not exist are ignored.
    pub fn nav_for(&self, key: &KeyEvent) -> Option<PageNav> {
        let jump = match (key.code, key.modifiers) {
            (KeyCode::Left | KeyCode::PageUp, _) => return Some(PageNav::Previous),
            (KeyCode::Right | KeyCode::PageDown, _) => return Some(PageNav::Next),
            (KeyCode::F(n), _) => n as usize,
            (KeyCode::Char(c), KeyModifiers::ALT) => c.to_digit(10)? as usize,
            _ => return None,
        };
        self.controls
            .iter()
            .any(|c| c.page == jump)
            .then_some(PageNav::Goto(jump))
    }
}

impl Component for Pager {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => match self.nav_for(&key) {
                Some(nav) => Command::message(Message::Navigate(nav)),
                None => Command::none(),
            },
            Message::Navigate(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut spans = Vec::with_capacity(self.controls.len() * 2 + 4);
        spans.push(Span::styled("‹ ", self.style.text));
        for control in &self.controls {
            let style = if control.active {
                self.style.active
            } else if control.disabled {
                self.style.disabled
            } else {
                self.style.normal
            };
            spans.push(Span::styled(format!(" {} ", control.page), style));
        }
        spans.push(Span::styled(" ›", self.style.text));
        if !self.summary.is_empty() {
            spans.push(Span::styled(format!("   {}", self.summary), self.style.text));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
