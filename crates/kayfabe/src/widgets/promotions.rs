//! Promotion selector: an "all" control followed by one control per promotion.

use crossterm::event::{KeyCode, KeyEvent};
use kayfabe_core::command::Command;
use kayfabe_core::component::Component;
use kayfabe_rank::{Promotion, PromotionId};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Tabs};
use ratatui::Frame;

/// Messages for the promotion selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key press forwarded to the selector.
    KeyPress(KeyEvent),
    /// Emitted when the active control changes.
    Selected(Option<PromotionId>),
}

/// Visual style for [`PromotionTabs`].
#[derive(Debug, Clone)]
pub struct PromotionTabsStyle {
    /// Inactive controls.
    pub normal: Style,
    /// The active control.
    pub active: Style,
    /// Bottom border.
    pub border: Style,
    /// Divider between controls.
    pub divider: String,
}

impl Default for PromotionTabsStyle {
    fn default() -> Self {
        Self {
            normal: Style::default().fg(Color::DarkGray),
            active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            divider: " | ".to_string(),
        }
    }
}

/// One selector control.
#[derive(Debug, Clone)]
struct Control {
    promotion: Option<PromotionId>,
    label: String,
}

/// Row of promotion controls with exactly one active at a time.
pub struct PromotionTabs {
    controls: Vec<Control>,
    active: usize,
    caption: String,
    style: PromotionTabsStyle,
}

impl PromotionTabs {
    /// Build the selector for `promotions`, with the "all" control first and
    /// active.
    pub fn new(all_label: impl Into<String>, promotions: &[Promotion]) -> Self {
        let mut controls = Vec::with_capacity(promotions.len() + 1);
        controls.push(Control {
            promotion: None,
            label: all_label.into(),
        });
        controls.extend(promotions.iter().map(|p| Control {
            promotion: Some(p.id),
            label: p.label().to_string(),
        }));
        Self {
            controls,
            active: 0,
            caption: String::new(),
            style: PromotionTabsStyle::default(),
        }
    }

    /// Set the visual style.
    pub fn with_style(mut self, style: PromotionTabsStyle) -> Self {
        self.style = style;
        self
    }

    /// Title drawn above the controls.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    /// Relabel the "all" control, e.g. after a language change.
    pub fn set_all_label(&mut self, label: impl Into<String>) {
        if let Some(all) = self.controls.first_mut() {
            all.label = label.into();
        }
    }

    /// Promotion of the active control (`None` is "all").
    pub fn selected(&self) -> Option<PromotionId> {
        self.controls[self.active].promotion
    }

    /// Label of the active control.
    pub fn selected_label(&self) -> &str {
        &self.controls[self.active].label
    }

    /// Index of the active control.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Number of controls, including "all".
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Always false: the "all" control exists.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Activate the control for `promotion`.  Returns `false`, leaving the
    /// active control alone, when no control carries that id.
    pub fn select(&mut self, promotion: Option<PromotionId>) -> bool {
        match self.controls.iter().position(|c| c.promotion == promotion) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    fn step(&mut self, forward: bool) -> Command<Message> {
        let n = self.controls.len();
        self.active = if forward {
            (self.active + 1) % n
        } else {
            (self.active + n - 1) % n
        };
        Command::message(Message::Selected(self.selected()))
    }
}

impl Component for PromotionTabs {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => match key.code {
                KeyCode::Tab => self.step(true),
                KeyCode::BackTab => self.step(false),
                _ => Command::none(),
            },
            Message::Selected(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = self
            .controls
            .iter()
            .map(|c| Line::raw(c.label.as_str()))
            .collect();

        let mut block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.style.border);
        if !self.caption.is_empty() {
            block = block.title(self.caption.as_str());
        }

        let tabs = Tabs::new(titles)
            .block(block)
            .select(self.active)
            .style(self.style.normal)
            .highlight_style(self.style.active)
            .divider(self.style.divider.as_str());

        frame.render_widget(tabs, area);
    }
}
