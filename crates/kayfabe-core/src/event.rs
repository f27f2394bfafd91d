use crossterm::event::KeyEvent;

/// Terminal events produced by the runtime's event loop.
///
/// Delivered through the [`terminal_events`](crate::subscription::terminal_events)
/// subscription, which maps each event into the model's `Message` type.
/// Mouse and focus reports are not enabled by the runtime and never appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// Convert a crossterm event, dropping the kinds the runtime ignores.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(k) => Some(TerminalEvent::Key(k)),
            crossterm::event::Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            crossterm::event::Event::Paste(s) => Some(TerminalEvent::Paste(s)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{Event, KeyCode, KeyModifiers};

    #[test]
    fn key_and_resize_are_kept() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(
            TerminalEvent::from_crossterm(Event::Key(key)),
            Some(TerminalEvent::Key(key))
        );
        assert_eq!(
            TerminalEvent::from_crossterm(Event::Resize(80, 24)),
            Some(TerminalEvent::Resize(80, 24))
        );
    }

    #[test]
    fn focus_is_dropped() {
        assert_eq!(TerminalEvent::from_crossterm(Event::FocusGained), None);
    }
}
