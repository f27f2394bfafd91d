use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A piece of a screen with its own messages.
///
/// Unlike a [`Model`](crate::Model) a component draws into the area its
/// parent hands it.  The parent wraps the component's messages in one of its
/// own variants and lifts the returned command with [`Command::map`]:
///
/// ```rust,ignore
/// Msg::Pager(m) => self.pager.update(m).map(Msg::Pager),
/// ```
pub trait Component: Send + 'static {
    type Message: Send + 'static;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Draw inside `area` only.
    fn view(&self, frame: &mut Frame, area: Rect);
}
