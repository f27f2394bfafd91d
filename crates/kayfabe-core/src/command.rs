use std::sync::Arc;
use std::time::Duration;

/// Work a model hands back to the event loop.
///
/// `update` may only mutate the model.  Everything else (a follow-up
/// message, a message after a delay, a terminal request, quitting) is
/// described by a `Command` and carried out by the loop.
///
/// ```rust,ignore
/// // Run the search once typing pauses.
/// Command::after(Duration::from_millis(250), Msg::SearchDue(ticket))
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Action(Action<Msg>),
    /// Stored as data so the headless harness can run it on a virtual clock.
    Delay(Duration, Msg),
    Batch(Vec<Command<Msg>>),
    Terminal(TerminalCommand),
}

pub(crate) enum Action<Msg> {
    Message(Msg),
    Quit,
}

/// Requests that touch the terminal itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    SetTitle(String),
    /// Wipe the screen; the next frame redraws everything.
    ClearScreen,
    /// Hand the terminal back and stop the process (SIGTSTP on Unix).
    Suspend,
}

type SharedMap<Msg, Parent> = Arc<dyn Fn(Msg) -> Parent + Send + Sync>;

impl<Msg: Send + 'static> Command<Msg> {
    pub fn none() -> Self {
        Self::from_inner(CommandInner::None)
    }

    /// Deliver `msg` right after the current update.
    pub fn message(msg: Msg) -> Self {
        Self::from_inner(CommandInner::Action(Action::Message(msg)))
    }

    /// Deliver `msg` once `delay` has passed.
    ///
    /// There is no way to withdraw a delay.  A model that needs
    /// cancel-and-restart tags the message and ignores stale tags.
    pub fn after(delay: Duration, msg: Msg) -> Self {
        Self::from_inner(CommandInner::Delay(delay, msg))
    }

    pub fn quit() -> Self {
        Self::from_inner(CommandInner::Action(Action::Quit))
    }

    /// Several commands at once.  No-ops are dropped and a single survivor
    /// is returned unwrapped.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        if cmds.len() > 1 {
            return Self::from_inner(CommandInner::Batch(cmds));
        }
        cmds.pop().unwrap_or_else(Command::none)
    }

    pub fn terminal(cmd: TerminalCommand) -> Self {
        Self::from_inner(CommandInner::Terminal(cmd))
    }

    pub fn set_title(title: impl Into<String>) -> Self {
        Self::terminal(TerminalCommand::SetTitle(title.into()))
    }

    pub fn clear_screen() -> Self {
        Self::terminal(TerminalCommand::ClearScreen)
    }

    pub fn suspend() -> Self {
        Self::terminal(TerminalCommand::Suspend)
    }

    /// Convert the carried messages, e.g. a child component's into the
    /// parent's.
    pub fn map<Parent: Send + 'static>(
        self,
        f: impl Fn(Msg) -> Parent + Send + Sync + 'static,
    ) -> Command<Parent> {
        let f: SharedMap<Msg, Parent> = Arc::new(f);
        self.map_shared(&f)
    }

    fn map_shared<Parent: Send + 'static>(self, f: &SharedMap<Msg, Parent>) -> Command<Parent> {
        let inner = match self.inner {
            CommandInner::None => CommandInner::None,
            CommandInner::Action(Action::Message(msg)) => {
                CommandInner::Action(Action::Message(f(msg)))
            }
            CommandInner::Action(Action::Quit) => CommandInner::Action(Action::Quit),
            CommandInner::Delay(delay, msg) => CommandInner::Delay(delay, f(msg)),
            CommandInner::Batch(cmds) => {
                CommandInner::Batch(cmds.into_iter().map(|c| c.map_shared(f)).collect())
            }
            CommandInner::Terminal(cmd) => CommandInner::Terminal(cmd),
        };
        Command::from_inner(inner)
    }

    fn from_inner(inner: CommandInner<Msg>) -> Self {
        Command { inner }
    }

    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Action(Action::Quit))
    }

    /// The message, if this is an immediate message.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Action(Action::Message(msg)) => Some(msg),
            _ => None,
        }
    }

    /// Delay and message, if this is a delayed message.
    pub fn into_delay(self) -> Option<(Duration, Msg)> {
        match self.inner {
            CommandInner::Delay(delay, msg) => Some((delay, msg)),
            _ => None,
        }
    }

    /// The terminal request, if this is one.
    pub fn into_terminal(self) -> Option<TerminalCommand> {
        match self.inner {
            CommandInner::Terminal(cmd) => Some(cmd),
            _ => None,
        }
    }

    /// The parts, if this is a batch.
    pub fn into_batch(self) -> Option<Vec<Command<Msg>>> {
        match self.inner {
            CommandInner::Batch(cmds) => Some(cmds),
            _ => None,
        }
    }
}
