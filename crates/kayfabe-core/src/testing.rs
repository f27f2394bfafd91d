use crate::command::{Action, Command, CommandInner};
use crate::model::Model;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::time::Duration;

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// `TestProgram` exercises the init/update/view cycle in a plain `#[test]`
/// function -- no tokio runtime or TTY required.  Immediate messages from
/// [`Command::message`] are queued and flushed with
/// [`drain_messages`](TestProgram::drain_messages).  Delayed messages from
/// [`Command::after`] are parked on a virtual clock that only moves when the
/// test calls [`advance`](TestProgram::advance).  Terminal commands are
/// ignored; a quit command is recorded.
///
/// # Example
///
/// ```rust,ignore
/// let mut prog = TestProgram::<RankList>::new(flags);
/// prog.send(Msg::Search(search::Message::Changed("oka".into())));
/// prog.advance(Duration::from_millis(250));
/// assert_eq!(prog.model().filter().gimmick(), "oka");
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    timers: Vec<Timer<M::Message>>,
    now: Duration,
    next_seq: u64,
    quit: bool,
}

struct Timer<Msg> {
    due: Duration,
    seq: u64,
    msg: Msg,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    ///
    /// Synchronous commands produced by `init` are queued; call
    /// [`drain_messages`](TestProgram::drain_messages) to process them.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            timers: Vec::new(),
            now: Duration::ZERO,
            next_seq: 0,
            quit: false,
        };
        program.collect(init_cmd);
        program
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect(cmd);
    }

    /// Process pending immediate messages until no new ones are produced.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Move the virtual clock forward by `by`, delivering every delayed
    /// message that falls due, in due order.  Immediate messages are drained
    /// after each delivery.
    pub fn advance(&mut self, by: Duration) {
        let target = self.now + by;
        self.drain_messages();
        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, t)| t.due <= target)
                .min_by_key(|(_, t)| (t.due, t.seq))
                .map(|(i, _)| i);
            let Some(index) = next else { break };
            let timer = self.timers.remove(index);
            self.now = timer.due;
            self.send(timer.msg);
            self.drain_messages();
        }
        self.now = target;
    }

    /// Time elapsed on the virtual clock.
    pub fn elapsed(&self) -> Duration {
        self.now
    }

    /// Number of delayed messages not yet delivered.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether the model has returned [`Command::quit`].
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend");
        terminal
            .draw(|frame| {
                self.model.view(frame);
            })
            .expect("draw to test backend");
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the visible content as a plain string,
    /// one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(buf[(x, y)].symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn collect(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                self.pending_messages.push(msg);
            }
            CommandInner::Action(Action::Quit) => {
                self.quit = true;
            }
            CommandInner::Delay(delay, msg) => {
                self.timers.push(Timer {
                    due: self.now + delay,
                    seq: self.next_seq,
                    msg,
                });
                self.next_seq += 1;
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect(cmd);
                }
            }
            CommandInner::Terminal(_) => {}
        }
    }
}
