use crate::command::{Action, Command, CommandInner, TerminalCommand};
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::cursor;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Write};
use std::sync::Once;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Upper bound on queued messages applied between two frames.
const MAX_BATCH: usize = 100;

type Screen = Terminal<CrosstermBackend<Box<dyn Write + Send>>>;

/// Stream the UI is drawn on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    /// Use when stdout is redirected.
    Stderr,
}

impl OutputTarget {
    fn writer(self) -> Box<dyn Write + Send> {
        match self {
            OutputTarget::Stdout => Box::new(io::stdout()),
            OutputTarget::Stderr => Box::new(io::stderr()),
        }
    }
}

/// Errors from driving the real terminal.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Settings for a [`Program`].
///
/// ```rust,ignore
/// let options = ProgramOptions {
///     title: Some("kayfabe".into()),
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Redraw rate cap, clamped to 1..=120.  Default 30.
    pub fps: u32,
    /// Draw on the alternate screen.  Default true.
    pub alt_screen: bool,
    /// Deliver pastes as one event.  Default true.
    pub bracketed_paste: bool,
    /// Window title set on startup.
    pub title: Option<String>,
    pub output: OutputTarget,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 30,
            alt_screen: true,
            bracketed_paste: true,
            title: None,
            output: OutputTarget::default(),
        }
    }
}

impl ProgramOptions {
    fn frame_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.clamp(1, 120)))
    }

    fn modes(&self) -> ScreenModes {
        ScreenModes {
            alt_screen: self.alt_screen,
            bracketed_paste: self.bracketed_paste,
            output: self.output,
        }
    }
}

/// The terminal modes a program switches on, so they can be switched off
/// again on exit, on suspend, and from the panic hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScreenModes {
    alt_screen: bool,
    bracketed_paste: bool,
    output: OutputTarget,
}

impl ScreenModes {
    fn enter(self, title: Option<&str>) -> io::Result<Screen> {
        enable_raw_mode()?;
        let mut out = self.output.writer();
        if self.alt_screen {
            execute!(out, EnterAlternateScreen)?;
        }
        if self.bracketed_paste {
            execute!(out, EnableBracketedPaste)?;
        }
        if let Some(title) = title {
            execute!(out, SetTitle(title))?;
        }
        execute!(out, cursor::Hide)?;
        Terminal::new(CrosstermBackend::new(out))
    }

    /// Runs every step even when an earlier one fails; reports the raw mode
    /// result.
    fn leave(self) -> io::Result<()> {
        let raw = disable_raw_mode();
        let mut out = self.output.writer();
        if self.bracketed_paste {
            let _ = execute!(out, DisableBracketedPaste);
        }
        let _ = execute!(out, cursor::Show);
        if self.alt_screen {
            let _ = execute!(out, LeaveAlternateScreen);
        }
        raw
    }

    /// Restore the terminal before the default panic message prints.
    /// Installed once per process.
    fn restore_on_panic(self) {
        static HOOK: Once = Once::new();
        HOOK.call_once(move || {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = self.leave();
                previous(info);
            }));
        });
    }
}

/// Runs a [`Model`] on the real terminal.
///
/// Subscription events, immediate commands and elapsed delays all arrive on
/// one unbounded channel.  The loop applies them one at a time and redraws at
/// most once per frame, only when something changed.
///
/// ```rust,ignore
/// let model = Program::<RankList>::with_options(flags, options)?.run().await?;
/// ```
pub struct Program<M: Model> {
    model: M,
    screen: Screen,
    options: ProgramOptions,
    tx: mpsc::UnboundedSender<M::Message>,
    rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
    dirty: bool,
    quit: bool,
}

impl<M: Model> Program<M> {
    /// Initialize the model, take over the terminal and start the model's
    /// subscriptions.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let (model, init) = M::init(flags);

        let modes = options.modes();
        modes.restore_on_panic();
        let screen = modes.enter(options.title.as_deref())?;

        let mut program = Self {
            model,
            screen,
            options,
            subscriptions: SubscriptionManager::new(tx.clone()),
            tx,
            rx,
            dirty: true,
            quit: false,
        };
        program.dispatch(init);
        program.resubscribe();
        tracing::debug!(fps = program.options.fps, "program started");
        Ok(program)
    }

    /// Drive the model until it quits or the process is interrupted, then
    /// give the terminal back.  Returns the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let outcome = self.event_loop().await;
        self.subscriptions.shutdown();
        self.options.modes().leave()?;
        tracing::debug!("program stopped");
        outcome.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        let mut frames = tokio::time::interval(self.options.frame_period());
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while !self.quit {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("interrupted");
                    break;
                }

                Some(msg) = self.rx.recv() => {
                    self.apply(msg);
                    for _ in 0..MAX_BATCH {
                        match self.rx.try_recv() {
                            Ok(msg) => self.apply(msg),
                            Err(_) => break,
                        }
                    }
                }

                _ = frames.tick() => {
                    if self.dirty {
                        self.draw()?;
                    }
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.dispatch(cmd);
        self.resubscribe();
        self.dirty = true;
    }

    fn resubscribe(&mut self) {
        let wanted = self.model.subscriptions();
        self.subscriptions.reconcile(wanted);
    }

    fn dispatch(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                let _ = self.tx.send(msg);
            }
            CommandInner::Action(Action::Quit) => self.quit = true,
            CommandInner::Delay(delay, msg) => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(msg);
                });
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.dispatch(cmd);
                }
            }
            CommandInner::Terminal(cmd) => self.terminal_command(cmd),
        }
    }

    fn terminal_command(&mut self, cmd: TerminalCommand) {
        let result = match cmd {
            TerminalCommand::SetTitle(title) => {
                let backend = self.screen.backend_mut();
                execute!(backend, SetTitle(title))
            }
            TerminalCommand::ClearScreen => {
                self.dirty = true;
                self.screen.clear()
            }
            TerminalCommand::Suspend => {
                self.suspend();
                Ok(())
            }
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, "terminal command failed");
        }
    }

    fn suspend(&mut self) {
        let modes = self.options.modes();
        if let Err(err) = modes.leave() {
            tracing::warn!(error = %err, "terminal restore before suspend failed");
        }

        #[cfg(unix)]
        // SAFETY: raise only signals the calling process.
        unsafe {
            libc::raise(libc::SIGTSTP);
        }

        match modes.enter(self.options.title.as_deref()) {
            Ok(screen) => {
                self.screen = screen;
                self.dirty = true;
            }
            Err(err) => {
                // No terminal to come back to.
                tracing::warn!(error = %err, "terminal re-init after suspend failed");
                self.quit = true;
            }
        }
    }

    fn draw(&mut self) -> Result<(), ProgramError> {
        let model = &self.model;
        self.screen.draw(|frame| model.view(frame))?;
        self.dirty = false;
        Ok(())
    }
}
