//! Event loop for the **kayfabe** rank list browser.
//!
//! `kayfabe-core` provides the traits, types and runtime the rank list
//! controller runs on.  The design follows the [Elm Architecture]: the
//! controller is expressed as an **init -> update -> view** cycle, with side
//! effects pushed to the edges through [`Command`]s and [`Subscription`]s.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Side effect executed by the runtime, including delayed messages |
//! | [`Subscription`] | Long-lived event source (terminal events) |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness with a virtual clock |
//!
//! # Scheduling
//!
//! Everything runs on one task.  Messages are applied in arrival order and
//! each `update` runs to completion before the next, so the model never sees
//! overlapping updates.  The only suspension is [`Command::after`], which
//! parks a message until its delay elapses.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod testing;

pub use command::{Command, TerminalCommand};
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{OutputTarget, Program, ProgramError, ProgramOptions};
pub use subscription::{terminal_events, Subscription, SubscriptionId};

/// Run a model on the real terminal until it quits.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
