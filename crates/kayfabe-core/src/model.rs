use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// A whole screen, driven by [`Program`](crate::Program) or by
/// [`TestProgram`](crate::testing::TestProgram).
///
/// The loop is: [`init`](Model::init) once, then [`view`](Model::view) after
/// every change, with each incoming message passed to
/// [`update`](Model::update).  Anything beyond mutating `self` goes through
/// the returned [`Command`].  Messages come from the model's own commands or
/// from the [`Subscription`]s it declares.
///
/// Only the loop calls `update`, and only with one message at a time, so
/// model state needs no locking.
pub trait Model: Sized + Send + 'static {
    type Message: Send + 'static;

    /// Startup data, e.g. a loaded roster and settings.
    type Flags: Send + 'static;

    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Draw the current state.  Must not depend on anything but `&self`.
    fn view(&self, frame: &mut Frame);

    /// Event sources that should be running right now.  Re-evaluated after
    /// every update; sources are matched by [`SubscriptionId`](crate::SubscriptionId).
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        Vec::new()
    }
}
