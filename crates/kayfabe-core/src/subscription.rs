use crate::event::TerminalEvent;
use crossterm::event::EventStream;
use futures::StreamExt;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// A long-lived event source managed by the runtime.
///
/// Subscriptions are declared in [`Model::subscriptions`](crate::Model::subscriptions)
/// and reconciled after every update: new ids are started, ids that
/// disappeared are aborted, unchanged ids keep running.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) spawn: Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>,
}

/// Identity for diffing subscriptions between update cycles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    discriminant: u64,
}

impl SubscriptionId {
    /// Create an ID from a type and a numeric discriminant.
    pub fn new<T: 'static>(discriminant: u64) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant,
        }
    }

    /// Create an ID from a type alone (for singletons).
    pub fn of<T: 'static>() -> Self {
        Self::new::<T>(0)
    }
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Identity used for reconciliation.
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }
}

/// Marker type identifying the terminal event subscription.
pub struct TerminalEvents;

/// Subscribe to keyboard, resize and paste events, mapping each through
/// `map`.  Returning `None` discards the event.
///
/// # Example
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| match event {
///         TerminalEvent::Key(key) => Some(Msg::Key(key)),
///         _ => None,
///     })]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);

    // The EventStream is created inside the task: creating one per
    // subscriptions() call would contend with the live stream's reader.
    Subscription {
        id: SubscriptionId::of::<TerminalEvents>(),
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Msg>| -> AbortHandle {
            let handle = tokio::spawn(async move {
                let mut stream = EventStream::new();
                while let Some(result) = stream.next().await {
                    let event = match result {
                        Ok(event) => event,
                        Err(err) => {
                            tracing::warn!(error = %err, "terminal event stream error");
                            continue;
                        }
                    };
                    let Some(msg) = TerminalEvent::from_crossterm(event).and_then(|e| map(e))
                    else {
                        continue;
                    };
                    if tx.send(msg).is_err() {
                        break;
                    }
                }
            });
            handle.abort_handle()
        }),
    }
}

/// The running subscription tasks, keyed by id.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    running: HashMap<SubscriptionId, AbortHandle>,
    tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            running: HashMap::new(),
            tx,
        }
    }

    /// Make the running set match `wanted`: abort tasks whose id is gone,
    /// spawn ids not yet running, leave the rest untouched.
    pub fn reconcile(&mut self, wanted: Vec<Subscription<Msg>>) {
        let ids: Vec<SubscriptionId> = wanted.iter().map(|s| s.id.clone()).collect();
        let stale: Vec<SubscriptionId> = self
            .running
            .keys()
            .filter(|id| !ids.contains(id))
            .cloned()
            .collect();
        for id in stale {
            if let Some(handle) = self.running.remove(&id) {
                handle.abort();
            }
        }

        for sub in wanted {
            if self.running.contains_key(&sub.id) {
                continue;
            }
            let handle = (sub.spawn)(self.tx.clone());
            self.running.insert(sub.id, handle);
        }
    }

    pub fn shutdown(&mut self) {
        self.running.drain().for_each(|(_, handle)| handle.abort());
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.running.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(id: SubscriptionId) -> Subscription<i32> {
        Subscription {
            id,
            spawn: Box::new(|_tx| tokio::spawn(futures::future::pending::<()>()).abort_handle()),
        }
    }

    #[test]
    fn subscription_id_equality() {
        assert_eq!(SubscriptionId::of::<String>(), SubscriptionId::of::<String>());
        assert_ne!(SubscriptionId::of::<String>(), SubscriptionId::of::<i32>());
        assert_ne!(SubscriptionId::new::<String>(1), SubscriptionId::new::<String>(2));
    }

    #[test]
    fn terminal_events_id_is_stable() {
        let a = terminal_events(|_| Some(1));
        let b = terminal_events(|_| Some(2));
        assert_eq!(a.id(), b.id());
    }

    #[tokio::test]
    async fn manager_starts_new_and_keeps_existing() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut manager = SubscriptionManager::new(tx);

        manager.reconcile(vec![pending(SubscriptionId::of::<String>())]);
        assert_eq!(manager.active_count(), 1);

        manager.reconcile(vec![pending(SubscriptionId::of::<String>())]);
        assert_eq!(manager.active_count(), 1);
    }

    #[tokio::test]
    async fn manager_stops_removed() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut manager = SubscriptionManager::new(tx);

        manager.reconcile(vec![
            pending(SubscriptionId::new::<String>(1)),
            pending(SubscriptionId::new::<String>(2)),
        ]);
        assert_eq!(manager.active_count(), 2);

        manager.reconcile(vec![pending(SubscriptionId::new::<String>(2))]);
        assert_eq!(manager.active_count(), 1);

        manager.shutdown();
        assert_eq!(manager.active_count(), 0);
    }
}
