//! Notify-on-change primitive backing every observable list and projection.
//!
//! A [`Notifier`] keeps a list of listeners and calls each of them with a
//! [`ListChange`] after a mutation has been applied. Listeners are identified
//! by the [`SubscriptionId`] returned from [`Notifier::subscribe`] so the UI
//! can detach them again.

use std::fmt;

/// What happened to an observed list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// An element was inserted at the given position
    Added(usize),
    /// The element at the given position was removed
    Removed(usize),
    /// The element at the given position was replaced in place
    Replaced(usize),
    /// The whole content may have changed (reorder, refilter, bulk replace)
    Reset,
}

/// Handle for a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked after every change
pub type Listener = Box<dyn Fn(&ListChange) + Send>;

#[derive(Default)]
pub struct Notifier {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns false when the id was not registered here
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn notify(&self, change: ListChange) {
        for (_, listener) in &self.listeners {
            listener(&change);
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
