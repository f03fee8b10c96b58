//! Change notifications.
//!
//! The store calls every registered listener after each command that changed
//! state. Listeners receive only the event; a UI that needs fresh values reads
//! them back from the store once the command returns.

use std::fmt;

use shopfront_core::{OrderId, Price};

/// What changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Line items were added, removed, or had their quantity changed.
    CartUpdated {
        /// Sum of quantities after the change (for badges).
        total_items: u64,
    },
    /// The cart was emptied by `clear_cart`.
    CartCleared,
    /// An order was placed and the cart emptied.
    OrderPlaced { order_id: OrderId, total: Price },
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Registered listeners in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: &StoreEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
