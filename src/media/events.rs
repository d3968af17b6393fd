//! Event fan-out from a playback primitive to its subscribers.
//!
//! The primitive owns an `EventHub` and publishes into it from whatever
//! thread drives playback; each subscriber holds a `Subscription` whose
//! receiver it drains on its own schedule. Dropping the `Subscription`
//! unregisters it, so nothing is delivered to a detached subscriber.

use std::sync::mpsc::{self, Receiver, Sender, TryIter};
use std::sync::{Arc, Mutex, Weak};

use super::types::MediaEvent;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    subscribers: Vec<(u64, Sender<MediaEvent>)>,
}

#[derive(Clone, Default)]
pub struct EventHub {
    inner: Arc<Mutex<HubInner>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let id = match self.inner.lock() {
            Ok(mut inner) => {
                let id = inner.next_id;
                inner.next_id += 1;
                inner.subscribers.push((id, tx));
                id
            }
            // A poisoned hub cannot deliver anything; hand out a dead receiver.
            Err(_) => u64::MAX,
        };

        Subscription {
            id,
            hub: Arc::downgrade(&self.inner),
            rx,
        }
    }

    /// Deliver `event` to every live subscriber; returns how many received it.
    pub fn emit(&self, event: MediaEvent) -> usize {
        let Ok(mut inner) = self.inner.lock() else {
            return 0;
        };
        // Receivers dropped without unsubscribing are pruned here.
        inner
            .subscribers
            .retain(|(_, tx)| tx.send(event.clone()).is_ok());
        inner.subscribers.len()
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().map(|i| i.subscribers.len()).unwrap_or(0)
    }
}

/// A registered listener. Unregisters itself on drop.
pub struct Subscription {
    id: u64,
    hub: Weak<Mutex<HubInner>>,
    rx: Receiver<MediaEvent>,
}

impl Subscription {
    /// Pending events, without blocking.
    pub fn try_iter(&self) -> TryIter<'_, MediaEvent> {
        self.rx.try_iter()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            if let Ok(mut inner) = hub.lock() {
                inner.subscribers.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
