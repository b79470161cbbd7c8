use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::warn;

type Listener = Rc<dyn Fn(u32)>;

#[derive(Default)]
struct ObserverState {
    next_id: u64,
    listeners: IndexMap<u64, Listener>,
}

/// Single-threaded source of container width notifications.
///
/// Cloning shares the same listener set. Listeners run in subscription order.
#[derive(Clone, Default)]
pub struct ResizeObserver {
    state: Rc<RefCell<ObserverState>>,
}

impl std::fmt::Debug for ResizeObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeObserver")
            .field("listener_count", &self.listener_count())
            .finish()
    }
}

impl ResizeObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(u32) + 'static) -> Subscription {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.listeners.insert(id, Rc::new(listener));
        Subscription {
            id,
            state: Rc::downgrade(&self.state),
        }
    }

    /// Delivers `width` to every listener and returns how many ran.
    ///
    /// The listener set is snapshotted first, so callbacks may subscribe or
    /// unsubscribe freely. A listener removed by an earlier callback in the
    /// same dispatch is skipped.
    pub fn notify(&self, width: u32) -> usize {
        let snapshot: Vec<(u64, Listener)> = self
            .state
            .borrow()
            .listeners
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        let mut delivered = 0;
        for (id, listener) in snapshot {
            if !self.state.borrow().listeners.contains_key(&id) {
                continue;
            }
            listener(width);
            delivered += 1;
        }
        delivered
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a subscription unsubscribes immediately"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    state: Weak<RefCell<ObserverState>>,
}

impl Subscription {
    /// `false` once the observer itself has been dropped.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| state.borrow().listeners.contains_key(&self.id))
    }

    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };
        match state.try_borrow_mut() {
            Ok(mut state) => {
                state.listeners.shift_remove(&self.id);
            }
            Err(_) => warn!(subscription = self.id, "observer busy; listener left registered"),
        }
    }
}
