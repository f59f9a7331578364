//! Single-threaded observer channel with scoped subscriptions.
//!
//! A [`Signal<T>`] holds any number of handlers.  [`Signal::subscribe`]
//! returns a [`Subscription`] guard; dropping the guard (or calling
//! [`Subscription::unsubscribe`]) detaches the handler.  There is no way to
//! attach a handler without receiving a guard, so an owner that stores its
//! guards cannot leak a binding past its own lifetime.
//!
//! Two emission modes exist:
//!
//! * [`Signal::emit`] — every handler runs and stays attached (input events).
//! * [`Signal::emit_once`] — every handler runs and is then discarded
//!   (death notifications: a unit dies exactly once).
//!
//! Handlers may subscribe or unsubscribe (including themselves) while an
//! emission is in progress.  Signals use `Rc<RefCell<_>>` and are `!Send`;
//! the whole AI tick runs on one thread.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

type Handler<T> = Box<dyn FnMut(&T)>;

struct Slots<T> {
    next_key:  u64,
    handlers:  BTreeMap<u64, Handler<T>>,
    emitting:  bool,
    /// Keys detached while their handler was taken out for an emission.
    detached:  Vec<u64>,
}

impl<T> Slots<T> {
    fn detach(&mut self, key: u64) {
        if self.handlers.remove(&key).is_none() && self.emitting {
            self.detached.push(key);
        }
    }
}

// ── Signal ────────────────────────────────────────────────────────────────────

/// A list of handlers notified with a `&T`.
pub struct Signal<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_key: 0,
                handlers: BTreeMap::new(),
                emitting: false,
                detached: Vec::new(),
            })),
        }
    }

    /// Attach `handler`; it stays attached until the returned guard drops.
    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) -> Subscription {
        let key = {
            let mut slots = self.slots.borrow_mut();
            let key = slots.next_key;
            slots.next_key += 1;
            slots.handlers.insert(key, Box::new(handler));
            key
        };
        Subscription {
            slot: Some(Box::new(SlotRef { slots: Rc::downgrade(&self.slots), key })),
        }
    }

    /// Notify every handler in subscription order.  Returns how many ran.
    pub fn emit(&self, value: &T) -> usize {
        self.dispatch(value, true)
    }

    /// Notify every handler, then detach all of them.
    pub fn emit_once(&self, value: &T) -> usize {
        self.dispatch(value, false)
    }

    /// Number of attached handlers.
    pub fn len(&self) -> usize {
        self.slots.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn dispatch(&self, value: &T, keep: bool) -> usize {
        // Take the handlers out so they can re-enter the signal freely.
        let mut taken = {
            let mut slots = self.slots.borrow_mut();
            slots.emitting = true;
            std::mem::take(&mut slots.handlers)
        };
        for handler in taken.values_mut() {
            handler(value);
        }
        let ran = taken.len();

        let mut slots = self.slots.borrow_mut();
        slots.emitting = false;
        let detached = std::mem::take(&mut slots.detached);
        if keep {
            for key in detached {
                taken.remove(&key);
            }
            // Handlers subscribed during the emission are already in
            // `slots.handlers`; keys are unique so the merge cannot collide.
            slots.handlers.append(&mut taken);
        }
        ran
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.slots.try_borrow().map(|s| s.handlers.len()).ok();
        f.debug_struct("Signal").field("handlers", &handlers).finish()
    }
}

// ── Subscription ──────────────────────────────────────────────────────────────

trait Detach {
    fn detach(&self);
    fn is_attached(&self) -> bool;
}

struct SlotRef<T> {
    slots: Weak<RefCell<Slots<T>>>,
    key:   u64,
}

impl<T> Detach for SlotRef<T> {
    fn detach(&self) {
        if let Some(slots) = self.slots.upgrade() {
            slots.borrow_mut().detach(self.key);
        }
    }

    fn is_attached(&self) -> bool {
        self.slots
            .upgrade()
            .is_some_and(|slots| slots.borrow().handlers.contains_key(&self.key))
    }
}

/// Guard for one attached handler.  Detaches on drop.
#[must_use = "dropping a Subscription immediately detaches its handler"]
#[derive(Default)]
pub struct Subscription {
    slot: Option<Box<dyn Detach>>,
}

impl Subscription {
    /// A guard bound to nothing.  `unsubscribe` on it is a no-op.
    pub fn detached() -> Self {
        Self { slot: None }
    }

    /// Detach the handler now.  Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some(slot) = self.slot.take() {
            slot.detach();
        }
    }

    /// `true` while the handler is still attached to a live signal.
    ///
    /// A fire-once handler reports `false` after its signal has fired.
    pub fn is_active(&self) -> bool {
        self.slot.as_ref().is_some_and(|s| s.is_attached())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.is_active()).finish()
    }
}
