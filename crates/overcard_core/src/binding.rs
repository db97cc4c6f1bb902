//! Controlled two-way bindings
//!
//! A [`Binding<T>`] is a shared observable value with change notification:
//! the caller owns the source of truth (the controlled-component pattern),
//! the engine reads it, proposes changes by writing it, and subscribes to be
//! told about external writes so it can reconcile.
//!
//! Notification is synchronous on the UI thread. A subscriber may itself
//! write the binding (that is exactly what reconciliation does); reentrant
//! writes are absorbed into a pending pass so every subscriber always
//! observes the latest value and notification depth stays bounded.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identifies one subscription on a binding
    pub struct SubscriptionId;
}

type SubscriberFn<T> = Rc<dyn Fn(&T)>;

struct BindingInner<T> {
    value: T,
    version: u64,
    subscribers: SlotMap<SubscriptionId, SubscriberFn<T>>,
    /// True while a notification pass is running
    notifying: bool,
    /// A write arrived during the running pass; run another pass
    pending: bool,
}

/// A shared observable value (cheap to clone, clones share state).
pub struct Binding<T> {
    inner: Rc<RefCell<BindingInner<T>>>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Binding<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BindingInner {
                value: initial,
                version: 0,
                subscribers: SlotMap::with_key(),
                notifying: false,
                pending: false,
            })),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Version counter, bumped on every write. Useful for change detection
    /// without comparing values.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Write a new value and notify subscribers.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
            if inner.notifying {
                // Absorbed into the running pass; it will re-notify.
                inner.pending = true;
                return;
            }
            inner.notifying = true;
        }
        self.notify();
    }

    /// Write a new value computed from the current one.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let current = self.get();
        self.set(f(current));
    }

    /// Subscribe to writes. The callback observes the value after each write
    /// (coalesced to the latest during reentrant passes).
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        self.inner.borrow_mut().subscribers.insert(Rc::new(callback))
    }

    /// Remove a subscription. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner.borrow_mut().subscribers.remove(id);
    }

    fn notify(&self) {
        loop {
            let (value, subscribers): (T, Vec<SubscriberFn<T>>) = {
                let inner = self.inner.borrow();
                (
                    inner.value.clone(),
                    inner.subscribers.values().cloned().collect(),
                )
            };

            for subscriber in &subscribers {
                subscriber(&value);
            }

            let mut inner = self.inner.borrow_mut();
            if inner.pending {
                // A subscriber wrote the binding; notify again with the
                // latest value.
                inner.pending = false;
            } else {
                inner.notifying = false;
                return;
            }
        }
    }
}
