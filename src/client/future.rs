//! Single-shot promise/future pair with one completion reaction.
//!
//! A [`Promise`] is held by whoever produces the value (usually a worker task),
//! the matching [`Pending`] by whoever wants it. Both sides are consumed by
//! use, so a value is delivered at most once and at most one reaction is ever
//! registered. An unresolved promise that is dropped resolves to `None`.

use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Reaction<T> = Box<dyn FnOnce(Option<T>) + Send>;

enum Slot<T> {
    Empty,
    Resolved(Option<T>),
    Waiting(Reaction<T>),
    Fired,
}

type Shared<T> = Arc<Mutex<Slot<T>>>;

fn lock<T>(shared: &Mutex<Slot<T>>) -> MutexGuard<'_, Slot<T>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Create a connected promise/pending pair.
pub fn pair<T>() -> (Promise<T>, Pending<T>) {
    let shared = Arc::new(Mutex::new(Slot::Empty));
    (
        Promise {
            shared: Some(shared.clone()),
        },
        Pending { shared },
    )
}

/// Producer side of a pending operation.
pub struct Promise<T> {
    shared: Option<Shared<T>>,
}

impl<T> Promise<T> {
    /// Deliver the result. The registered reaction, if any, runs on the
    /// calling thread before this returns.
    pub fn resolve(mut self, value: Option<T>) {
        if let Some(shared) = self.shared.take() {
            fulfil(&shared, value);
        }
    }
}

impl<T> Drop for Promise<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            fulfil(&shared, None);
        }
    }
}

fn fulfil<T>(shared: &Mutex<Slot<T>>, value: Option<T>) {
    let mut slot = lock(shared);
    match mem::replace(&mut *slot, Slot::Fired) {
        Slot::Empty => *slot = Slot::Resolved(value),
        Slot::Waiting(reaction) => {
            // Never run user code while holding the lock.
            drop(slot);
            reaction(value);
        }
        other => *slot = other,
    }
}

/// Consumer side of a pending operation.
pub struct Pending<T> {
    shared: Shared<T>,
}

impl<T> Pending<T> {
    /// A handle that is already resolved.
    #[cfg(test)]
    pub fn ready(value: Option<T>) -> Self {
        let (promise, pending) = pair();
        promise.resolve(value);
        pending
    }

    #[cfg(test)]
    pub fn is_resolved(&self) -> bool {
        matches!(*lock(&self.shared), Slot::Resolved(_) | Slot::Fired)
    }

    /// Register the completion reaction.
    ///
    /// Runs immediately on this thread when the value is already there,
    /// otherwise later on the thread that resolves the promise.
    pub fn on_done<F>(self, reaction: F)
    where
        F: FnOnce(Option<T>) + Send + 'static,
    {
        let mut slot = lock(&self.shared);
        match mem::replace(&mut *slot, Slot::Fired) {
            Slot::Resolved(value) => {
                drop(slot);
                reaction(value);
            }
            Slot::Empty => *slot = Slot::Waiting(Box::new(reaction)),
            other => *slot = other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_reaction_registered_before_resolution_fires_on_resolve() {
        let (promise, pending) = pair::<u32>();
        let (tx, rx) = mpsc::channel();
        pending.on_done(move |v| tx.send(v).unwrap());
        assert!(rx.try_recv().is_err());
        promise.resolve(Some(7));
        assert_eq!(rx.try_recv().unwrap(), Some(7));
    }

    #[test]
    fn test_reaction_registered_after_resolution_fires_immediately() {
        let (tx, rx) = mpsc::channel();
        Pending::ready(Some("done")).on_done(move |v| tx.send(v).unwrap());
        assert_eq!(rx.try_recv().unwrap(), Some("done"));
    }

    #[test]
    fn test_dropped_promise_resolves_to_absent() {
        let (promise, pending) = pair::<u32>();
        let (tx, rx) = mpsc::channel();
        pending.on_done(move |v| tx.send(v).unwrap());
        drop(promise);
        assert_eq!(rx.try_recv().unwrap(), None);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_resolution_from_another_thread() {
        let (promise, pending) = pair::<Vec<u8>>();
        let (tx, rx) = mpsc::channel();
        pending.on_done(move |v| tx.send(v).unwrap());
        std::thread::spawn(move || promise.resolve(Some(vec![1, 2])))
            .join()
            .unwrap();
        assert_eq!(rx.recv().unwrap(), Some(vec![1, 2]));
    }

    #[test]
    fn test_is_resolved() {
        let (promise, pending) = pair::<u8>();
        assert!(!pending.is_resolved());
        promise.resolve(None);
        assert!(pending.is_resolved());
    }
}
