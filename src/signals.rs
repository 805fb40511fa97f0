//! Publish/subscribe registry binding widgets to controller messages.
//!
//! Views raise signals on their widgets; controllers connect handlers that
//! turn a `(widget, signal)` pair into one of their own messages. The bus is
//! owned by the controller, so its bindings disappear with it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an interactive widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Click,
}

type Handler<M> = Box<dyn Fn() -> M>;

pub struct SignalBus<M> {
    handlers: HashMap<(WidgetId, Signal), Vec<Handler<M>>>,
}

impl<M> SignalBus<M> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn connect<F>(&mut self, widget: WidgetId, signal: Signal, handler: F)
    where
        F: Fn() -> M + 'static,
    {
        self.handlers
            .entry((widget, signal))
            .or_default()
            .push(Box::new(handler));
    }

    pub fn disconnect_all(&mut self, widget: WidgetId) {
        self.handlers.retain(|(w, _), _| *w != widget);
    }

    /// Invoke every handler bound to `(widget, signal)` in registration order
    /// and collect the messages they produce.
    pub fn emit(&self, widget: WidgetId, signal: Signal) -> Vec<M> {
        self.handlers
            .get(&(widget, signal))
            .map(|hs| hs.iter().map(|h| h()).collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn is_connected(&self, widget: WidgetId, signal: Signal) -> bool {
        self.handlers
            .get(&(widget, signal))
            .is_some_and(|hs| !hs.is_empty())
    }
}

impl<M> Default for SignalBus<M> {
    fn default() -> Self {
        Self::new()
    }
}
