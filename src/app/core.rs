//! Composition root.
//!
//! Owns the configuration, the state machine (and through its session the
//! shared remote client handle) and the UI event queue. Everything that
//! mutates controllers or the state machine runs inside
//! [`Core::handle_event`], i.e. on the UI loop.

use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state_machine::{Session, State, StateMachine};
use crate::client::Executor;
use crate::config::AppConfig;
use crate::controllers::{Completion, Controller, Epoch, Transition};
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct Core {
    config: AppConfig,
    state_machine: StateMachine,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    dirty: bool,
    should_quit: bool,
}

impl Core {
    pub fn new(executor: Arc<dyn Executor>, config: AppConfig, authenticated: bool) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let session = Session {
            executor,
            events: event_tx.clone(),
            ui: config.ui.clone(),
        };
        let state_machine = StateMachine::new(session, authenticated);
        tracing::info!(state = %state_machine.state(), "core started");
        Self {
            config,
            state_machine,
            event_tx,
            event_rx,
            dirty: true,
            should_quit: false,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> State {
        self.state_machine.state()
    }

    #[cfg(test)]
    pub fn state_machine_mut(&mut self) -> &mut StateMachine {
        self.dirty = true;
        &mut self.state_machine
    }

    pub fn controller(&self) -> &Controller {
        self.state_machine.controller()
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        self.state_machine.controller_mut()
    }

    /// Sender for producers outside the core (terminal input, ticks).
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_tx.clone()
    }

    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.event_rx.recv().await
    }

    /// Handle every queued event, including ones queued while handling.
    /// Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Terminal(event) => handler::handle_terminal(self, event),
            AppEvent::Transition { epoch, transition } => self.apply_transition(epoch, transition),
            AppEvent::Completed { epoch, completion } => self.complete(epoch, completion),
            AppEvent::Tick => {
                if self.controller_mut().notifier_mut().tick() {
                    self.dirty = true;
                }
            }
        }
    }

    fn is_current(&self, epoch: Epoch) -> bool {
        epoch == self.state_machine.epoch()
    }

    fn apply_transition(&mut self, epoch: Epoch, transition: Transition) {
        if !self.is_current(epoch) {
            tracing::debug!(epoch, transition = transition.name(), "dropping stale transition");
            return;
        }
        let from = self.state_machine.state();
        let name = transition.name();
        match self.state_machine.apply(transition) {
            Ok(()) => {
                tracing::info!(
                    from = %from,
                    to = %self.state_machine.state(),
                    epoch = self.state_machine.epoch(),
                    "transition {}",
                    name
                );
                self.dirty = true;
            }
            Err(e) => tracing::warn!(error = %e, "transition rejected"),
        }
    }

    fn complete(&mut self, epoch: Epoch, completion: Completion) {
        if !self.is_current(epoch) {
            tracing::debug!(epoch, ?completion, "dropping stale completion");
            return;
        }
        self.controller_mut().on_completion(completion);
        self.dirty = true;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a redraw is due; clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
