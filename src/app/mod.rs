//! Orchestration core: state machine, composition root, event routing.

pub mod core;
pub mod event;
pub mod handler;
pub mod state_machine;
