use crate::controllers::{Completion, Epoch, Transition};
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// A controller asks the state machine to move
    Transition { epoch: Epoch, transition: Transition },

    /// A remote call finished; routed to the controller of `epoch`
    Completed { epoch: Epoch, completion: Completion },

    /// Tick for notice expiry
    Tick,
}
