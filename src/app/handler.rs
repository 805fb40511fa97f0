//! Terminal input routing.
//!
//! Global bindings are handled here; everything else goes to the active
//! controller, whose view decides which widget (if any) was activated.

use crate::app::core::Core;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_terminal(core: &mut Core, event: CEvent) {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => {
            core.mark_dirty();
            handle_key(core, key);
        }
        CEvent::Resize(_, _) => core.mark_dirty(),
        _ => {}
    }
}

fn handle_key(core: &mut Core, key: KeyEvent) {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        core.quit();
        return;
    }
    if key.code == KeyCode::Char('q') && !core.controller().captures_text() {
        core.quit();
        return;
    }

    core.controller_mut().handle_key(key);
}
