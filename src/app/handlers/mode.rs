//! Handler für Modus-Wechsel.

use crate::app::modes::ModeKind;
use crate::app::CanvasState;

/// Wechselt den Interaktions-Modus und startet eine neue Session.
pub fn set_mode(state: &mut CanvasState, mode: ModeKind) {
    let changed = {
        let (modes, mut ctx) = state.split_modes();
        modes.transition(mode, &mut ctx)
    };
    if changed {
        state.sessions.begin();
    }
}
