//! Handler für Roster, Page-Wechsel, Optionen und Abbau.

use super::pointer;
use crate::app::error::MissingEntity;
use crate::app::CanvasState;
use crate::core::{PageId, Roster};
use crate::shared::FieldOptions;

/// Übernimmt einen neuen Roster-Snapshot und gleicht die Szene ab.
///
/// Eine laufende Vorschau bleibt erhalten (z.B. nach dem Anlegen einer Shape).
pub fn load(state: &mut CanvasState, roster: Roster) {
    state.roster = roster;
    refresh(state);
}

/// Zeigt eine andere Page an. Die laufende Interaktion wird verworfen.
pub fn select_page(state: &mut CanvasState, page_id: PageId) {
    if state.roster.page(page_id).is_none() {
        log::warn!("Page-Wechsel übersprungen: {}", MissingEntity::Page(page_id));
        return;
    }
    pointer::cancel_interaction(state);
    state.roster.current_page_id = Some(page_id);
    state.sessions.begin();
    refresh(state);
}

fn refresh(state: &mut CanvasState) {
    let report = state.resync_marchers();
    let shapes = state.surface.load_shapes(&state.roster);
    log::info!(
        "Page {:?} geladen: {} Marcher, {} Shapes, {} fehlend",
        state.roster.current_page_id,
        state.surface.marcher_count(),
        shapes,
        report.missing.len()
    );
}

/// Übernimmt geänderte Feld-Optionen.
pub fn apply_options(state: &mut CanvasState, options: FieldOptions) {
    options.warn_if_snapping_disabled();
    state.options = options;
    state.surface.scene.request_render();
}

/// Baut die Szene ab. Ausstehende Commit-Ergebnisse werden danach verworfen.
pub fn teardown(state: &mut CanvasState) {
    pointer::cancel_interaction(state);
    state.surface.teardown();
    state.sessions.begin();
}
