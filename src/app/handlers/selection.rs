//! Handler für Selektions-Operationen.

use crate::app::events::CanvasEffect;
use crate::app::surface::SelectionUpdate;
use crate::app::CanvasState;
use crate::core::MarcherId;
use crate::shared::GraphicHandle;

/// Übernimmt die Selektion des Hosts und veröffentlicht eine Änderung
/// des einzeln ausgewählten Marchers.
pub fn apply(state: &mut CanvasState, handles: &[GraphicHandle]) {
    if let SelectionUpdate::Publish(marcher_id) = state.surface.apply_selection(handles) {
        state.push_effect(CanvasEffect::SelectedMarcherChanged { marcher_id });
    }
}

/// Externe Auswahl eines Marchers. Ein fehlender Marcher wird übersprungen.
pub fn select_marcher(state: &mut CanvasState, marcher_id: Option<MarcherId>) {
    if let Err(e) = state.surface.select_marcher(marcher_id) {
        log::warn!("Auswahl übersprungen: {}", e);
    }
}
