//! Gemeinsame Helfer für die Controller-Flow-Tests.

mod line_tool;
mod selection;
mod sessions;
mod shape_tool;

use drill_canvas_editor::app::events::{Modifiers, PointerButton};
use drill_canvas_editor::{
    CanvasController, CanvasEffect, CanvasIntent, CanvasState, GraphicHandle, MarcherId, Roster,
};
use glam::Vec2;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn fixture_roster() -> Roster {
    Roster::from_json(include_str!("../fixtures/roster.json")).expect("Fixture sollte lesbar sein")
}

/// Controller und State mit geladenem Fixture-Roster (Page 1 aktiv).
pub fn loaded_state() -> (CanvasController, CanvasState) {
    init_logging();
    let mut controller = CanvasController::new();
    let mut state = CanvasState::new();
    send(
        &mut controller,
        &mut state,
        CanvasIntent::RosterLoaded {
            roster: fixture_roster(),
        },
    );
    (controller, state)
}

pub fn send(controller: &mut CanvasController, state: &mut CanvasState, intent: CanvasIntent) {
    let label = format!("{intent:?}");
    controller
        .handle_intent(state, intent)
        .unwrap_or_else(|e| panic!("{label} sollte ohne Fehler durchlaufen: {e:#}"));
}

pub fn click(position: Vec2) -> CanvasIntent {
    CanvasIntent::PointerDown {
        position,
        button: PointerButton::Primary,
        modifiers: Modifiers::default(),
    }
}

pub fn handle_of(state: &CanvasState, marcher_id: u64) -> GraphicHandle {
    state
        .surface
        .marcher(MarcherId(marcher_id))
        .map(|m| m.handle)
        .expect("Marcher sollte auf der Szene liegen")
}

/// Selektiert Marcher auf der Szene und verwirft die dabei erzeugten Effekte.
pub fn select(controller: &mut CanvasController, state: &mut CanvasState, ids: &[u64]) {
    let handles = ids.iter().map(|id| handle_of(state, *id)).collect();
    send(
        controller,
        state,
        CanvasIntent::SelectionChanged { handles },
    );
    controller.drain_effects(state);
}

pub fn position_on_page(state: &CanvasState, marcher_id: u64, page_id: u64) -> Option<Vec2> {
    state
        .roster
        .position_of(MarcherId(marcher_id), drill_canvas_editor::PageId(page_id))
}

pub fn commit_effects(effects: &[CanvasEffect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, CanvasEffect::CommitMarcherPages(_)))
        .count()
}
