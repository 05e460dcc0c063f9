//! Handler für Pointer-, Tastatur- und Objekt-Events des aktiven Modus.

use super::{commit, shape};
use crate::app::error::CanvasError;
use crate::app::events::{CanvasKey, ModifiedObject, Modifiers};
use crate::app::modes::{CanvasMode, ModeContext, ModeKind, ModeOutcome};
use crate::app::state::CommitOrigin;
use crate::app::surface::CanvasEventKind;
use crate::app::CanvasState;
use glam::Vec2;

/// Ruft den aktiven Modus auf, wenn er an `event` gebunden ist.
fn dispatch<F>(
    state: &mut CanvasState,
    event: CanvasEventKind,
    handler: F,
) -> Result<Option<ModeOutcome>, CanvasError>
where
    F: FnOnce(&mut dyn CanvasMode, &mut ModeContext<'_>) -> Result<ModeOutcome, CanvasError>,
{
    let (modes, mut ctx) = state.split_modes();
    if !ctx.surface.bindings.is_bound(modes.active_kind(), event) {
        return Ok(None);
    }
    ctx.surface.bindings.record_invocation();
    handler(modes.active_mut(), &mut ctx).map(Some)
}

/// Setzt die Rückgabe eines Modus in Sessions, Commits und Effekte um.
fn apply_outcome(state: &mut CanvasState, outcome: ModeOutcome) {
    match outcome {
        ModeOutcome::InteractionStarted => {
            state.sessions.begin();
        }
        ModeOutcome::CommitMoves(updates) => commit::emit(state, updates, CommitOrigin::Moves),
        ModeOutcome::ShapeFinished(draft) => shape::persist_new(state, &draft),
        ModeOutcome::Ignored
        | ModeOutcome::Handled
        | ModeOutcome::ForwardToDefault
        | ModeOutcome::PreviewUpdated
        | ModeOutcome::Finalized
        | ModeOutcome::Cancelled => {}
    }
}

/// Primärer Klick. Vom Modus weitergereichte Klicks gehen an den Default-Modus.
pub fn pointer_down(
    state: &mut CanvasState,
    position: Vec2,
    modifiers: Modifiers,
) -> Result<(), CanvasError> {
    let Some(outcome) = dispatch(state, CanvasEventKind::PointerDown, |mode, ctx| {
        mode.on_pointer_down(ctx, position, modifiers)
    })?
    else {
        return Ok(());
    };

    let outcome = if outcome == ModeOutcome::ForwardToDefault {
        let (modes, mut ctx) = state.split_modes();
        match modes.mode_mut(ModeKind::Default) {
            Some(default) => default.on_pointer_down(&mut ctx, position, modifiers)?,
            None => ModeOutcome::Ignored,
        }
    } else {
        outcome
    };
    apply_outcome(state, outcome);
    Ok(())
}

/// Mausbewegung.
pub fn pointer_move(state: &mut CanvasState, position: Vec2) -> Result<(), CanvasError> {
    if let Some(outcome) = dispatch(state, CanvasEventKind::PointerMove, |mode, ctx| {
        mode.on_pointer_move(ctx, position)
    })? {
        apply_outcome(state, outcome);
    }
    Ok(())
}

/// Maustaste losgelassen.
pub fn pointer_up(state: &mut CanvasState, position: Vec2) -> Result<(), CanvasError> {
    if let Some(outcome) = dispatch(state, CanvasEventKind::PointerUp, |mode, ctx| {
        mode.on_pointer_up(ctx, position)
    })? {
        apply_outcome(state, outcome);
    }
    Ok(())
}

/// Taste an den aktiven Modus.
pub fn key_down(state: &mut CanvasState, key: CanvasKey) -> Result<(), CanvasError> {
    if let Some(outcome) = dispatch(state, CanvasEventKind::KeyDown, |mode, ctx| {
        mode.on_key_down(ctx, key)
    })? {
        apply_outcome(state, outcome);
    }
    Ok(())
}

/// Objekt-Änderung an den aktiven Modus.
pub fn object_modified(state: &mut CanvasState, object: &ModifiedObject) -> Result<(), CanvasError> {
    if let Some(outcome) = dispatch(state, CanvasEventKind::ObjectModified, |mode, ctx| {
        mode.on_object_modified(ctx, object)
    })? {
        apply_outcome(state, outcome);
    }
    Ok(())
}

/// Bricht die laufende Interaktion ab und stellt die Gruppen-Selektion wieder her.
/// Der Modus bleibt aktiv.
pub fn cancel_interaction(state: &mut CanvasState) {
    {
        let (modes, mut ctx) = state.split_modes();
        modes.active_mut().cancel_interaction(&mut ctx);
    }
    state.surface.clear_pathways();
    state.surface.scene.group_selection = true;
    state.surface.scene.request_render();
    log::debug!("Interaktion abgebrochen");
}
