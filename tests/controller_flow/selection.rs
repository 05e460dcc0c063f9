use super::{handle_of, loaded_state, position_on_page, send};
use drill_canvas_editor::{CanvasEffect, CanvasIntent, MarcherId, PageId};
use glam::Vec2;

#[test]
fn test_single_selection_publishes_marcher() {
    let (mut controller, mut state) = loaded_state();
    let handles = vec![handle_of(&state, 2)];

    send(
        &mut controller,
        &mut state,
        CanvasIntent::SelectionChanged { handles },
    );

    assert_eq!(
        controller.drain_effects(&mut state),
        vec![CanvasEffect::SelectedMarcherChanged {
            marcher_id: Some(MarcherId(2))
        }]
    );
    assert_eq!(state.surface.selected_marcher(), Some(MarcherId(2)));
}

#[test]
fn test_multi_selection_keeps_selected_marcher() {
    let (mut controller, mut state) = loaded_state();
    let single = vec![handle_of(&state, 1)];
    send(
        &mut controller,
        &mut state,
        CanvasIntent::SelectionChanged { handles: single },
    );
    controller.drain_effects(&mut state);

    let group = vec![handle_of(&state, 1), handle_of(&state, 3)];
    send(
        &mut controller,
        &mut state,
        CanvasIntent::SelectionChanged { handles: group },
    );

    assert!(
        controller.drain_effects(&mut state).is_empty(),
        "Gruppen-Selektion darf keine Auswahl veröffentlichen"
    );
    assert_eq!(state.surface.selected_marcher(), Some(MarcherId(1)));
    assert_eq!(
        state.surface.multi_selection(),
        &[MarcherId(1), MarcherId(3)]
    );
}

#[test]
fn test_cleared_selection_publishes_none() {
    let (mut controller, mut state) = loaded_state();
    let handles = vec![handle_of(&state, 4)];
    send(
        &mut controller,
        &mut state,
        CanvasIntent::SelectionChanged { handles },
    );
    controller.drain_effects(&mut state);

    send(
        &mut controller,
        &mut state,
        CanvasIntent::SelectionChanged { handles: vec![] },
    );

    assert_eq!(
        controller.drain_effects(&mut state),
        vec![CanvasEffect::SelectedMarcherChanged { marcher_id: None }]
    );
    assert!(state.surface.multi_selection().is_empty());
}

#[test]
fn test_selecting_missing_marcher_is_skipped() {
    let (mut controller, mut state) = loaded_state();
    send(
        &mut controller,
        &mut state,
        CanvasIntent::SelectMarcherRequested {
            marcher_id: Some(MarcherId(3)),
        },
    );
    let active = state.surface.scene.active_object();
    assert_eq!(active, Some(handle_of(&state, 3)));

    send(
        &mut controller,
        &mut state,
        CanvasIntent::SelectMarcherRequested {
            marcher_id: Some(MarcherId(42)),
        },
    );

    assert_eq!(state.surface.scene.active_object(), active);
    assert_eq!(state.surface.selected_marcher(), Some(MarcherId(3)));
}

#[test]
fn test_page_switch_moves_marchers_and_keeps_handles() {
    let (mut controller, mut state) = loaded_state();
    let handle = handle_of(&state, 2);

    send(
        &mut controller,
        &mut state,
        CanvasIntent::PageSelected { page_id: PageId(2) },
    );

    assert_eq!(state.roster.current_page_id, Some(PageId(2)));
    assert_eq!(handle_of(&state, 2), handle, "Handle bleibt beim Verschieben erhalten");
    assert_eq!(
        state.surface.marcher(MarcherId(2)).map(|m| m.position),
        position_on_page(&state, 2, 2)
    );
    assert_eq!(
        state.surface.marcher(MarcherId(2)).map(|m| m.position),
        Some(Vec2::new(0.0, 50.0))
    );
    assert_eq!(state.surface.shapes().count(), 0, "Page 2 hat keine Shapes");
}

#[test]
fn test_unknown_page_is_ignored() {
    let (mut controller, mut state) = loaded_state();

    send(
        &mut controller,
        &mut state,
        CanvasIntent::PageSelected { page_id: PageId(9) },
    );

    assert_eq!(state.roster.current_page_id, Some(PageId(1)));
    assert_eq!(state.surface.marcher_count(), 4);
}
