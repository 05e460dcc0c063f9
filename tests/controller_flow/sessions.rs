use super::{click, handle_of, loaded_state, position_on_page, select, send};
use drill_canvas_editor::app::events::{CanvasKey, CommitItemResult, CommitRequest, ModifiedObject};
use drill_canvas_editor::{
    CanvasController, CanvasEffect, CanvasIntent, CanvasState, MarcherId, ModeKind,
};
use glam::Vec2;

/// Zieht Marcher 4 (Snare) im Default-Modus.
fn drag_snare(controller: &mut CanvasController, state: &mut CanvasState, to: Vec2) -> CommitRequest {
    drag(controller, state, 4, to)
}

fn completed(request: &CommitRequest, success: bool) -> CanvasIntent {
    CanvasIntent::CommitCompleted {
        session: request.session,
        results: request
            .updates
            .iter()
            .map(|u| CommitItemResult {
                marcher_id: u.marcher_id,
                success,
            })
            .collect(),
    }
}

fn snare_on_canvas(state: &CanvasState) -> Option<Vec2> {
    state.surface.marcher(MarcherId(4)).map(|m| m.position)
}

#[test]
fn test_drag_snaps_and_success_updates_roster() {
    let (mut controller, mut state) = loaded_state();

    let request = drag_snare(&mut controller, &mut state, Vec2::new(53.0, 47.0));
    assert_eq!(request.updates.len(), 1);
    assert_eq!(request.updates[0].position, Vec2::new(50.0, 50.0));
    assert_eq!(snare_on_canvas(&state), Some(Vec2::new(50.0, 50.0)));

    send(&mut controller, &mut state, completed(&request, true));

    assert_eq!(position_on_page(&state, 4, 1), Some(Vec2::new(50.0, 50.0)));
    assert_eq!(snare_on_canvas(&state), Some(Vec2::new(50.0, 50.0)));
}

#[test]
fn test_failed_commit_reverts_to_roster() {
    let (mut controller, mut state) = loaded_state();

    let request = drag_snare(&mut controller, &mut state, Vec2::new(53.0, 47.0));
    send(&mut controller, &mut state, completed(&request, false));

    assert_eq!(position_on_page(&state, 4, 1), Some(Vec2::new(200.0, 200.0)));
    assert_eq!(snare_on_canvas(&state), Some(Vec2::new(200.0, 200.0)));
}

/// Zieht einen beliebigen Marcher im Default-Modus.
fn drag(
    controller: &mut CanvasController,
    state: &mut CanvasState,
    marcher_id: u64,
    to: Vec2,
) -> CommitRequest {
    let handle = handle_of(state, marcher_id);
    send(
        controller,
        state,
        CanvasIntent::ObjectModified {
            object: ModifiedObject::Marchers(vec![(handle, to)]),
        },
    );
    match controller.drain_effects(state).pop() {
        Some(CanvasEffect::CommitMarcherPages(request)) => request,
        other => panic!("Drag sollte einen Commit ausgeben, war {other:?}"),
    }
}

fn canvas_position(state: &CanvasState, marcher_id: u64) -> Option<Vec2> {
    state.surface.marcher(MarcherId(marcher_id)).map(|m| m.position)
}

#[test]
fn test_two_drags_completed_in_order_keep_both_positions() {
    let (mut controller, mut state) = loaded_state();

    let snare = drag(&mut controller, &mut state, 4, Vec2::new(53.0, 47.0));
    let trumpet = drag(&mut controller, &mut state, 1, Vec2::new(12.0, 88.0));
    send(&mut controller, &mut state, completed(&snare, true));
    send(&mut controller, &mut state, completed(&trumpet, true));

    for (marcher, expected) in [(4, Vec2::new(50.0, 50.0)), (1, Vec2::new(10.0, 90.0))] {
        assert_eq!(position_on_page(&state, marcher, 1), Some(expected));
        assert_eq!(
            canvas_position(&state, marcher),
            Some(expected),
            "Marcher {marcher} sollte auf der bestätigten Position bleiben"
        );
    }
}

#[test]
fn test_newer_completion_keeps_unacknowledged_older_drag() {
    let (mut controller, mut state) = loaded_state();

    let snare = drag(&mut controller, &mut state, 4, Vec2::new(53.0, 47.0));
    let trumpet = drag(&mut controller, &mut state, 1, Vec2::new(12.0, 88.0));
    send(&mut controller, &mut state, completed(&trumpet, true));

    assert_eq!(position_on_page(&state, 4, 1), Some(Vec2::new(200.0, 200.0)));
    assert_eq!(
        canvas_position(&state, 4),
        Some(Vec2::new(50.0, 50.0)),
        "Noch nicht bestätigter Drag bleibt sichtbar"
    );

    send(&mut controller, &mut state, completed(&snare, true));
    assert_eq!(position_on_page(&state, 4, 1), Some(Vec2::new(50.0, 50.0)));
    assert_eq!(canvas_position(&state, 1), Some(Vec2::new(10.0, 90.0)));
}

#[test]
fn test_failed_older_drag_reverts_only_its_marcher() {
    let (mut controller, mut state) = loaded_state();

    let snare = drag(&mut controller, &mut state, 4, Vec2::new(53.0, 47.0));
    drag(&mut controller, &mut state, 1, Vec2::new(12.0, 88.0));
    send(&mut controller, &mut state, completed(&snare, false));

    assert_eq!(canvas_position(&state, 4), Some(Vec2::new(200.0, 200.0)));
    assert_eq!(canvas_position(&state, 1), Some(Vec2::new(10.0, 90.0)));
}

#[test]
fn test_stale_line_commit_updates_roster_but_keeps_new_preview() {
    let (mut controller, mut state) = loaded_state();
    select(&mut controller, &mut state, &[1, 2, 3]);
    send(
        &mut controller,
        &mut state,
        CanvasIntent::ModeRequested {
            mode: ModeKind::Line,
        },
    );
    send(&mut controller, &mut state, click(Vec2::ZERO));
    send(&mut controller, &mut state, click(Vec2::new(100.0, 0.0)));
    send(&mut controller, &mut state, CanvasIntent::CommitRequested);
    let request = match controller.drain_effects(&mut state).pop() {
        Some(CanvasEffect::CommitMarcherPages(request)) => request,
        other => panic!("Commit erwartet, war {other:?}"),
    };

    send(
        &mut controller,
        &mut state,
        CanvasIntent::ModeRequested {
            mode: ModeKind::Shape,
        },
    );
    send(&mut controller, &mut state, click(Vec2::new(0.0, 200.0)));
    send(&mut controller, &mut state, click(Vec2::new(200.0, 200.0)));
    assert_eq!(state.surface.preview().len(), 3);
    assert_ne!(state.sessions.current(), request.session);

    send(&mut controller, &mut state, completed(&request, true));

    assert_eq!(position_on_page(&state, 3, 1), Some(Vec2::new(50.0, 0.0)));
    assert_eq!(canvas_position(&state, 3), Some(Vec2::new(50.0, 0.0)));
    assert_eq!(
        state.surface.preview().len(),
        3,
        "Shape-Vorschau der neuen Session bleibt erhalten"
    );
    assert!(state.modes.active().has_pending_input());
}

#[test]
fn test_repeated_drags_of_one_marcher_end_at_latest() {
    let (mut controller, mut state) = loaded_state();

    let first = drag_snare(&mut controller, &mut state, Vec2::new(53.0, 47.0));
    let second = drag_snare(&mut controller, &mut state, Vec2::new(81.0, 79.0));
    assert_ne!(first.session, second.session);

    send(&mut controller, &mut state, completed(&first, true));
    assert_eq!(position_on_page(&state, 4, 1), Some(Vec2::new(50.0, 50.0)));
    assert_eq!(
        snare_on_canvas(&state),
        Some(Vec2::new(80.0, 80.0)),
        "Neuerer, noch offener Drag bleibt sichtbar"
    );

    send(&mut controller, &mut state, completed(&second, true));
    assert_eq!(position_on_page(&state, 4, 1), Some(Vec2::new(80.0, 80.0)));
    assert_eq!(snare_on_canvas(&state), Some(Vec2::new(80.0, 80.0)));
}

#[test]
fn test_duplicate_completion_is_ignored() {
    let (mut controller, mut state) = loaded_state();

    let request = drag_snare(&mut controller, &mut state, Vec2::new(53.0, 47.0));
    send(&mut controller, &mut state, completed(&request, true));
    send(&mut controller, &mut state, completed(&request, false));

    assert_eq!(snare_on_canvas(&state), Some(Vec2::new(50.0, 50.0)));
}

#[test]
fn test_escape_is_staged_in_line_mode() {
    let (mut controller, mut state) = loaded_state();
    select(&mut controller, &mut state, &[1, 2, 3]);
    send(
        &mut controller,
        &mut state,
        CanvasIntent::ModeRequested {
            mode: ModeKind::Line,
        },
    );
    send(&mut controller, &mut state, click(Vec2::ZERO));
    let escape = || CanvasIntent::KeyPressed {
        key: CanvasKey::Escape,
    };

    send(&mut controller, &mut state, escape());
    assert_eq!(state.modes.active_kind(), ModeKind::Line);
    assert!(!state.modes.active().has_pending_input());

    send(&mut controller, &mut state, escape());
    assert_eq!(state.modes.active_kind(), ModeKind::Default);

    let logged = state.command_log.len();
    send(&mut controller, &mut state, escape());
    assert_eq!(state.modes.active_kind(), ModeKind::Default);
    assert_eq!(state.command_log.len(), logged, "Drittes Escape ist ein No-op");
}
