use super::{click, commit_effects, handle_of, loaded_state, position_on_page, select, send};
use drill_canvas_editor::app::events::{
    CanvasKey, CommitItemResult, CommitRequest, ModifiedObject, Modifiers, PointerButton,
};
use drill_canvas_editor::app::modes::ModeKind;
use drill_canvas_editor::app::surface::CanvasEventKind;
use drill_canvas_editor::shared::SceneNodeKind;
use drill_canvas_editor::geometry::DistributionError;
use drill_canvas_editor::{
    CanvasController, CanvasEffect, CanvasError, CanvasIntent, CanvasState, MarcherId,
};
use glam::Vec2;

fn line_count(state: &drill_canvas_editor::CanvasState) -> usize {
    state
        .surface
        .scene
        .iter()
        .filter(|n| matches!(n.kind, SceneNodeKind::Line { .. }))
        .count()
}

#[test]
fn test_line_flow_previews_commits_and_applies() {
    let (mut controller, mut state) = loaded_state();
    select(&mut controller, &mut state, &[1, 2, 3]);
    send(
        &mut controller,
        &mut state,
        CanvasIntent::ModeRequested {
            mode: ModeKind::Line,
        },
    );

    send(&mut controller, &mut state, click(Vec2::new(2.0, -3.0)));
    assert!(!state.surface.scene.group_selection);
    send(
        &mut controller,
        &mut state,
        CanvasIntent::PointerMoved {
            position: Vec2::new(48.0, 1.0),
        },
    );
    assert_eq!(state.surface.preview().len(), 3, "Vorschau folgt dem Pointer");
    send(&mut controller, &mut state, click(Vec2::new(101.0, 4.0)));

    assert!(state.surface.scene.group_selection);
    let targets: Vec<(MarcherId, Vec2)> = state
        .surface
        .preview()
        .assignments()
        .iter()
        .map(|a| (a.id, a.to))
        .collect();
    assert_eq!(
        targets,
        vec![
            (MarcherId(1), Vec2::new(0.0, 0.0)),
            (MarcherId(3), Vec2::new(50.0, 0.0)),
            (MarcherId(2), Vec2::new(100.0, 0.0)),
        ]
    );

    send(
        &mut controller,
        &mut state,
        CanvasIntent::KeyPressed {
            key: CanvasKey::Enter,
        },
    );
    let effects = controller.drain_effects(&mut state);
    let Some(CanvasEffect::CommitMarcherPages(request)) = effects.last() else {
        panic!("Enter sollte einen Commit ausgeben: {effects:?}");
    };
    assert!(request.record_history);
    assert!(!request.reverse_page_order);
    assert_eq!(request.updates.len(), 3);

    let results = request
        .updates
        .iter()
        .map(|u| CommitItemResult {
            marcher_id: u.marcher_id,
            success: true,
        })
        .collect();
    send(
        &mut controller,
        &mut state,
        CanvasIntent::CommitCompleted {
            session: request.session,
            results,
        },
    );

    assert_eq!(position_on_page(&state, 3, 1), Some(Vec2::new(50.0, 0.0)));
    assert_eq!(
        state.surface.marcher(MarcherId(2)).map(|m| m.position),
        Some(Vec2::new(100.0, 0.0))
    );
    assert!(state.surface.preview().is_empty());
    assert_eq!(line_count(&state), 0);
}

#[test]
fn test_switching_line_to_shape_leaves_one_handler_set() {
    let (mut controller, mut state) = loaded_state();
    for mode in [ModeKind::Line, ModeKind::Shape] {
        send(&mut controller, &mut state, CanvasIntent::ModeRequested { mode });
    }

    assert_eq!(state.surface.bindings.owners(), vec![ModeKind::Shape]);
    assert_eq!(
        state
            .surface
            .bindings
            .handler_count(CanvasEventKind::PointerDown),
        1
    );

    let before = state.surface.bindings.invocations();
    send(&mut controller, &mut state, click(Vec2::new(10.0, 10.0)));
    assert_eq!(state.surface.bindings.invocations(), before + 1);
}

#[test]
fn test_right_click_discards_line_but_keeps_mode() {
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
    send(
        &mut controller,
        &mut state,
        CanvasIntent::PointerMoved {
            position: Vec2::new(100.0, 0.0),
        },
    );

    send(
        &mut controller,
        &mut state,
        CanvasIntent::PointerDown {
            position: Vec2::new(50.0, 50.0),
            button: PointerButton::Secondary,
            modifiers: Modifiers::default(),
        },
    );

    assert_eq!(state.modes.active_kind(), ModeKind::Line);
    assert_eq!(line_count(&state), 0);
    assert!(state.surface.preview().is_empty());
    assert!(state.surface.scene.group_selection);
}

#[test]
fn test_finalize_with_single_marcher_reports_error_without_mutation() {
    let (mut controller, mut state) = loaded_state();
    select(&mut controller, &mut state, &[1]);
    send(
        &mut controller,
        &mut state,
        CanvasIntent::ModeRequested {
            mode: ModeKind::Line,
        },
    );
    send(&mut controller, &mut state, click(Vec2::ZERO));
    let roster_before = state.roster.clone();

    let result = controller.handle_intent(&mut state, click(Vec2::new(100.0, 0.0)));

    let err = result.expect_err("Ein Marcher reicht nicht für eine Verteilung");
    assert!(matches!(
        err.downcast_ref::<CanvasError>(),
        Some(CanvasError::Distribution(
            DistributionError::InsufficientMarchers { found: 1 }
        ))
    ));
    assert_eq!(state.roster, roster_before);
    assert_eq!(commit_effects(&controller.drain_effects(&mut state)), 0);
    assert!(state.surface.preview().is_empty());
}

#[test]
fn test_enter_while_drawing_does_not_commit() {
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

    send(
        &mut controller,
        &mut state,
        CanvasIntent::KeyPressed {
            key: CanvasKey::Enter,
        },
    );

    assert_eq!(commit_effects(&controller.drain_effects(&mut state)), 0);
}

/// Linien-Modus mit abgeschlossener Linie (0,0) -> (100,0) für Marcher 1, 2 und 3.
fn finalized_line() -> (CanvasController, CanvasState) {
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
    controller.drain_effects(&mut state);
    (controller, state)
}

fn drawn_lines(state: &CanvasState) -> Vec<(Vec2, Vec2)> {
    state
        .surface
        .scene
        .iter()
        .filter_map(|n| match n.kind {
            SceneNodeKind::Line { start, end } => Some((start, end)),
            _ => None,
        })
        .collect()
}

fn from_of(state: &CanvasState, marcher_id: u64) -> Option<Vec2> {
    state
        .surface
        .preview()
        .assignments()
        .iter()
        .find(|a| a.id == MarcherId(marcher_id))
        .map(|a| a.from)
}

fn last_commit(controller: &mut CanvasController, state: &mut CanvasState) -> CommitRequest {
    match controller.drain_effects(state).pop() {
        Some(CanvasEffect::CommitMarcherPages(request)) => request,
        other => panic!("Commit erwartet, war {other:?}"),
    }
}

#[test]
fn test_click_on_finalized_line_keeps_line_and_preview() {
    let (mut controller, mut state) = finalized_line();

    send(&mut controller, &mut state, click(Vec2::new(300.0, 300.0)));

    assert_eq!(drawn_lines(&state), vec![(Vec2::ZERO, Vec2::new(100.0, 0.0))]);
    assert_eq!(state.surface.preview().len(), 3);
    assert!(state.modes.active().has_pending_input());
    assert!(state.surface.scene.group_selection);

    send(
        &mut controller,
        &mut state,
        CanvasIntent::KeyPressed {
            key: CanvasKey::Enter,
        },
    );
    let request = last_commit(&mut controller, &mut state);
    assert_eq!(request.updates.len(), 3, "Linie bleibt committbar");
}

#[test]
fn test_marcher_drag_in_line_mode_commits_and_recomputes_preview() {
    let (mut controller, mut state) = finalized_line();
    assert_eq!(from_of(&state, 1), Some(Vec2::new(10.0, 40.0)));

    let handle = handle_of(&state, 1);
    send(
        &mut controller,
        &mut state,
        CanvasIntent::ObjectModified {
            object: ModifiedObject::Marchers(vec![(handle, Vec2::new(12.0, 88.0))]),
        },
    );

    let drag = last_commit(&mut controller, &mut state);
    assert_eq!(drag.updates.len(), 1);
    assert_eq!(drag.updates[0].position, Vec2::new(10.0, 90.0));
    assert_eq!(
        state.surface.marcher(MarcherId(1)).map(|m| m.position),
        Some(Vec2::new(10.0, 90.0))
    );
    assert_eq!(
        from_of(&state, 1),
        Some(Vec2::new(10.0, 90.0)),
        "Vorschau startet an der neuen Position"
    );

    let results = drag
        .updates
        .iter()
        .map(|u| CommitItemResult {
            marcher_id: u.marcher_id,
            success: true,
        })
        .collect();
    send(
        &mut controller,
        &mut state,
        CanvasIntent::CommitCompleted {
            session: drag.session,
            results,
        },
    );

    assert_eq!(position_on_page(&state, 1, 1), Some(Vec2::new(10.0, 90.0)));
    assert_eq!(drawn_lines(&state).len(), 1, "Linie überlebt den Drag-Commit");
    assert_eq!(state.surface.preview().len(), 3);
    assert_eq!(state.modes.active_kind(), ModeKind::Line);
}

#[test]
fn test_marcher_drag_in_shape_mode_refreshes_draft_preview() {
    let (mut controller, mut state) = loaded_state();
    select(&mut controller, &mut state, &[1, 2, 3]);
    send(
        &mut controller,
        &mut state,
        CanvasIntent::ModeRequested {
            mode: ModeKind::Shape,
        },
    );
    send(&mut controller, &mut state, click(Vec2::new(0.0, 200.0)));
    send(&mut controller, &mut state, click(Vec2::new(200.0, 200.0)));
    controller.drain_effects(&mut state);

    let handle = handle_of(&state, 3);
    send(
        &mut controller,
        &mut state,
        CanvasIntent::ObjectModified {
            object: ModifiedObject::Marchers(vec![(handle, Vec2::new(21.0, 61.0))]),
        },
    );

    let drag = last_commit(&mut controller, &mut state);
    assert_eq!(drag.updates[0].position, Vec2::new(20.0, 60.0));
    assert_eq!(from_of(&state, 3), Some(Vec2::new(20.0, 60.0)));
    assert!(state.modes.active().has_pending_input(), "Shape bleibt in Arbeit");
}
