use super::{click, loaded_state, select, send};
use drill_canvas_editor::app::events::{
    CanvasKey, ModifiedObject, ShapeAssignment, ShapePersistKind, ShapeRef,
};
use drill_canvas_editor::app::modes::ModeKind;
use drill_canvas_editor::geometry::{PointRef, SvgCommand};
use drill_canvas_editor::{
    CanvasEffect, CanvasError, CanvasIntent, CanvasState, MarcherId, PageId, ShapePageId,
};
use glam::Vec2;

const SHAPE: ShapePageId = ShapePageId(10);

fn svg(state: &CanvasState) -> String {
    state
        .surface
        .shape(SHAPE)
        .map(|s| s.path.to_svg_string())
        .expect("Shape sollte geladen sein")
}

fn persisted(effects: &[CanvasEffect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|e| match e {
            CanvasEffect::PersistShapePage(request) => Some(request.svg_path.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_shape_drawing_finishes_with_enter_and_persists() {
    let (mut controller, mut state) = loaded_state();
    select(&mut controller, &mut state, &[1, 2, 3]);
    send(
        &mut controller,
        &mut state,
        CanvasIntent::ModeRequested {
            mode: ModeKind::Shape,
        },
    );

    for p in [
        Vec2::new(1.0, 1.0),
        Vec2::new(99.0, 2.0),
        Vec2::new(102.0, 97.0),
    ] {
        send(&mut controller, &mut state, click(p));
    }
    send(
        &mut controller,
        &mut state,
        CanvasIntent::PointerMoved {
            position: Vec2::new(0.0, 300.0),
        },
    );
    send(
        &mut controller,
        &mut state,
        CanvasIntent::KeyPressed {
            key: CanvasKey::Enter,
        },
    );

    let effects = controller.drain_effects(&mut state);
    let Some(CanvasEffect::PersistShapePage(request)) = effects.last() else {
        panic!("Enter sollte die Shape übergeben: {effects:?}");
    };
    assert_eq!(
        request.kind,
        ShapePersistKind::Create {
            page_id: PageId(1)
        }
    );
    assert_eq!(request.svg_path, "M 0 0 L 100 0 L 100 100");
    assert_eq!(request.commands.len(), 3);
    let orders: Vec<usize> = request.marchers.iter().map(|m| m.position_order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(state.surface.preview().len(), 3);
}

#[test]
fn test_append_then_delete_restores_shape_path() {
    let (mut controller, mut state) = loaded_state();
    let original = svg(&state);

    send(
        &mut controller,
        &mut state,
        CanvasIntent::ShapeSegmentAppendRequested {
            shape_page_id: SHAPE,
        },
    );
    assert_eq!(svg(&state), "M 0 100 L 100 100 L 140 100");
    let targets: Vec<Vec2> = state
        .surface
        .preview()
        .assignments()
        .iter()
        .map(|a| a.to)
        .collect();
    let expected = [
        Vec2::new(0.0, 100.0),
        Vec2::new(70.0, 100.0),
        Vec2::new(140.0, 100.0),
    ];
    assert_eq!(targets.len(), expected.len());
    for (target, expected) in targets.iter().zip(expected) {
        assert!(
            target.abs_diff_eq(expected, 1e-3),
            "Ziel {target} sollte bei {expected} liegen"
        );
    }

    send(
        &mut controller,
        &mut state,
        CanvasIntent::ShapeSegmentDeleteRequested {
            shape_page_id: SHAPE,
            index: None,
        },
    );

    assert_eq!(svg(&state), original);
    let effects = controller.drain_effects(&mut state);
    assert_eq!(
        persisted(&effects),
        vec!["M 0 100 L 100 100 L 140 100".to_string(), original]
    );
    let Some(CanvasEffect::PersistShapePage(request)) = effects.last() else {
        panic!("Löschen sollte die Shape übergeben");
    };
    assert_eq!(
        request.kind,
        ShapePersistKind::Update {
            shape_page_id: SHAPE
        }
    );
    assert_eq!(
        request.marchers[0],
        ShapeAssignment {
            marcher_id: MarcherId(1),
            position_order: 0
        }
    );
}

#[test]
fn test_deleting_leading_move_is_rejected() {
    let (mut controller, mut state) = loaded_state();
    let original = svg(&state);

    let result = controller.handle_intent(
        &mut state,
        CanvasIntent::ShapeSegmentDeleteRequested {
            shape_page_id: SHAPE,
            index: Some(0),
        },
    );

    assert!(result.is_err());
    assert_eq!(svg(&state), original);
    assert!(persisted(&controller.drain_effects(&mut state)).is_empty());
}

#[test]
fn test_update_to_cubic_inserts_control_points() {
    let (mut controller, mut state) = loaded_state();

    send(
        &mut controller,
        &mut state,
        CanvasIntent::ShapeSegmentCommandChanged {
            shape_page_id: SHAPE,
            index: 1,
            command: SvgCommand::Cubic,
        },
    );

    let shape = state.surface.shape(SHAPE).expect("Shape");
    let segment = &shape.path.segments()[1];
    assert_eq!(segment.command, SvgCommand::Cubic);
    assert_eq!(segment.controls().len(), 2);
    assert_eq!(segment.end, Vec2::new(100.0, 100.0), "Endpunkt bleibt erhalten");
}

#[test]
fn test_smooth_command_on_first_segment_is_rejected() {
    let (mut controller, mut state) = loaded_state();
    let original = svg(&state);

    let result = controller.handle_intent(
        &mut state,
        CanvasIntent::ShapeSegmentCommandChanged {
            shape_page_id: SHAPE,
            index: 1,
            command: SvgCommand::SmoothCubic,
        },
    );

    let err = result.expect_err("Smooth-Kommando an Index 1 ist unzulässig");
    assert!(matches!(
        err.downcast_ref::<CanvasError>(),
        Some(CanvasError::InvalidSegmentEdit(_))
    ));
    assert_eq!(svg(&state), original);
}

#[test]
fn test_dragging_stored_shape_point_snaps_and_redistributes() {
    let (mut controller, mut state) = loaded_state();

    send(
        &mut controller,
        &mut state,
        CanvasIntent::ObjectModified {
            object: ModifiedObject::ShapePoint {
                shape: ShapeRef::Page(SHAPE),
                segment: 1,
                point: PointRef::End,
                position: Vec2::new(203.0, 98.0),
            },
        },
    );

    assert_eq!(svg(&state), "M 0 100 L 200 100");
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
            (MarcherId(1), Vec2::new(0.0, 100.0)),
            (MarcherId(2), Vec2::new(100.0, 100.0)),
            (MarcherId(3), Vec2::new(200.0, 100.0)),
        ]
    );
}

#[test]
fn test_editing_unknown_shape_is_skipped() {
    let (mut controller, mut state) = loaded_state();

    send(
        &mut controller,
        &mut state,
        CanvasIntent::ShapeSegmentAppendRequested {
            shape_page_id: ShapePageId(99),
        },
    );

    assert!(persisted(&controller.drain_effects(&mut state)).is_empty());
}
