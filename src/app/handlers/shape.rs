//! Handler für den Shape-Segment-Editor und die Übergabe fertiger Shapes.
//!
//! Jede Segment-Änderung wird zuerst auf einer Kopie des Pfads geprüft.
//! Erst wenn sie gültig ist, wird die Shape ersetzt, die Verteilung ihrer
//! Marcher neu berechnet und die Shape an die Persistenz übergeben.

use crate::app::error::{CanvasError, MissingEntity};
use crate::app::events::{CanvasEffect, ShapeAssignment, ShapePersistKind, ShapePersistRequest};
use crate::app::modes::ShapeDraft;
use crate::app::CanvasState;
use crate::core::{MarcherId, ShapePageId};
use drill_canvas_geometry::{
    assign_in_order, DistributionTarget, PointRef, SegmentEditError, ShapePath, SvgCommand,
};
use glam::Vec2;

/// Hängt ein Standard-Segment (Linie entlang +x) an.
pub fn append_segment(state: &mut CanvasState, shape_page_id: ShapePageId) -> Result<(), CanvasError> {
    let offset = state.options.default_segment_offset();
    edit_path(state, shape_page_id, |path| {
        path.append_default_segment(offset);
        Ok(())
    })
}

/// Löscht ein Segment (Standard: das letzte).
pub fn delete_segment(
    state: &mut CanvasState,
    shape_page_id: ShapePageId,
    index: Option<usize>,
) -> Result<(), CanvasError> {
    edit_path(state, shape_page_id, |path| path.delete_segment(index).map(|_| ()))
}

/// Ändert den Kommando-Typ eines Segments.
pub fn update_segment(
    state: &mut CanvasState,
    shape_page_id: ShapePageId,
    index: usize,
    command: SvgCommand,
) -> Result<(), CanvasError> {
    edit_path(state, shape_page_id, |path| path.update_segment(index, command))
}

/// Verschiebt einen Kontroll- oder Endpunkt (gesnappt).
pub fn move_point(
    state: &mut CanvasState,
    shape_page_id: ShapePageId,
    segment: usize,
    point: PointRef,
    position: Vec2,
) -> Result<(), CanvasError> {
    let snapped = state.options.snap(position);
    edit_path(state, shape_page_id, |path| path.set_point(segment, point, snapped))
}

fn edit_path<F>(state: &mut CanvasState, shape_page_id: ShapePageId, edit: F) -> Result<(), CanvasError>
where
    F: FnOnce(&mut ShapePath) -> Result<(), SegmentEditError>,
{
    let Some(shape) = state.surface.shape(shape_page_id) else {
        log::warn!("Segment-Bearbeitung übersprungen: {}", MissingEntity::ShapePage(shape_page_id));
        return Ok(());
    };
    let mut path = shape.path.clone();
    let marchers = shape.marchers.clone();

    if let Err(e) = edit(&mut path) {
        log::warn!("Segment-Bearbeitung an {} abgelehnt: {}", shape_page_id, e);
        return Err(e.into());
    }

    state.surface.set_shape_path(shape_page_id, path.clone())?;
    redistribute(state, &marchers, &path);
    state.push_effect(CanvasEffect::PersistShapePage(ShapePersistRequest {
        kind: ShapePersistKind::Update { shape_page_id },
        commands: path.segments().to_vec(),
        svg_path: path.to_svg_string(),
        marchers: ordinals(&marchers),
    }));
    Ok(())
}

/// Verteilt die Marcher einer Shape in Ordinal-Reihenfolge neu.
/// Weniger als zwei Marcher ergeben keine Vorschau.
fn redistribute(state: &mut CanvasState, marchers: &[MarcherId], path: &ShapePath) {
    let positions = state.surface.positions_of(marchers);
    match assign_in_order(&positions, DistributionTarget::Path(path)) {
        Ok(assignments) => state.surface.show_pathways(
            assignments,
            state.options.pathway_style(),
            state.options.static_marker_radius,
        ),
        Err(e) => {
            log::debug!("Keine Shape-Vorschau: {}", e);
            state.surface.clear_pathways();
        }
    }
}

fn ordinals(marchers: &[MarcherId]) -> Vec<ShapeAssignment> {
    marchers
        .iter()
        .enumerate()
        .map(|(position_order, &marcher_id)| ShapeAssignment {
            marcher_id,
            position_order,
        })
        .collect()
}

/// Übergibt eine neu gezeichnete Shape an die Persistenz.
pub(crate) fn persist_new(state: &mut CanvasState, draft: &ShapeDraft) {
    let Some(page_id) = state.roster.current_page_id else {
        log::warn!("Shape verworfen: keine aktuelle Page");
        return;
    };
    let marchers: Vec<MarcherId> = draft.assignments.iter().map(|a| a.id).collect();
    state.push_effect(CanvasEffect::PersistShapePage(ShapePersistRequest {
        kind: ShapePersistKind::Create { page_id },
        commands: draft.path.segments().to_vec(),
        svg_path: draft.path.to_svg_string(),
        marchers: ordinals(&marchers),
    }));
}
