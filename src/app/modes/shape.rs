//! Shape zeichnen: jeder Klick fixiert einen Punkt, Enter schließt ab.
//!
//! Während des Zeichnens folgt das letzte Segment dem Pointer. Beim
//! Abschluss wird es verworfen, die Event-Marcher werden entlang des Pfads
//! verteilt und die Shape an die Persistenz übergeben.

use super::{
    move_dragged_marchers, preview_distribution, CanvasMode, ModeContext, ModeKind, ModeOutcome,
    ShapeDraft,
};
use crate::app::error::CanvasError;
use crate::app::events::{CanvasKey, ModifiedObject, Modifiers, ShapeRef};
use crate::app::surface::{shape_node, CanvasEventKind};
use crate::core::MarcherId;
use crate::shared::{CursorStyle, GraphicHandle};
use drill_canvas_geometry::{DistributionTarget, PathSegment, PointRef, ShapePath};
use glam::Vec2;

const EVENTS: &[CanvasEventKind] = &[
    CanvasEventKind::PointerDown,
    CanvasEventKind::PointerMove,
    CanvasEventKind::ObjectModified,
    CanvasEventKind::KeyDown,
];

/// Zustand des Shape-Werkzeugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeState {
    /// Keine Shape in Arbeit
    #[default]
    Idle,
    /// Punkte werden gesetzt
    Drawing,
    /// Shape übergeben, Vorschau wartet auf Commit
    Finished,
}

/// Shape-Werkzeug.
#[derive(Debug, Default)]
pub struct ShapeMode {
    state: ShapeState,
    path: Option<ShapePath>,
    event_marchers: Vec<MarcherId>,
    handle: Option<GraphicHandle>,
}

impl ShapeMode {
    /// Erstellt das Werkzeug im Ruhezustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktueller Zustand.
    pub fn state(&self) -> ShapeState {
        self.state
    }

    /// Pfad in Arbeit (inkl. schwebendem Segment beim Zeichnen).
    pub fn path(&self) -> Option<&ShapePath> {
        self.path.as_ref()
    }

    /// Marcher, die verteilt werden.
    pub fn event_marchers(&self) -> &[MarcherId] {
        &self.event_marchers
    }

    fn redraw(&mut self, ctx: &mut ModeContext<'_>) {
        let Some(path) = &self.path else {
            return;
        };
        let kind = shape_node(path);
        match self.handle {
            Some(handle) => {
                ctx.surface.scene.update(handle, kind);
            }
            None => self.handle = Some(ctx.surface.scene.add(kind, None, true)),
        }
        ctx.surface.scene.request_render();
    }

    fn discard(&mut self, ctx: &mut ModeContext<'_>) {
        if let Some(handle) = self.handle.take() {
            ctx.surface.scene.remove(handle);
        }
        ctx.surface.clear_pathways();
        self.path = None;
        self.state = ShapeState::Idle;
    }

    fn move_floating(&mut self, position: Vec2) -> bool {
        let Some(path) = self.path.as_mut() else {
            return false;
        };
        let last = path.len() - 1;
        path.set_point(last, PointRef::End, position).is_ok()
    }

    fn live_preview(&self, ctx: &mut ModeContext<'_>) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = preview_distribution(ctx, &self.event_marchers, DistributionTarget::Path(path)) {
            log::debug!("Keine Shape-Vorschau: {}", e);
            ctx.surface.clear_pathways();
        }
    }

    fn finish(&mut self, ctx: &mut ModeContext<'_>) -> Result<ModeOutcome, CanvasError> {
        let Some(drawing) = &self.path else {
            return Ok(ModeOutcome::Ignored);
        };
        let mut finished = drawing.clone();
        finished.delete_segment(None)?;
        if finished.segment_count() == 0 {
            log::warn!("Shape ohne Segmente verworfen");
            self.discard(ctx);
            ctx.surface.scene.group_selection = true;
            return Ok(ModeOutcome::Cancelled);
        }

        let assignments =
            preview_distribution(ctx, &self.event_marchers, DistributionTarget::Path(&finished))?;
        self.path = Some(finished.clone());
        self.state = ShapeState::Finished;
        self.redraw(ctx);
        ctx.surface.scene.group_selection = true;
        log::info!(
            "Shape abgeschlossen: {} Segmente, {} Marcher",
            finished.segment_count(),
            assignments.len()
        );
        Ok(ModeOutcome::ShapeFinished(ShapeDraft {
            path: finished,
            assignments,
        }))
    }
}

impl CanvasMode for ShapeMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Shape
    }

    fn name(&self) -> &str {
        "Shape"
    }

    fn status_text(&self) -> &str {
        match self.state {
            ShapeState::Idle => "Startpunkt der Shape klicken",
            ShapeState::Drawing => "Punkte klicken, Enter: abschließen",
            ShapeState::Finished => "Enter: Positionen übernehmen, Klick: neue Shape",
        }
    }

    fn cursor(&self) -> CursorStyle {
        CursorStyle::Crosshair
    }

    fn bound_events(&self) -> &'static [CanvasEventKind] {
        EVENTS
    }

    fn initiate(&mut self, ctx: &mut ModeContext<'_>) {
        self.state = ShapeState::Idle;
        self.event_marchers = ctx.surface.multi_selection().to_vec();
    }

    fn cleanup(&mut self, ctx: &mut ModeContext<'_>) {
        self.discard(ctx);
        self.event_marchers.clear();
        ctx.surface.scene.group_selection = true;
    }

    fn on_pointer_down(
        &mut self,
        ctx: &mut ModeContext<'_>,
        position: Vec2,
        modifiers: Modifiers,
    ) -> Result<ModeOutcome, CanvasError> {
        if modifiers.command() {
            return Ok(ModeOutcome::ForwardToDefault);
        }
        let snapped = ctx.options.snap(position);

        match self.state {
            ShapeState::Idle | ShapeState::Finished => {
                self.discard(ctx);
                let selected = ctx.surface.multi_selection();
                if !selected.is_empty() {
                    self.event_marchers = selected.to_vec();
                }
                let mut path = ShapePath::new(snapped);
                path.push_segment(PathSegment::line_to(snapped))?;
                self.path = Some(path);
                self.state = ShapeState::Drawing;
                ctx.surface.scene.group_selection = false;
                self.redraw(ctx);
                Ok(ModeOutcome::InteractionStarted)
            }
            ShapeState::Drawing => {
                self.move_floating(snapped);
                if let Some(path) = self.path.as_mut() {
                    path.push_segment(PathSegment::line_to(snapped))?;
                }
                self.redraw(ctx);
                self.live_preview(ctx);
                Ok(ModeOutcome::PreviewUpdated)
            }
        }
    }

    fn on_pointer_move(
        &mut self,
        ctx: &mut ModeContext<'_>,
        position: Vec2,
    ) -> Result<ModeOutcome, CanvasError> {
        if self.state != ShapeState::Drawing {
            return Ok(ModeOutcome::Ignored);
        }
        let snapped = ctx.options.snap(position);
        if self.path.as_ref().map(ShapePath::end) == Some(snapped) {
            return Ok(ModeOutcome::Handled);
        }
        self.move_floating(snapped);
        self.redraw(ctx);
        self.live_preview(ctx);
        Ok(ModeOutcome::PreviewUpdated)
    }

    fn on_object_modified(
        &mut self,
        ctx: &mut ModeContext<'_>,
        object: &ModifiedObject,
    ) -> Result<ModeOutcome, CanvasError> {
        match object {
            ModifiedObject::Marchers(moved) => {
                let updates = move_dragged_marchers(ctx, moved);
                if updates.is_empty() {
                    return Ok(ModeOutcome::Ignored);
                }
                if self.state != ShapeState::Idle {
                    self.live_preview(ctx);
                }
                Ok(ModeOutcome::CommitMoves(updates))
            }
            ModifiedObject::ShapePoint {
                shape: ShapeRef::Draft,
                segment,
                point,
                position,
            } if self.state == ShapeState::Drawing => {
                let Some(path) = self.path.as_mut() else {
                    return Ok(ModeOutcome::Ignored);
                };
                path.set_point(*segment, *point, ctx.options.snap(*position))?;
                self.redraw(ctx);
                self.live_preview(ctx);
                Ok(ModeOutcome::PreviewUpdated)
            }
            _ => Ok(ModeOutcome::Ignored),
        }
    }

    fn on_key_down(
        &mut self,
        ctx: &mut ModeContext<'_>,
        key: CanvasKey,
    ) -> Result<ModeOutcome, CanvasError> {
        if self.consumes_key(key) {
            self.finish(ctx)
        } else {
            Ok(ModeOutcome::Ignored)
        }
    }

    fn cancel_interaction(&mut self, ctx: &mut ModeContext<'_>) {
        self.discard(ctx);
        ctx.surface.scene.group_selection = true;
    }

    fn has_pending_input(&self) -> bool {
        self.state != ShapeState::Idle
    }

    fn ready_for_commit(&self) -> bool {
        self.state != ShapeState::Drawing
    }

    fn consumes_key(&self, key: CanvasKey) -> bool {
        key == CanvasKey::Enter && self.state == ShapeState::Drawing
    }

    fn on_commit_applied(&mut self, ctx: &mut ModeContext<'_>) {
        self.discard(ctx);
    }
}
