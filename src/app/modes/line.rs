//! Linien-Werkzeug: Klick setzt den Anker, zweiter Klick schließt die Linie ab.
//!
//! Die Event-Marcher werden entlang der Linie verteilt und als
//! Pathway-Vorschau angezeigt, bis committet oder abgebrochen wird. Ein
//! weiterer Klick auf eine abgeschlossene Linie berechnet die Vorschau neu.

use super::{
    move_dragged_marchers, preview_distribution, CanvasMode, ModeContext, ModeKind, ModeOutcome,
};
use crate::app::error::CanvasError;
use crate::app::events::{LineEndpoint, ModifiedObject, Modifiers};
use crate::app::surface::CanvasEventKind;
use crate::core::MarcherId;
use crate::shared::{CursorStyle, GraphicHandle, SceneNodeKind};
use drill_canvas_geometry::DistributionTarget;
use glam::Vec2;

const EVENTS: &[CanvasEventKind] = &[
    CanvasEventKind::PointerDown,
    CanvasEventKind::PointerMove,
    CanvasEventKind::ObjectModified,
];

/// Zustand des Linien-Werkzeugs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineState {
    /// Keine Linie
    #[default]
    Idle,
    /// Anker gesetzt, Endpunkt folgt dem Pointer
    Drawing {
        /// Anker
        start: Vec2,
        /// Freier Endpunkt
        end: Vec2,
    },
    /// Linie abgeschlossen, Vorschau wartet auf Commit
    Finalized {
        /// Anker
        start: Vec2,
        /// Endpunkt
        end: Vec2,
    },
}

/// Linien-Werkzeug.
#[derive(Debug, Default)]
pub struct LineMode {
    state: LineState,
    event_marchers: Vec<MarcherId>,
    line_handle: Option<GraphicHandle>,
}

impl LineMode {
    /// Erstellt das Werkzeug im Ruhezustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktueller Zustand.
    pub fn state(&self) -> LineState {
        self.state
    }

    /// Marcher, die verteilt werden.
    pub fn event_marchers(&self) -> &[MarcherId] {
        &self.event_marchers
    }

    /// Start- und Endpunkt der aktuellen Linie.
    pub fn line(&self) -> Option<(Vec2, Vec2)> {
        match self.state {
            LineState::Idle => None,
            LineState::Drawing { start, end } | LineState::Finalized { start, end } => {
                Some((start, end))
            }
        }
    }

    fn capture_selection(&mut self, ctx: &ModeContext<'_>) {
        let selected = ctx.surface.multi_selection();
        if !selected.is_empty() {
            self.event_marchers = selected.to_vec();
        }
    }

    fn draw_line(&mut self, ctx: &mut ModeContext<'_>, start: Vec2, end: Vec2) {
        let kind = SceneNodeKind::Line { start, end };
        match self.line_handle {
            Some(handle) => {
                ctx.surface.scene.update(handle, kind);
            }
            None => self.line_handle = Some(ctx.surface.scene.add(kind, None, true)),
        }
        ctx.surface.scene.request_render();
    }

    fn discard_line(&mut self, ctx: &mut ModeContext<'_>) {
        if let Some(handle) = self.line_handle.take() {
            ctx.surface.scene.remove(handle);
        }
        ctx.surface.clear_pathways();
        self.state = LineState::Idle;
    }

    /// Vorschau während des Zeichnens: Fehler leeren nur die Vorschau.
    fn live_preview(&self, ctx: &mut ModeContext<'_>, start: Vec2, end: Vec2) {
        if let Err(e) =
            preview_distribution(ctx, &self.event_marchers, DistributionTarget::Line { start, end })
        {
            log::debug!("Keine Linien-Vorschau: {}", e);
            ctx.surface.clear_pathways();
        }
    }
}

impl CanvasMode for LineMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Line
    }

    fn name(&self) -> &str {
        "Linie"
    }

    fn status_text(&self) -> &str {
        match self.state {
            LineState::Idle => "Startpunkt der Linie klicken",
            LineState::Drawing { .. } => "Endpunkt klicken (Rechtsklick/Escape: abbrechen)",
            LineState::Finalized { .. } => "Enter: übernehmen, Rechtsklick/Escape: verwerfen",
        }
    }

    fn cursor(&self) -> CursorStyle {
        CursorStyle::Crosshair
    }

    fn bound_events(&self) -> &'static [CanvasEventKind] {
        EVENTS
    }

    fn initiate(&mut self, ctx: &mut ModeContext<'_>) {
        self.state = LineState::Idle;
        self.event_marchers = ctx.surface.multi_selection().to_vec();
        log::debug!("Linien-Werkzeug mit {} Marchern", self.event_marchers.len());
    }

    fn cleanup(&mut self, ctx: &mut ModeContext<'_>) {
        self.discard_line(ctx);
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
            LineState::Idle => {
                self.capture_selection(ctx);
                self.draw_line(ctx, snapped, snapped);
                ctx.surface.scene.group_selection = false;
                self.state = LineState::Drawing {
                    start: snapped,
                    end: snapped,
                };
                Ok(ModeOutcome::InteractionStarted)
            }
            // Linie bleibt bis Commit oder Abbruch bestehen
            LineState::Finalized { start, end } => {
                self.capture_selection(ctx);
                preview_distribution(ctx, &self.event_marchers, DistributionTarget::Line { start, end })?;
                ctx.surface.scene.request_render();
                Ok(ModeOutcome::PreviewUpdated)
            }
            LineState::Drawing { start, .. } => {
                preview_distribution(
                    ctx,
                    &self.event_marchers,
                    DistributionTarget::Line { start, end: snapped },
                )?;
                self.draw_line(ctx, start, snapped);
                ctx.surface.scene.group_selection = true;
                self.state = LineState::Finalized {
                    start,
                    end: snapped,
                };
                log::info!("Linie abgeschlossen: {} -> {}", start, snapped);
                Ok(ModeOutcome::Finalized)
            }
        }
    }

    fn on_pointer_move(
        &mut self,
        ctx: &mut ModeContext<'_>,
        position: Vec2,
    ) -> Result<ModeOutcome, CanvasError> {
        let LineState::Drawing { start, end } = self.state else {
            return Ok(ModeOutcome::Ignored);
        };
        let snapped = ctx.options.snap(position);
        if snapped == end {
            return Ok(ModeOutcome::Handled);
        }
        self.state = LineState::Drawing {
            start,
            end: snapped,
        };
        self.draw_line(ctx, start, snapped);
        self.live_preview(ctx, start, snapped);
        Ok(ModeOutcome::PreviewUpdated)
    }

    fn on_object_modified(
        &mut self,
        ctx: &mut ModeContext<'_>,
        object: &ModifiedObject,
    ) -> Result<ModeOutcome, CanvasError> {
        match (object, self.state) {
            (ModifiedObject::Marchers(moved), state) => {
                let updates = move_dragged_marchers(ctx, moved);
                if updates.is_empty() {
                    return Ok(ModeOutcome::Ignored);
                }
                if let LineState::Drawing { start, end } | LineState::Finalized { start, end } = state
                {
                    self.live_preview(ctx, start, end);
                }
                Ok(ModeOutcome::CommitMoves(updates))
            }
            (
                ModifiedObject::LineEndpoint { endpoint, position },
                LineState::Finalized { start, end },
            ) => {
                let snapped = ctx.options.snap(*position);
                let (start, end) = match endpoint {
                    LineEndpoint::Start => (snapped, end),
                    LineEndpoint::End => (start, snapped),
                };
                preview_distribution(ctx, &self.event_marchers, DistributionTarget::Line { start, end })?;
                self.draw_line(ctx, start, end);
                self.state = LineState::Finalized { start, end };
                Ok(ModeOutcome::PreviewUpdated)
            }
            _ => Ok(ModeOutcome::Ignored),
        }
    }

    fn cancel_interaction(&mut self, ctx: &mut ModeContext<'_>) {
        self.discard_line(ctx);
        ctx.surface.scene.group_selection = true;
    }

    fn has_pending_input(&self) -> bool {
        self.state != LineState::Idle
    }

    fn ready_for_commit(&self) -> bool {
        !matches!(self.state, LineState::Drawing { .. })
    }

    fn on_commit_applied(&mut self, ctx: &mut ModeContext<'_>) {
        self.discard_line(ctx);
    }
}
