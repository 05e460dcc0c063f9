//! Default-Modus: Selektion, Marcher-Drag und Canvas-Pan mit Alt.

use super::{move_dragged_marchers, CanvasMode, ModeContext, ModeKind, ModeOutcome};
use crate::app::error::CanvasError;
use crate::app::events::{ModifiedObject, Modifiers};
use crate::app::surface::CanvasEventKind;
use crate::shared::CursorStyle;
use glam::Vec2;

const EVENTS: &[CanvasEventKind] = &[
    CanvasEventKind::PointerDown,
    CanvasEventKind::PointerMove,
    CanvasEventKind::PointerUp,
    CanvasEventKind::ObjectModified,
];

/// Selektion und direktes Verschieben von Marchern.
#[derive(Debug, Default)]
pub struct DefaultMode {
    /// Letzte Pointer-Position während eines Pans
    pan_anchor: Option<Vec2>,
}

impl DefaultMode {
    /// Erstellt den Modus im Ruhezustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Läuft gerade ein Pan?
    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }
}

impl CanvasMode for DefaultMode {
    fn kind(&self) -> ModeKind {
        ModeKind::Default
    }

    fn name(&self) -> &str {
        "Auswahl"
    }

    fn status_text(&self) -> &str {
        if self.is_panning() {
            "Canvas verschieben"
        } else {
            "Marcher auswählen oder verschieben (Alt+Ziehen: Canvas verschieben)"
        }
    }

    fn cursor(&self) -> CursorStyle {
        if self.is_panning() {
            CursorStyle::Grabbing
        } else {
            CursorStyle::Default
        }
    }

    fn bound_events(&self) -> &'static [CanvasEventKind] {
        EVENTS
    }

    fn initiate(&mut self, ctx: &mut ModeContext<'_>) {
        self.pan_anchor = None;
        ctx.surface.scene.group_selection = true;
    }

    fn cleanup(&mut self, _ctx: &mut ModeContext<'_>) {
        self.pan_anchor = None;
    }

    fn on_pointer_down(
        &mut self,
        ctx: &mut ModeContext<'_>,
        position: Vec2,
        modifiers: Modifiers,
    ) -> Result<ModeOutcome, CanvasError> {
        if !modifiers.alt {
            // Selektion übernimmt der Host und meldet sie per SelectionChanged
            return Ok(ModeOutcome::Ignored);
        }
        self.pan_anchor = Some(position);
        ctx.surface.scene.group_selection = false;
        ctx.surface.scene.cursor = CursorStyle::Grabbing;
        Ok(ModeOutcome::Handled)
    }

    fn on_pointer_move(
        &mut self,
        ctx: &mut ModeContext<'_>,
        position: Vec2,
    ) -> Result<ModeOutcome, CanvasError> {
        let Some(anchor) = self.pan_anchor else {
            return Ok(ModeOutcome::Ignored);
        };
        ctx.surface.pan_by(position - anchor);
        self.pan_anchor = Some(position);
        Ok(ModeOutcome::Handled)
    }

    fn on_pointer_up(
        &mut self,
        ctx: &mut ModeContext<'_>,
        _position: Vec2,
    ) -> Result<ModeOutcome, CanvasError> {
        if self.pan_anchor.take().is_none() {
            return Ok(ModeOutcome::Ignored);
        }
        ctx.surface.scene.group_selection = true;
        ctx.surface.scene.cursor = CursorStyle::Default;
        Ok(ModeOutcome::Handled)
    }

    fn on_object_modified(
        &mut self,
        ctx: &mut ModeContext<'_>,
        object: &ModifiedObject,
    ) -> Result<ModeOutcome, CanvasError> {
        let ModifiedObject::Marchers(moved) = object else {
            return Ok(ModeOutcome::Ignored);
        };

        let updates = move_dragged_marchers(ctx, moved);
        if updates.is_empty() {
            return Ok(ModeOutcome::Ignored);
        }
        Ok(ModeOutcome::CommitMoves(updates))
    }

    fn cancel_interaction(&mut self, ctx: &mut ModeContext<'_>) {
        if self.pan_anchor.take().is_some() {
            ctx.surface.scene.cursor = CursorStyle::Default;
        }
        ctx.surface.scene.group_selection = true;
    }

    fn has_pending_input(&self) -> bool {
        self.is_panning()
    }
}
