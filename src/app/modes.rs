//! Interaktions-Modi des Canvas (Default, Linie, Shape).
//!
//! Jeder Modus implementiert [`CanvasMode`] und wird beim [`ModeManager`]
//! registriert. Der Manager besitzt den Wechsel: `cleanup` des alten Modus
//! ist abgeschlossen, bevor `initiate` des neuen läuft. Dadurch sind zu
//! jedem Zeitpunkt nur die Handler eines Modus gebunden.

mod default_mode;
mod line;
mod shape;

pub use default_mode::DefaultMode;
pub use line::{LineMode, LineState};
pub use shape::{ShapeMode, ShapeState};

use super::error::{CanvasError, MissingEntity};
use super::events::{CanvasKey, ModifiedObject, Modifiers};
use super::surface::{CanvasEventKind, CanvasSurface};
use crate::core::{MarcherId, MarcherPageUpdate, Roster};
use crate::shared::{CursorStyle, FieldOptions, GraphicHandle};
use drill_canvas_geometry::{distribute, Assignment, DistributionTarget, ShapePath};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Art eines Interaktions-Modus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModeKind {
    /// Selektion, Drag und Pan
    #[default]
    Default,
    /// Linien-Werkzeug
    Line,
    /// Shape zeichnen
    Shape,
}

/// Zugriff eines Modus auf Oberfläche, Optionen und Roster.
pub struct ModeContext<'a> {
    /// Canvas-Oberfläche (Szene, Selektion, Bindings)
    pub surface: &'a mut CanvasSurface,
    /// Feld-Optionen (Step-Größe, Vorschau-Stil)
    pub options: &'a FieldOptions,
    /// Zuletzt bestätigter Roster
    pub roster: &'a Roster,
}

/// Fertig gezeichnete Shape samt Verteilung.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDraft {
    /// Pfad (beginnt mit `Move`)
    pub path: ShapePath,
    /// Verteilung der Event-Marcher entlang des Pfads
    pub assignments: Vec<Assignment<MarcherId>>,
}

/// Rückgabe eines Modus-Handlers, steuert die Nacharbeit im Handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeOutcome {
    /// Event nicht relevant für diesen Modus
    Ignored,
    /// Event verarbeitet, keine Nacharbeit
    Handled,
    /// Event an das Standard-Verhalten (Selektion) weiterreichen
    ForwardToDefault,
    /// Neue Interaktion begonnen (neue Linie/Shape)
    InteractionStarted,
    /// Vorschau neu berechnet
    PreviewUpdated,
    /// Geometrie abgeschlossen, Vorschau wartet auf Commit
    Finalized,
    /// Interaktion verworfen
    Cancelled,
    /// Vom Host verschobene Marcher committen (Vorschau ist bereits aktualisiert)
    CommitMoves(Vec<MarcherPageUpdate>),
    /// Shape fertig, an die Persistenz übergeben
    ShapeFinished(ShapeDraft),
}

/// Schnittstelle aller Interaktions-Modi.
///
/// Handler geben reine Ablauf-Informationen zurück ([`ModeOutcome`]);
/// Commits und Effekte erzeugt der aufrufende Handler.
pub trait CanvasMode {
    /// Art des Modus.
    fn kind(&self) -> ModeKind;

    /// Anzeigename.
    fn name(&self) -> &str;

    /// Statuszeile für den aktuellen Zustand.
    fn status_text(&self) -> &str;

    /// Mauszeiger des Modus.
    fn cursor(&self) -> CursorStyle;

    /// Events, an die sich der Modus bindet.
    fn bound_events(&self) -> &'static [CanvasEventKind];

    /// Modus-spezifische Vorbereitung nach dem Wechsel.
    fn initiate(&mut self, ctx: &mut ModeContext<'_>);

    /// Verwirft flüchtige Geometrie beim Verlassen des Modus.
    fn cleanup(&mut self, ctx: &mut ModeContext<'_>);

    /// Primärer Klick.
    fn on_pointer_down(
        &mut self,
        ctx: &mut ModeContext<'_>,
        position: Vec2,
        modifiers: Modifiers,
    ) -> Result<ModeOutcome, CanvasError>;

    /// Mausbewegung.
    fn on_pointer_move(
        &mut self,
        ctx: &mut ModeContext<'_>,
        position: Vec2,
    ) -> Result<ModeOutcome, CanvasError>;

    /// Maustaste losgelassen.
    fn on_pointer_up(
        &mut self,
        _ctx: &mut ModeContext<'_>,
        _position: Vec2,
    ) -> Result<ModeOutcome, CanvasError> {
        Ok(ModeOutcome::Ignored)
    }

    /// Host meldet veränderte Objekte.
    fn on_object_modified(
        &mut self,
        ctx: &mut ModeContext<'_>,
        object: &ModifiedObject,
    ) -> Result<ModeOutcome, CanvasError>;

    /// Taste gedrückt.
    fn on_key_down(
        &mut self,
        _ctx: &mut ModeContext<'_>,
        _key: CanvasKey,
    ) -> Result<ModeOutcome, CanvasError> {
        Ok(ModeOutcome::Ignored)
    }

    /// Bricht die laufende Interaktion ab (Escape / Rechtsklick).
    fn cancel_interaction(&mut self, ctx: &mut ModeContext<'_>);

    /// Läuft gerade eine Eingabe, die Escape zuerst abbrechen soll?
    fn has_pending_input(&self) -> bool;

    /// Darf die aktuelle Vorschau committet werden?
    fn ready_for_commit(&self) -> bool {
        !self.has_pending_input()
    }

    /// Verarbeitet der Modus diese Taste selbst?
    fn consumes_key(&self, _key: CanvasKey) -> bool {
        false
    }

    /// Commit wurde bestätigt; Vorschau ist nun gespeicherter Stand.
    fn on_commit_applied(&mut self, _ctx: &mut ModeContext<'_>) {}
}

/// Verteilt Marcher auf ein Ziel und zeigt die Pathway-Vorschau.
///
/// Bei einem Fehler bleibt die Szene unverändert.
pub(crate) fn preview_distribution(
    ctx: &mut ModeContext<'_>,
    marchers: &[MarcherId],
    target: DistributionTarget<'_>,
) -> Result<Vec<Assignment<MarcherId>>, CanvasError> {
    let positions = ctx.surface.positions_of(marchers);
    let assignments = distribute(&positions, target)?;
    ctx.surface.show_pathways(
        assignments.clone(),
        ctx.options.pathway_style(),
        ctx.options.static_marker_radius,
    );
    Ok(assignments)
}

/// Übernimmt vom Host verschobene Marcher (gesnappt) in die Oberfläche.
///
/// Unbekannte Handles und Marcher werden geloggt und übersprungen.
pub(crate) fn move_dragged_marchers(
    ctx: &mut ModeContext<'_>,
    moved: &[(GraphicHandle, Vec2)],
) -> Vec<MarcherPageUpdate> {
    let mut updates = Vec::with_capacity(moved.len());
    for (handle, position) in moved {
        let Some(marcher_id) = ctx.surface.marcher_for_handle(*handle) else {
            log::warn!("Drag übersprungen: {}", MissingEntity::Graphic(*handle));
            continue;
        };
        let snapped = ctx.options.snap(*position);
        if let Err(e) = ctx.surface.move_marcher(marcher_id, snapped) {
            log::warn!("Drag übersprungen: {}", e);
            continue;
        }
        updates.push(MarcherPageUpdate {
            marcher_id,
            position: snapped,
        });
    }
    if !updates.is_empty() {
        ctx.surface.scene.request_render();
    }
    updates
}

/// Verwaltet registrierte Modi und den aktiven Modus.
pub struct ModeManager {
    modes: Vec<Box<dyn CanvasMode>>,
    active_index: usize,
}

impl Default for ModeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeManager {
    /// Erstellt den Manager mit Default-, Linien- und Shape-Modus.
    /// Aktiv ist der Default-Modus (noch nicht initiiert).
    pub fn new() -> Self {
        let mut manager = Self {
            modes: Vec::new(),
            active_index: 0,
        };
        manager.register(Box::new(DefaultMode::new()));
        manager.register(Box::new(LineMode::new()));
        manager.register(Box::new(ShapeMode::new()));
        manager
    }

    /// Registriert einen Modus. Ein bereits registrierter Typ wird ersetzt.
    pub fn register(&mut self, mode: Box<dyn CanvasMode>) {
        match self.index_of(mode.kind()) {
            Some(i) => self.modes[i] = mode,
            None => self.modes.push(mode),
        }
    }

    /// Initiiert den aktiven Modus (einmalig beim Aufbau des States).
    pub fn activate_initial(&mut self, ctx: &mut ModeContext<'_>) {
        self.initiate_active(ctx);
    }

    /// Wechselt den Modus: erst `cleanup` + Unbind des alten, dann
    /// `initiate` + Bind des neuen. Gibt `false` zurück, wenn der Modus
    /// unbekannt oder bereits aktiv ist.
    pub fn transition(&mut self, kind: ModeKind, ctx: &mut ModeContext<'_>) -> bool {
        let Some(next) = self.index_of(kind) else {
            log::warn!("Modus {:?} ist nicht registriert", kind);
            return false;
        };
        if next == self.active_index {
            return false;
        }

        let old = &mut self.modes[self.active_index];
        let old_kind = old.kind();
        old.cleanup(ctx);
        ctx.surface.bindings.unbind(old_kind);
        ctx.surface.scene.cursor = CursorStyle::Default;

        self.active_index = next;
        self.initiate_active(ctx);
        log::info!("Modus gewechselt: {:?} -> {:?}", old_kind, kind);
        true
    }

    fn initiate_active(&mut self, ctx: &mut ModeContext<'_>) {
        let mode = &mut self.modes[self.active_index];
        mode.initiate(ctx);
        ctx.surface.bindings.bind(mode.kind(), mode.bound_events());
        ctx.surface.scene.cursor = mode.cursor();
    }

    fn index_of(&self, kind: ModeKind) -> Option<usize> {
        self.modes.iter().position(|m| m.kind() == kind)
    }

    /// Art des aktiven Modus.
    pub fn active_kind(&self) -> ModeKind {
        self.active().kind()
    }

    /// Referenz auf den aktiven Modus.
    pub fn active(&self) -> &dyn CanvasMode {
        self.modes[self.active_index].as_ref()
    }

    /// Mutable Referenz auf den aktiven Modus.
    pub fn active_mut(&mut self) -> &mut dyn CanvasMode {
        self.modes[self.active_index].as_mut()
    }

    /// Mutable Referenz auf einen registrierten Modus.
    pub fn mode_mut(&mut self, kind: ModeKind) -> Option<&mut dyn CanvasMode> {
        let i = self.index_of(kind)?;
        Some(self.modes[i].as_mut())
    }
}
