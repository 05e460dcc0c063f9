use super::{CanvasKey, CommitItemResult, Modifiers, ModifiedObject};
use crate::app::modes::ModeKind;
use crate::app::state::SessionId;
use crate::core::{MarcherId, PageId, Roster, ShapePageId};
use crate::shared::{FieldOptions, GraphicHandle};
use drill_canvas_geometry::{PointRef, SvgCommand};
use glam::Vec2;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum CanvasCommand {
    /// Interaktions-Modus wechseln (cleanup alt, dann initiate neu)
    SetMode { mode: ModeKind },
    /// Laufende Interaktion des aktiven Modus abbrechen
    CancelInteraction,
    /// Primärer Klick an den aktiven Modus
    PointerDown { position: Vec2, modifiers: Modifiers },
    /// Mausbewegung an den aktiven Modus
    PointerMove { position: Vec2 },
    /// Maustaste losgelassen
    PointerUp { position: Vec2 },
    /// Taste an den aktiven Modus
    KeyDown { key: CanvasKey },
    /// Objekt-Änderung an den aktiven Modus
    ObjectModified { object: ModifiedObject },
    /// Host-Selektion übernehmen
    ApplySelection { handles: Vec<GraphicHandle> },
    /// Marcher extern auswählen
    SelectMarcher { marcher_id: Option<MarcherId> },
    /// Vorschau als Commit an die Persistenz geben
    CommitPreview,
    /// Commit-Ergebnis anwenden (oder verwerfen, wenn veraltet)
    ApplyCommitResult {
        session: SessionId,
        results: Vec<CommitItemResult>,
    },
    /// Standard-Segment an ShapePage anhängen
    AppendShapeSegment { shape_page_id: ShapePageId },
    /// Segment einer ShapePage löschen
    DeleteShapeSegment {
        shape_page_id: ShapePageId,
        index: Option<usize>,
    },
    /// Kommando-Typ eines Segments ändern
    UpdateShapeSegment {
        shape_page_id: ShapePageId,
        index: usize,
        command: SvgCommand,
    },
    /// Punkt einer gespeicherten Shape verschieben
    MoveShapePoint {
        shape_page_id: ShapePageId,
        segment: usize,
        point: PointRef,
        position: Vec2,
    },
    /// Roster übernehmen und Szene synchronisieren
    LoadRoster { roster: Roster },
    /// Andere Page anzeigen
    SelectPage { page_id: PageId },
    /// Feld-Optionen übernehmen
    ApplyOptions { options: FieldOptions },
    /// Szene abbauen
    Teardown,
}
