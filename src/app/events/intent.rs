use super::CommitItemResult;
use crate::app::modes::ModeKind;
use crate::app::state::SessionId;
use crate::core::{MarcherId, PageId, Roster, ShapePageId};
use crate::shared::{FieldOptions, GraphicHandle};
use drill_canvas_geometry::{PointRef, SvgCommand};
use glam::Vec2;

/// Maustaste eines Pointer-Events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Linke Taste
    Primary,
    /// Rechte Taste (Abbrechen)
    Secondary,
    /// Mittlere Taste
    Middle,
}

/// Gehaltene Modifier-Tasten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Ctrl
    pub ctrl: bool,
    /// Meta / Cmd
    pub meta: bool,
    /// Alt
    pub alt: bool,
    /// Shift
    pub shift: bool,
}

impl Modifiers {
    /// Ctrl oder Meta gehalten (plattformübergreifende Mehrfachauswahl).
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Tastatur-Eingabe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasKey {
    /// Escape (gestuft: Abbrechen, dann zurück in den Default-Modus)
    Escape,
    /// Enter (Shape abschließen / Vorschau committen)
    Enter,
    /// Alle anderen Tasten
    Other(char),
}

/// Endpunkt der Linie des Linien-Werkzeugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEndpoint {
    /// Anker
    Start,
    /// Freier Endpunkt
    End,
}

/// Welche Shape ein Punkt-Drag betrifft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeRef {
    /// Die gerade gezeichnete Shape im Shape-Modus
    Draft,
    /// Eine gespeicherte ShapePage der aktuellen Page
    Page(ShapePageId),
}

/// Vom Host gemeldete Objekt-Änderung (Drag beendet).
#[derive(Debug, Clone, PartialEq)]
pub enum ModifiedObject {
    /// Marcher-Objekte wurden verschoben (Handle, neue Position)
    Marchers(Vec<(GraphicHandle, Vec2)>),
    /// Ein Linien-Endpunkt wurde gezogen
    LineEndpoint {
        /// Welcher Endpunkt
        endpoint: LineEndpoint,
        /// Neue Position (ungesnappt)
        position: Vec2,
    },
    /// Ein Kontroll- oder Endpunkt einer Shape wurde gezogen
    ShapePoint {
        /// Betroffene Shape
        shape: ShapeRef,
        /// Segment-Index
        segment: usize,
        /// Punkt im Segment
        point: PointRef,
        /// Neue Position (ungesnappt)
        position: Vec2,
    },
}

/// Canvas-Intent: Eingaben aus Host/UI ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum CanvasIntent {
    /// Maustaste gedrückt
    PointerDown {
        /// Canvas-Position
        position: Vec2,
        /// Taste
        button: PointerButton,
        /// Modifier
        modifiers: Modifiers,
    },
    /// Maus bewegt
    PointerMoved {
        /// Canvas-Position
        position: Vec2,
    },
    /// Maustaste losgelassen
    PointerUp {
        /// Canvas-Position
        position: Vec2,
        /// Taste
        button: PointerButton,
    },
    /// Taste gedrückt
    KeyPressed {
        /// Taste
        key: CanvasKey,
    },
    /// Host meldet veränderte Objekte
    ObjectModified {
        /// Änderung
        object: ModifiedObject,
    },
    /// Host meldet neue Objekt-Selektion
    SelectionChanged {
        /// Handles aller selektierten Objekte
        handles: Vec<GraphicHandle>,
    },
    /// Externe Auswahl eines Marchers (`None` = Auswahl aufheben)
    SelectMarcherRequested {
        /// Marcher
        marcher_id: Option<MarcherId>,
    },
    /// Interaktions-Modus wechseln
    ModeRequested {
        /// Ziel-Modus
        mode: ModeKind,
    },
    /// Aktuelle Vorschau committen
    CommitRequested,
    /// Persistenz meldet Ergebnis eines Commits
    CommitCompleted {
        /// Session, mit der der Commit ausgelöst wurde
        session: SessionId,
        /// Ergebnis pro Marcher
        results: Vec<CommitItemResult>,
    },
    /// Neuer Roster-Snapshot vom Host
    RosterLoaded {
        /// Snapshot
        roster: Roster,
    },
    /// Andere Page anzeigen
    PageSelected {
        /// Page
        page_id: PageId,
    },
    /// Standard-Segment an eine ShapePage anhängen
    ShapeSegmentAppendRequested {
        /// ShapePage
        shape_page_id: ShapePageId,
    },
    /// Segment einer ShapePage löschen (`None` = letztes)
    ShapeSegmentDeleteRequested {
        /// ShapePage
        shape_page_id: ShapePageId,
        /// Segment-Index
        index: Option<usize>,
    },
    /// Kommando-Typ eines Segments ändern
    ShapeSegmentCommandChanged {
        /// ShapePage
        shape_page_id: ShapePageId,
        /// Segment-Index
        index: usize,
        /// Neues Kommando
        command: SvgCommand,
    },
    /// Feld-Optionen wurden geändert
    OptionsChanged {
        /// Neue Optionen
        options: FieldOptions,
    },
    /// Canvas wird abgebaut
    TeardownRequested,
}
