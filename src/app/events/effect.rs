use crate::app::state::SessionId;
use crate::core::{MarcherId, MarcherPageUpdate, PageId, ShapePageId};
use drill_canvas_geometry::PathSegment;
use serde::{Deserialize, Serialize};

/// Commit-Anfrage an die Persistenz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRequest {
    /// Session, deren Abschluss erwartet wird
    pub session: SessionId,
    /// Page der Koordinaten
    pub page_id: PageId,
    /// Tupel {marcher id, x, y}
    pub updates: Vec<MarcherPageUpdate>,
    /// Undo-History-Eintrag anlegen
    pub record_history: bool,
    /// Page-Reihenfolge umkehren (Persistenz-Flag, wird durchgereicht)
    pub reverse_page_order: bool,
}

/// Ergebnis eines Commit-Eintrags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitItemResult {
    /// Marcher
    pub marcher_id: MarcherId,
    /// Erfolgreich gespeichert?
    pub success: bool,
}

/// Ordinal-Zuordnung eines Marchers zu einer Shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeAssignment {
    /// Marcher
    pub marcher_id: MarcherId,
    /// Ordinal entlang des Pfads
    pub position_order: usize,
}

/// Neu anlegen oder bestehende ShapePage aktualisieren.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapePersistKind {
    /// Neue Shape auf der Page anlegen
    Create {
        /// Ziel-Page
        page_id: PageId,
    },
    /// Bestehende ShapePage überschreiben
    Update {
        /// ShapePage
        shape_page_id: ShapePageId,
    },
}

/// Übergabe einer Shape an die Persistenz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapePersistRequest {
    /// Anlegen oder Aktualisieren
    pub kind: ShapePersistKind,
    /// Vollständige Kommando-Folge (beginnt mit Move)
    pub commands: Vec<PathSegment>,
    /// Dieselbe Folge als SVG-`d`-String
    pub svg_path: String,
    /// Marcher-Zuordnungen
    pub marchers: Vec<ShapeAssignment>,
}

/// Ausgehende Anfragen und Benachrichtigungen, die der Host abholt.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEffect {
    /// Der einzeln ausgewählte Marcher hat sich geändert
    SelectedMarcherChanged {
        /// Neuer Marcher oder `None`
        marcher_id: Option<MarcherId>,
    },
    /// Koordinaten an die Persistenz übergeben
    CommitMarcherPages(CommitRequest),
    /// Shape an die Persistenz übergeben
    PersistShapePage(ShapePersistRequest),
}
