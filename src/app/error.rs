//! Fehlertypen der Canvas-Schicht.

use crate::core::{MarcherId, PageId, ShapePageId};
use crate::shared::GraphicHandle;
use drill_canvas_geometry::{DistributionError, PathParseError, SegmentEditError};

/// Referenzierte Entität existiert nicht (mehr). Wird geloggt und übersprungen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MissingEntity {
    /// Marcher nicht im Roster oder nicht auf der Szene
    #[error("Marcher {0} nicht gefunden")]
    Marcher(MarcherId),
    /// Page nicht im Roster
    #[error("Page {0} nicht gefunden")]
    Page(PageId),
    /// ShapePage nicht auf der aktuellen Page
    #[error("ShapePage {0} nicht gefunden")]
    ShapePage(ShapePageId),
    /// Szenen-Objekt ohne zugeordneten Marcher
    #[error("Szenen-Objekt {0} gehört zu keinem Marcher")]
    Graphic(GraphicHandle),
}

/// Fehler, die ein Canvas-Handler an den Controller meldet.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CanvasError {
    /// Verteilung nicht möglich; nichts wurde verändert
    #[error(transparent)]
    Distribution(#[from] DistributionError),
    /// Segment-Bearbeitung abgelehnt; Pfad unverändert
    #[error("ungültige Segment-Bearbeitung: {0}")]
    InvalidSegmentEdit(#[from] SegmentEditError),
    /// Gespeicherter Pfad nicht lesbar
    #[error("ungültiger Shape-Pfad: {0}")]
    InvalidPath(#[from] PathParseError),
    /// Referenzierte Entität fehlt
    #[error(transparent)]
    MissingEntity(#[from] MissingEntity),
}
