//! Fehlertypen der Geometrie-Schicht.

use crate::path::SvgCommand;

/// Fehler der Verteilungs-Engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistributionError {
    /// Weniger als zwei Marcher fuer eine Linien-/Shape-Verteilung
    #[error("Verteilung benoetigt mindestens 2 Marcher, gefunden: {found}")]
    InsufficientMarchers {
        /// Anzahl der tatsaechlich verfuegbaren Marcher
        found: usize,
    },
}

/// Abgelehnte Bearbeitung eines Shape-Pfads. Der Pfad bleibt unveraendert.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SegmentEditError {
    /// Das fuehrende Move-Kommando ist kein loeschbares Segment
    #[error("das fuehrende Move-Kommando kann nicht entfernt werden")]
    RemoveLeadingMove,
    /// Index zeigt hinter das Pfadende
    #[error("Segment-Index {index} ausserhalb des Pfads (Laenge {len})")]
    IndexOutOfRange {
        /// Angefragter Index
        index: usize,
        /// Aktuelle Kommando-Anzahl
        len: usize,
    },
    /// Kommando ist an dieser Position nicht zulaessig
    #[error("Kommando {command:?} ist an Position {index} nicht erlaubt")]
    CommandNotAllowed {
        /// Abgelehntes Kommando
        command: SvgCommand,
        /// Zielposition im Pfad
        index: usize,
    },
    /// Punktanzahl passt nicht zum Kommando
    #[error("Kommando {command:?} erwartet {expected} Kontrollpunkte, erhalten: {found}")]
    ArityMismatch {
        /// Kommando des Segments
        command: SvgCommand,
        /// Erwartete Kontrollpunkt-Anzahl
        expected: usize,
        /// Uebergebene Kontrollpunkt-Anzahl
        found: usize,
    },
    /// Punkt-Referenz existiert im Segment nicht
    #[error("Segment {segment} hat keinen Punkt {point}")]
    PointOutOfRange {
        /// Segment-Index
        segment: usize,
        /// Punkt-Index innerhalb des Segments
        point: usize,
    },
}

/// Fehler beim Einlesen eines SVG-Pfad-Strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathParseError {
    /// Leerer String
    #[error("leerer Pfad")]
    Empty,
    /// Unbekannter oder relativer Kommando-Buchstabe
    #[error("unbekanntes Pfad-Kommando '{0}'")]
    UnknownCommand(char),
    /// Zahl konnte nicht gelesen werden
    #[error("ungueltige Koordinate '{0}'")]
    InvalidNumber(String),
    /// Kommando hat zu wenige Koordinaten
    #[error("Kommando '{command}' erwartet {expected} Koordinaten")]
    MissingCoordinates {
        /// Kommando-Buchstabe
        command: char,
        /// Erwartete Anzahl Einzelwerte
        expected: usize,
    },
    /// Struktur verletzt die Pfad-Invarianten
    #[error(transparent)]
    Segment(#[from] SegmentEditError),
}
