//! Feature-Handler für CanvasCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod commit;
pub mod mode;
pub mod pointer;
pub mod roster;
pub mod selection;
pub mod shape;
