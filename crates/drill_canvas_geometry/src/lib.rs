//! Reine Geometrie fuer den Drill-Canvas-Editor.
//!
//! Enthaelt keinen Interaktions-Zustand:
//! - `path`        : SVG-artige Pfad-Kommandos und das `ShapePath`-Modell
//! - `segment_edit`: Segment-Editor (Anhaengen, Loeschen, Typ-Wechsel)
//! - `sampling`    : Bézier-Auswertung und Arc-Length-Resampling
//! - `snap`        : Quantisierung auf das Step-Raster
//! - `distribution`: ordnungserhaltende Verteilung von Marchern auf Linie/Pfad

pub mod distribution;
mod error;
pub mod path;
pub mod sampling;
mod segment_edit;
pub mod snap;

pub use distribution::{
    assign_in_order, classify_line, classify_path, distribute, distribute_on_line, distribute_on_path,
    line_points, sort_by_direction, Assignment, DistributionTarget, SortAxis, SortDirection,
};
pub use error::{DistributionError, PathParseError, SegmentEditError};
pub use path::{PathSegment, ShapePath, SvgCommand, CURVE_SAMPLES};
pub use segment_edit::PointRef;
pub use snap::snap_to_step;
