//! Core-Domänentypen: Marcher, Pages, Koordinaten, Shapes und der Roster-Snapshot.

mod ids;
mod marcher;
mod page;
/// Roster: Lese-Snapshot aller Pages, Marcher und Koordinaten
pub mod roster;
mod shape;

pub use ids::{MarcherId, PageId, ShapeId, ShapePageId};
pub use marcher::{Marcher, MarcherPage, MarcherPageUpdate};
pub use page::Page;
pub use roster::Roster;
pub use shape::{Shape, ShapePage, ShapePageMarcher};
