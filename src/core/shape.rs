use super::{MarcherId, PageId, ShapeId, ShapePageId};
use drill_canvas_geometry::{PathParseError, ShapePath};
use serde::{Deserialize, Serialize};

/// Benannter, wiederverwendbarer Pfad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    /// Stabile ID
    pub id: ShapeId,
    /// Anzeigename
    #[serde(default)]
    pub name: String,
}

/// Eine Shape, instanziiert auf einer Page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapePage {
    /// Stabile ID
    pub id: ShapePageId,
    /// Zugehörige Shape
    pub shape_id: ShapeId,
    /// Page, auf der die Shape liegt
    pub page_id: PageId,
    /// Pfad als SVG-`d`-String (absolute Kommandos, beginnt mit `M`)
    pub svg_path: String,
}

impl ShapePage {
    /// Liest den gespeicherten Pfad.
    pub fn path(&self) -> Result<ShapePath, PathParseError> {
        ShapePath::parse_svg(&self.svg_path)
    }
}

/// Zuordnung eines Marchers zu einer Ordinal-Position entlang einer ShapePage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapePageMarcher {
    /// ShapePage
    pub shape_page_id: ShapePageId,
    /// Marcher
    pub marcher_id: MarcherId,
    /// Ordinal entlang des Pfads (0 = Pfadanfang)
    pub position_order: usize,
}
