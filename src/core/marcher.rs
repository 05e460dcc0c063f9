use super::{MarcherId, PageId};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Ein Performer mit stabiler Identität. Wird extern verwaltet und hier
/// nur gelesen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marcher {
    /// Stabile ID
    pub id: MarcherId,
    /// Anzeigelabel (Drill-Nummer, z.B. "T3")
    pub drill_number: String,
    /// Optionaler Name
    #[serde(default)]
    pub name: Option<String>,
    /// Optionale Sektion (z.B. "Trumpet")
    #[serde(default)]
    pub section: Option<String>,
}

impl Marcher {
    /// Erstellt einen Marcher ohne Name und Sektion.
    pub fn new(id: MarcherId, drill_number: impl Into<String>) -> Self {
        Self {
            id,
            drill_number: drill_number.into(),
            name: None,
            section: None,
        }
    }
}

/// Koordinate eines Marchers auf einer Page.
///
/// Pro (marcher_id, page_id) existiert genau ein Eintrag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarcherPage {
    /// Marcher
    pub marcher_id: MarcherId,
    /// Page
    pub page_id: PageId,
    /// Position auf dem Feld (Canvas-Koordinaten)
    pub position: Vec2,
}

/// Einzelnes Commit-Tupel {marcher id, x, y}.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarcherPageUpdate {
    /// Marcher
    pub marcher_id: MarcherId,
    /// Neue Position
    pub position: Vec2,
}
