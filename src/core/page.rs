use super::PageId;
use serde::{Deserialize, Serialize};

/// Eintrag der Zeitleiste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Stabile ID
    pub id: PageId,
    /// Position in der Zeitleiste (0-basiert)
    pub order: u32,
    /// Anzeigename (z.B. "1", "2A")
    #[serde(default)]
    pub name: String,
}
