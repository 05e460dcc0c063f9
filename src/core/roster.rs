//! Lese-Snapshot, den der Host an den Canvas übergibt.
//!
//! Der Roster wird nach einem erfolgreichen Commit lokal nachgezogen, damit
//! der Canvas immer den zuletzt bestätigten Stand kennt.

use super::{
    Marcher, MarcherId, MarcherPage, MarcherPageUpdate, Page, PageId, Shape, ShapePage,
    ShapePageId, ShapePageMarcher,
};
use anyhow::Context;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pages, Marcher, Koordinaten und Shapes der aktuellen Show.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Alle Pages (beliebige Reihenfolge, sortiert wird über `order`)
    pub pages: Vec<Page>,
    /// Alle Marcher
    pub marchers: Vec<Marcher>,
    /// Koordinaten aller Marcher auf allen Pages
    pub marcher_pages: Vec<MarcherPage>,
    /// Wiederverwendbare Shapes
    #[serde(default)]
    pub shapes: Vec<Shape>,
    /// Shape-Instanzen pro Page
    #[serde(default)]
    pub shape_pages: Vec<ShapePage>,
    /// Marcher-Zuordnungen der Shape-Instanzen
    #[serde(default)]
    pub shape_page_marchers: Vec<ShapePageMarcher>,
    /// Aktuell angezeigte Page
    #[serde(default)]
    pub current_page_id: Option<PageId>,
}

impl Roster {
    /// Liest einen Roster aus JSON.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Roster-JSON konnte nicht gelesen werden")
    }

    /// Gibt die aktuell angezeigte Page zurück.
    pub fn current_page(&self) -> Option<&Page> {
        let id = self.current_page_id?;
        self.pages.iter().find(|p| p.id == id)
    }

    /// Sucht einen Marcher per ID.
    pub fn marcher(&self, id: MarcherId) -> Option<&Marcher> {
        self.marchers.iter().find(|m| m.id == id)
    }

    /// Sucht eine Page per ID.
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    /// Koordinaten aller Marcher auf der Page.
    pub fn marcher_pages_for(&self, page_id: PageId) -> impl Iterator<Item = &MarcherPage> + '_ {
        self.marcher_pages
            .iter()
            .filter(move |mp| mp.page_id == page_id)
    }

    /// Position eines Marchers auf einer Page.
    pub fn position_of(&self, marcher_id: MarcherId, page_id: PageId) -> Option<Vec2> {
        self.marcher_pages
            .iter()
            .find(|mp| mp.marcher_id == marcher_id && mp.page_id == page_id)
            .map(|mp| mp.position)
    }

    /// Übernimmt bestätigte Koordinaten für eine Page.
    ///
    /// Existiert noch kein Eintrag für (Marcher, Page), wird einer angelegt.
    /// Unbekannte Marcher werden übersprungen. Gibt die Anzahl der
    /// übernommenen Koordinaten zurück.
    pub fn apply_positions(&mut self, page_id: PageId, updates: &[MarcherPageUpdate]) -> usize {
        let mut applied = 0;
        for update in updates {
            if self.marcher(update.marcher_id).is_none() {
                log::warn!(
                    "Commit für unbekannten Marcher {} übersprungen",
                    update.marcher_id
                );
                continue;
            }
            match self
                .marcher_pages
                .iter_mut()
                .find(|mp| mp.marcher_id == update.marcher_id && mp.page_id == page_id)
            {
                Some(entry) => entry.position = update.position,
                None => self.marcher_pages.push(MarcherPage {
                    marcher_id: update.marcher_id,
                    page_id,
                    position: update.position,
                }),
            }
            applied += 1;
        }
        applied
    }

    /// Shape-Instanzen auf der Page.
    pub fn shape_pages_for(&self, page_id: PageId) -> impl Iterator<Item = &ShapePage> + '_ {
        self.shape_pages
            .iter()
            .filter(move |sp| sp.page_id == page_id)
    }

    /// Zugeordnete Marcher einer ShapePage, sortiert nach Ordinal.
    pub fn shape_marchers(&self, shape_page_id: ShapePageId) -> Vec<MarcherId> {
        let mut entries: Vec<_> = self
            .shape_page_marchers
            .iter()
            .filter(|spm| spm.shape_page_id == shape_page_id)
            .collect();
        entries.sort_by_key(|spm| spm.position_order);
        entries.into_iter().map(|spm| spm.marcher_id).collect()
    }
}
