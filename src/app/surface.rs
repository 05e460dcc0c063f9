//! Canvas-Oberfläche: Marcher-Registry, Selektion, Shapes und Event-Bindings.
//!
//! Alle Änderungen an der Marcher-Sammlung laufen über
//! [`CanvasSurface::apply_marcher_change`]; Modi mutieren sie nie direkt.

mod bindings;
mod pathways;

pub use bindings::{CanvasEventKind, EventBindings};
pub use pathways::{Pathway, PathwayPreview};

use super::error::MissingEntity;
use crate::core::{Marcher, MarcherId, Roster, ShapeId, ShapePageId};
use crate::shared::{GraphicHandle, SceneGraph, SceneNodeKind};
use drill_canvas_geometry::ShapePath;
use glam::Vec2;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Marcher auf der Szene der aktiven Page.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasMarcher {
    /// Stabile Identität (gleichzeitig Tag des Szenen-Objekts)
    pub marcher_id: MarcherId,
    /// Anzeigelabel
    pub drill_number: String,
    /// Aktuelle Koordinate
    pub position: Vec2,
    /// Szenen-Objekt
    pub handle: GraphicHandle,
}

/// Einzige Mutationsart für die Marcher-Sammlung.
#[derive(Debug, Clone, Copy)]
pub enum MarcherChange<'a> {
    /// Marcher erscheint auf der Szene
    Add {
        /// Stammdaten
        marcher: &'a Marcher,
        /// Koordinate
        position: Vec2,
    },
    /// Koordinate neu setzen (Objekt bleibt bestehen)
    Move {
        /// Marcher
        marcher_id: MarcherId,
        /// Neue Koordinate
        position: Vec2,
    },
    /// Marcher verlässt die Szene
    Remove {
        /// Marcher
        marcher_id: MarcherId,
    },
}

/// Ergebnis einer Synchronisation mit dem Roster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// Neu angelegte CanvasMarcher
    pub created: usize,
    /// Bestehende CanvasMarcher mit aktualisierter Koordinate
    pub updated: usize,
    /// Entfernte CanvasMarcher
    pub removed: usize,
    /// Übersprungene Einträge
    pub missing: Vec<MissingEntity>,
}

/// Ergebnis einer Host-Selektion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionUpdate {
    /// Neuer Einzel-Marcher (oder `None`) muss veröffentlicht werden
    Publish(Option<MarcherId>),
    /// Einzel-Auswahl bleibt wie sie ist
    Unchanged,
}

/// Gespeicherte Shape der aktiven Page.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasShape {
    /// ShapePage
    pub shape_page_id: ShapePageId,
    /// Zugehörige Shape
    pub shape_id: ShapeId,
    /// Bearbeitbarer Pfad
    pub path: ShapePath,
    /// Zugeordnete Marcher in Ordinal-Reihenfolge
    pub marchers: Vec<MarcherId>,
    /// Szenen-Objekt
    pub handle: GraphicHandle,
}

#[derive(Debug, Clone, Default)]
struct SurfaceSelection {
    selected_marcher: Option<MarcherId>,
    multi: Vec<MarcherId>,
}

/// Logische Oberfläche über der Szene des Render-Hosts.
#[derive(Debug, Default)]
pub struct CanvasSurface {
    /// Szene, aus der der Host zeichnet
    pub scene: SceneGraph,
    /// Gebundene Modus-Handler
    pub bindings: EventBindings,
    marchers: IndexMap<MarcherId, CanvasMarcher>,
    handle_index: HashMap<GraphicHandle, MarcherId>,
    selection: SurfaceSelection,
    shapes: IndexMap<ShapePageId, CanvasShape>,
    preview: PathwayPreview,
    viewport_offset: Vec2,
}

impl CanvasSurface {
    /// Erstellt eine leere Oberfläche.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Marcher-Registry ─────────────────────────────────────────

    /// Wendet eine Änderung auf die Marcher-Sammlung an.
    ///
    /// `Add` für einen bereits vorhandenen Marcher wirkt wie `Move`, damit
    /// pro Marcher immer genau ein CanvasMarcher existiert.
    pub fn apply_marcher_change(&mut self, change: MarcherChange<'_>) -> Result<(), MissingEntity> {
        match change {
            MarcherChange::Add { marcher, position } => {
                if self.marchers.contains_key(&marcher.id) {
                    return self.apply_marcher_change(MarcherChange::Move {
                        marcher_id: marcher.id,
                        position,
                    });
                }
                let handle = self.scene.add(
                    SceneNodeKind::MarcherDot {
                        position,
                        label: marcher.drill_number.clone(),
                    },
                    Some(marcher.id),
                    true,
                );
                self.handle_index.insert(handle, marcher.id);
                self.marchers.insert(
                    marcher.id,
                    CanvasMarcher {
                        marcher_id: marcher.id,
                        drill_number: marcher.drill_number.clone(),
                        position,
                        handle,
                    },
                );
            }
            MarcherChange::Move {
                marcher_id,
                position,
            } => {
                let entry = self
                    .marchers
                    .get_mut(&marcher_id)
                    .ok_or(MissingEntity::Marcher(marcher_id))?;
                entry.position = position;
                self.scene.update(
                    entry.handle,
                    SceneNodeKind::MarcherDot {
                        position,
                        label: entry.drill_number.clone(),
                    },
                );
            }
            MarcherChange::Remove { marcher_id } => {
                let entry = self
                    .marchers
                    .shift_remove(&marcher_id)
                    .ok_or(MissingEntity::Marcher(marcher_id))?;
                self.handle_index.remove(&entry.handle);
                self.scene.remove(entry.handle);
                self.selection.multi.retain(|id| *id != marcher_id);
                if self.selection.selected_marcher == Some(marcher_id) {
                    self.selection.selected_marcher = None;
                }
            }
        }
        Ok(())
    }

    /// Setzt die Koordinate eines CanvasMarchers.
    pub fn move_marcher(&mut self, marcher_id: MarcherId, position: Vec2) -> Result<(), MissingEntity> {
        self.apply_marcher_change(MarcherChange::Move {
            marcher_id,
            position,
        })
    }

    /// Alle CanvasMarcher in Einfüge-Reihenfolge.
    pub fn marchers(&self) -> impl Iterator<Item = &CanvasMarcher> + '_ {
        self.marchers.values()
    }

    /// CanvasMarcher eines Marchers.
    pub fn marcher(&self, marcher_id: MarcherId) -> Option<&CanvasMarcher> {
        self.marchers.get(&marcher_id)
    }

    /// Anzahl der CanvasMarcher.
    pub fn marcher_count(&self) -> usize {
        self.marchers.len()
    }

    /// Löst ein Szenen-Handle zum Marcher auf.
    pub fn marcher_for_handle(&self, handle: GraphicHandle) -> Option<MarcherId> {
        self.handle_index.get(&handle).copied()
    }

    /// Aktuelle Koordinaten der angegebenen Marcher. Fehlende werden geloggt
    /// und übersprungen.
    pub fn positions_of(&self, marcher_ids: &[MarcherId]) -> Vec<(MarcherId, Vec2)> {
        marcher_ids
            .iter()
            .filter_map(|id| match self.marchers.get(id) {
                Some(m) => Some((*id, m.position)),
                None => {
                    log::warn!("{}", MissingEntity::Marcher(*id));
                    None
                }
            })
            .collect()
    }

    /// Gleicht die CanvasMarcher mit den MarcherPages der aktuellen Page ab.
    ///
    /// Vorhandene Marcher werden verschoben (nie neu angelegt), Marcher ohne
    /// Koordinate auf der Page verlassen die Szene.
    pub fn sync_marchers(&mut self, roster: &Roster) -> SyncReport {
        let mut report = SyncReport::default();
        let mut seen: Vec<MarcherId> = Vec::new();

        if let Some(page_id) = roster.current_page_id {
            for marcher_page in roster.marcher_pages_for(page_id) {
                let Some(marcher) = roster.marcher(marcher_page.marcher_id) else {
                    let missing = MissingEntity::Marcher(marcher_page.marcher_id);
                    log::warn!("Sync übersprungen: {}", missing);
                    report.missing.push(missing);
                    continue;
                };
                let existed = self.marchers.contains_key(&marcher.id);
                let change = MarcherChange::Add {
                    marcher,
                    position: marcher_page.position,
                };
                if self.apply_marcher_change(change).is_ok() {
                    if existed {
                        report.updated += 1;
                    } else {
                        report.created += 1;
                    }
                    seen.push(marcher.id);
                }
            }
        } else {
            log::warn!("Keine aktuelle Page im Roster, Szene wird geleert");
        }

        let stale: Vec<MarcherId> = self
            .marchers
            .keys()
            .filter(|id| !seen.contains(id))
            .copied()
            .collect();
        for marcher_id in stale {
            if self
                .apply_marcher_change(MarcherChange::Remove { marcher_id })
                .is_ok()
            {
                report.removed += 1;
            }
        }

        self.raise_marchers();
        self.scene.request_render();
        log::debug!(
            "Marcher-Sync: {} neu, {} aktualisiert, {} entfernt, {} fehlend",
            report.created,
            report.updated,
            report.removed,
            report.missing.len()
        );
        report
    }

    /// Holt alle Marcher-Objekte über Vorschau und Shapes.
    pub(crate) fn raise_marchers(&mut self) {
        let handles: Vec<GraphicHandle> = self.marchers.values().map(|m| m.handle).collect();
        for handle in handles {
            self.scene.bring_to_front(handle);
        }
    }

    // ── Selektion ────────────────────────────────────────────────

    /// Übernimmt die Selektion des Hosts.
    ///
    /// Genau ein Marcher-Objekt → Veröffentlichen; leere Selektion →
    /// `None` veröffentlichen; mehrere Objekte → Einzel-Auswahl unverändert.
    pub fn apply_selection(&mut self, handles: &[GraphicHandle]) -> SelectionUpdate {
        let mut multi = Vec::with_capacity(handles.len());
        for handle in handles {
            match self.marcher_for_handle(*handle) {
                Some(id) => {
                    if !multi.contains(&id) {
                        multi.push(id);
                    }
                }
                None => log::debug!("{}", MissingEntity::Graphic(*handle)),
            }
        }
        self.selection.multi = multi;

        match handles {
            [] => {
                self.selection.selected_marcher = None;
                SelectionUpdate::Publish(None)
            }
            [single] => match self.marcher_for_handle(*single) {
                Some(id) => {
                    self.selection.selected_marcher = Some(id);
                    SelectionUpdate::Publish(Some(id))
                }
                None => SelectionUpdate::Unchanged,
            },
            _ => SelectionUpdate::Unchanged,
        }
    }

    /// Einzeln ausgewählter Marcher.
    pub fn selected_marcher(&self) -> Option<MarcherId> {
        self.selection.selected_marcher
    }

    /// Alle selektierten Marcher (Gruppen-Selektion).
    pub fn multi_selection(&self) -> &[MarcherId] {
        &self.selection.multi
    }

    /// Externe Auswahl: markiert das Objekt des Marchers als aktiv.
    pub fn select_marcher(&mut self, marcher_id: Option<MarcherId>) -> Result<(), MissingEntity> {
        let Some(id) = marcher_id else {
            self.selection.selected_marcher = None;
            self.selection.multi.clear();
            self.scene.set_active_object(None);
            self.scene.request_render();
            return Ok(());
        };
        let handle = self
            .marchers
            .get(&id)
            .map(|m| m.handle)
            .ok_or(MissingEntity::Marcher(id))?;
        self.selection.selected_marcher = Some(id);
        self.selection.multi = vec![id];
        self.scene.set_active_object(Some(handle));
        self.scene.request_render();
        Ok(())
    }

    // ── Shapes ───────────────────────────────────────────────────

    /// Lädt alle ShapePages der aktuellen Page in die Szene.
    ///
    /// Unlesbare Pfade werden geloggt und übersprungen.
    pub fn load_shapes(&mut self, roster: &Roster) -> usize {
        let old: Vec<GraphicHandle> = self.shapes.values().map(|s| s.handle).collect();
        for handle in old {
            self.scene.remove(handle);
        }
        self.shapes.clear();

        let Some(page_id) = roster.current_page_id else {
            return 0;
        };
        for shape_page in roster.shape_pages_for(page_id) {
            let path = match shape_page.path() {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("ShapePage {} übersprungen: {}", shape_page.id, e);
                    continue;
                }
            };
            let handle = self.scene.add(shape_node(&path), None, true);
            self.shapes.insert(
                shape_page.id,
                CanvasShape {
                    shape_page_id: shape_page.id,
                    shape_id: shape_page.shape_id,
                    path,
                    marchers: roster.shape_marchers(shape_page.id),
                    handle,
                },
            );
        }
        self.raise_marchers();
        self.shapes.len()
    }

    /// Gespeicherte Shape der aktiven Page.
    pub fn shape(&self, shape_page_id: ShapePageId) -> Option<&CanvasShape> {
        self.shapes.get(&shape_page_id)
    }

    /// Alle gespeicherten Shapes der aktiven Page.
    pub fn shapes(&self) -> impl Iterator<Item = &CanvasShape> + '_ {
        self.shapes.values()
    }

    /// Ersetzt den Pfad einer Shape und aktualisiert ihr Szenen-Objekt.
    pub fn set_shape_path(
        &mut self,
        shape_page_id: ShapePageId,
        path: ShapePath,
    ) -> Result<(), MissingEntity> {
        let shape = self
            .shapes
            .get_mut(&shape_page_id)
            .ok_or(MissingEntity::ShapePage(shape_page_id))?;
        self.scene.update(shape.handle, shape_node(&path));
        shape.path = path;
        self.scene.request_render();
        Ok(())
    }

    // ── Viewport ─────────────────────────────────────────────────

    /// Verschiebt den Viewport.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.viewport_offset += delta;
        self.scene.request_render();
    }

    /// Aktueller Viewport-Versatz.
    pub fn viewport_offset(&self) -> Vec2 {
        self.viewport_offset
    }

    /// Entfernt alle Objekte und setzt die Oberfläche zurück.
    pub fn teardown(&mut self) {
        self.scene.clear();
        self.marchers.clear();
        self.handle_index.clear();
        self.shapes.clear();
        self.preview = PathwayPreview::default();
        self.selection = SurfaceSelection::default();
        self.viewport_offset = Vec2::ZERO;
        log::info!("Canvas abgebaut");
    }
}

/// Szenen-Objekt eines Shape-Pfads mit allen Griffen.
pub(crate) fn shape_node(path: &ShapePath) -> SceneNodeKind {
    SceneNodeKind::ShapePath {
        svg: path.to_svg_string(),
        handles: path.segments().iter().flat_map(|s| s.points()).collect(),
    }
}
