//! Pathway-Vorschau: flüchtige Strecken von alter zu neuer Koordinate.
//!
//! Jede Geometrie-Änderung baut die Vorschau komplett neu auf: alle alten
//! Pathways und Marker verlassen die Szene, bevor neue hinzukommen.

use super::CanvasSurface;
use crate::core::MarcherId;
use crate::shared::{GraphicHandle, PathwayStyle, SceneNodeKind};
use drill_canvas_geometry::Assignment;
use glam::Vec2;

/// Eine Vorschau-Strecke für einen Marcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pathway {
    /// Marcher
    pub marcher_id: MarcherId,
    /// Koordinate vor der Verteilung
    pub start: Vec2,
    /// Zugewiesene Koordinate
    pub end: Vec2,
    /// Strichstil
    pub style: PathwayStyle,
}

/// Aktuell angezeigte Vorschau samt Verteilung.
#[derive(Debug, Clone, Default)]
pub struct PathwayPreview {
    pathways: Vec<(Pathway, GraphicHandle)>,
    markers: Vec<GraphicHandle>,
    assignments: Vec<Assignment<MarcherId>>,
}

impl PathwayPreview {
    /// Alle Pathways.
    pub fn pathways(&self) -> impl Iterator<Item = &Pathway> + '_ {
        self.pathways.iter().map(|(p, _)| p)
    }

    /// Szenen-Handles der Pathways.
    pub fn pathway_handles(&self) -> impl Iterator<Item = GraphicHandle> + '_ {
        self.pathways.iter().map(|(_, h)| *h)
    }

    /// Szenen-Handles der statischen Ziel-Marker.
    pub fn marker_handles(&self) -> &[GraphicHandle] {
        &self.markers
    }

    /// Verteilung, aus der die Vorschau gebaut wurde.
    pub fn assignments(&self) -> &[Assignment<MarcherId>] {
        &self.assignments
    }

    /// Anzahl der Pathways.
    pub fn len(&self) -> usize {
        self.pathways.len()
    }

    /// Gibt `true` zurück, wenn keine Vorschau angezeigt wird.
    pub fn is_empty(&self) -> bool {
        self.pathways.is_empty() && self.assignments.is_empty()
    }
}

impl CanvasSurface {
    /// Ersetzt die Vorschau durch Pathways und Ziel-Marker für `assignments`.
    ///
    /// Marcher bleiben oberhalb aller Vorschau-Objekte.
    pub fn show_pathways(
        &mut self,
        assignments: Vec<Assignment<MarcherId>>,
        style: PathwayStyle,
        marker_radius: f32,
    ) {
        self.clear_pathways();

        let mut pathways = Vec::with_capacity(assignments.len());
        for assignment in &assignments {
            let pathway = Pathway {
                marcher_id: assignment.id,
                start: assignment.from,
                end: assignment.to,
                style,
            };
            let handle = self.scene.add(
                SceneNodeKind::Pathway {
                    start: pathway.start,
                    end: pathway.end,
                    style,
                },
                None,
                false,
            );
            pathways.push((pathway, handle));
        }

        let markers = assignments
            .iter()
            .map(|a| {
                self.scene.add(
                    SceneNodeKind::StaticMarker {
                        position: a.to,
                        radius: marker_radius,
                    },
                    None,
                    false,
                )
            })
            .collect();

        self.preview = PathwayPreview {
            pathways,
            markers,
            assignments,
        };
        self.raise_marchers();
        self.scene.request_render();
        log::debug!("Pathway-Vorschau mit {} Einträgen", self.preview.len());
    }

    /// Entfernt alle Pathways und Ziel-Marker aus der Szene.
    pub fn clear_pathways(&mut self) {
        let preview = std::mem::take(&mut self.preview);
        for handle in preview.pathway_handles().chain(preview.markers.iter().copied()) {
            self.scene.remove(handle);
        }
        if !preview.is_empty() {
            self.scene.request_render();
        }
    }

    /// Aktuelle Vorschau.
    pub fn preview(&self) -> &PathwayPreview {
        &self.preview
    }
}
