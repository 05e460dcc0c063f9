//! Retained-Mode-Szene als Übergabevertrag zwischen Canvas-Kern und Render-Host.
//!
//! Der Kern fügt Objekte hinzu, entfernt, aktualisiert und holt sie nach
//! vorne; der Host zeichnet in Einfüge-Reihenfolge (letztes Objekt oben).

use crate::core::MarcherId;
use glam::Vec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle eines Szenen-Objekts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphicHandle(pub u64);

impl fmt::Display for GraphicHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mauszeiger, den der Host anzeigen soll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorStyle {
    /// Standard-Pfeil
    #[default]
    Default,
    /// Fadenkreuz (Zeichen-Modi)
    Crosshair,
    /// Hand (über verschiebbaren Objekten)
    Pointer,
    /// Geschlossene Hand (Canvas-Pan)
    Grabbing,
}

/// Strichstil einer Pathway-Vorschau.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathwayStyle {
    /// Farbe (RGBA)
    pub color: [f32; 4],
    /// Linienstärke
    pub stroke_width: f32,
    /// Strichmuster [Strich, Lücke]; `None` = durchgezogen
    pub dash: Option<[f32; 2]>,
}

/// Art und Geometrie eines Szenen-Objekts.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNodeKind {
    /// Darstellung eines Marchers
    MarcherDot {
        /// Position
        position: Vec2,
        /// Anzeigelabel
        label: String,
    },
    /// Vorschau-Strecke alt → neu
    Pathway {
        /// Startpunkt (aktuelle Koordinate)
        start: Vec2,
        /// Endpunkt (Zielkoordinate)
        end: Vec2,
        /// Strichstil
        style: PathwayStyle,
    },
    /// Statischer Marker an einer Zielposition
    StaticMarker {
        /// Position
        position: Vec2,
        /// Radius
        radius: f32,
    },
    /// Linie des Linien-Werkzeugs
    Line {
        /// Startpunkt
        start: Vec2,
        /// Endpunkt
        end: Vec2,
    },
    /// Shape-Pfad
    ShapePath {
        /// SVG-`d`-String
        svg: String,
        /// Alle Kontroll- und Endpunkte (für Griffe)
        handles: Vec<Vec2>,
    },
}

/// Ein Objekt der Szene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Handle
    pub handle: GraphicHandle,
    /// Art und Geometrie
    pub kind: SceneNodeKind,
    /// Stabiler Tag (nur Marcher-Objekte)
    pub tag: Option<MarcherId>,
    /// Darf der Nutzer das Objekt selektieren?
    pub selectable: bool,
}

/// Geordnete Szene: z-Reihenfolge = Einfüge-Reihenfolge.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: IndexMap<GraphicHandle, SceneNode>,
    next_handle: u64,
    /// Aktueller Mauszeiger
    pub cursor: CursorStyle,
    /// Gruppen-Selektion (Rahmen ziehen) aktiv?
    pub group_selection: bool,
    active_object: Option<GraphicHandle>,
    render_requests: u64,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Erstellt eine leere Szene mit aktiver Gruppen-Selektion.
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            next_handle: 1,
            cursor: CursorStyle::Default,
            group_selection: true,
            active_object: None,
            render_requests: 0,
        }
    }

    /// Fügt ein Objekt oben in die Szene ein.
    pub fn add(
        &mut self,
        kind: SceneNodeKind,
        tag: Option<MarcherId>,
        selectable: bool,
    ) -> GraphicHandle {
        let handle = GraphicHandle(self.next_handle);
        self.next_handle += 1;
        self.nodes.insert(
            handle,
            SceneNode {
                handle,
                kind,
                tag,
                selectable,
            },
        );
        handle
    }

    /// Entfernt ein Objekt; die Reihenfolge der übrigen bleibt erhalten.
    pub fn remove(&mut self, handle: GraphicHandle) -> Option<SceneNode> {
        if self.active_object == Some(handle) {
            self.active_object = None;
        }
        self.nodes.shift_remove(&handle)
    }

    /// Ersetzt die Geometrie eines Objekts. `false` wenn unbekannt.
    pub fn update(&mut self, handle: GraphicHandle, kind: SceneNodeKind) -> bool {
        match self.nodes.get_mut(&handle) {
            Some(node) => {
                node.kind = kind;
                true
            }
            None => false,
        }
    }

    /// Verschiebt ein Objekt an die Spitze der z-Reihenfolge.
    pub fn bring_to_front(&mut self, handle: GraphicHandle) -> bool {
        match self.nodes.get_index_of(&handle) {
            Some(index) => {
                let last = self.nodes.len() - 1;
                self.nodes.move_index(index, last);
                true
            }
            None => false,
        }
    }

    /// z-Index eines Objekts (0 = ganz unten).
    pub fn z_index(&self, handle: GraphicHandle) -> Option<usize> {
        self.nodes.get_index_of(&handle)
    }

    /// Gibt ein Objekt zurück.
    pub fn get(&self, handle: GraphicHandle) -> Option<&SceneNode> {
        self.nodes.get(&handle)
    }

    /// Alle Objekte von unten nach oben.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> + '_ {
        self.nodes.values()
    }

    /// Anzahl der Objekte.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Gibt `true` zurück, wenn die Szene leer ist.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Markiert ein Objekt als aktiv (Host-Selektion).
    pub fn set_active_object(&mut self, handle: Option<GraphicHandle>) {
        self.active_object = handle.filter(|h| self.nodes.contains_key(h));
    }

    /// Aktuell aktives Objekt.
    pub fn active_object(&self) -> Option<GraphicHandle> {
        self.active_object
    }

    /// Fordert ein Neuzeichnen beim Host an.
    pub fn request_render(&mut self) {
        self.render_requests += 1;
    }

    /// Anzahl der bisher angeforderten Neuzeichnungen.
    pub fn render_requests(&self) -> u64 {
        self.render_requests
    }

    /// Entfernt alle Objekte.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.active_object = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(x: f32) -> SceneNodeKind {
        SceneNodeKind::StaticMarker {
            position: Vec2::new(x, 0.0),
            radius: 1.0,
        }
    }

    #[test]
    fn test_bring_to_front_moves_to_top() {
        let mut scene = SceneGraph::new();
        let a = scene.add(marker(1.0), None, false);
        let b = scene.add(marker(2.0), None, false);
        let c = scene.add(marker(3.0), None, false);

        assert!(scene.bring_to_front(a));
        assert_eq!(scene.z_index(b), Some(0));
        assert_eq!(scene.z_index(c), Some(1));
        assert_eq!(scene.z_index(a), Some(2));
    }

    #[test]
    fn test_remove_keeps_order_and_clears_active() {
        let mut scene = SceneGraph::new();
        let a = scene.add(marker(1.0), None, true);
        let b = scene.add(marker(2.0), None, true);
        let c = scene.add(marker(3.0), None, true);
        scene.set_active_object(Some(b));

        assert!(scene.remove(b).is_some());
        assert_eq!(scene.active_object(), None);
        assert_eq!(scene.z_index(a), Some(0));
        assert_eq!(scene.z_index(c), Some(1));
        assert!(scene.remove(b).is_none());
    }

    #[test]
    fn test_handles_are_never_reused() {
        let mut scene = SceneGraph::new();
        let a = scene.add(marker(1.0), None, false);
        scene.clear();
        let b = scene.add(marker(1.0), None, false);
        assert_ne!(a, b);
        assert!(!scene.update(a, marker(5.0)));
    }
}
