//! Event-Bindings der Interaktions-Modi auf dem Canvas.

use crate::app::modes::ModeKind;

/// Art eines Canvas-Events, an das sich ein Modus bindet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasEventKind {
    /// Maustaste gedrückt
    PointerDown,
    /// Maus bewegt
    PointerMove,
    /// Maustaste losgelassen
    PointerUp,
    /// Objekt verändert (Drag beendet)
    ObjectModified,
    /// Taste gedrückt
    KeyDown,
}

/// Registrierte Handler (Besitzer-Modus je Event) plus Aufruf-Zähler.
#[derive(Debug, Default)]
pub struct EventBindings {
    bound: Vec<(ModeKind, CanvasEventKind)>,
    invocations: u64,
}

impl EventBindings {
    /// Bindet die Events an einen Modus. Doppelte Bindungen werden ignoriert.
    pub fn bind(&mut self, owner: ModeKind, events: &[CanvasEventKind]) {
        for &event in events {
            if !self.is_bound(owner, event) {
                self.bound.push((owner, event));
            }
        }
    }

    /// Entfernt alle Bindungen eines Modus.
    pub fn unbind(&mut self, owner: ModeKind) {
        self.bound.retain(|(kind, _)| *kind != owner);
    }

    /// Ist `event` an `owner` gebunden?
    pub fn is_bound(&self, owner: ModeKind, event: CanvasEventKind) -> bool {
        self.bound.contains(&(owner, event))
    }

    /// Anzahl gebundener Handler für ein Event.
    pub fn handler_count(&self, event: CanvasEventKind) -> usize {
        self.bound.iter().filter(|(_, e)| *e == event).count()
    }

    /// Alle Modi mit mindestens einer Bindung.
    pub fn owners(&self) -> Vec<ModeKind> {
        let mut owners: Vec<ModeKind> = Vec::new();
        for (kind, _) in &self.bound {
            if !owners.contains(kind) {
                owners.push(*kind);
            }
        }
        owners
    }

    /// Zählt einen Handler-Aufruf.
    pub fn record_invocation(&mut self) {
        self.invocations += 1;
    }

    /// Anzahl bisheriger Handler-Aufrufe.
    pub fn invocations(&self) -> u64 {
        self.invocations
    }
}
