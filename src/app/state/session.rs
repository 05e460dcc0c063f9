//! Interaktions-Sessions und Schutz vor veralteten Commit-Ergebnissen.
//!
//! Jede Session bekommt eine ID aus einem monoton steigenden Zähler. Commits
//! bleiben bis zu ihrem Ergebnis ausstehend, auch über Session-Wechsel hinweg.
//! Nur das Ergebnis der aktuellen Session darf die laufende Interaktion
//! (Vorschau, Werkzeug-Zustand) verändern.

use crate::core::{MarcherPageUpdate, PageId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ID einer Interaktions-Session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Herkunft eines Commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOrigin {
    /// Vom Host verschobene Marcher
    Moves,
    /// Übernommene Pathway-Vorschau eines Werkzeugs
    Preview,
}

/// Ausstehender Commit, wartet auf `CommitCompleted`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommit {
    /// Session des Commits
    pub session: SessionId,
    /// Page der Koordinaten
    pub page_id: PageId,
    /// Übergebene Koordinaten
    pub updates: Vec<MarcherPageUpdate>,
    /// Herkunft
    pub origin: CommitOrigin,
}

/// Verwaltet die aktuelle Session und alle ausstehenden Commits.
#[derive(Debug, Default)]
pub struct SessionTracker {
    current: SessionId,
    pending: Vec<PendingCommit>,
}

impl SessionTracker {
    /// Erstellt den Tracker mit Session 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktuelle Session.
    pub fn current(&self) -> SessionId {
        self.current
    }

    /// Startet eine neue Session. Ausstehende Commits älterer Sessions
    /// bleiben vorgemerkt, bis ihr Ergebnis eintrifft.
    pub fn begin(&mut self) -> SessionId {
        self.current = SessionId(self.current.0 + 1);
        log::debug!("Neue Interaktions-Session {}", self.current);
        self.current
    }

    /// Prüft, ob `session` die aktuelle Session ist.
    pub fn is_current(&self, session: SessionId) -> bool {
        session == self.current
    }

    /// Merkt einen Commit der aktuellen Session vor.
    pub fn set_pending(
        &mut self,
        page_id: PageId,
        updates: Vec<MarcherPageUpdate>,
        origin: CommitOrigin,
    ) -> SessionId {
        self.pending.push(PendingCommit {
            session: self.current,
            page_id,
            updates,
            origin,
        });
        self.current
    }

    /// Ausstehende Commits, älteste zuerst.
    pub fn pending(&self) -> &[PendingCommit] {
        &self.pending
    }

    /// Entnimmt den ausstehenden Commit einer Session. `None`, wenn zu ihr
    /// nichts aussteht (z.B. doppelt gemeldetes Ergebnis).
    pub fn take(&mut self, session: SessionId) -> Option<PendingCommit> {
        let index = self.pending.iter().position(|p| p.session == session)?;
        Some(self.pending.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MarcherId;
    use glam::Vec2;

    fn update() -> Vec<MarcherPageUpdate> {
        vec![MarcherPageUpdate {
            marcher_id: MarcherId(1),
            position: Vec2::new(10.0, 0.0),
        }]
    }

    #[test]
    fn test_session_ids_increase_monotonically() {
        let mut tracker = SessionTracker::new();
        let a = tracker.begin();
        let b = tracker.begin();
        assert!(b > a);
        assert_eq!(tracker.current(), b);
    }

    #[test]
    fn test_older_commit_stays_pending_across_sessions() {
        let mut tracker = SessionTracker::new();
        let first = tracker.begin();
        tracker.set_pending(PageId(1), update(), CommitOrigin::Moves);
        let second = tracker.begin();
        tracker.set_pending(PageId(1), update(), CommitOrigin::Moves);

        assert!(!tracker.is_current(first));
        let taken = tracker.take(first).expect("älterer Commit steht noch aus");
        assert_eq!(taken.session, first);
        assert_eq!(tracker.pending().len(), 1);
        assert_eq!(tracker.pending()[0].session, second);
    }

    #[test]
    fn test_completion_is_taken_once() {
        let mut tracker = SessionTracker::new();
        let session = tracker.begin();
        tracker.set_pending(PageId(1), update(), CommitOrigin::Moves);

        let pending = tracker.take(session).expect("aktueller Commit");
        assert_eq!(pending.updates, update());
        assert!(tracker.take(session).is_none());
        assert!(tracker.pending().is_empty());
    }
}
