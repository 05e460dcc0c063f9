//! Handler für Commits an die Persistenz und deren Ergebnisse.
//!
//! Ein Commit wird als Effekt mit der aktuellen Session ausgegeben. Das
//! Ergebnis kommt später als `CommitCompleted` zurück. Bestätigte Koordinaten
//! landen immer im Roster; Vorschau und Werkzeug werden nur angefasst, wenn
//! die Session noch aktuell ist.

use crate::app::events::{CanvasEffect, CommitItemResult, CommitRequest};
use crate::app::state::{CommitOrigin, SessionId};
use crate::app::CanvasState;
use crate::core::MarcherPageUpdate;

/// Gibt die aktuelle Pathway-Vorschau als Commit aus.
pub fn commit_preview(state: &mut CanvasState) {
    if !state.modes.active().ready_for_commit() {
        log::warn!(
            "Commit übersprungen: {} ist noch nicht abgeschlossen",
            state.modes.active().name()
        );
        return;
    }

    let updates: Vec<MarcherPageUpdate> = state
        .surface
        .preview()
        .assignments()
        .iter()
        .map(|a| MarcherPageUpdate {
            marcher_id: a.id,
            position: a.to,
        })
        .collect();
    if updates.is_empty() {
        log::warn!("Commit übersprungen: keine Vorschau vorhanden");
        return;
    }
    emit(state, updates, CommitOrigin::Preview);
}

/// Startet eine Session für den Commit, merkt ihn vor und gibt ihn als
/// Effekt aus. Ergebnisse früherer Commits werden damit veraltet.
pub(crate) fn emit(state: &mut CanvasState, updates: Vec<MarcherPageUpdate>, origin: CommitOrigin) {
    let Some(page_id) = state.roster.current_page_id else {
        log::warn!("Commit verworfen: keine aktuelle Page");
        return;
    };
    state.sessions.begin();
    let session = state.sessions.set_pending(page_id, updates.clone(), origin);
    log::info!(
        "Commit von {} Koordinaten auf Page {} (Session {})",
        updates.len(),
        page_id,
        session
    );
    state.push_effect(CanvasEffect::CommitMarcherPages(CommitRequest {
        session,
        page_id,
        updates,
        record_history: true,
        reverse_page_order: false,
    }));
}

/// Wendet ein Commit-Ergebnis an.
///
/// Erfolgreiche Koordinaten werden in den Roster übernommen, auch wenn die
/// Session inzwischen veraltet ist. Schlägt ein Eintrag fehl, wird nichts
/// übernommen und die betroffenen Marcher springen auf den bestätigten Stand
/// zurück. Nicht bestätigte Commits anderer Sessions bleiben sichtbar.
pub fn apply_result(state: &mut CanvasState, session: SessionId, results: &[CommitItemResult]) {
    let Some(pending) = state.sessions.take(session) else {
        log::debug!("Commit-Ergebnis {} ohne ausstehenden Commit verworfen", session);
        return;
    };
    let current = state.sessions.is_current(session);

    let failed = results.iter().filter(|r| !r.success).count();
    if failed > 0 {
        log::warn!(
            "Commit in Session {} fehlgeschlagen: {} von {} Einträgen",
            session,
            failed,
            results.len()
        );
        state.resync_marchers();
        return;
    }

    let applied = state.roster.apply_positions(pending.page_id, &pending.updates);
    state.resync_marchers();
    if !current || pending.origin == CommitOrigin::Moves {
        log::debug!(
            "Commit-Ergebnis {} übernommen (aktuell {}), Vorschau bleibt",
            session,
            state.sessions.current()
        );
        return;
    }

    state.surface.clear_pathways();
    {
        let (modes, mut ctx) = state.split_modes();
        modes.active_mut().on_commit_applied(&mut ctx);
    }
    log::info!("Commit in Session {} übernommen: {} Koordinaten", session, applied);
}
