//! Canvas State: zentrale Datenhaltung.

mod session;

pub use session::{CommitOrigin, PendingCommit, SessionId, SessionTracker};

use super::events::CanvasEffect;
use super::modes::{ModeContext, ModeManager};
use super::surface::{CanvasSurface, SyncReport};
use super::CommandLog;
use crate::core::Roster;
use crate::shared::FieldOptions;

/// Gesamter Zustand des Canvas-Kerns.
pub struct CanvasState {
    /// Zuletzt bestätigter Roster
    pub roster: Roster,
    /// Feld-Optionen
    pub options: FieldOptions,
    /// Oberfläche mit Szene, Marchern und Selektion
    pub surface: CanvasSurface,
    /// Interaktions-Modi
    pub modes: ModeManager,
    /// Sessions und ausstehende Commits
    pub sessions: SessionTracker,
    /// Log ausgeführter Commands
    pub command_log: CommandLog,
    effects: Vec<CanvasEffect>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasState {
    /// Erstellt einen leeren State mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(FieldOptions::default())
    }

    /// Erstellt einen leeren State mit den Feld-Optionen einer Show.
    pub fn for_show(show_dir: &std::path::Path) -> Self {
        Self::with_options(FieldOptions::load_for_show(show_dir))
    }

    /// Erstellt einen leeren State; der Default-Modus ist aktiv und gebunden.
    pub fn with_options(options: FieldOptions) -> Self {
        options.warn_if_snapping_disabled();
        let mut state = Self {
            roster: Roster::default(),
            options,
            surface: CanvasSurface::new(),
            modes: ModeManager::new(),
            sessions: SessionTracker::new(),
            command_log: CommandLog::new(),
            effects: Vec::new(),
        };
        let (modes, mut ctx) = state.split_modes();
        modes.activate_initial(&mut ctx);
        state
    }

    /// Trennt den Modus-Manager vom Kontext, den die Modi bearbeiten.
    pub(crate) fn split_modes(&mut self) -> (&mut ModeManager, ModeContext<'_>) {
        (
            &mut self.modes,
            ModeContext {
                surface: &mut self.surface,
                options: &self.options,
                roster: &self.roster,
            },
        )
    }

    /// Gleicht die CanvasMarcher mit dem Roster ab und legt noch nicht
    /// bestätigte Commits der aktuellen Page darüber.
    pub(crate) fn resync_marchers(&mut self) -> SyncReport {
        let report = self.surface.sync_marchers(&self.roster);
        let Some(page_id) = self.roster.current_page_id else {
            return report;
        };
        for pending in self.sessions.pending().iter().filter(|p| p.page_id == page_id) {
            for update in &pending.updates {
                if let Err(e) = self.surface.move_marcher(update.marcher_id, update.position) {
                    log::debug!("Ausstehende Koordinate übersprungen: {}", e);
                }
            }
        }
        report
    }

    /// Reiht einen ausgehenden Effekt ein.
    pub fn push_effect(&mut self, effect: CanvasEffect) {
        log::debug!("Effekt: {:?}", effect);
        self.effects.push(effect);
    }

    /// Noch nicht abgeholte Effekte.
    pub fn effects(&self) -> &[CanvasEffect] {
        &self.effects
    }

    /// Entnimmt alle Effekte in Erzeugungs-Reihenfolge.
    pub fn drain_effects(&mut self) -> Vec<CanvasEffect> {
        std::mem::take(&mut self.effects)
    }
}
