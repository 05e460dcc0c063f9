//! Begrenztes Protokoll ausgeführter Canvas-Commands, je mit der Session,
//! in der sie liefen. Dient Diagnose und Tests.

use std::collections::VecDeque;

use super::state::SessionId;
use super::CanvasCommand;

/// Ein protokollierter Command.
#[derive(Debug, Clone)]
pub struct LoggedCommand {
    /// Session zum Zeitpunkt der Ausführung
    pub session: SessionId,
    /// Ausgeführter Command
    pub command: CanvasCommand,
}

/// FIFO der zuletzt ausgeführten Commands.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: VecDeque<LoggedCommand>,
}

impl CommandLog {
    const CAPACITY: usize = 1000;

    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hängt einen Command an. Ist das Log voll, fällt der älteste heraus.
    pub fn record(&mut self, session: SessionId, command: CanvasCommand) {
        if self.entries.len() == Self::CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(LoggedCommand { session, command });
    }

    /// Gibt die Anzahl der protokollierten Commands zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn noch kein Command protokolliert wurde.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Commands in Ausführungsreihenfolge.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &CanvasCommand> + '_ {
        self.entries.iter().map(|e| &e.command)
    }

    /// Commands, die in der angegebenen Session liefen.
    pub fn in_session(&self, session: SessionId) -> impl Iterator<Item = &CanvasCommand> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.session == session)
            .map(|e| &e.command)
    }

    /// Zuletzt protokollierter Eintrag inkl. Session.
    pub fn latest(&self) -> Option<&LoggedCommand> {
        self.entries.back()
    }
}
