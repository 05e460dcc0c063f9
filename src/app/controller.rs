//! Canvas Controller für zentrale Event-Verarbeitung.

use super::{CanvasCommand, CanvasEffect, CanvasIntent, CanvasState};

/// Orchestriert Host-Events und Handler auf den CanvasState.
#[derive(Default)]
pub struct CanvasController;

impl CanvasController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut CanvasState,
        intent: CanvasIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &CanvasState, intent: CanvasIntent) -> Vec<CanvasCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem CanvasState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut CanvasState,
        command: CanvasCommand,
    ) -> anyhow::Result<()> {
        let session = state.sessions.current();
        state.command_log.record(session, command.clone());
        use super::handlers;

        match command {
            // === Modi ===
            CanvasCommand::SetMode { mode } => handlers::mode::set_mode(state, mode),
            CanvasCommand::CancelInteraction => handlers::pointer::cancel_interaction(state),

            // === Pointer & Tastatur ===
            CanvasCommand::PointerDown {
                position,
                modifiers,
            } => handlers::pointer::pointer_down(state, position, modifiers)?,
            CanvasCommand::PointerMove { position } => {
                handlers::pointer::pointer_move(state, position)?
            }
            CanvasCommand::PointerUp { position } => handlers::pointer::pointer_up(state, position)?,
            CanvasCommand::KeyDown { key } => handlers::pointer::key_down(state, key)?,
            CanvasCommand::ObjectModified { object } => {
                handlers::pointer::object_modified(state, &object)?
            }

            // === Selektion ===
            CanvasCommand::ApplySelection { handles } => handlers::selection::apply(state, &handles),
            CanvasCommand::SelectMarcher { marcher_id } => {
                handlers::selection::select_marcher(state, marcher_id)
            }

            // === Commit ===
            CanvasCommand::CommitPreview => handlers::commit::commit_preview(state),
            CanvasCommand::ApplyCommitResult { session, results } => {
                handlers::commit::apply_result(state, session, &results)
            }

            // === Shape-Segment-Editor ===
            CanvasCommand::AppendShapeSegment { shape_page_id } => {
                handlers::shape::append_segment(state, shape_page_id)?
            }
            CanvasCommand::DeleteShapeSegment {
                shape_page_id,
                index,
            } => handlers::shape::delete_segment(state, shape_page_id, index)?,
            CanvasCommand::UpdateShapeSegment {
                shape_page_id,
                index,
                command,
            } => handlers::shape::update_segment(state, shape_page_id, index, command)?,
            CanvasCommand::MoveShapePoint {
                shape_page_id,
                segment,
                point,
                position,
            } => handlers::shape::move_point(state, shape_page_id, segment, point, position)?,

            // === Roster & Optionen ===
            CanvasCommand::LoadRoster { roster } => handlers::roster::load(state, roster),
            CanvasCommand::SelectPage { page_id } => handlers::roster::select_page(state, page_id),
            CanvasCommand::ApplyOptions { options } => {
                handlers::roster::apply_options(state, options)
            }
            CanvasCommand::Teardown => handlers::roster::teardown(state),
        }

        Ok(())
    }

    /// Entnimmt alle ausgehenden Effekte für den Host.
    pub fn drain_effects(&self, state: &mut CanvasState) -> Vec<CanvasEffect> {
        state.drain_effects()
    }
}
