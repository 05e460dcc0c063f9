//! Mapping von Host-Intents auf mutierende Canvas-Commands.

use super::events::{CanvasKey, ModifiedObject, PointerButton, ShapeRef};
use super::modes::ModeKind;
use super::{CanvasCommand, CanvasIntent, CanvasState};

/// Übersetzt einen `CanvasIntent` in eine Sequenz ausführbarer `CanvasCommand`s.
pub fn map_intent_to_commands(state: &CanvasState, intent: CanvasIntent) -> Vec<CanvasCommand> {
    match intent {
        CanvasIntent::PointerDown {
            position,
            button,
            modifiers,
        } => match button {
            PointerButton::Primary => vec![CanvasCommand::PointerDown {
                position,
                modifiers,
            }],
            // Rechtsklick bricht in jedem Modus ab
            PointerButton::Secondary => vec![CanvasCommand::CancelInteraction],
            PointerButton::Middle => vec![],
        },
        CanvasIntent::PointerMoved { position } => vec![CanvasCommand::PointerMove { position }],
        CanvasIntent::PointerUp { position, button } => match button {
            PointerButton::Primary => vec![CanvasCommand::PointerUp { position }],
            PointerButton::Secondary | PointerButton::Middle => vec![],
        },
        CanvasIntent::KeyPressed { key } => map_key(state, key),
        CanvasIntent::ObjectModified { object } => match object {
            ModifiedObject::ShapePoint {
                shape: ShapeRef::Page(shape_page_id),
                segment,
                point,
                position,
            } => vec![CanvasCommand::MoveShapePoint {
                shape_page_id,
                segment,
                point,
                position,
            }],
            object => vec![CanvasCommand::ObjectModified { object }],
        },
        CanvasIntent::SelectionChanged { handles } => {
            vec![CanvasCommand::ApplySelection { handles }]
        }
        CanvasIntent::SelectMarcherRequested { marcher_id } => {
            vec![CanvasCommand::SelectMarcher { marcher_id }]
        }
        CanvasIntent::ModeRequested { mode } => vec![CanvasCommand::SetMode { mode }],
        CanvasIntent::CommitRequested => vec![CanvasCommand::CommitPreview],
        CanvasIntent::CommitCompleted { session, results } => {
            vec![CanvasCommand::ApplyCommitResult { session, results }]
        }
        CanvasIntent::RosterLoaded { roster } => vec![CanvasCommand::LoadRoster { roster }],
        CanvasIntent::PageSelected { page_id } => vec![CanvasCommand::SelectPage { page_id }],
        CanvasIntent::ShapeSegmentAppendRequested { shape_page_id } => {
            vec![CanvasCommand::AppendShapeSegment { shape_page_id }]
        }
        CanvasIntent::ShapeSegmentDeleteRequested {
            shape_page_id,
            index,
        } => vec![CanvasCommand::DeleteShapeSegment {
            shape_page_id,
            index,
        }],
        CanvasIntent::ShapeSegmentCommandChanged {
            shape_page_id,
            index,
            command,
        } => vec![CanvasCommand::UpdateShapeSegment {
            shape_page_id,
            index,
            command,
        }],
        CanvasIntent::OptionsChanged { options } => vec![CanvasCommand::ApplyOptions { options }],
        CanvasIntent::TeardownRequested => vec![CanvasCommand::Teardown],
    }
}

/// Escape ist gestuft: erst laufende Eingabe abbrechen, dann zurück in den
/// Default-Modus. Enter schließt eine Shape ab oder committet die Vorschau.
fn map_key(state: &CanvasState, key: CanvasKey) -> Vec<CanvasCommand> {
    let active = state.modes.active();
    match key {
        CanvasKey::Escape => {
            if active.has_pending_input() {
                vec![CanvasCommand::CancelInteraction]
            } else if active.kind() != ModeKind::Default {
                vec![CanvasCommand::SetMode {
                    mode: ModeKind::Default,
                }]
            } else {
                vec![]
            }
        }
        CanvasKey::Enter if !active.consumes_key(key) => vec![CanvasCommand::CommitPreview],
        key => vec![CanvasCommand::KeyDown { key }],
    }
}
