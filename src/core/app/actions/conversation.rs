use tracing::debug;

use super::{App, AppAction, AppCommand};
use crate::core::conversation::ConversationKind;

pub(super) fn handle_conversation_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::StartConversation => {
            let prepared = match app.mode {
                ConversationKind::TwoParty => app.controller.prepare_start(),
                ConversationKind::UserAndCharacter => app.controller.prepare_single_start(),
            };
            match prepared {
                Ok(ticket) => Some(AppCommand::SendStart(ticket)),
                Err(err) => {
                    debug!(error = %err, "start rejected");
                    None
                }
            }
        }
        AppAction::AdvanceTurn => match app.controller.prepare_advance() {
            Ok(ticket) => Some(AppCommand::SendTurn(ticket)),
            Err(err) => {
                debug!(error = %err, "advance rejected");
                None
            }
        },
        AppAction::SubmitInput => {
            let text = app.controller.input().to_string();
            match app.controller.prepare_submit(&text) {
                Ok(ticket) => Some(AppCommand::SendTurn(ticket)),
                Err(err) => {
                    debug!(error = %err, "submit rejected");
                    None
                }
            }
        }
        AppAction::InsertIntoInput { ch } => {
            app.controller.push_input(ch);
            None
        }
        AppAction::Backspace => {
            app.controller.pop_input();
            None
        }
        AppAction::DismissError => {
            app.controller.clear_error();
            None
        }
        AppAction::StartFinished { ticket, result } => {
            // Failures are already recorded on the controller for display.
            let _ = app.controller.complete_start(ticket, result);
            None
        }
        AppAction::TurnFinished { ticket, result } => {
            let _ = app.controller.complete_turn(ticket, result);
            None
        }
        _ => unreachable!("non-conversation action routed to conversation handler"),
    }
}
