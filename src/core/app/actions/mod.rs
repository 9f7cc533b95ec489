mod conversation;
mod picker;

use tokio::sync::mpsc;

use super::App;
use crate::api::{ContinueConversationResponse, ServiceError, StartConversationResponse};
use crate::core::controller::{StartTicket, TurnTicket};

#[derive(Debug)]
pub enum AppAction {
    PickerMoveUp,
    PickerMoveDown,
    /// Select the focused character for the current mode.
    PickerSelect,
    ToggleMode,
    ClearSelection,
    StartConversation,
    AdvanceTurn,
    InsertIntoInput {
        ch: char,
    },
    Backspace,
    SubmitInput,
    DismissError,
    Quit,
    StartFinished {
        ticket: StartTicket,
        result: Result<StartConversationResponse, ServiceError>,
    },
    TurnFinished {
        ticket: TurnTicket,
        result: Result<ContinueConversationResponse, ServiceError>,
    },
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppAction>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppAction>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction) {
        let _ = self.tx.send(action);
    }

    pub fn dispatch_many<I>(&self, actions: I)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            self.dispatch(action);
        }
    }
}

/// Work the event loop must perform outside the app lock.
#[derive(Debug, PartialEq, Eq)]
pub enum AppCommand {
    SendStart(StartTicket),
    SendTurn(TurnTicket),
}

pub fn apply_actions(
    app: &mut App,
    actions: impl IntoIterator<Item = AppAction>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::PickerMoveUp
        | AppAction::PickerMoveDown
        | AppAction::PickerSelect
        | AppAction::ToggleMode
        | AppAction::ClearSelection => picker::handle_picker_action(app, action),

        AppAction::StartConversation
        | AppAction::AdvanceTurn
        | AppAction::InsertIntoInput { .. }
        | AppAction::Backspace
        | AppAction::SubmitInput
        | AppAction::DismissError
        | AppAction::StartFinished { .. }
        | AppAction::TurnFinished { .. } => conversation::handle_conversation_action(app, action),

        AppAction::Quit => {
            app.exit_requested = true;
            None
        }
    }
}
