use super::{App, AppAction, AppCommand};
use crate::core::conversation::ConversationKind;

pub(super) fn handle_picker_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::PickerMoveUp => {
            app.picker.move_up();
            None
        }
        AppAction::PickerMoveDown => {
            app.picker.move_down();
            None
        }
        AppAction::PickerSelect => {
            let character = app.focused_character()?.clone();
            match app.mode {
                ConversationKind::TwoParty => {
                    app.controller.select_character(&character);
                }
                ConversationKind::UserAndCharacter => {
                    app.controller.select_solo_character(&character);
                }
            }
            None
        }
        AppAction::ToggleMode => {
            app.toggle_mode();
            None
        }
        AppAction::ClearSelection => {
            app.controller.clear_selection();
            None
        }
        _ => unreachable!("non-picker action routed to picker handler"),
    }
}
