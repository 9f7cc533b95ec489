//! Key-to-action mapping for the interactive session.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::app::AppAction;
use crate::core::conversation::ConversationKind;

/// Translate a key press into an action for the given mode.
///
/// Typed characters only reach the input buffer in user-and-character mode;
/// elsewhere Space toggles the focused tile and other printable keys are
/// ignored.
pub fn map_key(key: KeyEvent, mode: ConversationKind) -> Option<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let typing = mode == ConversationKind::UserAndCharacter;

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => Some(AppAction::Quit),
        KeyCode::Char('s') if ctrl => Some(AppAction::StartConversation),
        KeyCode::Char('n') if ctrl => Some(AppAction::AdvanceTurn),
        KeyCode::Char(' ') if ctrl => Some(AppAction::PickerSelect),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Up => Some(AppAction::PickerMoveUp),
        KeyCode::Down => Some(AppAction::PickerMoveDown),
        KeyCode::Tab | KeyCode::BackTab => Some(AppAction::ToggleMode),
        KeyCode::Esc => Some(AppAction::ClearSelection),
        KeyCode::Enter if typing => Some(AppAction::SubmitInput),
        KeyCode::Enter => Some(AppAction::AdvanceTurn),
        KeyCode::Backspace if typing => Some(AppAction::Backspace),
        KeyCode::Char(ch) if typing => Some(AppAction::InsertIntoInput { ch }),
        KeyCode::Char(' ') => Some(AppAction::PickerSelect),
        KeyCode::Char('q') => Some(AppAction::Quit),
        KeyCode::Delete => Some(AppAction::DismissError),
        _ => None,
    }
}
