//! Dialogue view model: the lines the dialogue pane shows.

use crate::core::controller::ControllerSnapshot;
use crate::core::conversation::ConversationKind;
use crate::core::message::TranscriptRole;

pub const EMPTY_DIALOGUE: &str = "No dialogue yet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    pub role: TranscriptRole,
    /// Label shown before the content, if any.
    pub speaker: Option<String>,
    pub content: String,
}

/// Build the dialogue pane's lines from a snapshot.
///
/// The snapshot already carries the conversation's visible messages, so this
/// only labels them: two-party lines are unlabelled, user-and-character lines
/// are labelled "You" and the character's name. Other roles stay unlabelled.
pub fn dialogue_lines(snapshot: &ControllerSnapshot) -> Vec<DialogueLine> {
    let Some(conversation) = &snapshot.conversation else {
        return Vec::new();
    };

    let character_name = match conversation.kind {
        ConversationKind::TwoParty => None,
        ConversationKind::UserAndCharacter => Some(
            conversation
                .participants
                .first()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Assistant".to_string()),
        ),
    };

    conversation
        .messages
        .iter()
        .map(|message| DialogueLine {
            role: message.role.clone(),
            speaker: character_name.as_ref().and_then(|name| match message.role {
                TranscriptRole::User => Some("You".to_string()),
                TranscriptRole::Assistant => Some(name.clone()),
                TranscriptRole::System | TranscriptRole::Other(_) => None,
            }),
            content: message.content.clone(),
        })
        .collect()
}

/// Status line text: loading, error, and turn progress.
pub fn status_text(snapshot: &ControllerSnapshot) -> String {
    let mut parts = Vec::new();
    if snapshot.loading {
        parts.push("Loading dialogue...".to_string());
    }
    if let Some(conversation) = &snapshot.conversation {
        match conversation.kind {
            ConversationKind::TwoParty => {
                parts.push(format!(
                    "Turn {}/{}",
                    conversation.turn,
                    crate::core::constants::TURN_LIMIT
                ));
                if let Some(speaker) = conversation
                    .next_speaker
                    .as_ref()
                    .filter(|_| !conversation.finished)
                {
                    parts.push(format!("Next: {}", speaker.name));
                }
            }
            ConversationKind::UserAndCharacter => {
                parts.push(format!("Turn {}", conversation.turn));
            }
        }
    }
    parts.push(format!("State: {}", snapshot.phase.label()));
    parts.join(" • ")
}
