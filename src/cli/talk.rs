use std::error::Error;
use std::io::Write;

use crate::api::ConversationService;
use crate::cli::duet::lookup;
use crate::core::characters::CharacterRegistry;
use crate::core::controller::{ConversationController, EMPTY_MESSAGE};
use crate::ui::dialogue::dialogue_lines;

/// Start a conversation with one character, send `message`, and print the
/// transcript the service returns.
pub async fn run_talk<W: Write>(
    service: &dyn ConversationService,
    registry: &CharacterRegistry,
    character: &str,
    message: &str,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let character = lookup(registry, character)?;
    if message.trim().is_empty() {
        return Err(EMPTY_MESSAGE.into());
    }

    let mut controller = ConversationController::new();
    controller.select_solo_character(character);
    controller.start_single_conversation(service).await?;
    controller.submit_user_message(service, message).await?;

    for line in dialogue_lines(&controller.snapshot()) {
        match line.speaker {
            Some(speaker) => writeln!(out, "{speaker}: {}", line.content)?,
            None => writeln!(out, "{}", line.content)?,
        }
    }
    Ok(())
}
