//! Headless two-party run: start a conversation between two characters and
//! print each turn as it arrives.

use std::error::Error;
use std::io::Write;

use crate::api::ConversationService;
use crate::core::characters::{Character, CharacterRegistry};
use crate::core::constants::TURN_LIMIT;
use crate::core::controller::ConversationController;

pub(crate) fn lookup<'a>(
    registry: &'a CharacterRegistry,
    id: &str,
) -> Result<&'a Character, Box<dyn Error>> {
    registry.find(id).ok_or_else(|| {
        format!(
            "Unknown character '{id}'. Available: {}",
            registry.ids().join(", ")
        )
        .into()
    })
}

pub async fn run_duet<W: Write>(
    service: &dyn ConversationService,
    registry: &CharacterRegistry,
    first: &str,
    second: &str,
    turns: u32,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    let first = lookup(registry, first)?;
    let second = lookup(registry, second)?;
    if turns > TURN_LIMIT {
        writeln!(
            out,
            "⚠️  Conversations end after {TURN_LIMIT} turns; running {TURN_LIMIT}."
        )?;
    }
    let turns = turns.min(TURN_LIMIT);

    let mut controller = ConversationController::new();
    controller.select_character(first);
    controller.select_character(second);
    controller.start_conversation(service).await?;

    if let Some(conversation) = controller.conversation() {
        writeln!(
            out,
            "{} and {} are talking (conversation {}).\n",
            first.name, second.name, conversation.id
        )?;
    }

    for _ in 0..turns {
        let speaker = controller
            .conversation()
            .and_then(|c| c.next_speaker())
            .cloned();
        controller.advance_turn(service).await?;

        let Some(conversation) = controller.conversation() else {
            break;
        };
        let latest = conversation
            .visible_messages()
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        let name = speaker.map(|s| s.name).unwrap_or_default();
        writeln!(out, "{}. {name}: {latest}", conversation.turn)?;
        if conversation.is_finished() {
            break;
        }
    }

    if let Some(conversation) = controller.conversation() {
        let status = if conversation.is_finished() {
            "ended"
        } else {
            "paused"
        };
        writeln!(
            out,
            "\nConversation {status} after {} of {TURN_LIMIT} turns.",
            conversation.turn
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ServiceError;
    use crate::core::message::Message;
    use crate::utils::test_utils::{RecordedCall, ScriptedReply, ScriptedService};

    fn turn_reply(prompt: &str, answer: &str, history: &mut Vec<Message>) -> ScriptedReply {
        history.push(Message::user(prompt));
        history.push(Message::assistant(answer));
        ScriptedReply::Messages(history.clone())
    }

    #[tokio::test]
    async fn runs_requested_turns_and_prints_each_speaker() {
        let mut history = Vec::new();
        let service = ScriptedService::new(vec![
            ScriptedReply::Started("d1".into()),
            turn_reply("p1", "Eat something, dear.", &mut history),
            turn_reply("p2", "I already ate.", &mut history),
        ]);
        let registry = CharacterRegistry::builtin();
        let mut out = Vec::new();

        run_duet(&service, &registry, "GRANDMA", "student", 2, &mut out)
            .await
            .expect("duet");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Grandmother and Student are talking (conversation d1)."));
        assert!(text.contains("1. Grandmother: Eat something, dear.\n"));
        assert!(text.contains("2. Student: I already ate.\n"));
        assert!(text.contains("Conversation paused after 2 of 5 turns."));

        let speakers: Vec<String> = service
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Continue(request) => Some(request.speaker_id),
                _ => None,
            })
            .collect();
        assert_eq!(speakers, vec!["grandma", "student"]);
    }

    #[tokio::test]
    async fn caps_turns_at_the_limit() {
        let mut history = Vec::new();
        let mut replies = vec![ScriptedReply::Started("d2".into())];
        for n in 0..TURN_LIMIT {
            replies.push(turn_reply(&format!("p{n}"), &format!("a{n}"), &mut history));
        }
        let service = ScriptedService::new(replies);
        let registry = CharacterRegistry::builtin();
        let mut out = Vec::new();

        run_duet(&service, &registry, "student", "grandfa", 9, &mut out)
            .await
            .expect("duet");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("⚠️  Conversations end after 5 turns; running 5."));
        assert!(text.contains("5. Student: a4\n"));
        assert!(text.contains("Conversation ended after 5 of 5 turns."));
        assert_eq!(service.calls().len(), 6);
    }

    #[tokio::test]
    async fn unknown_character_fails_before_any_request() {
        let service = ScriptedService::default();
        let registry = CharacterRegistry::builtin();
        let mut out = Vec::new();

        let err = run_duet(&service, &registry, "grandma", "nobody", 1, &mut out)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown character 'nobody'. Available: grandma, student, grandfa"
        );
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn service_failure_is_reported() {
        let service = ScriptedService::new(vec![ScriptedReply::Failed(ServiceError::Status(502))]);
        let registry = CharacterRegistry::builtin();
        let mut out = Vec::new();

        let err = run_duet(&service, &registry, "grandma", "student", 1, &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Error: API Error: 502");
    }
}
