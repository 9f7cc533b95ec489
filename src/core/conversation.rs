use crate::core::characters::Character;
use crate::core::constants::TURN_LIMIT;
use crate::core::message::{assistant_only, Message};

/// Which flavour of conversation the service was asked to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationKind {
    /// Two characters talk to each other, driven by synthesized prompts.
    TwoParty,
    /// The operator types free text to a single character.
    UserAndCharacter,
}

impl ConversationKind {
    pub fn label(self) -> &'static str {
        match self {
            ConversationKind::TwoParty => "two-party",
            ConversationKind::UserAndCharacter => "user and character",
        }
    }
}

/// The single active conversation, as issued by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: String,
    pub kind: ConversationKind,
    pub turn: u32,
    pub messages: Vec<Message>,
    /// Characters fixed at start time: both speakers for two-party, the one
    /// character for user-and-character.
    pub participants: Vec<Character>,
}

impl Conversation {
    pub fn new(id: String, kind: ConversationKind, participants: Vec<Character>) -> Self {
        Self {
            id,
            kind,
            turn: 0,
            messages: Vec::new(),
            participants,
        }
    }

    /// Character whose role the next automated turn is attributed to.
    /// Even turns belong to the first participant, odd turns to the second.
    pub fn speaker_for_turn(&self, turn: u32) -> Option<&Character> {
        match self.kind {
            ConversationKind::TwoParty => {
                let index = (turn % 2) as usize;
                self.participants.get(index)
            }
            ConversationKind::UserAndCharacter => self.participants.first(),
        }
    }

    pub fn next_speaker(&self) -> Option<&Character> {
        self.speaker_for_turn(self.turn)
    }

    pub fn is_finished(&self) -> bool {
        self.kind == ConversationKind::TwoParty && self.turn >= TURN_LIMIT
    }

    /// Replace the transcript with the service's latest message list.
    pub fn replace_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    /// Read-only projection handed to views. Two-party conversations show
    /// only assistant-authored entries; their user turns are synthesized
    /// prompts.
    pub fn visible_messages(&self) -> Vec<Message> {
        match self.kind {
            ConversationKind::TwoParty => assistant_only(&self.messages),
            ConversationKind::UserAndCharacter => self.messages.clone(),
        }
    }
}

/// Prompt sent on behalf of `speaker` during a two-party turn.
pub fn role_prompt(speaker: &Character) -> String {
    format!("Respond according to the role of {}.", speaker.name)
}
