//! Conversation lifecycle state machine.
//!
//! [`ConversationController`] owns the character selection, the single
//! active [`Conversation`], and the transient [`UiState`]. Views never mutate
//! it directly: they read a [`ControllerSnapshot`] and send commands.
//!
//! Every command that reaches the service is split in two halves.
//! `prepare_*` validates, marks the request in flight, and hands back a
//! ticket describing the call; `complete_*` applies the outcome. The event
//! loop performs the network call between the halves without holding the
//! controller, so a second command may be issued while the first is still in
//! flight. Nothing here serializes such overlapping requests. The async
//! helpers ([`ConversationController::start_conversation`] and friends) run
//! both halves back to back for callers that do not need the split.

mod error;


pub use error::*;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{
    ContinueConversationRequest, ContinueConversationResponse, ConversationService, ServiceError,
    StartConversationRequest, StartConversationResponse, StartSingleConversationRequest,
};
use crate::core::characters::Character;
use crate::core::constants::TURN_LIMIT;
use crate::core::conversation::{role_prompt, Conversation, ConversationKind};
use crate::core::message::Message;
use crate::core::selection::SelectionSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    /// No conversation yet.
    Idle,
    /// A start request is in flight.
    Starting,
    /// A conversation is held and turns may advance.
    Active,
    /// A turn request is in flight.
    Advancing,
    /// The two-party turn limit was reached.
    Ended,
}

impl ControllerPhase {
    pub fn label(self) -> &'static str {
        match self {
            ControllerPhase::Idle => "idle",
            ControllerPhase::Starting => "starting",
            ControllerPhase::Active => "active",
            ControllerPhase::Advancing => "advancing",
            ControllerPhase::Ended => "ended",
        }
    }
}

/// Outcome of the most recent request, for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub loading: bool,
    pub error: Option<String>,
}

/// Read-only view of the active conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationView {
    pub id: String,
    pub kind: ConversationKind,
    pub turn: u32,
    /// Messages as the dialogue view should show them.
    pub messages: Vec<Message>,
    pub participants: Vec<Character>,
    pub next_speaker: Option<Character>,
    pub finished: bool,
}

impl From<&Conversation> for ConversationView {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.clone(),
            kind: conversation.kind,
            turn: conversation.turn,
            messages: conversation.visible_messages(),
            participants: conversation.participants.clone(),
            next_speaker: conversation.next_speaker().cloned(),
            finished: conversation.is_finished(),
        }
    }
}

/// Everything a view needs to draw the controller's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSnapshot {
    pub phase: ControllerPhase,
    pub loading: bool,
    pub error: Option<String>,
    pub selection: Vec<Character>,
    pub solo: Option<Character>,
    pub conversation: Option<ConversationView>,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StartRequest {
    Pair(StartConversationRequest),
    Single(StartSingleConversationRequest),
}

/// A start request that has passed validation and is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTicket {
    kind: ConversationKind,
    participants: Vec<Character>,
    request: StartRequest,
}

impl StartTicket {
    pub fn kind(&self) -> ConversationKind {
        self.kind
    }

    pub async fn send(
        &self,
        service: &dyn ConversationService,
    ) -> Result<StartConversationResponse, ServiceError> {
        match &self.request {
            StartRequest::Pair(request) => service.start_conversation(request).await,
            StartRequest::Single(request) => service.start_single_conversation(request).await,
        }
    }
}

/// A turn request that has passed validation and is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnTicket {
    kind: ConversationKind,
    request: ContinueConversationRequest,
}

impl TurnTicket {
    pub fn kind(&self) -> ConversationKind {
        self.kind
    }

    pub fn request(&self) -> &ContinueConversationRequest {
        &self.request
    }

    pub async fn send(
        &self,
        service: &dyn ConversationService,
    ) -> Result<ContinueConversationResponse, ServiceError> {
        service.continue_conversation(&self.request).await
    }
}

pub struct ConversationController {
    selection: SelectionSet,
    solo: Option<Character>,
    conversation: Option<Conversation>,
    phase: ControllerPhase,
    ui: UiState,
    in_flight: usize,
    input: String,
    snapshots: watch::Sender<ControllerSnapshot>,
}

impl Default for ConversationController {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationController {
    pub fn new() -> Self {
        let initial = ControllerSnapshot {
            phase: ControllerPhase::Idle,
            loading: false,
            error: None,
            selection: Vec::new(),
            solo: None,
            conversation: None,
            input: String::new(),
        };
        let (snapshots, _) = watch::channel(initial);
        Self {
            selection: SelectionSet::new(),
            solo: None,
            conversation: None,
            phase: ControllerPhase::Idle,
            ui: UiState::default(),
            in_flight: 0,
            input: String::new(),
            snapshots,
        }
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.ui.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.ui.error.as_deref()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn solo(&self) -> Option<&Character> {
        self.solo.as_ref()
    }

    pub fn conversation(&self) -> Option<&Conversation> {
        self.conversation.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Pull-based read for the render loop.
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            phase: self.phase,
            loading: self.ui.loading,
            error: self.ui.error.clone(),
            selection: self.selection.as_slice().to_vec(),
            solo: self.solo.clone(),
            conversation: self.conversation.as_ref().map(ConversationView::from),
            input: self.input.clone(),
        }
    }

    /// Push-based read: the receiver sees a fresh snapshot after every change.
    pub fn subscribe(&self) -> watch::Receiver<ControllerSnapshot> {
        self.snapshots.subscribe()
    }

    // Selection

    /// Add `character` to the two-party selection. Ignored when the
    /// selection is full or already contains it.
    pub fn select_character(&mut self, character: &Character) -> bool {
        let added = self.selection.insert(character);
        if added {
            debug!(id = %character.id, "character selected");
            self.publish();
        }
        added
    }

    /// Choose the character for a user-and-character conversation.
    pub fn select_solo_character(&mut self, character: &Character) {
        self.solo = Some(character.clone());
        self.publish();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.solo = None;
        self.publish();
    }

    // Input buffer

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.publish();
    }

    pub fn push_input(&mut self, ch: char) {
        self.input.push(ch);
        self.publish();
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
        self.publish();
    }

    pub fn clear_error(&mut self) {
        if self.ui.error.take().is_some() {
            self.publish();
        }
    }

    // Conversation start

    pub fn prepare_start(&mut self) -> Result<StartTicket, ControllerError> {
        let pair = self
            .selection
            .pair()
            .map(|(first, second)| (first.clone(), second.clone()));
        let Some((first, second)) = pair else {
            return Err(self.reject(ControllerError::validation(NEED_TWO_CHARACTERS)));
        };
        let request = StartRequest::Pair(StartConversationRequest {
            gpt1_id: first.id.clone(),
            gpt2_id: second.id.clone(),
        });
        let participants = vec![first, second];

        self.dispatch(ControllerPhase::Starting);
        debug!(first = %participants[0].id, second = %participants[1].id, "starting two-party conversation");
        Ok(StartTicket {
            kind: ConversationKind::TwoParty,
            participants,
            request,
        })
    }

    pub fn prepare_single_start(&mut self) -> Result<StartTicket, ControllerError> {
        let Some(character) = self.solo.clone() else {
            return Err(self.reject(ControllerError::validation(NEED_ONE_CHARACTER)));
        };
        let request = StartRequest::Single(StartSingleConversationRequest {
            gpt_id: character.id.clone(),
        });

        self.dispatch(ControllerPhase::Starting);
        debug!(id = %character.id, "starting single-character conversation");
        Ok(StartTicket {
            kind: ConversationKind::UserAndCharacter,
            participants: vec![character],
            request,
        })
    }

    pub fn complete_start(
        &mut self,
        ticket: StartTicket,
        result: Result<StartConversationResponse, ServiceError>,
    ) -> Result<(), ControllerError> {
        self.release();
        match result {
            Ok(response) => {
                info!(
                    conversation_id = %response.conversation_id,
                    kind = ticket.kind.label(),
                    "conversation started"
                );
                self.conversation = Some(Conversation::new(
                    response.conversation_id,
                    ticket.kind,
                    ticket.participants,
                ));
                self.phase = ControllerPhase::Active;
                self.ui.error = None;
                self.publish();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to start conversation");
                self.phase = self.stable_phase();
                Err(self.reject(err.into()))
            }
        }
    }

    // Turns

    /// Validate and build the next automated two-party turn.
    pub fn prepare_advance(&mut self) -> Result<TurnTicket, ControllerError> {
        let current = self.conversation.as_ref().map(|conversation| {
            (
                conversation.kind,
                conversation.turn,
                conversation.id.clone(),
                conversation.next_speaker().cloned(),
            )
        });
        let Some((kind, turn, conversation_id, speaker)) = current else {
            return Err(self.reject(ControllerError::validation(NO_ACTIVE_CONVERSATION)));
        };
        if kind != ConversationKind::TwoParty {
            return Err(self.reject(ControllerError::validation(ADVANCE_NEEDS_TWO_PARTY)));
        }
        if turn >= TURN_LIMIT {
            self.phase = ControllerPhase::Ended;
            return Err(self.reject(ControllerError::ConversationEnded));
        }
        let Some(speaker) = speaker else {
            return Err(self.reject(ControllerError::validation(NEED_TWO_CHARACTERS)));
        };

        self.dispatch(ControllerPhase::Advancing);
        debug!(%conversation_id, turn, speaker = %speaker.id, "advancing turn");
        Ok(TurnTicket {
            kind,
            request: ContinueConversationRequest {
                conversation_id,
                user_message: role_prompt(&speaker),
                speaker_id: speaker.id,
            },
        })
    }

    /// Validate and build a user-authored turn.
    pub fn prepare_submit(&mut self, text: &str) -> Result<TurnTicket, ControllerError> {
        let current = self.conversation.as_ref().map(|conversation| {
            (
                conversation.kind,
                conversation.id.clone(),
                conversation.next_speaker().cloned(),
            )
        });
        let Some((kind, conversation_id, speaker)) = current else {
            return Err(self.reject(ControllerError::validation(NO_ACTIVE_CONVERSATION)));
        };
        if kind != ConversationKind::UserAndCharacter {
            return Err(self.reject(ControllerError::validation(SUBMIT_NEEDS_SINGLE)));
        }
        if text.trim().is_empty() {
            return Err(self.reject(ControllerError::validation(EMPTY_MESSAGE)));
        }
        let Some(speaker) = speaker else {
            return Err(self.reject(ControllerError::validation(NEED_ONE_CHARACTER)));
        };

        self.dispatch(ControllerPhase::Advancing);
        debug!(%conversation_id, speaker = %speaker.id, "submitting user message");
        Ok(TurnTicket {
            kind,
            request: ContinueConversationRequest {
                conversation_id,
                user_message: text.to_string(),
                speaker_id: speaker.id,
            },
        })
    }

    pub fn complete_turn(
        &mut self,
        ticket: TurnTicket,
        result: Result<ContinueConversationResponse, ServiceError>,
    ) -> Result<(), ControllerError> {
        self.release();
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "failed to continue conversation");
                self.phase = self.stable_phase();
                return Err(self.reject(err.into()));
            }
        };

        let is_current = self
            .conversation
            .as_ref()
            .is_some_and(|conversation| conversation.id == ticket.request.conversation_id);
        if !is_current {
            warn!(
                conversation_id = %ticket.request.conversation_id,
                "discarding turn for a conversation that is no longer active"
            );
            self.phase = self.stable_phase();
            self.publish();
            return Ok(());
        }
        let Some(conversation) = self.conversation.as_mut() else {
            return Ok(());
        };

        conversation.replace_messages(response.messages);
        conversation.turn += 1;
        let finished = conversation.is_finished();
        let turn = conversation.turn;

        if ticket.kind == ConversationKind::UserAndCharacter {
            self.input.clear();
        }
        self.phase = if finished {
            ControllerPhase::Ended
        } else {
            ControllerPhase::Active
        };
        self.ui.error = None;
        debug!(turn, finished, "turn completed");
        self.publish();
        Ok(())
    }

    // One-shot helpers

    pub async fn start_conversation(
        &mut self,
        service: &dyn ConversationService,
    ) -> Result<(), ControllerError> {
        let ticket = self.prepare_start()?;
        let result = ticket.send(service).await;
        self.complete_start(ticket, result)
    }

    pub async fn start_single_conversation(
        &mut self,
        service: &dyn ConversationService,
    ) -> Result<(), ControllerError> {
        let ticket = self.prepare_single_start()?;
        let result = ticket.send(service).await;
        self.complete_start(ticket, result)
    }

    pub async fn advance_turn(
        &mut self,
        service: &dyn ConversationService,
    ) -> Result<(), ControllerError> {
        let ticket = self.prepare_advance()?;
        let result = ticket.send(service).await;
        self.complete_turn(ticket, result)
    }

    pub async fn submit_user_message(
        &mut self,
        service: &dyn ConversationService,
        text: &str,
    ) -> Result<(), ControllerError> {
        let ticket = self.prepare_submit(text)?;
        let result = ticket.send(service).await;
        self.complete_turn(ticket, result)
    }

    // Internals

    fn dispatch(&mut self, phase: ControllerPhase) {
        self.in_flight += 1;
        self.ui.loading = true;
        self.phase = phase;
        self.publish();
    }

    fn release(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.ui.loading = self.in_flight > 0;
    }

    fn reject(&mut self, err: ControllerError) -> ControllerError {
        self.ui.error = Some(err.to_string());
        self.publish();
        err
    }

    /// Phase implied by the conversation currently held.
    fn stable_phase(&self) -> ControllerPhase {
        match &self.conversation {
            None => ControllerPhase::Idle,
            Some(conversation) if conversation.is_finished() => ControllerPhase::Ended,
            Some(_) => ControllerPhase::Active,
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}
