//! Interactive event loop.
//!
//! Terminal events and request completions both end up as [`AppAction`]s
//! applied to the [`App`]. Requests the app asks for run as detached tasks and
//! report back through the action channel, so the screen keeps redrawing (and
//! accepting keys) while a request is in flight.

mod keybindings;
mod lifecycle;

pub use keybindings::map_key;
pub use lifecycle::{restore_terminal, setup_terminal, SharedTerminal};

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::ConversationService;
use crate::core::app::{apply_actions, App, AppAction, AppActionDispatcher, AppCommand};
use crate::core::conversation::ConversationKind;
use crate::ui::renderer::ui;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

/// Run the request behind `command` and dispatch its completion.
pub fn spawn_request(
    command: AppCommand,
    service: Arc<dyn ConversationService>,
    dispatcher: AppActionDispatcher,
) {
    tokio::spawn(async move {
        let action = match command {
            AppCommand::SendStart(ticket) => {
                debug!(kind = ticket.kind().label(), "sending start request");
                let result = ticket.send(service.as_ref()).await;
                AppAction::StartFinished { ticket, result }
            }
            AppCommand::SendTurn(ticket) => {
                debug!(
                    kind = ticket.kind().label(),
                    conversation = %ticket.request().conversation_id,
                    "sending turn request"
                );
                let result = ticket.send(service.as_ref()).await;
                AppAction::TurnFinished { ticket, result }
            }
        };
        dispatcher.dispatch(action);
    });
}

fn apply_and_spawn(
    app: &mut App,
    actions: Vec<AppAction>,
    service: &Arc<dyn ConversationService>,
    dispatcher: &AppActionDispatcher,
) {
    for command in apply_actions(app, actions) {
        spawn_request(command, service.clone(), dispatcher.clone());
    }
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) {
    tokio::task::spawn_blocking(move || loop {
        if event_tx.is_closed() {
            break;
        }
        match event::poll(EVENT_POLL_INTERVAL) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => continue,
            },
            Ok(false) => {}
            Err(e) => {
                warn!(error = %e, "terminal event reader stopped");
                break;
            }
        }
    });
}

/// Wait for the next batch of actions. Returns `None` once the terminal event
/// reader has gone away, since no further input can arrive.
async fn next_actions(
    mode: ConversationKind,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    action_rx: &mut mpsc::UnboundedReceiver<AppAction>,
) -> Option<Vec<AppAction>> {
    let mut pending = Vec::new();
    tokio::select! {
        ui_event = event_rx.recv() => {
            let UiEvent::Crossterm(event) = ui_event?;
            if let Event::Key(key) = event {
                if key.kind == KeyEventKind::Press {
                    pending.extend(map_key(key, mode));
                }
            }
        }
        Some(action) = action_rx.recv() => pending.push(action),
    }
    while let Ok(action) = action_rx.try_recv() {
        pending.push(action);
    }
    Some(pending)
}

async fn event_loop(
    app: &mut App,
    terminal: &SharedTerminal,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    action_rx: &mut mpsc::UnboundedReceiver<AppAction>,
    service: &Arc<dyn ConversationService>,
    dispatcher: &AppActionDispatcher,
) -> Result<(), Box<dyn Error>> {
    loop {
        {
            let mut guard = terminal.lock().await;
            guard.draw(|f| ui(f, app))?;
        }

        if app.exit_requested {
            return Ok(());
        }

        let Some(pending) = next_actions(app.mode, event_rx, action_rx).await else {
            warn!("terminal input closed; leaving interactive session");
            return Ok(());
        };

        apply_and_spawn(app, pending, service, dispatcher);
    }
}

pub async fn run_chat(
    mut app: App,
    service: Arc<dyn ConversationService>,
) -> Result<(), Box<dyn Error>> {
    info!(base_url = %app.base_url, characters = app.registry.len(), "starting interactive session");

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let dispatcher = AppActionDispatcher::new(action_tx);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();

    let terminal = setup_terminal()?;
    spawn_event_reader(event_tx);

    let result = event_loop(
        &mut app,
        &terminal,
        &mut event_rx,
        &mut action_rx,
        &service,
        &dispatcher,
    )
    .await;

    drop(event_rx);
    restore_terminal(&terminal).await?;
    info!("interactive session ended");
    result
}
