//! Backend worker thread: owns the async runtime, the HTTP client, and the
//! repeating poll task, and forwards client events into the UI queue.

use std::{sync::Arc, thread, time::Duration};

use client_core::{ClientEvent, GameClient, GameSession, PollerHandle};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::{GameId, PlayerId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

struct ActiveGame {
    client: Arc<GameClient>,
    poller: PollerHandle,
    forwarder: tokio::task::JoinHandle<()>,
}

impl ActiveGame {
    fn shut_down(self) {
        self.poller.stop();
        self.forwarder.abort();
    }
}

pub fn spawn_backend_thread(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    poll_interval: Duration,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let mut active: Option<ActiveGame> = None;

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Connect {
                        server_url,
                        game_id,
                        player_id,
                    } => {
                        if let Some(previous) = active.take() {
                            previous.shut_down();
                        }

                        let client = GameClient::new(GameSession {
                            server_url,
                            game_id: GameId(game_id),
                            player_id: PlayerId(player_id),
                        });
                        // Connected must reach the UI before any state event
                        // the poller publishes, so send it first.
                        let _ = ui_tx.try_send(UiEvent::Connected);
                        let forwarder =
                            spawn_event_forwarder(client.subscribe_events(), ui_tx.clone());
                        // First poll fires immediately from inside the task.
                        let poller = client.start_polling(poll_interval);

                        active = Some(ActiveGame {
                            client,
                            poller,
                            forwarder,
                        });
                    }
                    BackendCommand::StartGame => {
                        let Some(game) = active.as_ref() else {
                            continue;
                        };
                        if let Err(err) = game.client.start_game().await {
                            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::StartGame,
                                err.to_string(),
                            )));
                        }
                    }
                    BackendCommand::RefreshNow => {
                        if let Some(game) = active.as_ref() {
                            game.client.poll_once().await;
                        }
                    }
                    BackendCommand::Disconnect => {
                        if let Some(previous) = active.take() {
                            previous.shut_down();
                        }
                        let _ = ui_tx.try_send(UiEvent::Info("Left the table".to_string()));
                    }
                }
            }

            if let Some(previous) = active.take() {
                previous.shut_down();
            }
        });
    });
}

fn spawn_event_forwarder(
    mut events: tokio::sync::broadcast::Receiver<ClientEvent>,
    ui_tx: Sender<UiEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            let evt = match event {
                ClientEvent::State { seq, state } => UiEvent::State { seq, state },
                ClientEvent::GameStarted => UiEvent::GameStarted,
                ClientEvent::StartRejected => UiEvent::StartRejected,
                ClientEvent::Error(err) => {
                    UiEvent::Error(UiError::from_message(UiErrorContext::StateFetch, err))
                }
            };
            let _ = ui_tx.try_send(evt);
        }
    })
}
