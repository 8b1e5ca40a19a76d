use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use reqwest::Client;
use serde_json::Value;
use shared::{
    domain::{GameId, PlayerId},
    protocol::{GameStatePayload, StartGameResponse},
};
use thiserror::Error;
use tokio::{sync::broadcast, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, info, warn};

/// How often the table refreshes itself. The poller takes the period as a
/// parameter so tests can compress it; this is the product default.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Where to poll and on whose behalf. The player id scopes the server-side
/// masking: only this player's hand and id come back unredacted.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub server_url: String,
    pub game_id: GameId,
    pub player_id: PlayerId,
}

#[derive(Debug, Error)]
pub enum StateError {
    /// The server could not be reached or answered with a non-success
    /// status. Retried implicitly by the next poll tick.
    #[error("transport failure talking to the game server: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a body that is neither empty nor a valid
    /// state payload. Reported, not silently swallowed.
    #[error("malformed state payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone)]
pub enum ClientEvent {
    /// A non-empty state fetch. `seq` increases monotonically across every
    /// fetch this client issues (timer-driven and start-triggered alike), so
    /// consumers can discard a stale response that arrives late.
    State {
        seq: u64,
        state: GameStatePayload,
    },
    GameStarted,
    StartRejected,
    Error(String),
}

/// HTTP client for one seat at one game, publishing fetch results on a
/// broadcast channel.
pub struct GameClient {
    http: Client,
    session: GameSession,
    fetch_seq: AtomicU64,
    events: broadcast::Sender<ClientEvent>,
}

impl GameClient {
    pub fn new(session: GameSession) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            http: Client::new(),
            session,
            fetch_seq: AtomicU64::new(0),
            events,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    fn state_url(&self) -> String {
        format!(
            "{}/games/{}/state",
            self.session.server_url.trim_end_matches('/'),
            self.session.game_id
        )
    }

    fn start_url(&self) -> String {
        format!(
            "{}/games/{}/start",
            self.session.server_url.trim_end_matches('/'),
            self.session.game_id
        )
    }

    /// Fetch the current state. `Ok(None)` means the server had nothing for
    /// us (unknown ids answer with an empty object); the caller treats that
    /// as "no update this tick".
    pub async fn get_state(&self) -> Result<Option<GameStatePayload>, StateError> {
        let response = self
            .http
            .get(self.state_url())
            .query(&[("player_id", self.session.player_id.0.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|err| StateError::Malformed(format!("not JSON: {err}")))?;

        if value.as_object().is_some_and(|object| object.is_empty()) {
            return Ok(None);
        }

        serde_json::from_value(value)
            .map(Some)
            .map_err(|err| StateError::Malformed(err.to_string()))
    }

    /// Ask the server to start the game. Truthy result means the game
    /// transitioned out of the lobby.
    pub async fn start(&self) -> Result<bool, StateError> {
        let response = self
            .http
            .post(self.start_url())
            .query(&[("player_id", self.session.player_id.0.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body: StartGameResponse = response
            .json()
            .await
            .map_err(|err| StateError::Malformed(format!("bad start response: {err}")))?;
        Ok(body.result)
    }

    /// One fetch-and-publish step. Allocates the next sequence number,
    /// fetches, and publishes a `State` event for a non-empty result. Empty
    /// results and transport failures produce no event: the next tick is the
    /// retry. Malformed payloads are reported as `Error` events.
    pub async fn poll_once(&self) -> Option<u64> {
        let seq = self.fetch_seq.fetch_add(1, Ordering::Relaxed);
        match self.get_state().await {
            Ok(Some(state)) => {
                let _ = self.events.send(ClientEvent::State { seq, state });
                Some(seq)
            }
            Ok(None) => {
                debug!(seq, "state endpoint returned nothing; skipping this tick");
                None
            }
            Err(StateError::Transport(err)) => {
                warn!(seq, error = %err, "state fetch failed; retrying on the next tick");
                None
            }
            Err(err @ StateError::Malformed(_)) => {
                let _ = self.events.send(ClientEvent::Error(err.to_string()));
                None
            }
        }
    }

    /// Fire the start action. Iff the server reports success, issue one
    /// immediate extra state fetch, independent of the repeating timer.
    pub async fn start_game(&self) -> Result<bool, StateError> {
        let started = self.start().await?;
        if started {
            info!(game_id = %self.session.game_id, "game started");
            let _ = self.events.send(ClientEvent::GameStarted);
            self.poll_once().await;
        } else {
            let _ = self.events.send(ClientEvent::StartRejected);
        }
        Ok(started)
    }

    /// Spawn the repeating poll task: one immediate fetch, then one per
    /// `period` until the handle is stopped or dropped.
    pub fn start_polling(self: &Arc<Self>, period: Duration) -> PollerHandle {
        let client = Arc::clone(self);
        let task = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                client.poll_once().await;
            }
        });
        PollerHandle { task }
    }
}

/// Cancellation handle for the repeating poll task. Stopping (or dropping)
/// the handle aborts the task; in-flight requests are simply abandoned.
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
