use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CardColor, CardValue, GameId, PlayerId};

/// One card as the server reports it. `color` is absent for a wild that has
/// not been assigned a color yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<CardColor>,
    pub value: CardValue,
}

impl CardPayload {
    pub fn label(&self) -> String {
        match self.color {
            Some(color) => format!("{} {}", color.label(), self.value.glyph()),
            None => self.value.glyph(),
        }
    }
}

/// Per-player view the server hands out. The server masks `id` and `hand`
/// for everyone but the requesting player, and attaches `draw_required` only
/// to the requesting player while it is their turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PlayerId>,
    pub name: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub hand_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<CardPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_required: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Lobby,
    InPlay,
    Finished,
}

impl GamePhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Lobby => "Waiting to start",
            Self::InPlay => "In play",
            Self::Finished => "Finished",
        }
    }
}

/// Full game state as fetched from the state endpoint. The players array is
/// in seating order; the last element of `stack` is the top of the discard
/// pile. The server-side draw deck is masked to a count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStatePayload {
    pub id: GameId,
    pub name: String,
    pub players: Vec<PlayerState>,
    #[serde(default)]
    pub stack: Vec<CardPayload>,
    #[serde(default)]
    pub deck_count: usize,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub reverse: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    pub points_to_win: u32,
    pub min_players: usize,
    pub max_players: usize,
}

impl GameStatePayload {
    pub fn phase(&self) -> GamePhase {
        if self.ended_at.is_some() {
            GamePhase::Finished
        } else if self.started_at.is_some() {
            GamePhase::InPlay
        } else {
            GamePhase::Lobby
        }
    }

    /// The player this view was rendered for: the only one whose id survives
    /// server-side masking.
    pub fn requesting_player(&self) -> Option<&PlayerState> {
        self.players.iter().find(|player| player.id.is_some())
    }

    pub fn active_player(&self) -> Option<&PlayerState> {
        self.players.iter().find(|player| player.active)
    }

    pub fn top_of_stack(&self) -> Option<&CardPayload> {
        self.stack.last()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub result: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masked_two_player_state() -> serde_json::Value {
        serde_json::json!({
            "id": "g-117",
            "name": "Friday table",
            "players": [
                {
                    "id": "p-1",
                    "name": "PlayerOne",
                    "admin": true,
                    "active": true,
                    "points": 105,
                    "hand_size": 2,
                    "hand": [
                        {"color": "RED", "value": "4"},
                        {"color": null, "value": "WILD"}
                    ],
                    "draw_required": false
                },
                {
                    "name": "PlayerTwo",
                    "active": false,
                    "points": 40,
                    "hand_size": 7
                }
            ],
            "stack": [
                {"color": "BLUE", "value": "5"},
                {"color": "GREEN", "value": "REVERSE"}
            ],
            "deck_count": 83,
            "active": true,
            "reverse": false,
            "created_at": "2024-05-03T18:00:00Z",
            "started_at": "2024-05-03T18:02:11Z",
            "points_to_win": 250,
            "min_players": 2,
            "max_players": 10
        })
    }

    #[test]
    fn decodes_masked_state_and_resolves_requesting_player() {
        let state: GameStatePayload =
            serde_json::from_value(masked_two_player_state()).expect("decode");

        assert_eq!(state.phase(), GamePhase::InPlay);

        let me = state.requesting_player().expect("requesting player");
        assert_eq!(me.name, "PlayerOne");
        assert_eq!(me.hand.as_ref().map(Vec::len), Some(2));

        let other = &state.players[1];
        assert!(other.id.is_none());
        assert!(other.hand.is_none());
        assert!(other.draw_required.is_none());
        assert_eq!(other.hand_size, 7);
    }

    #[test]
    fn top_of_stack_is_the_last_discard() {
        let state: GameStatePayload =
            serde_json::from_value(masked_two_player_state()).expect("decode");
        let top = state.top_of_stack().expect("top card");
        assert_eq!(top.value, CardValue::Reverse);
        assert_eq!(top.color, Some(CardColor::Green));
    }

    #[test]
    fn lobby_and_finished_phases_follow_timestamps() {
        let mut value = masked_two_player_state();
        value["started_at"] = serde_json::Value::Null;
        let lobby: GameStatePayload = serde_json::from_value(value.clone()).expect("decode");
        assert_eq!(lobby.phase(), GamePhase::Lobby);

        value["started_at"] = serde_json::json!("2024-05-03T18:02:11Z");
        value["ended_at"] = serde_json::json!("2024-05-03T19:30:00Z");
        let finished: GameStatePayload = serde_json::from_value(value).expect("decode");
        assert_eq!(finished.phase(), GamePhase::Finished);
    }

    #[test]
    fn wild_card_without_color_labels_by_glyph_only() {
        let card = CardPayload {
            color: None,
            value: CardValue::Wild,
        };
        assert_eq!(card.label(), "★");

        let colored = CardPayload {
            color: Some(CardColor::Red),
            value: CardValue::Number(4),
        };
        assert_eq!(colored.label(), "Red 4");
    }
}
