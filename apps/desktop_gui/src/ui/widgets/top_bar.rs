use shared::protocol::{GamePhase, GameStatePayload};

/// Header strip: game name, phase, seat count, and the start control.
/// The start button is only live while the game sits in the lobby and the
/// viewer is the table admin.
pub struct TopBar {
    game_name: String,
    phase: GamePhase,
    player_count: usize,
    max_players: usize,
    can_start: bool,
}

impl TopBar {
    pub fn new() -> Self {
        Self {
            game_name: String::new(),
            phase: GamePhase::Lobby,
            player_count: 0,
            max_players: 0,
            can_start: false,
        }
    }

    pub fn update(&mut self, state: &GameStatePayload) {
        self.game_name = state.name.clone();
        self.phase = state.phase();
        self.player_count = state.players.len();
        self.max_players = state.max_players;
        self.can_start = self.phase == GamePhase::Lobby
            && state
                .requesting_player()
                .map(|player| player.admin)
                .unwrap_or(false);
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn can_start(&self) -> bool {
        self.can_start
    }

    /// Returns true when the start button was clicked this frame.
    pub fn show(&mut self, ui: &mut egui::Ui) -> bool {
        let mut start_clicked = false;
        ui.horizontal(|ui| {
            ui.heading(&self.game_name);
            ui.separator();
            ui.label(self.phase.label());
            ui.separator();
            ui.label(format!("{}/{} players", self.player_count, self.max_players));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(self.can_start, egui::Button::new("Start game"))
                    .clicked()
                {
                    start_clicked = true;
                }
            });
        });
        start_clicked
    }
}
