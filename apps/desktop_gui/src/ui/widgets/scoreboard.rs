use shared::protocol::GameStatePayload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub name: String,
    pub points: u32,
    pub hand_size: usize,
    pub active: bool,
    pub admin: bool,
    pub is_me: bool,
}

/// Seating-order list of players with points and hand counts. The masked
/// payload only carries an id for the viewer, which is how `is_me` is set.
pub struct Scoreboard {
    rows: Vec<ScoreRow>,
    points_to_win: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            points_to_win: 0,
        }
    }

    pub fn update(&mut self, state: &GameStatePayload) {
        self.points_to_win = state.points_to_win;
        self.rows = state
            .players
            .iter()
            .map(|player| ScoreRow {
                name: player.name.clone(),
                points: player.points,
                hand_size: player.hand_size,
                active: player.active,
                admin: player.admin,
                is_me: player.id.is_some(),
            })
            .collect();
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.heading("Players");
        if self.points_to_win > 0 {
            ui.label(format!("First to {} points", self.points_to_win));
        }
        ui.separator();
        egui::Grid::new("scoreboard_grid")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                for row in &self.rows {
                    let mut name = row.name.clone();
                    if row.admin {
                        name.push_str(" ♛");
                    }
                    if row.is_me {
                        name.push_str(" (you)");
                    }
                    let name_text = if row.active {
                        egui::RichText::new(name).strong()
                    } else {
                        egui::RichText::new(name)
                    };
                    ui.label(name_text);
                    ui.label(format!("{} pts", row.points));
                    ui.label(format!("{} cards", row.hand_size));
                    ui.end_row();
                }
            });
    }
}
