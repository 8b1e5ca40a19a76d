use shared::protocol::{CardPayload, GameStatePayload};

use crate::ui::widgets::card_fill;

/// Center of the table: top of the discard pile, pile depths, the play
/// direction, and a prompt when the viewer has to draw before playing.
pub struct Tray {
    top_card: Option<CardPayload>,
    stack_depth: usize,
    deck_count: usize,
    reverse: bool,
    draw_required: bool,
}

impl Tray {
    pub fn new() -> Self {
        Self {
            top_card: None,
            stack_depth: 0,
            deck_count: 0,
            reverse: false,
            draw_required: false,
        }
    }

    pub fn update(&mut self, state: &GameStatePayload) {
        self.top_card = state.top_of_stack().cloned();
        self.stack_depth = state.stack.len();
        self.deck_count = state.deck_count;
        self.reverse = state.reverse;
        self.draw_required = state
            .requesting_player()
            .and_then(|player| player.draw_required)
            .unwrap_or(false);
    }

    pub fn top_card(&self) -> Option<&CardPayload> {
        self.top_card.as_ref()
    }

    pub fn deck_count(&self) -> usize {
        self.deck_count
    }

    pub fn draw_required(&self) -> bool {
        self.draw_required
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match &self.top_card {
                Some(card) => {
                    let fill = card_fill(card.color);
                    egui::Frame::new()
                        .fill(fill)
                        .corner_radius(6)
                        .inner_margin(egui::Margin::symmetric(18, 26))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(card.value.glyph())
                                    .color(egui::Color32::WHITE)
                                    .size(28.0),
                            );
                        });
                    ui.vertical(|ui| {
                        ui.label(card.label());
                        ui.label(format!("{} in the discard pile", self.stack_depth));
                    });
                }
                None => {
                    ui.label("No card played yet");
                }
            }
            ui.separator();
            ui.label(format!("Draw pile: {} cards", self.deck_count));
            ui.separator();
            ui.label(if self.reverse {
                "Play direction: ⟲ reversed"
            } else {
                "Play direction: ⟳"
            });
        });
        if self.draw_required {
            ui.colored_label(egui::Color32::YELLOW, "You must draw a card");
        }
    }
}
