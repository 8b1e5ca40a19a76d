use shared::protocol::{CardPayload, GameStatePayload};

use crate::ui::widgets::card_fill;

/// The viewer's own cards. Other seats never carry a hand in the masked
/// payload, so this widget only ever shows the requesting player's cards.
pub struct Hand {
    cards: Vec<CardPayload>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn update(&mut self, state: &GameStatePayload) {
        self.cards = state
            .requesting_player()
            .and_then(|player| player.hand.clone())
            .unwrap_or_default();
    }

    pub fn cards(&self) -> &[CardPayload] {
        &self.cards
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.heading(format!("Your hand ({})", self.cards.len()));
        ui.separator();
        if self.cards.is_empty() {
            ui.label("No cards");
            return;
        }
        ui.horizontal_wrapped(|ui| {
            for card in &self.cards {
                let fill = card_fill(card.color);
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(6)
                    .inner_margin(egui::Margin::symmetric(12, 18))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(card.value.glyph())
                                .color(egui::Color32::WHITE)
                                .size(20.0),
                        );
                    })
                    .response
                    .on_hover_text(card.label());
            }
        });
    }
}
