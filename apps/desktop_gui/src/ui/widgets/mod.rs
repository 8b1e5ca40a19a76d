//! Table widgets. Each widget caches the slice of game state it renders;
//! `update` refreshes the cache from a fresh payload and `show` draws it.

pub mod hand;
pub mod scoreboard;
pub mod top_bar;
pub mod tray;

pub use hand::Hand;
pub use scoreboard::Scoreboard;
pub use top_bar::TopBar;
pub use tray::Tray;

use shared::domain::CardColor;

pub(crate) fn card_fill(color: Option<CardColor>) -> egui::Color32 {
    match color {
        Some(CardColor::Red) => egui::Color32::from_rgb(196, 59, 49),
        Some(CardColor::Yellow) => egui::Color32::from_rgb(212, 175, 40),
        Some(CardColor::Green) => egui::Color32::from_rgb(56, 148, 74),
        Some(CardColor::Blue) => egui::Color32::from_rgb(41, 98, 185),
        None => egui::Color32::from_rgb(40, 40, 44),
    }
}
