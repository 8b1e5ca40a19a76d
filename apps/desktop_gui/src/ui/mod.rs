//! UI layer for the desktop GUI: app shell and table widgets.

pub mod app;
pub mod widgets;

pub use app::GameApp;
