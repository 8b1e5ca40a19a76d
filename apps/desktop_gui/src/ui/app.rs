//! App shell: connect screen, table view, and the per-frame event pump.

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::protocol::GameStatePayload;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{classify_connect_failure, err_label, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::widgets::{Hand, Scoreboard, TopBar, Tray};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppView {
    Connect,
    Table,
}

pub struct GameApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,
    game_id_input: String,
    player_id_input: String,

    view: AppView,
    status: String,
    last_seq: Option<u64>,
    state_received: bool,

    top_bar: TopBar,
    scoreboard: Scoreboard,
    tray: Tray,
    hand: Hand,

    #[cfg(test)]
    update_trace: Vec<&'static str>,
}

impl GameApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, settings: &Settings) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url: settings.server_url.clone(),
            game_id_input: settings.game_id.clone(),
            player_id_input: settings.player_id.clone(),
            view: AppView::Connect,
            status: "Not connected".to_string(),
            last_seq: None,
            state_received: false,
            top_bar: TopBar::new(),
            scoreboard: Scoreboard::new(),
            tray: Tray::new(),
            hand: Hand::new(),
            #[cfg(test)]
            update_trace: Vec::new(),
        }
    }

    #[cfg(test)]
    fn trace_update(&mut self, widget: &'static str) {
        self.update_trace.push(widget);
    }

    #[cfg(not(test))]
    fn trace_update(&mut self, _widget: &'static str) {}

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Connected => {
                    self.view = AppView::Table;
                    self.status = "Watching the table".to_string();
                    self.last_seq = None;
                    self.state_received = false;
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::State { seq, state } => {
                    if self.last_seq.is_some_and(|prev| seq <= prev) {
                        tracing::debug!(seq, "dropping stale state fetch");
                        continue;
                    }
                    self.last_seq = Some(seq);
                    self.apply_state(state);
                }
                UiEvent::GameStarted => {
                    self.status = "Game started".to_string();
                }
                UiEvent::StartRejected => {
                    self.status = "Server declined to start the game".to_string();
                }
                UiEvent::Error(err) => {
                    self.status = match err.context {
                        UiErrorContext::BackendStartup => classify_connect_failure(&err.message),
                        _ => format!("{} error: {}", err_label(err.category), err.message),
                    };
                }
            }
        }
    }

    /// Reflect a fresh payload into every widget. Header first, then the
    /// seats, then the shared piles, then the viewer's own hand.
    fn apply_state(&mut self, state: GameStatePayload) {
        self.top_bar.update(&state);
        self.trace_update("top_bar");
        self.scoreboard.update(&state);
        self.trace_update("scoreboard");
        self.tray.update(&state);
        self.trace_update("tray");
        self.hand.update(&state);
        self.trace_update("hand");
        self.state_received = true;
    }

    fn connect_inputs_complete(&self) -> bool {
        !self.server_url.trim().is_empty()
            && !self.game_id_input.trim().is_empty()
            && !self.player_id_input.trim().is_empty()
    }

    fn request_connect(&mut self) {
        self.status = "Connecting".to_string();
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Connect {
                server_url: self.server_url.trim().to_string(),
                game_id: self.game_id_input.trim().to_string(),
                player_id: self.player_id_input.trim().to_string(),
            },
            &mut self.status,
        );
    }

    fn leave_table(&mut self) {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Disconnect, &mut self.status);
        self.view = AppView::Connect;
        self.last_seq = None;
        self.state_received = false;
    }

    fn show_connect_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.heading("Join a table");
                ui.add_space(12.0);
                egui::Grid::new("connect_form").num_columns(2).show(ui, |ui| {
                    ui.label("Server");
                    ui.text_edit_singleline(&mut self.server_url);
                    ui.end_row();
                    ui.label("Game id");
                    ui.text_edit_singleline(&mut self.game_id_input);
                    ui.end_row();
                    ui.label("Player id");
                    ui.text_edit_singleline(&mut self.player_id_input);
                    ui.end_row();
                });
                ui.add_space(8.0);
                let can_connect = self.connect_inputs_complete();
                if ui
                    .add_enabled(can_connect, egui::Button::new("Connect"))
                    .clicked()
                {
                    self.request_connect();
                }
                ui.add_space(8.0);
                ui.label(&self.status);
            });
        });
    }

    fn show_table(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("table_top_bar").show(ctx, |ui| {
            if self.top_bar.show(ui) {
                self.status = "Starting the game".to_string();
                dispatch_backend_command(&self.cmd_tx, BackendCommand::StartGame, &mut self.status);
            }
        });

        egui::TopBottomPanel::bottom("table_status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Leave").clicked() {
                        self.leave_table();
                    }
                    if ui.button("Refresh").clicked() {
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::RefreshNow,
                            &mut self.status,
                        );
                    }
                });
            });
        });

        egui::SidePanel::left("table_scoreboard")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                self.scoreboard.show(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.state_received {
                ui.centered_and_justified(|ui| {
                    ui.label("Waiting for the first update from the server");
                });
                return;
            }
            self.tray.show(ui);
            ui.add_space(16.0);
            ui.separator();
            self.hand.show(ui);
        });
    }
}

impl eframe::App for GameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        match self.view {
            AppView::Connect => self.show_connect_screen(ctx),
            AppView::Table => self.show_table(ctx),
        }

        // Poll results arrive from the backend thread; keep repainting so
        // they show up without user input.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::protocol::GamePhase;

    fn test_app() -> (GameApp, Sender<UiEvent>, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded(16);
        let (ui_tx, ui_rx) = bounded(16);
        let app = GameApp::new(cmd_tx, ui_rx, &Settings::default());
        (app, ui_tx, cmd_rx)
    }

    fn table_state(name: &str, deck_count: usize) -> GameStatePayload {
        serde_json::from_value(serde_json::json!({
            "id": "g-1",
            "name": name,
            "players": [
                {
                    "id": "p-1",
                    "name": "Ada",
                    "admin": true,
                    "active": true,
                    "points": 10,
                    "hand_size": 2,
                    "hand": [
                        {"color": "RED", "value": "4"},
                        {"value": "WILD"}
                    ]
                },
                {"name": "Brin", "points": 3, "hand_size": 5}
            ],
            "stack": [{"color": "BLUE", "value": "5"}],
            "deck_count": deck_count,
            "created_at": "2026-08-30T12:00:00Z",
            "started_at": "2026-08-30T12:05:00Z",
            "points_to_win": 250,
            "min_players": 2,
            "max_players": 10
        }))
        .expect("fixture decodes")
    }

    #[test]
    fn one_payload_refreshes_every_widget() {
        let (mut app, ui_tx, _cmd_rx) = test_app();
        ui_tx
            .send(UiEvent::State {
                seq: 0,
                state: table_state("Evening round", 40),
            })
            .expect("send");

        app.process_ui_events();

        assert_eq!(app.top_bar.game_name(), "Evening round");
        assert_eq!(app.top_bar.phase(), GamePhase::InPlay);
        assert_eq!(app.scoreboard.rows().len(), 2);
        assert_eq!(app.tray.deck_count(), 40);
        assert_eq!(app.hand.cards().len(), 2);
        assert!(app.state_received);
    }

    #[test]
    fn widgets_update_in_header_seats_piles_hand_order() {
        let (mut app, ui_tx, _cmd_rx) = test_app();
        ui_tx
            .send(UiEvent::State {
                seq: 0,
                state: table_state("Evening round", 40),
            })
            .expect("send");

        app.process_ui_events();

        assert_eq!(app.update_trace, ["top_bar", "scoreboard", "tray", "hand"]);
    }

    #[test]
    fn stale_fetches_are_discarded() {
        let (mut app, ui_tx, _cmd_rx) = test_app();
        ui_tx
            .send(UiEvent::State {
                seq: 5,
                state: table_state("Fresh", 40),
            })
            .expect("send");
        ui_tx
            .send(UiEvent::State {
                seq: 3,
                state: table_state("Stale", 99),
            })
            .expect("send");

        app.process_ui_events();

        assert_eq!(app.top_bar.game_name(), "Fresh");
        assert_eq!(app.tray.deck_count(), 40);
        // The stale payload never reached any widget.
        assert_eq!(app.update_trace, ["top_bar", "scoreboard", "tray", "hand"]);

        ui_tx
            .send(UiEvent::State {
                seq: 6,
                state: table_state("Newer", 39),
            })
            .expect("send");
        app.process_ui_events();
        assert_eq!(app.top_bar.game_name(), "Newer");
    }

    #[test]
    fn rejected_start_keeps_the_current_view() {
        let (mut app, ui_tx, _cmd_rx) = test_app();
        ui_tx
            .send(UiEvent::State {
                seq: 0,
                state: table_state("Evening round", 40),
            })
            .expect("send");
        ui_tx.send(UiEvent::StartRejected).expect("send");

        app.process_ui_events();

        assert!(app.state_received);
        assert_eq!(app.top_bar.game_name(), "Evening round");
        assert!(app.status.contains("declined"));
    }

    #[test]
    fn connected_event_moves_to_the_table_view() {
        let (mut app, ui_tx, _cmd_rx) = test_app();
        assert_eq!(app.view, AppView::Connect);

        ui_tx.send(UiEvent::Connected).expect("send");
        app.process_ui_events();

        assert_eq!(app.view, AppView::Table);
        assert!(!app.state_received);
    }

    #[test]
    fn reconnecting_resets_the_stale_fetch_guard() {
        let (mut app, ui_tx, _cmd_rx) = test_app();
        ui_tx
            .send(UiEvent::State {
                seq: 9,
                state: table_state("First table", 40),
            })
            .expect("send");
        app.process_ui_events();

        // A new connection restarts sequence numbering at zero.
        ui_tx.send(UiEvent::Connected).expect("send");
        ui_tx
            .send(UiEvent::State {
                seq: 0,
                state: table_state("Second table", 80),
            })
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.top_bar.game_name(), "Second table");
    }

    #[test]
    fn finished_game_shows_the_final_phase() {
        let (mut app, ui_tx, _cmd_rx) = test_app();
        let mut state = table_state("Evening round", 0);
        state.ended_at = Some(
            chrono::DateTime::parse_from_rfc3339("2026-08-30T13:00:00Z")
                .expect("timestamp")
                .with_timezone(&chrono::Utc),
        );
        ui_tx.send(UiEvent::State { seq: 0, state }).expect("send");

        app.process_ui_events();
        assert_eq!(app.top_bar.phase(), GamePhase::Finished);
        assert!(!app.top_bar.can_start());
    }
}
