//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    Connect {
        server_url: String,
        game_id: String,
        player_id: String,
    },
    StartGame,
    RefreshNow,
    Disconnect,
}
