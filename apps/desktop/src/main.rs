use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use client_core::{ClientEvent, GameClient, GameSession, DEFAULT_POLL_INTERVAL};
use shared::domain::{GameId, PlayerId};
use shared::protocol::GameStatePayload;

/// Headless table viewer: fetch a game state once, or keep polling it.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: String,
    #[arg(long)]
    game_id: String,
    #[arg(long)]
    player_id: String,
    /// Ask the server to start the game before fetching.
    #[arg(long)]
    start: bool,
    /// Keep polling instead of exiting after one fetch.
    #[arg(long)]
    watch: bool,
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64)]
    poll_interval_ms: u64,
}

fn print_state(state: &GameStatePayload) {
    println!("{} [{}]", state.name, state.phase().label());
    if let Some(top) = state.top_of_stack() {
        println!("  top of discard: {}", top.label());
    }
    println!("  draw pile: {} cards", state.deck_count);
    for player in &state.players {
        let marker = if player.active { ">" } else { " " };
        println!(
            "  {marker} {} - {} pts, {} cards",
            player.name, player.points, player.hand_size
        );
    }
    if let Some(me) = state.requesting_player() {
        if let Some(hand) = &me.hand {
            let cards: Vec<String> = hand.iter().map(|card| card.label()).collect();
            println!("  your hand: {}", cards.join(", "));
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let client = GameClient::new(GameSession {
        server_url: args.server_url,
        game_id: GameId(args.game_id),
        player_id: PlayerId(args.player_id),
    });

    if args.start {
        if client.start_game().await? {
            println!("Game started");
        } else {
            println!("Server declined to start the game");
        }
    }

    if !args.watch {
        match client.get_state().await? {
            Some(state) => print_state(&state),
            None => println!("No state available for this game/player"),
        }
        return Ok(());
    }

    let mut events = client.subscribe_events();
    let _poller = client.start_polling(Duration::from_millis(args.poll_interval_ms));
    while let Ok(event) = events.recv().await {
        match event {
            ClientEvent::State { state, .. } => print_state(&state),
            ClientEvent::GameStarted => println!("Game started"),
            ClientEvent::StartRejected => println!("Server declined to start the game"),
            ClientEvent::Error(err) => eprintln!("error: {err}"),
        }
    }

    Ok(())
}
