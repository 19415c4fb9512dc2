//! ParkEase - parking reservations from the terminal
//!
//! Runs the reservation store against a local SQLite file and drives it
//! with one command per line on stdin.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parkease_core::StoreEvent;

mod console;
mod state;

use console::{Command, Console};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting ParkEase");

    let app_state = match state::AppState::new() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(data_dir = %app_state.data_dir().display(), "Store opened");

    // Logout sends the user back to the start screen
    let mut events = app_state.store.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(StoreEvent::LoggedOut) => eprintln!("-- signed out, back to start --"),
                Ok(event) => tracing::debug!(?event, "Store event"),
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "Event listener fell behind")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let console = Console::new(app_state.store.as_ref());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };

        let command = match Command::parse(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        match console.execute(command).await {
            serde_json::Value::String(text) => println!("{}", text),
            value => match serde_json::to_string_pretty(&value) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!("Failed to render reply: {}", e),
            },
        }
    }

    tracing::info!("Shutting down");
}
