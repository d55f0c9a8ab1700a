//! Tauri Release - publish a desktop release and refresh the updater gist.

use std::process;
use tauri_release::cli;

#[tokio::main]
async fn main() {
    // Secrets may live in ./.env; variables already set take precedence
    let dotenv = dotenvy::from_path(".env");

    env_logger::init();

    match dotenv {
        Ok(()) => log::debug!("loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("failed to load .env: {}", e),
    }

    process::exit(cli::run().await);
}
