//! Interactive mode for the server.
//!
//! Prompts for the listener address and port, starting from the loaded
//! configuration's values.

use crime_overlay_config::AppConfig;
use dialoguer::{Confirm, Input};

/// Runs the server in interactive mode, prompting for the listener.
///
/// The answers override `config.server` and the server is started with
/// [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(mut config: AppConfig) -> std::io::Result<()> {
    println!("Seattle Crime Overlay Server");
    println!();

    config.server.bind_addr = Input::new()
        .with_prompt("Bind address")
        .default(config.server.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| config.server.bind_addr.clone());

    config.server.port = Input::new()
        .with_prompt("Port")
        .default(config.server.port)
        .interact_text()
        .unwrap_or(config.server.port);

    let bind_addr = &config.server.bind_addr;
    let port = config.server.port;

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config).await
}
