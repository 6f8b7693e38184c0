#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the crime overlay toolchain.
//!
//! Renders either map view without the web server, lists the city's
//! neighborhoods, or starts the server. Run without a subcommand to pick
//! a tool interactively.

mod commands;
mod interactive;

use clap::{Parser, Subcommand};
use crime_overlay_config::AppConfig;

#[derive(Parser)]
#[command(name = "crime_overlay_cli", about = "Seattle crime overlay toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind (overrides `BIND_ADDR`)
        #[arg(long)]
        bind_addr: Option<String>,
        /// Port to bind (overrides `PORT`)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Render the neighborhood map and print where it was written
    Neighborhood {
        /// Neighborhood name (e.g., "Capitol Hill"). Defaults to the
        /// configured neighborhood.
        name: Option<String>,
    },
    /// Render the house map and print where it was written
    House {
        /// Street address line. Defaults to the configured address.
        #[arg(long)]
        street: Option<String>,
        /// City, state and zip line. Defaults to the configured address.
        #[arg(long)]
        city_state_zip: Option<String>,
    },
    /// List the city's neighborhoods and their centers
    Neighborhoods,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    let Some(command) = cli.command else {
        return interactive::run(config).await;
    };

    match command {
        Commands::Serve { bind_addr, port } => {
            if let Some(bind_addr) = bind_addr {
                config.server.bind_addr = bind_addr;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await?;
        }
        Commands::Neighborhood { name } => {
            let views = crime_overlay_server::build_views(&config);
            let name = name.unwrap_or(config.defaults.neighborhood);
            let rendered = commands::render_neighborhood(&views, &name).await?;
            println!("{}", rendered.path.display());
        }
        Commands::House {
            street,
            city_state_zip,
        } => {
            let views = crime_overlay_server::build_views(&config);
            let street = street.unwrap_or(config.defaults.street);
            let city_state_zip = city_state_zip.unwrap_or(config.defaults.city_state_zip);
            let rendered = commands::render_house(&views, &street, &city_state_zip).await?;
            println!("{}", rendered.path.display());
        }
        Commands::Neighborhoods => {
            let views = crime_overlay_server::build_views(&config);
            for line in commands::list_neighborhoods(&views).await? {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// Runs the server on its own actix system so it does not nest inside
/// the tokio runtime driving the CLI.
async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    tokio::task::spawn_blocking(|| {
        actix_web::rt::System::new().block_on(crime_overlay_server::run_server(config))
    })
    .await??;
    Ok(())
}
