//! Interactive tool selection, used when no subcommand is given.

use crime_overlay_config::AppConfig;
use dialoguer::{Input, Select};

use crate::commands;

/// Top-level tool selection.
enum Tool {
    Server,
    Neighborhood,
    House,
    ListNeighborhoods,
}

impl Tool {
    const ALL: &[Self] = &[
        Self::Server,
        Self::Neighborhood,
        Self::House,
        Self::ListNeighborhoods,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Server => "Start server",
            Self::Neighborhood => "Render a neighborhood map",
            Self::House => "Render a map around an address",
            Self::ListNeighborhoods => "List neighborhoods",
        }
    }
}

/// Prompts for a tool and its inputs, then runs it.
///
/// # Errors
///
/// Returns an error if a prompt fails or the selected tool fails.
pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Seattle Crime Overlay");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Server => {
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new()
                    .block_on(crime_overlay_server::interactive::run(config))
            })
            .await??;
        }
        Tool::Neighborhood => {
            let views = crime_overlay_server::build_views(&config);
            let table = views.neighborhoods().await?;
            let names: Vec<&str> = table.names().collect();
            if names.is_empty() {
                println!("No neighborhoods found.");
                return Ok(());
            }
            let default = names
                .iter()
                .position(|n| *n == config.defaults.neighborhood)
                .unwrap_or(0);

            let idx = Select::new()
                .with_prompt("Neighborhood")
                .items(&names)
                .default(default)
                .interact()?;

            let rendered = views.render_neighborhood(&table, names[idx]).await?;
            println!("Wrote {}", rendered.path.display());
        }
        Tool::House => {
            let street: String = Input::new()
                .with_prompt("Street address")
                .default(config.defaults.street.clone())
                .interact_text()?;
            let city_state_zip: String = Input::new()
                .with_prompt("City, state, zip")
                .default(config.defaults.city_state_zip.clone())
                .interact_text()?;

            let views = crime_overlay_server::build_views(&config);
            let rendered = commands::render_house(&views, &street, &city_state_zip).await?;
            println!("Wrote {}", rendered.path.display());
        }
        Tool::ListNeighborhoods => {
            let views = crime_overlay_server::build_views(&config);
            for line in commands::list_neighborhoods(&views).await? {
                println!("{line}");
            }
        }
    }

    Ok(())
}
