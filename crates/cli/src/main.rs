//! Botica CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! botica migrate
//!
//! # Delete a user by id
//! botica users delete --id 11111111-2222-3333-4444-555555555555
//!
//! # Delete a user by identification number
//! botica users delete --numero-identificacion 10203040
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `users delete` - Delete a user by unique key

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "botica")]
#[command(author, version, about = "Botica CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// Delete a user by id or identification number
    Delete {
        /// User id (UUID)
        #[arg(long, conflicts_with = "numero_identificacion")]
        id: Option<String>,

        /// Identification number
        #[arg(long)]
        numero_identificacion: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Users { action } => match action {
            UsersAction::Delete {
                id,
                numero_identificacion,
            } => {
                commands::users::delete(id.as_deref(), numero_identificacion.as_deref()).await?;
            }
        },
    }
    Ok(())
}
