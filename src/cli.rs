use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod commands;

use commands::{init_database, serve};

#[derive(Parser)]
#[command(name = "school-api")]
#[command(about = "School administration REST API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply migrations and start the web server
    ///
    /// The database is selected with DB_TYPE, DB_USER, DB_PASSWORD,
    /// DB_HOST, DB_PORT and DB_NAME, or with a full DATABASE_URL.
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:5000, 127.0.0.1:8080).
        /// Defaults to BIND_ADDRESS or 0.0.0.0:5000.
        #[arg(short, long)]
        bind_address: Option<String>,
    },
    /// Initialize the database using migrations and exit
    InitDb,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut settings = Settings::load()?;
        match self.command {
            Commands::Serve { bind_address } => {
                if let Some(bind_address) = bind_address {
                    settings.bind_address = bind_address;
                }
                serve(&settings).await?;
            }
            Commands::InitDb => {
                init_database(&settings).await?;
            }
        }
        Ok(())
    }
}
