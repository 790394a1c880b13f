use anyhow::Result;
use tracing::{info, trace};

use crate::config::Settings;
use crate::database::{connect, migrate};

pub async fn init_database(settings: &Settings) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");

    let db = connect(settings).await?;
    migrate(&db).await?;

    info!("Database initialization completed successfully!");
    trace!("init_database function completed");

    Ok(())
}
