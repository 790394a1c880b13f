use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::Settings;
use crate::database::{connect, migrate};
use crate::router::{cors_layer, create_router};
use crate::schemas::AppState;

pub async fn serve(settings: &Settings) -> Result<()> {
    trace!("Entering serve function");
    info!("School API starting up");
    debug!("Bind address: {}", settings.bind_address);

    // Connect and bring the schema up to date; both are fatal on failure
    let db = connect(settings).await?;
    migrate(&db).await?;

    let state = AppState { db };

    trace!("Creating application router");
    let cors = match cors_layer(&settings.frontend_origin) {
        Ok(cors) => cors,
        Err(e) => {
            error!("Invalid frontend origin '{}': {}", settings.frontend_origin, e);
            return Err(e);
        }
    };
    let app = create_router(state, cors);
    debug!("Router created successfully, allowing origin {}", settings.frontend_origin);

    // Start server
    info!("Starting server on {}", settings.bind_address);
    let listener = match TcpListener::bind(&settings.bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", settings.bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", settings.bind_address, e);
            return Err(e.into());
        }
    };

    info!("School API server running on http://{}", settings.bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", settings.bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
