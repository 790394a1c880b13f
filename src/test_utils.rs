#[cfg(test)]
pub mod test_utils {
    use crate::config::DEFAULT_FRONTEND_ORIGIN;
    use crate::router::{cors_layer, create_router};
    use crate::schemas::AppState;
    use axum::Router;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;
        AppState { db }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG and defaults to WARN.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing, allowing the default frontend origin
    pub async fn setup_test_app() -> Router {
        let (router, _db) = setup_test_app_with_db().await;
        router
    }

    /// Same as [`setup_test_app`], also handing back the database so a test
    /// can seed rows directly.
    pub async fn setup_test_app_with_db() -> (Router, DatabaseConnection) {
        let _guard = init_test_tracing();

        let state = setup_test_app_state().await;
        let db = state.db.clone();
        let cors = cors_layer(DEFAULT_FRONTEND_ORIGIN).expect("default origin is a valid header");
        (create_router(state, cors), db)
    }
}
