#[cfg(test)]
pub mod test_utils {
    use std::path::Path;

    use crate::config::initialize_app_state;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Sample forecast file shipped with the repository
    pub const SAMPLE_DATA_PATH: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/data/forecast_sample.csv");

    /// Create AppState for testing, backed by the sample forecast file
    pub fn setup_test_app_state() -> AppState {
        initialize_app_state(Path::new(SAMPLE_DATA_PATH)).expect("Failed to load sample data")
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
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

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        let _guard = init_test_tracing();

        let state = setup_test_app_state();
        create_router(state)
    }
}
