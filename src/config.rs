use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use compute::Dataset;
use moka::future::Cache;

use crate::layout::{build_layout, render_page};
use crate::schemas::AppState;

/// Load the forecast file and assemble the application state.
///
/// Any loading error is returned as-is; the caller must not start serving.
pub fn initialize_app_state(data_path: &Path) -> Result<AppState> {
    tracing::info!("Loading forecast data from {}", data_path.display());
    let dataset = Dataset::load(data_path)?;
    app_state_from_dataset(dataset)
}

/// Build the application state around an already loaded dataset.
pub fn app_state_from_dataset(dataset: Dataset) -> Result<AppState> {
    // The layout and the page never change after startup
    let layout = build_layout(&dataset);
    let page = render_page(&layout)?;

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(300)) // 5 minutes
        .build();

    Ok(AppState {
        dataset: Arc::new(dataset),
        layout: Arc::new(layout),
        page: Arc::from(page),
        cache,
    })
}
