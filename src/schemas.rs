use std::sync::Arc;

use common::{
    AxisLayout, BarFigure, BarTrace, ChartLayout, ChartPanel, ChartTitle, ControlKind,
    DashboardLayout, DashboardUpdate, FilterControl, FilterOptions, LegendLayout, LineFigure,
    LineTrace, PieFigure, PieTrace, SelectOption, TableColumn, TablePanel,
};
use compute::{Dataset, RecordFilter};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Forecast records, read-only after startup
    pub dataset: Arc<Dataset>,
    /// Widget tree of the page
    pub layout: Arc<DashboardLayout>,
    /// Rendered HTML page
    pub page: Arc<str>,
    /// Recent dashboard updates, keyed by the canonical filter
    pub cache: Cache<String, DashboardUpdate>,
}

/// Current values of the filter controls
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct DashboardFilterRequest {
    /// Selected suppliers; empty or null means every supplier
    pub suppliers: Option<Vec<String>>,
    /// Selected materials; empty or null means every material
    pub materials: Option<Vec<String>>,
    /// Case-insensitive substring of the material description; empty or null disables it
    pub search_text: Option<String>,
}

impl DashboardFilterRequest {
    pub fn to_filter(&self) -> RecordFilter {
        RecordFilter::new(
            self.suppliers.clone().unwrap_or_default(),
            self.materials.clone().unwrap_or_default(),
            self.search_text.as_deref(),
        )
    }
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of loaded forecast records
    pub records: usize,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::dashboard::update_dashboard,
        crate::handlers::dashboard::get_layout,
        crate::handlers::dashboard::get_filter_options,
    ),
    components(
        schemas(
            ApiResponse<DashboardUpdate>,
            ApiResponse<DashboardLayout>,
            ApiResponse<FilterOptions>,
            ErrorResponse,
            HealthResponse,
            DashboardFilterRequest,
            DashboardUpdate,
            DashboardLayout,
            FilterOptions,
            FilterControl,
            ControlKind,
            SelectOption,
            ChartPanel,
            TablePanel,
            TableColumn,
            LineFigure,
            BarFigure,
            PieFigure,
            LineTrace,
            BarTrace,
            PieTrace,
            ChartLayout,
            ChartTitle,
            AxisLayout,
            LegendLayout,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Dashboard layout and filter-and-render endpoints"),
    ),
    info(
        title = "Forecast Dashboard API",
        description = "Procurement forecast dashboard - filter forecast records and get chart specifications",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
