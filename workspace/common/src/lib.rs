//! Common transport-layer types shared between the server and the dashboard page.
//! The page script consumes these shapes as JSON, so field names here are the
//! wire format.

mod charts;
mod dashboard;
mod layout;

pub use charts::{
    AxisLayout, BarFigure, BarTrace, ChartLayout, ChartTitle, LegendLayout, LineFigure, LineTrace,
    PieFigure, PieTrace,
};
pub use dashboard::{DashboardUpdate, FilterOptions, TableRow};
pub use layout::{
    ChartPanel, ControlKind, DashboardLayout, FilterControl, SelectOption, TableColumn, TablePanel,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper, shared so clients can deserialize responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

/// Normalized names of the columns the dashboard understands.
pub mod columns {
    pub const SUPPLIER: &str = "SUPPLIER";
    pub const MATERIAL: &str = "MATERIAL";
    pub const MATERIAL_DESCRIPTION: &str = "MATERIAL DESCRIPTION";
    pub const FORECASTED_DATE: &str = "FORECASTED DATE";
    pub const FORECASTED_QUANTITY: &str = "FORECASTED QUANTITY";
}
