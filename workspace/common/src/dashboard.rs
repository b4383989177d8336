use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::charts::{BarFigure, LineFigure, PieFigure};

/// One table row: normalized column name to cell value, in source column order.
pub type TableRow = serde_json::Map<String, serde_json::Value>;

/// Selectable values of the filter dropdowns
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FilterOptions {
    /// Distinct suppliers, first-seen order
    pub suppliers: Vec<String>,
    /// Distinct materials, first-seen order
    pub materials: Vec<String>,
}

/// Everything the page needs to redraw after a filter change
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardUpdate {
    /// Forecast trend per supplier
    pub line_chart: LineFigure,
    /// Forecast per material, colored by supplier
    pub bar_chart: BarFigure,
    /// Share of forecasted quantity per supplier
    pub pie_chart: PieFigure,
    /// Filtered rows, in dataset order
    #[schema(value_type = Vec<Object>)]
    pub table: Vec<TableRow>,
    /// Number of rows matching the filter
    pub row_count: usize,
    /// Number of rows in the loaded dataset
    pub total_rows: usize,
}
