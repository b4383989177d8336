pub mod charts;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod render;

pub use dataset::{
    normalize_column_name, parse_day_first, ColumnKind, Dataset, DatasetColumn, DatasetSummary,
    ForecastRecord,
};
pub use error::{ComputeError, Result};
pub use filter::{FilteredView, RecordFilter};
pub use render::{build_table, render_dashboard};
