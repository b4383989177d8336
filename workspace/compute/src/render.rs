use common::{DashboardUpdate, TableRow};
use serde_json::Value;
use tracing::{info, instrument};

use crate::charts::{build_bar_chart, build_line_chart, build_pie_chart};
use crate::dataset::{ColumnKind, Dataset, DatasetColumn, ForecastRecord};
use crate::filter::{FilteredView, RecordFilter};

fn text_cell(value: &Option<String>) -> Value {
    value.as_ref().map_or(Value::Null, |v| Value::String(v.clone()))
}

fn table_row(columns: &[DatasetColumn], record: &ForecastRecord) -> TableRow {
    let mut row = TableRow::new();
    for column in columns {
        let value = match column.kind {
            ColumnKind::Supplier => text_cell(&record.supplier),
            ColumnKind::Material => text_cell(&record.material),
            ColumnKind::Description => text_cell(&record.description),
            ColumnKind::Date => record
                .date
                .map_or(Value::Null, |d| Value::String(d.format("%Y-%m-%d").to_string())),
            ColumnKind::Quantity => record.quantity.map_or(Value::Null, Value::from),
            ColumnKind::Extra(index) => text_cell(&record.extra[index]),
        };
        row.insert(column.name.clone(), value);
    }
    row
}

/// Filtered rows as field to value maps, keys in source column order.
///
/// Pagination is left to the table widget.
pub fn build_table(view: &FilteredView<'_>) -> Vec<TableRow> {
    let columns = view.dataset().columns();
    view.rows()
        .iter()
        .map(|record| table_row(columns, record))
        .collect()
}

/// Recomputes every dashboard artifact for the current filter values.
///
/// Total over its inputs: a filter matching nothing yields empty charts and
/// an empty table.
#[instrument(skip(dataset))]
pub fn render_dashboard(dataset: &Dataset, filter: &RecordFilter) -> DashboardUpdate {
    let view = filter.apply(dataset);

    let update = DashboardUpdate {
        line_chart: build_line_chart(&view),
        bar_chart: build_bar_chart(&view),
        pie_chart: build_pie_chart(&view),
        table: build_table(&view),
        row_count: view.len(),
        total_rows: dataset.len(),
    };

    info!(
        "Rendered dashboard with {} of {} rows",
        update.row_count, update.total_rows
    );
    update
}
