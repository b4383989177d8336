//! Chart specifications derived from a filtered view.
//!
//! Every builder works on the rows of a [`FilteredView`] only. Rows without a
//! supplier cannot be colored or labelled and are left out of all charts; the
//! table still shows them.

use std::collections::HashMap;

use common::{
    columns, BarFigure, BarTrace, ChartLayout, LineFigure, LineTrace, PieFigure, PieTrace,
};
use tracing::{debug, instrument};

use crate::filter::FilteredView;

pub const LINE_CHART_TITLE: &str = "Forecast Trend";
pub const BAR_CHART_TITLE: &str = "Forecast by Material";
pub const PIE_CHART_TITLE: &str = "Supplier Share";

/// Groups traces by supplier, creating them in first-seen order.
struct SupplierTraces<T> {
    traces: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> SupplierTraces<T> {
    fn new() -> Self {
        Self {
            traces: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn get_or_insert(&mut self, supplier: &str, create: impl FnOnce(&str) -> T) -> &mut T {
        let position = match self.index.get(supplier) {
            Some(position) => *position,
            None => {
                self.traces.push(create(supplier));
                self.index.insert(supplier.to_string(), self.traces.len() - 1);
                self.traces.len() - 1
            }
        };
        &mut self.traces[position]
    }

    fn into_traces(self) -> Vec<T> {
        self.traces
    }
}

/// Forecast trend: one line per supplier, dates on x, quantities on y.
///
/// Rows keep their filtered order. Rows without a valid date have no x value
/// and are omitted.
#[instrument(skip(view), fields(rows = view.len()))]
pub fn build_line_chart(view: &FilteredView<'_>) -> LineFigure {
    let mut traces = SupplierTraces::new();
    let mut skipped = 0;

    for record in view.rows() {
        let Some(supplier) = record.supplier.as_deref() else {
            continue;
        };
        let trace = traces.get_or_insert(supplier, |name| LineTrace::new(name));
        match record.date {
            Some(date) => {
                trace.x.push(date);
                trace.y.push(record.quantity);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("{} rows without a date left out of the line chart", skipped);
    }

    LineFigure {
        data: traces.into_traces(),
        layout: ChartLayout::cartesian(
            LINE_CHART_TITLE,
            columns::FORECASTED_DATE,
            columns::FORECASTED_QUANTITY,
            columns::SUPPLIER,
        ),
    }
}

/// Forecast per material, one bar series per supplier stacked on each other.
#[instrument(skip(view), fields(rows = view.len()))]
pub fn build_bar_chart(view: &FilteredView<'_>) -> BarFigure {
    let mut traces = SupplierTraces::new();

    for record in view.rows() {
        let (Some(supplier), Some(material)) =
            (record.supplier.as_deref(), record.material.as_deref())
        else {
            continue;
        };
        let trace = traces.get_or_insert(supplier, |name| BarTrace::new(name));
        trace.x.push(material.to_string());
        trace.y.push(record.quantity);
    }

    let mut layout = ChartLayout::cartesian(
        BAR_CHART_TITLE,
        columns::MATERIAL,
        columns::FORECASTED_QUANTITY,
        columns::SUPPLIER,
    );
    layout.barmode = Some("relative".to_string());

    BarFigure {
        data: traces.into_traces(),
        layout,
    }
}

/// Share of the forecasted quantity per supplier.
///
/// Values are emitted per row; the charting layer sums equal labels.
#[instrument(skip(view), fields(rows = view.len()))]
pub fn build_pie_chart(view: &FilteredView<'_>) -> PieFigure {
    let mut trace = PieTrace::new();

    for record in view.rows() {
        if let Some(supplier) = record.supplier.as_deref() {
            trace.labels.push(supplier.to_string());
            trace.values.push(record.quantity);
        }
    }

    PieFigure {
        data: vec![trace],
        layout: ChartLayout::titled(PIE_CHART_TITLE),
    }
}
