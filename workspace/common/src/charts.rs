//! Declarative chart specifications.
//!
//! The structs in this module serialize to the JSON shape Plotly.js expects
//! for `Plotly.react(element, data, layout)`, so the page can hand a figure
//! straight to the charting library without reshaping it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Chart or axis title
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChartTitle {
    /// Title text
    pub text: String,
}

impl ChartTitle {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Axis configuration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AxisLayout {
    /// Axis title, usually the column the axis is bound to
    pub title: ChartTitle,
}

/// Legend configuration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LegendLayout {
    /// Legend title, usually the column traces are grouped by
    pub title: ChartTitle,
}

/// Figure layout shared by all chart kinds
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChartLayout {
    /// Figure title
    pub title: ChartTitle,
    /// X axis, absent for pie charts
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub xaxis: Option<AxisLayout>,
    /// Y axis, absent for pie charts
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub yaxis: Option<AxisLayout>,
    /// Legend, present when traces are grouped by a column
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub legend: Option<LegendLayout>,
    /// Bar stacking mode ("relative", "group", ...)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub barmode: Option<String>,
}

impl ChartLayout {
    /// Layout for a cartesian chart with labelled axes and a legend.
    pub fn cartesian(title: &str, x: &str, y: &str, legend: &str) -> Self {
        Self {
            title: ChartTitle::new(title),
            xaxis: Some(AxisLayout { title: ChartTitle::new(x) }),
            yaxis: Some(AxisLayout { title: ChartTitle::new(y) }),
            legend: Some(LegendLayout { title: ChartTitle::new(legend) }),
            barmode: None,
        }
    }

    /// Layout for a chart without axes.
    pub fn titled(title: &str) -> Self {
        Self {
            title: ChartTitle::new(title),
            xaxis: None,
            yaxis: None,
            legend: None,
            barmode: None,
        }
    }
}

/// A line series, one per supplier
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LineTrace {
    /// Plotly trace type, always "scatter"
    #[serde(rename = "type")]
    pub trace_type: String,
    /// Plotly drawing mode, always "lines"
    pub mode: String,
    /// Series name shown in the legend
    pub name: String,
    /// Forecasted dates
    pub x: Vec<NaiveDate>,
    /// Forecasted quantities, `null` where the quantity is missing
    pub y: Vec<Option<f64>>,
}

impl LineTrace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            trace_type: "scatter".to_string(),
            mode: "lines".to_string(),
            name: name.into(),
            x: Vec::new(),
            y: Vec::new(),
        }
    }
}

/// A bar series, one per supplier
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BarTrace {
    /// Plotly trace type, always "bar"
    #[serde(rename = "type")]
    pub trace_type: String,
    /// Series name shown in the legend
    pub name: String,
    /// Materials
    pub x: Vec<String>,
    /// Forecasted quantities, `null` where the quantity is missing
    pub y: Vec<Option<f64>>,
}

impl BarTrace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            trace_type: "bar".to_string(),
            name: name.into(),
            x: Vec::new(),
            y: Vec::new(),
        }
    }
}

/// Pie slices built from raw rows.
///
/// Labels repeat once per row; Plotly sums the values of equal labels into
/// a single slice.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PieTrace {
    /// Plotly trace type, always "pie"
    #[serde(rename = "type")]
    pub trace_type: String,
    /// Slice label of every row
    pub labels: Vec<String>,
    /// Slice contribution of every row
    pub values: Vec<Option<f64>>,
}

impl PieTrace {
    pub fn new() -> Self {
        Self {
            trace_type: "pie".to_string(),
            labels: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Sum of all slice values, the way the charting layer aggregates them.
    pub fn total_value(&self) -> f64 {
        self.values.iter().flatten().sum()
    }

    /// Aggregated value of a single slice.
    pub fn slice_value(&self, label: &str) -> f64 {
        self.labels
            .iter()
            .zip(&self.values)
            .filter(|(l, _)| l.as_str() == label)
            .filter_map(|(_, v)| *v)
            .sum()
    }
}

impl Default for PieTrace {
    fn default() -> Self {
        Self::new()
    }
}

/// Line chart figure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LineFigure {
    pub data: Vec<LineTrace>,
    pub layout: ChartLayout,
}

/// Bar chart figure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BarFigure {
    pub data: Vec<BarTrace>,
    pub layout: ChartLayout,
}

/// Pie chart figure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PieFigure {
    pub data: Vec<PieTrace>,
    pub layout: ChartLayout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_trace_serializes_plotly_type() {
        let mut trace = LineTrace::new("ACME");
        trace.x.push(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        trace.y.push(Some(12.5));

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["type"], "scatter");
        assert_eq!(json["mode"], "lines");
        assert_eq!(json["x"][0], "2024-03-05");
        assert_eq!(json["y"][0], 12.5);
    }

    #[test]
    fn test_layout_skips_missing_axes() {
        let json = serde_json::to_value(ChartLayout::titled("Supplier Share")).unwrap();
        assert_eq!(json["title"]["text"], "Supplier Share");
        assert!(json.get("xaxis").is_none());
        assert!(json.get("barmode").is_none());
    }

    #[test]
    fn test_pie_slice_values_are_summed_per_label() {
        let pie = PieTrace {
            trace_type: "pie".to_string(),
            labels: vec!["A".into(), "B".into(), "A".into()],
            values: vec![Some(1.0), Some(4.0), None],
        };

        assert_eq!(pie.slice_value("A"), 1.0);
        assert_eq!(pie.slice_value("B"), 4.0);
        assert_eq!(pie.total_value(), 5.0);
    }
}
