//! Static page structure of the dashboard.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of a filter control
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Dropdown allowing several values to be picked
    MultiSelect,
    /// Free text input
    TextInput,
}

/// One selectable dropdown entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    /// Option whose label is its value.
    pub fn plain(value: &str) -> Self {
        Self {
            label: value.to_string(),
            value: value.to_string(),
        }
    }
}

/// A user-facing input constraining the displayed rows
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FilterControl {
    /// DOM id of the control
    pub id: String,
    /// Label rendered above the control
    pub label: String,
    pub kind: ControlKind,
    /// Placeholder shown while nothing is selected or typed
    pub placeholder: String,
    /// Selectable values, empty for text inputs
    pub options: Vec<SelectOption>,
}

/// Placeholder for one chart
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChartPanel {
    /// DOM id of the chart container
    pub id: String,
}

/// Column header of the data table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TableColumn {
    pub name: String,
    pub id: String,
}

/// Paginated data table
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TablePanel {
    /// DOM id of the table container
    pub id: String,
    /// Heading rendered above the table
    pub title: String,
    /// Columns in source order
    pub columns: Vec<TableColumn>,
    /// Rows per page
    pub page_size: usize,
}

/// Complete widget tree of the dashboard page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardLayout {
    /// Page heading
    pub title: String,
    /// Filter controls, in display order
    pub controls: Vec<FilterControl>,
    /// Chart grid, in display order
    pub charts: Vec<ChartPanel>,
    pub table: TablePanel,
}

impl DashboardLayout {
    /// Looks up a control by its DOM id.
    pub fn control(&self, id: &str) -> Option<&FilterControl> {
        self.controls.iter().find(|c| c.id == id)
    }
}
