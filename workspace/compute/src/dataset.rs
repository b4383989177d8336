use std::collections::HashSet;
use std::path::Path;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use common::columns;
use polars::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::error::{ComputeError, Result};

/// Day-first date layouts with a four digit year, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d", "%d %b %Y", "%d-%b-%Y", "%d %B %Y",
];

/// Day-first date layouts with a two digit year.
const SHORT_YEAR_FORMATS: &[&str] = &["%d/%m/%y", "%d-%m-%y", "%d.%m.%y"];

/// Time suffixes accepted after any date layout.
const TIME_SUFFIXES: &[&str] = &[" %H:%M:%S", " %H:%M", "T%H:%M:%S", "T%H:%M"];

/// Normalizes a header cell: surrounding whitespace removed, uppercased.
///
/// Applying it twice yields the same result as applying it once.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Parses a calendar date, reading ambiguous numeric dates as day before month.
///
/// Returns `None` for anything that is not a recognisable date so callers can
/// keep the row with a missing date.
pub fn parse_day_first(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    // A four digit layout happily reads "24" as the year 24, so implausible
    // years fall through to the two digit layouts.
    let candidates = [(DATE_FORMATS, true), (SHORT_YEAR_FORMATS, false)];
    for (formats, check_year) in candidates {
        for format in formats {
            let parsed = NaiveDate::parse_from_str(value, format).ok().or_else(|| {
                TIME_SUFFIXES.iter().find_map(|suffix| {
                    NaiveDateTime::parse_from_str(value, &format!("{format}{suffix}"))
                        .ok()
                        .map(|datetime| datetime.date())
                })
            });
            match parsed {
                Some(date) if !check_year || date.year() >= 1000 => return Some(date),
                _ => continue,
            }
        }
    }

    None
}

/// What a source column means to the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Supplier,
    Material,
    Description,
    Date,
    Quantity,
    /// Any other column, kept as text. The index points into `ForecastRecord::extra`.
    Extra(usize),
}

impl ColumnKind {
    fn known(normalized_name: &str) -> Option<Self> {
        match normalized_name {
            columns::SUPPLIER => Some(Self::Supplier),
            columns::MATERIAL => Some(Self::Material),
            columns::MATERIAL_DESCRIPTION => Some(Self::Description),
            columns::FORECASTED_DATE => Some(Self::Date),
            columns::FORECASTED_QUANTITY => Some(Self::Quantity),
            _ => None,
        }
    }
}

/// A source column with its normalized name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetColumn {
    pub name: String,
    pub kind: ColumnKind,
}

/// One row of the forecast table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastRecord {
    pub supplier: Option<String>,
    pub material: Option<String>,
    pub description: Option<String>,
    /// `None` when the column is absent, the cell is empty or the value is not a date
    pub date: Option<NaiveDate>,
    /// `None` when the cell is empty or not numeric
    pub quantity: Option<f64>,
    /// Cells of the columns the dashboard does not interpret, in source order
    pub extra: Vec<Option<String>>,
}

/// Loading statistics, reported by the inspect command
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    pub suppliers: usize,
    pub materials: usize,
    /// Non-empty date cells that could not be parsed
    pub unparsed_dates: usize,
    /// Non-empty quantity cells that could not be parsed
    pub unparsed_quantities: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// The forecast table, loaded once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<DatasetColumn>,
    records: Vec<ForecastRecord>,
    unparsed_dates: usize,
    unparsed_quantities: usize,
}

impl Dataset {
    /// Reads a delimited file with a header row.
    ///
    /// Every column is read as text; typing happens in [`Dataset::from_dataframe`].
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ComputeError::NotFound(path.to_path_buf()));
        }

        debug!("Reading CSV file");
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;
        debug!("Read {} rows and {} columns", df.height(), df.width());

        let dataset = Self::from_dataframe(&df)?;
        info!(
            "Loaded {} forecast records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Builds typed records from a DataFrame whose header has not been normalized yet.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut dataset_columns = Vec::with_capacity(df.width());
        let mut seen = HashSet::new();
        let mut extra_count = 0;

        for column in df.get_columns() {
            let name = normalize_column_name(column.name().as_str());
            if !seen.insert(name.clone()) {
                return Err(ComputeError::DuplicateColumn(name));
            }
            let kind = match ColumnKind::known(&name) {
                Some(kind) => kind,
                None => {
                    extra_count += 1;
                    ColumnKind::Extra(extra_count - 1)
                }
            };
            dataset_columns.push(DatasetColumn { name, kind });
        }

        for required in [columns::SUPPLIER, columns::MATERIAL, columns::FORECASTED_QUANTITY] {
            if !seen.contains(required) {
                return Err(ComputeError::MissingColumn(required.to_string()));
            }
        }
        if !seen.contains(columns::MATERIAL_DESCRIPTION) {
            warn!(
                "Column '{}' not found, description search will be ignored",
                columns::MATERIAL_DESCRIPTION
            );
        }

        let mut records = vec![
            ForecastRecord {
                extra: vec![None; extra_count],
                ..Default::default()
            };
            df.height()
        ];
        let mut unparsed_dates = 0;
        let mut unparsed_quantities = 0;

        for (column, dataset_column) in df.get_columns().iter().zip(&dataset_columns) {
            let values = text_values(column)?;
            for (record, value) in records.iter_mut().zip(values) {
                match dataset_column.kind {
                    ColumnKind::Supplier => record.supplier = value,
                    ColumnKind::Material => record.material = value,
                    ColumnKind::Description => record.description = value,
                    ColumnKind::Date => {
                        if let Some(raw) = value {
                            record.date = parse_day_first(&raw);
                            if record.date.is_none() {
                                unparsed_dates += 1;
                            }
                        }
                    }
                    ColumnKind::Quantity => {
                        if let Some(raw) = value {
                            record.quantity = raw.trim().parse::<f64>().ok();
                            if record.quantity.is_none() {
                                unparsed_quantities += 1;
                            }
                        }
                    }
                    ColumnKind::Extra(index) => record.extra[index] = value,
                }
            }
        }

        if unparsed_dates > 0 {
            warn!("{} date values could not be parsed and are treated as missing", unparsed_dates);
        }
        if unparsed_quantities > 0 {
            warn!(
                "{} quantity values could not be parsed and are treated as missing",
                unparsed_quantities
            );
        }

        Ok(Self {
            columns: dataset_columns,
            records,
            unparsed_dates,
            unparsed_quantities,
        })
    }

    /// Normalized columns in source order.
    pub fn columns(&self) -> &[DatasetColumn] {
        &self.columns
    }

    pub fn records(&self) -> &[ForecastRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source file carried a column of this kind.
    pub fn has_column(&self, kind: ColumnKind) -> bool {
        self.columns.iter().any(|c| c.kind == kind)
    }

    /// Distinct suppliers in first-seen order.
    pub fn suppliers(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.supplier.as_deref()))
    }

    /// Distinct materials in first-seen order.
    pub fn materials(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.material.as_deref()))
    }

    pub fn summary(&self) -> DatasetSummary {
        let dates = self.records.iter().filter_map(|r| r.date);
        DatasetSummary {
            rows: self.len(),
            columns: self.columns.iter().map(|c| c.name.clone()).collect(),
            suppliers: self.suppliers().len(),
            materials: self.materials().len(),
            unparsed_dates: self.unparsed_dates,
            unparsed_quantities: self.unparsed_quantities,
            first_date: dates.clone().min(),
            last_date: dates.max(),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .flatten()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Cell values of a column as text, empty cells as `None`.
fn text_values(column: &Column) -> Result<Vec<Option<String>>> {
    let series = column.as_materialized_series().cast(&DataType::String)?;
    let values = series
        .str()?
        .into_iter()
        .map(|v| v.filter(|s| !s.is_empty()).map(str::to_string))
        .collect();
    Ok(values)
}
