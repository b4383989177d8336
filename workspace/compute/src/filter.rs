use std::collections::{BTreeSet, HashSet};

use tracing::{debug, instrument};

use crate::dataset::{ColumnKind, Dataset, ForecastRecord};

/// Current values of the three filter controls.
///
/// An empty selection or an empty search text places no constraint on its
/// dimension. The non-empty conditions are combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    suppliers: BTreeSet<String>,
    materials: BTreeSet<String>,
    /// Lowercased search text
    search: Option<String>,
}

impl RecordFilter {
    pub fn new<S, M>(suppliers: S, materials: M, search_text: Option<&str>) -> Self
    where
        S: IntoIterator<Item = String>,
        M: IntoIterator<Item = String>,
    {
        Self::default()
            .with_suppliers(suppliers)
            .with_materials(materials)
            .with_search_text(search_text)
    }

    pub fn with_suppliers<S: IntoIterator<Item = String>>(mut self, suppliers: S) -> Self {
        self.suppliers = suppliers.into_iter().collect();
        self
    }

    pub fn with_materials<M: IntoIterator<Item = String>>(mut self, materials: M) -> Self {
        self.materials = materials.into_iter().collect();
        self
    }

    pub fn with_search_text(mut self, search_text: Option<&str>) -> Self {
        self.search = search_text
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);
        self
    }

    /// True when no dimension is constrained.
    pub fn is_unconstrained(&self) -> bool {
        self.suppliers.is_empty() && self.materials.is_empty() && self.search.is_none()
    }

    /// Canonical representation, equal for filters that select the same rows
    /// on any dataset.
    pub fn cache_key(&self) -> String {
        format!(
            "dashboard_{:?}_{:?}_{:?}",
            self.suppliers, self.materials, self.search
        )
    }

    fn matches_supplier(&self, record: &ForecastRecord) -> bool {
        self.suppliers.is_empty()
            || record
                .supplier
                .as_ref()
                .is_some_and(|s| self.suppliers.contains(s))
    }

    fn matches_material(&self, record: &ForecastRecord) -> bool {
        self.materials.is_empty()
            || record
                .material
                .as_ref()
                .is_some_and(|m| self.materials.contains(m))
    }

    fn matches_description(&self, record: &ForecastRecord) -> bool {
        match &self.search {
            None => true,
            Some(needle) => record
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(needle.as_str())),
        }
    }

    /// Selects the matching rows of `dataset`, keeping dataset order.
    ///
    /// The dataset itself is never modified. When the dataset has no
    /// description column the text search cannot apply and is skipped.
    #[instrument(skip(dataset), fields(total_rows = dataset.len()))]
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> FilteredView<'a> {
        if self.is_unconstrained() {
            return FilteredView::all(dataset);
        }

        let search_applies = self.search.is_none() || dataset.has_column(ColumnKind::Description);
        if !search_applies {
            debug!("Dataset has no description column, ignoring search text");
        }

        let rows: Vec<&ForecastRecord> = dataset
            .records()
            .iter()
            .filter(|r| self.matches_supplier(r))
            .filter(|r| self.matches_material(r))
            .filter(|r| !search_applies || self.matches_description(r))
            .collect();

        debug!("Filter kept {} of {} rows", rows.len(), dataset.len());
        FilteredView { dataset, rows }
    }
}

/// Rows of a dataset selected by a [`RecordFilter`], borrowed from the dataset.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    rows: Vec<&'a ForecastRecord>,
}

impl<'a> FilteredView<'a> {
    /// View over every row.
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            rows: dataset.records().iter().collect(),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn rows(&self) -> &[&'a ForecastRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct suppliers of the selected rows in first-seen order.
    pub fn suppliers(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|r| r.supplier.as_deref())
            .filter(|s| seen.insert(*s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample_dataset() -> Dataset {
        let df = DataFrame::new(vec![
            Series::new("Supplier".into(), &["A", "B", "A", "C", "B"]).into(),
            Series::new("Material".into(), &["M1", "M1", "M2", "M3", "M2"]).into(),
            Series::new(
                "Material Description".into(),
                &[
                    Some("Stainless STEEL sheet"),
                    Some("steel bolt"),
                    Some("Copper wire"),
                    None,
                    Some("Aluminium steelwork"),
                ],
            )
            .into(),
            Series::new(
                "Forecasted Date".into(),
                &["01/02/2024", "02/02/2024", "bad", "04/02/2024", "05/02/2024"],
            )
            .into(),
            Series::new("Forecasted Quantity".into(), &["10", "20", "30", "40", "50"]).into(),
        ])
        .unwrap();
        Dataset::from_dataframe(&df).unwrap()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn quantities(view: &FilteredView<'_>) -> Vec<f64> {
        view.rows().iter().filter_map(|r| r.quantity).collect()
    }

    #[test]
    fn test_unconstrained_filter_is_identity() {
        let dataset = sample_dataset();
        let filter = RecordFilter::new(Vec::new(), Vec::new(), None);
        assert!(filter.is_unconstrained());

        let view = filter.apply(&dataset);
        assert_eq!(view.len(), dataset.len());
        for (row, original) in view.rows().iter().zip(dataset.records()) {
            assert_eq!(*row, original);
        }
    }

    #[test]
    fn test_empty_search_text_is_no_constraint() {
        let dataset = sample_dataset();
        let view = RecordFilter::default()
            .with_search_text(Some(""))
            .apply(&dataset);
        assert_eq!(view.len(), dataset.len());
    }

    #[test]
    fn test_supplier_filter() {
        let dataset = sample_dataset();
        let view = RecordFilter::default()
            .with_suppliers(strings(&["A"]))
            .apply(&dataset);

        assert_eq!(quantities(&view), vec![10.0, 30.0]);
        assert_eq!(view.suppliers(), vec!["A"]);
    }

    #[test]
    fn test_material_filter_with_multiple_values() {
        let dataset = sample_dataset();
        let view = RecordFilter::default()
            .with_materials(strings(&["M2", "M3"]))
            .apply(&dataset);

        assert_eq!(quantities(&view), vec![30.0, 40.0, 50.0]);
        assert_eq!(view.suppliers(), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let dataset = sample_dataset();
        let lower = RecordFilter::default()
            .with_search_text(Some("steel"))
            .apply(&dataset);
        let upper = RecordFilter::default()
            .with_search_text(Some("STEEL"))
            .apply(&dataset);

        assert_eq!(quantities(&lower), vec![10.0, 20.0, 50.0]);
        assert_eq!(quantities(&lower), quantities(&upper));
    }

    #[test]
    fn test_search_never_matches_missing_description() {
        let dataset = sample_dataset();
        // Row C has no description, a single space would match every other row
        let view = RecordFilter::default()
            .with_search_text(Some(" "))
            .apply(&dataset);
        assert!(view.rows().iter().all(|r| r.supplier.as_deref() != Some("C")));
    }

    #[test]
    fn test_search_without_matches_is_empty() {
        let dataset = sample_dataset();
        let view = RecordFilter::default()
            .with_search_text(Some("titanium"))
            .apply(&dataset);
        assert!(view.is_empty());
        assert!(view.suppliers().is_empty());
    }

    #[test]
    fn test_search_ignored_without_description_column() {
        let df = DataFrame::new(vec![
            Series::new("SUPPLIER".into(), &["A", "B"]).into(),
            Series::new("MATERIAL".into(), &["M1", "M2"]).into(),
            Series::new("MATERIAL DISCRIPTION".into(), &["steel", "copper"]).into(),
            Series::new("FORECASTED QUANTITY".into(), &["1", "2"]).into(),
        ])
        .unwrap();
        let dataset = Dataset::from_dataframe(&df).unwrap();

        let view = RecordFilter::default()
            .with_search_text(Some("steel"))
            .apply(&dataset);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_combined_filters_are_order_independent() {
        let dataset = sample_dataset();
        let suppliers = strings(&["A", "B"]);
        let materials = strings(&["M1", "M2"]);

        let combined = RecordFilter::new(suppliers.clone(), materials.clone(), Some("steel"));
        let expected = quantities(&combined.apply(&dataset));
        assert_eq!(expected, vec![10.0, 20.0, 50.0]);

        // Evaluate each dimension alone and intersect, in every order
        let by_supplier = RecordFilter::default().with_suppliers(suppliers);
        let by_material = RecordFilter::default().with_materials(materials);
        let by_text = RecordFilter::default().with_search_text(Some("steel"));
        let singles = [by_supplier, by_material, by_text];
        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

        for order in orders {
            let mut remaining: Vec<&ForecastRecord> = dataset.records().iter().collect();
            for index in order {
                let kept = singles[index].apply(&dataset);
                remaining.retain(|r| kept.rows().iter().any(|k| std::ptr::eq(*k, *r)));
            }
            let got: Vec<f64> = remaining.iter().filter_map(|r| r.quantity).collect();
            assert_eq!(got, expected, "order {:?}", order);
        }
    }

    #[test]
    fn test_filtered_rows_are_a_subset() {
        let dataset = sample_dataset();
        let filters = [
            RecordFilter::new(strings(&["B"]), Vec::new(), None),
            RecordFilter::new(Vec::new(), strings(&["M1"]), Some("bolt")),
            RecordFilter::new(strings(&["Z"]), strings(&["M9"]), Some("x")),
        ];

        for filter in filters {
            let view = filter.apply(&dataset);
            assert!(view.len() <= dataset.len());
            for row in view.rows() {
                assert!(dataset.records().iter().any(|r| std::ptr::eq(r, *row)));
            }
        }
    }

    #[test]
    fn test_cache_key_ignores_selection_order_and_case() {
        let a = RecordFilter::new(strings(&["B", "A"]), Vec::new(), Some("Steel"));
        let b = RecordFilter::new(strings(&["A", "B"]), Vec::new(), Some("sTEEL"));
        assert_eq!(a.cache_key(), b.cache_key());

        let c = RecordFilter::new(strings(&["A"]), Vec::new(), Some("steel"));
        assert_ne!(a.cache_key(), c.cache_key());
    }
}
