use std::path::Path;

use crate::color::ColorMap;
use crate::data::aggregate::{DashboardSummary, SummaryOptions};
use crate::data::filter::{distinct_values, filter, FilterSpec, FilteredView};
use crate::data::loader;
use crate::data::model::{CarDataset, CategoricalField};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset; replaced only by File → Open….
    pub dataset: CarDataset,

    /// Sidebar selections.
    pub filters: FilterSpec,

    /// Indices of records passing the current filters.
    pub visible_indices: Vec<usize>,

    /// Chart aggregates for `visible_indices`.
    pub summary: DashboardSummary,

    /// Multi-select options, in first-appearance order.
    pub company_options: Vec<String>,
    pub fuel_options: Vec<String>,

    /// Colour per fuel type.
    pub fuel_colors: ColorMap,

    pub options: SummaryOptions,
    pub preview_rows: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: CarDataset, options: SummaryOptions, preview_rows: usize) -> Self {
        let mut state = Self {
            dataset: CarDataset::default(),
            filters: FilterSpec::default(),
            visible_indices: Vec::new(),
            summary: DashboardSummary::default(),
            company_options: Vec::new(),
            fuel_options: Vec::new(),
            fuel_colors: ColorMap::default(),
            options,
            preview_rows,
            status_message: None,
        };
        state.set_dataset(dataset);
        state
    }

    /// Ingest a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: CarDataset) {
        self.company_options = distinct_values(&dataset, CategoricalField::Company);
        self.fuel_options = distinct_values(&dataset, CategoricalField::FuelType);
        self.fuel_colors = ColorMap::new(&self.fuel_options);
        self.dataset = dataset;
        self.filters = FilterSpec::default();
        self.status_message = None;
        self.refilter();
    }

    /// Reload from disk. On failure the current dataset stays.
    pub fn reload(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// The records currently passing the filters.
    pub fn view(&self) -> FilteredView<'_> {
        FilteredView::from_indices(&self.dataset, &self.visible_indices)
    }

    /// Recompute the visible rows and every aggregate after a filter change.
    pub fn refilter(&mut self) {
        let view = filter(&self.dataset, &self.filters);
        self.summary = DashboardSummary::compute(&view, self.options);
        self.visible_indices = view.indices().to_vec();
        log::debug!(
            "refiltered: {} of {} cars visible",
            self.visible_indices.len(),
            self.dataset.len()
        );
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, field: CategoricalField, value: &str) {
        self.filters.toggle(field, value);
        self.refilter();
    }

    /// Remove the restriction on a column.
    pub fn clear_filter(&mut self, field: CategoricalField) {
        self.filters.clear(field);
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::car;

    fn state() -> AppState {
        let ds = CarDataset {
            records: vec![
                car("A", "Petrol", "100 hp", "$10"),
                car("A", "Diesel", "200 hp", "$20"),
                car("B", "Petrol", "300 hp", "$30"),
            ],
        };
        AppState::new(ds, SummaryOptions::default(), 5)
    }

    #[test]
    fn starts_unfiltered() {
        let s = state();
        assert_eq!(s.visible_indices, [0, 1, 2]);
        assert_eq!(s.company_options, ["A", "B"]);
        assert_eq!(s.summary.by_company[0], ("A".to_string(), 2));
    }

    #[test]
    fn toggling_recomputes_summary() {
        let mut s = state();
        s.toggle_filter_value(CategoricalField::Company, "B");
        assert_eq!(s.visible_indices, [2]);
        assert_eq!(s.summary.by_company, [("B".to_string(), 1)]);
        assert_eq!(s.summary.most_expensive.len(), 1);

        s.clear_filter(CategoricalField::Company);
        assert_eq!(s.visible_indices.len(), 3);
    }

    #[test]
    fn failed_reload_keeps_dataset() {
        let mut s = state();
        s.reload(Path::new("/definitely/not/here.csv"));
        assert_eq!(s.dataset.len(), 3);
        assert!(s.status_message.is_some());
    }
}
