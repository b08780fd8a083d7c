use std::collections::{BTreeSet, HashSet};

use super::model::{CarDataset, CarRecord, CategoricalField};

// ---------------------------------------------------------------------------
// Filter predicate: which companies / fuel types are selected
// ---------------------------------------------------------------------------

/// The sidebar selection. An empty set means "no filter" (show all).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub companies: BTreeSet<String>,
    pub fuel_types: BTreeSet<String>,
}

impl FilterSpec {
    /// Selected values for one of the two filterable columns.
    pub fn selected(&self, field: CategoricalField) -> Option<&BTreeSet<String>> {
        match field {
            CategoricalField::Company => Some(&self.companies),
            CategoricalField::FuelType => Some(&self.fuel_types),
            CategoricalField::Seats => None,
        }
    }

    fn selected_mut(&mut self, field: CategoricalField) -> Option<&mut BTreeSet<String>> {
        match field {
            CategoricalField::Company => Some(&mut self.companies),
            CategoricalField::FuelType => Some(&mut self.fuel_types),
            CategoricalField::Seats => None,
        }
    }

    /// Add `value` to the selection of `field`, or remove it if present.
    pub fn toggle(&mut self, field: CategoricalField, value: &str) {
        let Some(selected) = self.selected_mut(field) else {
            return;
        };
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    /// Drop the selection of `field`, i.e. stop restricting on it.
    pub fn clear(&mut self, field: CategoricalField) {
        if let Some(selected) = self.selected_mut(field) {
            selected.clear();
        }
    }

    /// True when no restriction is active at all.
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty() && self.fuel_types.is_empty()
    }

    /// Whether a record passes both restrictions.
    pub fn matches(&self, record: &CarRecord) -> bool {
        let admits = |selected: &BTreeSet<String>, value: &str| {
            selected.is_empty() || selected.contains(value)
        };
        admits(&self.companies, &record.raw.company) && admits(&self.fuel_types, &record.raw.fuel_type)
    }
}

// ---------------------------------------------------------------------------
// FilteredView
// ---------------------------------------------------------------------------

/// Records passing a [`FilterSpec`], in dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a CarDataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// View over an explicit list of dataset indices; out-of-range ones are dropped.
    pub fn from_indices(dataset: &'a CarDataset, indices: &[usize]) -> Self {
        FilteredView {
            dataset,
            indices: indices.iter().copied().filter(|&i| i < dataset.len()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Positions of the visible records in the full dataset.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a CarRecord> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&idx| &dataset.records[idx])
    }
}

/// Apply `spec` to the whole dataset.
pub fn filter<'a>(dataset: &'a CarDataset, spec: &FilterSpec) -> FilteredView<'a> {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| spec.matches(r))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}

/// Options for a multi-select: distinct non-empty values in order of first
/// appearance.
pub fn distinct_values(dataset: &CarDataset, field: CategoricalField) -> Vec<String> {
    let mut seen = HashSet::new();
    dataset
        .records
        .iter()
        .filter_map(|r| r.category(field))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::car;

    fn dataset() -> CarDataset {
        CarDataset {
            records: vec![
                car("A", "Petrol", "100 hp", "$10"),
                car("A", "Diesel", "200 hp", "$20"),
                car("B", "Petrol", "300 hp", "$30"),
                car("C", "Electric", "400 hp", "$40"),
            ],
        }
    }

    fn companies<'a>(view: &FilteredView<'a>) -> Vec<&'a str> {
        view.iter().map(|r| r.raw.company.as_str()).collect()
    }

    #[test]
    fn empty_spec_is_identity() {
        let ds = dataset();
        let view = filter(&ds, &FilterSpec::default());
        assert_eq!(view.len(), ds.len());
        assert!(view.iter().zip(&ds.records).all(|(a, b)| std::ptr::eq(a, b)));
    }

    #[test]
    fn company_and_fuel_are_anded() {
        let ds = dataset();
        let mut spec = FilterSpec::default();
        spec.toggle(CategoricalField::Company, "A");
        assert_eq!(companies(&filter(&ds, &spec)), ["A", "A"]);

        spec.toggle(CategoricalField::FuelType, "Petrol");
        let view = filter(&ds, &spec);
        assert_eq!(view.len(), 1);
        assert_eq!(view.iter().next().map(|r| r.raw.fuel_type.as_str()), Some("Petrol"));
    }

    #[test]
    fn result_preserves_source_order() {
        let ds = dataset();
        let mut spec = FilterSpec::default();
        spec.toggle(CategoricalField::Company, "C");
        spec.toggle(CategoricalField::Company, "A");
        assert_eq!(companies(&filter(&ds, &spec)), ["A", "A", "C"]);
        assert_eq!(filter(&ds, &spec).indices(), [0, 1, 3]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let ds = dataset();
        let mut spec = FilterSpec::default();
        spec.toggle(CategoricalField::Company, "B");
        spec.toggle(CategoricalField::FuelType, "Electric");
        assert!(filter(&ds, &spec).is_empty());
    }

    #[test]
    fn toggle_twice_and_clear_restore_identity() {
        let mut spec = FilterSpec::default();
        spec.toggle(CategoricalField::FuelType, "Diesel");
        spec.toggle(CategoricalField::FuelType, "Diesel");
        assert!(spec.is_empty());

        spec.toggle(CategoricalField::Company, "A");
        spec.toggle(CategoricalField::Seats, "5");
        spec.clear(CategoricalField::Company);
        assert!(spec.is_empty());
    }

    #[test]
    fn distinct_values_follow_first_appearance() {
        let ds = dataset();
        assert_eq!(distinct_values(&ds, CategoricalField::Company), ["A", "B", "C"]);
        assert_eq!(
            distinct_values(&ds, CategoricalField::FuelType),
            ["Petrol", "Diesel", "Electric"]
        );
    }

    #[test]
    fn view_from_indices_skips_out_of_range() {
        let ds = dataset();
        let view = FilteredView::from_indices(&ds, &[2, 9]);
        assert_eq!(companies(&view), ["B"]);
    }
}
