use std::collections::{BTreeMap, HashMap};

use super::filter::FilteredView;
use super::model::{CarRecord, CategoricalField, NumericField};

pub const DEFAULT_HISTOGRAM_BINS: usize = 20;
pub const DEFAULT_TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Value counts
// ---------------------------------------------------------------------------

/// `(value, count)` pairs, most frequent first. Ties keep first-seen order and
/// missing values are not counted.
pub fn value_counts(view: &FilteredView<'_>, field: CategoricalField) -> Vec<(String, usize)> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in view.iter().filter_map(|r| r.category(field)) {
        match position.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }
    // stable: equal counts stay in encounter order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn count_by_company(view: &FilteredView<'_>) -> Vec<(String, usize)> {
    value_counts(view, CategoricalField::Company)
}

pub fn count_by_fuel_type(view: &FilteredView<'_>) -> Vec<(String, usize)> {
    value_counts(view, CategoricalField::FuelType)
}

pub fn count_by_seats(view: &FilteredView<'_>) -> Vec<(String, usize)> {
    value_counts(view, CategoricalField::Seats)
}

/// Attach each category's fraction of the total, for pie labels.
pub fn share(counts: &[(String, usize)]) -> Vec<(String, usize, f64)> {
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    counts
        .iter()
        .map(|(label, c)| {
            let frac = if total == 0 { 0.0 } else { *c as f64 / total as f64 };
            (label.clone(), *c, frac)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBucket {
    pub low: f64,
    pub high: f64,
    pub count: usize,
}

/// Equal-width bins between the smallest and largest present value. The last
/// bin includes its right edge. A single distinct value is binned over
/// `[v - 0.5, v + 0.5]`.
pub fn histogram_buckets<I>(values: I, bin_count: usize) -> Vec<HistogramBucket>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let present: Vec<f64> = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();
    if present.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let mut min = present.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }
    // Edges and positions are computed on halves so `max - min` cannot
    // overflow for extreme finite inputs.
    let edge = |i: usize| {
        let t = i as f64 / bin_count as f64;
        min * (1.0 - t) + max * t
    };
    let half_span = max / 2.0 - min / 2.0;

    let mut buckets: Vec<HistogramBucket> = (0..bin_count)
        .map(|i| HistogramBucket {
            low: edge(i),
            high: if i + 1 == bin_count { max } else { edge(i + 1) },
            count: 0,
        })
        .collect();

    for v in present {
        let pos = (v / 2.0 - min / 2.0) / half_span * bin_count as f64;
        let idx = (pos as usize).min(bin_count - 1);
        buckets[idx].count += 1;
    }
    buckets
}

// ---------------------------------------------------------------------------
// Ranking / grouping
// ---------------------------------------------------------------------------

/// At most `n` records with the largest `field`, descending. Records without
/// a value are skipped; ties keep dataset order.
pub fn top_n<'a>(view: &FilteredView<'a>, field: NumericField, n: usize) -> Vec<&'a CarRecord> {
    let mut ranked: Vec<(&CarRecord, f64)> = view
        .iter()
        .filter_map(|r| r.numeric(field).map(|v| (r, v)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(n).map(|(r, _)| r).collect()
}

/// Mean of `value_field` per `group_field` value, groups in ascending key
/// order. Groups with no numeric value at all are left out.
pub fn group_average(
    view: &FilteredView<'_>,
    group_field: CategoricalField,
    value_field: NumericField,
) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in view.iter() {
        let Some(group) = r.category(group_field) else {
            continue;
        };
        let entry = sums.entry(group).or_insert((0.0, 0));
        if let Some(v) = r.numeric(value_field) {
            entry.0 += v;
            entry.1 += 1;
        }
    }
    sums.into_iter()
        .filter(|(_, (_, n))| *n > 0)
        .map(|(g, (sum, n))| (g.to_string(), sum / n as f64))
        .collect()
}

/// `[x, y]` points for a scatter plot; records missing either value are skipped.
pub fn scatter_pairs(view: &FilteredView<'_>, x: NumericField, y: NumericField) -> Vec<[f64; 2]> {
    view.iter()
        .filter_map(|r| Some([r.numeric(x)?, r.numeric(y)?]))
        .collect()
}

// ---------------------------------------------------------------------------
// DashboardSummary – everything the charts draw
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryOptions {
    pub histogram_bins: usize,
    pub top_n: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// One aggregate per chart, computed from a single [`FilteredView`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub by_company: Vec<(String, usize)>,
    pub by_fuel_type: Vec<(String, usize)>,
    pub horsepower_histogram: Vec<HistogramBucket>,
    pub price_vs_horsepower: Vec<[f64; 2]>,
    /// `(car name, price)`, most expensive first.
    pub most_expensive: Vec<(String, f64)>,
    pub by_seats: Vec<(String, usize)>,
    pub mean_price_by_fuel: Vec<(String, f64)>,
    pub acceleration_vs_horsepower: Vec<[f64; 2]>,
}

impl DashboardSummary {
    pub fn compute(view: &FilteredView<'_>, options: SummaryOptions) -> Self {
        let most_expensive = top_n(view, NumericField::Price, options.top_n)
            .into_iter()
            .filter_map(|r| Some((r.raw.name.clone(), r.numeric(NumericField::Price)?)))
            .collect();

        DashboardSummary {
            by_company: count_by_company(view),
            by_fuel_type: count_by_fuel_type(view),
            horsepower_histogram: histogram_buckets(
                view.iter().map(|r| r.numeric(NumericField::Horsepower)),
                options.histogram_bins,
            ),
            price_vs_horsepower: scatter_pairs(view, NumericField::Horsepower, NumericField::Price),
            most_expensive,
            by_seats: count_by_seats(view),
            mean_price_by_fuel: group_average(view, CategoricalField::FuelType, NumericField::Price),
            acceleration_vs_horsepower: scatter_pairs(
                view,
                NumericField::Horsepower,
                NumericField::Acceleration,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, FilterSpec};
    use crate::data::model::tests::car;
    use crate::data::model::CarDataset;

    fn view_of(ds: &CarDataset) -> FilteredView<'_> {
        filter(ds, &FilterSpec::default())
    }

    #[test]
    fn counts_end_to_end_with_filter() {
        let ds = CarDataset {
            records: vec![
                car("A", "Petrol", "1 hp", "$1"),
                car("A", "Petrol", "2 hp", "$2"),
                car("B", "Diesel", "3 hp", "$3"),
            ],
        };
        assert_eq!(
            count_by_company(&view_of(&ds)),
            [("A".to_string(), 2), ("B".to_string(), 1)]
        );

        let mut spec = FilterSpec::default();
        spec.toggle(CategoricalField::Company, "B");
        let view = filter(&ds, &spec);
        assert_eq!(view.len(), 1);
        assert_eq!(count_by_company(&view), [("B".to_string(), 1)]);
    }

    #[test]
    fn count_ties_keep_first_seen_order() {
        let ds = CarDataset {
            records: vec![
                car("X", "Diesel", "", ""),
                car("Y", "Petrol", "", ""),
                car("Y", "Petrol", "", ""),
                car("Z", "Diesel", "", ""),
                car("", "", "", ""),
            ],
        };
        let counts = count_by_company(&view_of(&ds));
        let labels: Vec<&str> = counts.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["Y", "X", "Z"]);
        assert_eq!(
            count_by_fuel_type(&view_of(&ds)),
            [("Diesel".to_string(), 2), ("Petrol".to_string(), 2)]
        );
        assert_eq!(count_by_seats(&view_of(&ds)), [("5".to_string(), 5)]);
    }

    #[test]
    fn share_sums_to_one() {
        let s = share(&[("a".into(), 1), ("b".into(), 3)]);
        assert_eq!(s[0].2, 0.25);
        assert_eq!(s[1].2, 0.75);
        assert!(share(&[]).is_empty());
    }

    #[test]
    fn histogram_equal_width_bins() {
        let values = [Some(0.0), Some(10.0), None, Some(5.0), Some(10.0)];
        let buckets = histogram_buckets(values, 2);
        assert_eq!(buckets.len(), 2);
        assert_eq!((buckets[0].low, buckets[0].high, buckets[0].count), (0.0, 5.0, 1));
        // right edge of the last bin is inclusive
        assert_eq!((buckets[1].low, buckets[1].high, buckets[1].count), (5.0, 10.0, 3));
        let total: usize = histogram_buckets(values, 20).iter().map(|b| b.count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn histogram_degenerate_inputs() {
        assert!(histogram_buckets([None, None], 20).is_empty());
        assert!(histogram_buckets(Vec::<Option<f64>>::new(), 20).is_empty());
        assert!(histogram_buckets([Some(1.0)], 0).is_empty());

        let single = histogram_buckets([Some(7.0), Some(7.0)], 4);
        assert_eq!(single.first().map(|b| b.low), Some(6.5));
        assert_eq!(single.last().map(|b| b.high), Some(7.5));
        assert_eq!(single.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn histogram_handles_extreme_finite_range() {
        let buckets = histogram_buckets([Some(-1e308), Some(1e308)], 2);
        assert_eq!(buckets.len(), 2);
        assert!(buckets.iter().all(|b| b.low.is_finite() && b.high.is_finite()));
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].count, 1);
        assert_eq!(buckets[1].low, 0.0);
    }

    #[test]
    fn top_n_skips_missing_and_is_stable() {
        let ds = CarDataset {
            records: vec![
                car("A", "P", "", "$10"),
                car("B", "P", "", "TBD"),
                car("C", "P", "", "$30"),
                car("D", "P", "", "$10"),
                car("E", "P", "", "$20"),
            ],
        };
        let view = view_of(&ds);
        let top: Vec<&str> = top_n(&view, NumericField::Price, 10)
            .iter()
            .map(|r| r.raw.company.as_str())
            .collect();
        assert_eq!(top, ["C", "E", "A", "D"]);
        assert_eq!(top_n(&view, NumericField::Price, 2).len(), 2);
        assert!(top_n(&view, NumericField::Price, 0).is_empty());
    }

    #[test]
    fn group_average_ignores_missing_values() {
        let ds = CarDataset {
            records: vec![
                car("A", "Petrol", "", "$10"),
                car("A", "Petrol", "", "$20"),
                car("A", "Petrol", "", "N/A"),
                car("A", "Hydrogen", "", "TBD"),
                car("A", "Diesel", "", "$7"),
            ],
        };
        let avg = group_average(&view_of(&ds), CategoricalField::FuelType, NumericField::Price);
        assert_eq!(avg, [("Diesel".to_string(), 7.0), ("Petrol".to_string(), 15.0)]);
    }

    #[test]
    fn scatter_pairs_need_both_coordinates() {
        let ds = CarDataset {
            records: vec![car("A", "P", "100 hp", "$5"), car("B", "P", "N/A", "$6")],
        };
        let pts = scatter_pairs(&view_of(&ds), NumericField::Horsepower, NumericField::Price);
        assert_eq!(pts, [[100.0, 5.0]]);
    }

    #[test]
    fn summary_of_empty_view_is_empty() {
        let ds = CarDataset::default();
        let summary = DashboardSummary::compute(&view_of(&ds), SummaryOptions::default());
        assert_eq!(summary, DashboardSummary::default());
    }

    #[test]
    fn summary_ranks_by_price() {
        let ds = CarDataset {
            records: vec![car("A", "P", "100 hp", "$5"), car("B", "P", "200 hp", "$9")],
        };
        let summary = DashboardSummary::compute(&view_of(&ds), SummaryOptions::default());
        assert_eq!(summary.most_expensive[0], ("B 200 hp".to_string(), 9.0));
        assert_eq!(summary.acceleration_vs_horsepower.len(), 2);
        assert_eq!(summary.horsepower_histogram.len(), DEFAULT_HISTOGRAM_BINS);
    }
}
