use std::collections::BTreeMap;

use super::model::{ListingDataset, Metric, Season};

/// Running sum/count; groups that never see a value produce no mean.
#[derive(Debug, Clone, Copy, Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, v: f64) {
        self.sum += v;
        self.count += 1;
    }

    fn value(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

fn group_mean<K: Ord>(
    dataset: &ListingDataset,
    view: &[usize],
    metric: Metric,
    key: impl Fn(usize) -> Option<K>,
) -> BTreeMap<K, f64> {
    let mut groups: BTreeMap<K, Mean> = BTreeMap::new();
    for &i in view {
        let Some(v) = dataset.listings[i].metric(metric) else {
            continue;
        };
        if let Some(k) = key(i) {
            groups.entry(k).or_default().push(v);
        }
    }
    groups
        .into_iter()
        .filter_map(|(k, m)| m.value().map(|v| (k, v)))
        .collect()
}

/// Mean of `metric` per review month, ascending by month. Listings without
/// a review month belong to no month.
pub fn monthly_mean(
    dataset: &ListingDataset,
    view: &[usize],
    metric: Metric,
) -> Vec<(u32, f64)> {
    group_mean(dataset, view, metric, |i| dataset.listings[i].review_month)
        .into_iter()
        .collect()
}

/// Mean of `metric` per season present in `view`.
pub fn seasonal_mean(
    dataset: &ListingDataset,
    view: &[usize],
    metric: Metric,
) -> BTreeMap<Season, f64> {
    group_mean(dataset, view, metric, |i| Some(dataset.listings[i].season))
}

// ---------------------------------------------------------------------------
// Analysis – both aggregations for one selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub metric: Metric,
    pub monthly: Vec<(u32, f64)>,
    pub seasonal: BTreeMap<Season, f64>,
}

impl Analysis {
    pub fn compute(dataset: &ListingDataset, view: &[usize], metric: Metric) -> Self {
        Analysis {
            metric,
            monthly: monthly_mean(dataset, view, metric),
            seasonal: seasonal_mean(dataset, view, metric),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty() && self.seasonal.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::Listing;

    fn listing(country: &str, month: Option<u32>, a30: Option<f64>) -> Listing {
        Listing::new(
            country,
            None,
            [None, a30, None, None],
            month.and_then(|m| NaiveDate::from_ymd_opt(2023, m, 15)),
        )
    }

    fn all(ds: &ListingDataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn seasonal_mean_for_australia() {
        let ds = ListingDataset::from_listings(vec![
            listing("Australia", Some(1), Some(10.0)),
            listing("Australia", Some(7), Some(20.0)),
        ]);
        let seasonal = seasonal_mean(&ds, &all(&ds), Metric::Availability30);
        let expected = BTreeMap::from([(Season::Summer, 10.0), (Season::Winter, 20.0)]);
        assert_eq!(seasonal, expected);
    }

    #[test]
    fn monthly_mean_is_ordered_and_sparse() {
        let ds = ListingDataset::from_listings(vec![
            listing("Spain", Some(9), Some(4.0)),
            listing("Spain", Some(2), Some(1.0)),
            listing("Spain", Some(2), Some(3.0)),
            listing("Spain", None, Some(50.0)),
        ]);
        let monthly = monthly_mean(&ds, &all(&ds), Metric::Availability30);
        assert_eq!(monthly, vec![(2, 2.0), (9, 4.0)]);
    }

    #[test]
    fn missing_values_are_ignored() {
        let ds = ListingDataset::from_listings(vec![
            listing("Canada", Some(1), Some(6.0)),
            listing("Canada", Some(1), None),
            listing("Canada", Some(4), None),
        ]);
        let view = all(&ds);
        assert_eq!(monthly_mean(&ds, &view, Metric::Availability30), vec![(1, 6.0)]);

        let seasonal = seasonal_mean(&ds, &view, Metric::Availability30);
        assert_eq!(seasonal.len(), 1);
        assert_eq!(seasonal.get(&Season::Winter), Some(&6.0));
        assert!(!seasonal.contains_key(&Season::Spring));
    }

    #[test]
    fn undated_listings_group_under_unknown_season() {
        let ds = ListingDataset::from_listings(vec![
            listing("China", None, Some(8.0)),
            listing("China", Some(6), Some(2.0)),
        ]);
        let seasonal = seasonal_mean(&ds, &all(&ds), Metric::Availability30);
        assert_eq!(seasonal.get(&Season::Unknown), Some(&8.0));
        assert_eq!(seasonal.get(&Season::Summer), Some(&2.0));
    }

    #[test]
    fn empty_view_gives_empty_analysis() {
        let ds = ListingDataset::from_listings(vec![listing("Turkey", Some(3), Some(1.0))]);
        let analysis = Analysis::compute(&ds, &[], Metric::Availability30);
        assert!(analysis.monthly.is_empty());
        assert!(analysis.seasonal.is_empty());
        assert!(analysis.is_empty());
    }

    #[test]
    fn metric_selects_column() {
        let ds = ListingDataset::from_listings(vec![Listing::new(
            "Portugal",
            None,
            [Some(365.0), Some(30.0), Some(60.0), Some(90.0)],
            NaiveDate::from_ymd_opt(2023, 5, 1),
        )]);
        let view = all(&ds);
        assert_eq!(
            Analysis::compute(&ds, &view, Metric::Availability60).monthly,
            vec![(5, 60.0)]
        );
        assert_eq!(
            Analysis::compute(&ds, &view, Metric::Availability365).seasonal[&Season::Spring],
            365.0
        );
    }
}
