use std::collections::HashSet;

use super::model::{Listing, ListingDataset, Metric, Season};

// ---------------------------------------------------------------------------
// Filter selections
// ---------------------------------------------------------------------------

/// Current selector values. `None` means "All" (no constraint).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub country: Option<String>,
    pub suburb: Option<String>,
    pub season: Option<Season>,
    pub metric: Metric,
}

impl FilterState {
    /// Active constraints, in selector order.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        if let Some(c) = &self.country {
            out.push(Predicate::Country(c.clone()));
        }
        if let Some(s) = &self.suburb {
            out.push(Predicate::Suburb(s.clone()));
        }
        if let Some(s) = self.season {
            out.push(Predicate::Season(s));
        }
        out
    }

    /// The selection as (lead-in, value) pairs; values are emphasised when
    /// shown above the charts.
    pub fn highlights(&self) -> [(&'static str, String); 4] {
        let suburb = self.suburb.as_deref().unwrap_or("all suburbs");
        let country = self.country.as_deref().unwrap_or("all countries");
        let season = self.season.map(|s| s.label()).unwrap_or("all seasons");
        [
            ("Analyzing ", self.metric.to_string()),
            (" for listings in ", suburb.to_string()),
            (" in ", country.to_string()),
            (" during ", season.to_string()),
        ]
    }

    /// One-line Markdown description of the selection, values in bold.
    pub fn describe(&self) -> String {
        let mut out: String = self
            .highlights()
            .iter()
            .map(|(lead, value)| format!("{lead}**{value}**"))
            .collect();
        out.push('.');
        out
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// A single equality constraint on a listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Country(String),
    Suburb(String),
    Season(Season),
}

impl Predicate {
    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            Predicate::Country(c) => listing.country == *c,
            Predicate::Suburb(s) => listing.suburb.as_deref() == Some(s.as_str()),
            Predicate::Season(s) => listing.season == *s,
        }
    }
}

/// Keep the indices of `view` whose listing satisfies `predicate`.
pub fn apply_predicate(
    dataset: &ListingDataset,
    view: &[usize],
    predicate: &Predicate,
) -> Vec<usize> {
    view.iter()
        .copied()
        .filter(|&i| predicate.matches(&dataset.listings[i]))
        .collect()
}

fn all_indices(dataset: &ListingDataset) -> Vec<usize> {
    (0..dataset.len()).collect()
}

// ---------------------------------------------------------------------------
// Views and selector options
// ---------------------------------------------------------------------------

/// Countries offered by the country selector (sorted, "All" not included).
pub fn country_options(dataset: &ListingDataset) -> &[String] {
    &dataset.countries
}

/// Indices of listings in `country`, or every listing for "All".
pub fn country_view(dataset: &ListingDataset, country: Option<&str>) -> Vec<usize> {
    let all = all_indices(dataset);
    match country {
        Some(c) => apply_predicate(dataset, &all, &Predicate::Country(c.to_string())),
        None => all,
    }
}

/// Distinct non-missing suburbs of `view`, in order of first appearance.
pub fn suburb_options(dataset: &ListingDataset, view: &[usize]) -> Vec<String> {
    let mut seen = HashSet::new();
    view.iter()
        .filter_map(|&i| dataset.listings[i].suburb.as_deref())
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}

/// Return indices of listings that pass every active filter.
pub fn filtered_indices(dataset: &ListingDataset, filters: &FilterState) -> Vec<usize> {
    filters
        .predicates()
        .iter()
        .fold(all_indices(dataset), |view, p| apply_predicate(dataset, &view, p))
}
