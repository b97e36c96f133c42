use crate::color::SeasonColors;
use crate::data::aggregate::Analysis;
use crate::data::filter::{FilterState, country_view, filtered_indices, suburb_options};
use crate::data::model::{ListingDataset, Metric, Season};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Explore,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Home, Page::Explore];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Explore => "Explore Availability Analysis",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded snapshot (None until a file is opened). Never mutated once set.
    pub dataset: Option<ListingDataset>,

    /// Current selector values.
    pub filters: FilterState,

    /// Page shown in the central panel.
    pub page: Page,

    /// Suburbs present in the country-filtered subset.
    pub suburb_options: Vec<String>,

    /// Indices of listings passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregations over `visible_indices` (cached).
    pub analysis: Analysis,

    pub season_colors: SeasonColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset and reset the selection to "All".
    pub fn set_dataset(&mut self, dataset: ListingDataset) {
        self.dataset = Some(dataset);
        self.filters = FilterState {
            metric: self.filters.metric,
            ..FilterState::default()
        };
        self.status_message = None;
        self.refilter();
    }

    /// Apply a whole selection at once (used for command-line defaults).
    /// Values that the dataset cannot satisfy fall back to "All".
    pub fn apply_filters(&mut self, filters: FilterState) {
        let known_country = match (&self.dataset, &filters.country) {
            (Some(ds), Some(c)) => ds.countries.contains(c),
            _ => true,
        };
        self.filters = filters;
        if !known_country {
            log::warn!(
                "Country {:?} not present in dataset, showing all countries",
                self.filters.country
            );
            self.filters.country = None;
        }
        self.refilter();
    }

    /// Recompute suburb options, `visible_indices` and the analysis after
    /// a selection change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.suburb_options.clear();
            self.visible_indices.clear();
            self.analysis = Analysis::default();
            return;
        };

        let by_country = country_view(ds, self.filters.country.as_deref());
        self.suburb_options = suburb_options(ds, &by_country);
        if let Some(suburb) = &self.filters.suburb {
            if !self.suburb_options.contains(suburb) {
                log::debug!("Suburb {suburb:?} not in selected country, resetting to all");
                self.filters.suburb = None;
            }
        }

        self.visible_indices = filtered_indices(ds, &self.filters);
        self.analysis = Analysis::compute(ds, &self.visible_indices, self.filters.metric);
        log::debug!(
            "{} of {} listings: {}",
            self.visible_indices.len(),
            ds.len(),
            self.filters.describe()
        );
    }

    pub fn set_country(&mut self, country: Option<String>) {
        if self.filters.country != country {
            self.filters.country = country;
            self.refilter();
        }
    }

    pub fn set_suburb(&mut self, suburb: Option<String>) {
        if self.filters.suburb != suburb {
            self.filters.suburb = suburb;
            self.refilter();
        }
    }

    pub fn set_season(&mut self, season: Option<Season>) {
        if self.filters.season != season {
            self.filters.season = season;
            self.refilter();
        }
    }

    pub fn set_metric(&mut self, metric: Metric) {
        if self.filters.metric != metric {
            self.filters.metric = metric;
            self.refilter();
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::Listing;

    fn listing(country: &str, suburb: &str, month: u32, a30: f64) -> Listing {
        Listing::new(
            country,
            Some(suburb.to_string()),
            [None, Some(a30), None, None],
            NaiveDate::from_ymd_opt(2023, month, 1),
        )
    }

    fn state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(ListingDataset::from_listings(vec![
            listing("Australia", "Bondi", 1, 10.0),
            listing("Australia", "Manly", 7, 20.0),
            listing("Spain", "Gracia", 7, 5.0),
        ]));
        state.set_metric(Metric::Availability30);
        state
    }

    #[test]
    fn new_dataset_shows_everything() {
        let state = state();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.suburb_options, vec!["Bondi", "Manly", "Gracia"]);
        assert_eq!(state.analysis.seasonal.len(), 2);
    }

    #[test]
    fn country_change_narrows_suburbs_and_resets_stale_suburb() {
        let mut state = state();
        state.set_suburb(Some("Gracia".into()));
        assert_eq!(state.visible_indices, vec![2]);

        state.set_country(Some("Australia".into()));
        assert_eq!(state.filters.suburb, None);
        assert_eq!(state.suburb_options, vec!["Bondi", "Manly"]);
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.analysis.seasonal.get(&Season::Summer), Some(&10.0));
        assert_eq!(state.analysis.seasonal.get(&Season::Winter), Some(&20.0));
    }

    #[test]
    fn empty_selection_is_not_an_error() {
        let mut state = state();
        state.set_country(Some("Spain".into()));
        state.set_season(Some(Season::Winter));
        assert!(state.visible_indices.is_empty());
        assert!(state.analysis.is_empty());
        assert_eq!(
            state.filters.describe(),
            "Analyzing **availability_30** for listings in **all suburbs** in **Spain** during **Winter**."
        );
    }

    #[test]
    fn undated_selection_has_seasons_but_no_months() {
        let mut state = state();
        let mut listings = state.dataset.take().map(|ds| ds.listings).unwrap_or_default();
        listings.push(Listing::new("Spain", None, [None, Some(4.0), None, None], None));
        state.set_dataset(ListingDataset::from_listings(listings));
        state.set_season(Some(Season::Unknown));

        assert_eq!(state.visible_indices, vec![3]);
        assert!(state.analysis.monthly.is_empty());
        assert_eq!(state.analysis.seasonal.get(&Season::Unknown), Some(&4.0));
    }

    #[test]
    fn unknown_initial_country_falls_back_to_all() {
        let mut state = state();
        state.apply_filters(FilterState {
            country: Some("Brazil".into()),
            metric: Metric::Availability30,
            ..FilterState::default()
        });
        assert_eq!(state.filters.country, None);
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn no_dataset_means_empty_analysis() {
        let mut state = AppState::default();
        state.set_season(Some(Season::Summer));
        assert!(state.visible_indices.is_empty());
        assert!(state.analysis.is_empty());
    }
}
