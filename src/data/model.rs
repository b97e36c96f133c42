use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use super::normalize::{coerce_date, coerce_numeric};
use super::season;

// ---------------------------------------------------------------------------
// Hemisphere / Season – derived classifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Hemisphere {
    Northern,
    Southern,
    Unknown,
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Hemisphere::Northern => "Northern",
            Hemisphere::Southern => "Southern",
            Hemisphere::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Season label of a listing. Ordering follows the calendar of the
/// northern hemisphere with `Unknown` last, which is also the order used
/// for the seasonal chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
    Unknown,
}

impl Season {
    pub const ALL: [Season; 5] = [
        Season::Winter,
        Season::Spring,
        Season::Summer,
        Season::Autumn,
        Season::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown season '{0}' (expected Winter, Spring, Summer, Autumn or Unknown)")]
pub struct ParseSeasonError(pub String);

impl FromStr for Season {
    type Err = ParseSeasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSeasonError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Metric – which availability column is analysed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    #[default]
    Availability365,
    Availability30,
    Availability60,
    Availability90,
}

impl Metric {
    /// Selector order.
    pub const ALL: [Metric; 4] = [
        Metric::Availability365,
        Metric::Availability30,
        Metric::Availability60,
        Metric::Availability90,
    ];

    /// Column name in the source file.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Availability365 => "availability_365",
            Metric::Availability30 => "availability_30",
            Metric::Availability60 => "availability_60",
            Metric::Availability90 => "availability_90",
        }
    }

    /// Position inside `Listing::availability` / `RawListing::availability`.
    pub fn index(self) -> usize {
        match self {
            Metric::Availability365 => 0,
            Metric::Availability30 => 1,
            Metric::Availability60 => 2,
            Metric::Availability90 => 3,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown availability metric '{0}' (expected availability_30, availability_60, availability_90 or availability_365)")]
pub struct ParseMetricError(pub String);

impl FromStr for Metric {
    type Err = ParseMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.column() == s.trim())
            .ok_or_else(|| ParseMetricError(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// RawListing – one row as read from disk, before coercion
// ---------------------------------------------------------------------------

/// Text cells of the columns we care about. `None` means the cell was
/// empty or the column is absent from the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub country: Option<String>,
    pub suburb: Option<String>,
    /// Indexed by [`Metric::index`].
    pub availability: [Option<String>; 4],
    pub last_review: Option<String>,
}

// ---------------------------------------------------------------------------
// Listing – one normalized row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub country: String,
    pub suburb: Option<String>,
    /// Indexed by [`Metric::index`].
    pub availability: [Option<f64>; 4],
    pub last_review: Option<NaiveDate>,
    pub review_month: Option<u32>,
    pub hemisphere: Hemisphere,
    pub season: Season,
}

impl Listing {
    /// Build a listing from already-typed fields, deriving month,
    /// hemisphere and season.
    pub fn new(
        country: impl Into<String>,
        suburb: Option<String>,
        availability: [Option<f64>; 4],
        last_review: Option<NaiveDate>,
    ) -> Self {
        let country = country.into();
        let review_month = last_review.map(|d| d.month());
        let hemisphere = season::hemisphere_of(&country);
        let season = season::classify(&country, review_month);
        Listing {
            country,
            suburb,
            availability,
            last_review,
            review_month,
            hemisphere,
            season,
        }
    }

    /// Value of the given availability column, if present.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.availability[metric.index()]
    }
}

// ---------------------------------------------------------------------------
// ListingDataset – the immutable snapshot every view is derived from
// ---------------------------------------------------------------------------

/// Counters collected while building a [`ListingDataset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Rows read from the file.
    pub rows_read: usize,
    /// Rows dropped because their country is missing or not on the allow-list.
    pub rows_dropped: usize,
    /// Non-empty availability cells of retained rows that were not numeric.
    pub coerced_numbers: usize,
    /// Non-empty review dates of retained rows that could not be parsed.
    pub coerced_dates: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ListingDataset {
    /// Allow-listed, normalized listings.
    pub listings: Vec<Listing>,
    /// Sorted distinct countries present in `listings`.
    pub countries: Vec<String>,
    pub stats: LoadStats,
}

impl ListingDataset {
    /// Normalize raw rows and keep only allow-listed countries.
    pub fn from_raw(rows: Vec<RawListing>) -> Self {
        let mut stats = LoadStats {
            rows_read: rows.len(),
            ..LoadStats::default()
        };
        let mut listings = Vec::with_capacity(rows.len());

        for raw in rows {
            let Some(country) = raw.country.filter(|c| season::is_allowed(c)) else {
                stats.rows_dropped += 1;
                continue;
            };

            let mut availability = [None; 4];
            for (slot, cell) in availability.iter_mut().zip(raw.availability.iter()) {
                if let Some(text) = cell {
                    *slot = coerce_numeric(text);
                    if slot.is_none() && !text.trim().is_empty() {
                        stats.coerced_numbers += 1;
                    }
                }
            }

            let last_review = raw.last_review.as_deref().and_then(|text| {
                let date = coerce_date(text);
                if date.is_none() && !text.trim().is_empty() {
                    stats.coerced_dates += 1;
                }
                date
            });

            let suburb = raw.suburb.filter(|s| !s.trim().is_empty());
            listings.push(Listing::new(country, suburb, availability, last_review));
        }

        Self::from_listings_with_stats(listings, stats)
    }

    /// Build a snapshot from listings that are already normalized. Rows
    /// outside the allow-list are still dropped.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let stats = LoadStats {
            rows_read: listings.len(),
            ..LoadStats::default()
        };
        Self::from_listings_with_stats(listings, stats)
    }

    fn from_listings_with_stats(listings: Vec<Listing>, mut stats: LoadStats) -> Self {
        let before = listings.len();
        let listings: Vec<Listing> = listings
            .into_iter()
            .filter(|l| season::is_allowed(&l.country))
            .collect();
        stats.rows_dropped += before - listings.len();

        let mut countries: Vec<String> = listings.iter().map(|l| l.country.clone()).collect();
        countries.sort();
        countries.dedup();

        ListingDataset {
            listings,
            countries,
            stats,
        }
    }

    /// Number of retained listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether no listing survived normalization.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(country: &str, a30: &str, review: &str) -> RawListing {
        RawListing {
            country: Some(country.to_string()),
            suburb: Some("Centre".to_string()),
            availability: [None, Some(a30.to_string()), None, None],
            last_review: Some(review.to_string()),
        }
    }

    #[test]
    fn metric_parses_column_names() {
        assert_eq!("availability_30".parse::<Metric>(), Ok(Metric::Availability30));
        assert_eq!(Metric::Availability90.to_string(), "availability_90");
        assert!("availability_7".parse::<Metric>().is_err());
    }

    #[test]
    fn season_parses_case_insensitively() {
        assert_eq!("summer".parse::<Season>(), Ok(Season::Summer));
        assert_eq!(" Unknown ".parse::<Season>(), Ok(Season::Unknown));
        assert!("Monsoon".parse::<Season>().is_err());
    }

    #[test]
    fn listing_derives_month_hemisphere_and_season() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 14);
        let l = Listing::new("Brazil", None, [None; 4], date);
        assert_eq!(l.review_month, Some(7));
        assert_eq!(l.hemisphere, Hemisphere::Southern);
        assert_eq!(l.season, Season::Winter);

        let undated = Listing::new("Spain", None, [None; 4], None);
        assert_eq!(undated.review_month, None);
        assert_eq!(undated.season, Season::Unknown);
    }

    #[test]
    fn from_raw_drops_countries_outside_allow_list() {
        let ds = ListingDataset::from_raw(vec![
            raw("Spain", "12", "2023-01-02"),
            raw("Japan", "3", "2023-01-02"),
            raw("Australia", "8", "2023-06-30"),
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.countries, vec!["Australia".to_string(), "Spain".to_string()]);
        assert_eq!(ds.stats.rows_read, 3);
        assert_eq!(ds.stats.rows_dropped, 1);
    }

    #[test]
    fn from_raw_coerces_malformed_cells_to_missing() {
        let ds = ListingDataset::from_raw(vec![raw("Canada", "N/A", "not a date")]);
        let l = &ds.listings[0];
        assert_eq!(l.metric(Metric::Availability30), None);
        assert_eq!(l.last_review, None);
        assert_eq!(l.season, Season::Unknown);
        assert_eq!(ds.stats.coerced_numbers, 1);
        assert_eq!(ds.stats.coerced_dates, 1);
    }

    #[test]
    fn dropped_rows_do_not_count_as_coerced() {
        let mut no_country = raw("Spain", "garbage", "31/31/31");
        no_country.country = None;
        let ds = ListingDataset::from_raw(vec![
            raw("Japan", "N/A", "not a date"),
            no_country,
            raw("Spain", "4", "2023-02-01"),
        ]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.stats.rows_dropped, 2);
        assert_eq!(ds.stats.coerced_numbers, 0);
        assert_eq!(ds.stats.coerced_dates, 0);
    }

    #[test]
    fn blank_suburb_is_missing() {
        let mut r = raw("Turkey", "1", "2023-03-01");
        r.suburb = Some("  ".to_string());
        let ds = ListingDataset::from_raw(vec![r]);
        assert_eq!(ds.listings[0].suburb, None);
    }
}
