use super::model::{Hemisphere, Season};

// ---------------------------------------------------------------------------
// Country → hemisphere lookup
// ---------------------------------------------------------------------------

const NORTHERN: [&str; 7] = [
    "United States",
    "Turkey",
    "Hong Kong",
    "Portugal",
    "Canada",
    "Spain",
    "China",
];

const SOUTHERN: [&str; 2] = ["Australia", "Brazil"];

/// Countries for which a season can be derived. Everything else is dropped
/// when a dataset is built.
pub const ALLOWED_COUNTRIES: [&str; 9] = [
    "United States",
    "Turkey",
    "Hong Kong",
    "Australia",
    "Portugal",
    "Brazil",
    "Canada",
    "Spain",
    "China",
];

pub fn is_allowed(country: &str) -> bool {
    ALLOWED_COUNTRIES.contains(&country)
}

pub fn hemisphere_of(country: &str) -> Hemisphere {
    if NORTHERN.contains(&country) {
        Hemisphere::Northern
    } else if SOUTHERN.contains(&country) {
        Hemisphere::Southern
    } else {
        Hemisphere::Unknown
    }
}

// ---------------------------------------------------------------------------
// (hemisphere, month) → season
// ---------------------------------------------------------------------------

/// Season of a calendar month in the given hemisphere.
///
/// Total over its input: months outside 1–12 land on `Autumn`, the last
/// listed season of either table. A missing month or an unknown hemisphere
/// gives `Season::Unknown`.
pub fn season_for(hemisphere: Hemisphere, month: Option<u32>) -> Season {
    let Some(month) = month else {
        return Season::Unknown;
    };
    match hemisphere {
        Hemisphere::Northern => match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        },
        // Same table shifted by six months.
        Hemisphere::Southern => match month {
            6..=8 => Season::Winter,
            9..=11 => Season::Spring,
            12 | 1 | 2 => Season::Summer,
            _ => Season::Autumn,
        },
        Hemisphere::Unknown => Season::Unknown,
    }
}

pub fn classify(country: &str, month: Option<u32>) -> Season {
    season_for(hemisphere_of(country), month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_splits_seven_north_two_south() {
        let north = ALLOWED_COUNTRIES
            .iter()
            .filter(|c| hemisphere_of(c) == Hemisphere::Northern)
            .count();
        let south = ALLOWED_COUNTRIES
            .iter()
            .filter(|c| hemisphere_of(c) == Hemisphere::Southern)
            .count();
        assert_eq!(north, 7);
        assert_eq!(south, 2);
        assert_eq!(hemisphere_of("Australia"), Hemisphere::Southern);
        assert_eq!(hemisphere_of("Brazil"), Hemisphere::Southern);
        assert_eq!(hemisphere_of("Hong Kong"), Hemisphere::Northern);
    }

    #[test]
    fn unlisted_country_is_unknown_for_every_month() {
        assert!(!is_allowed("Japan"));
        assert_eq!(hemisphere_of("Japan"), Hemisphere::Unknown);
        for month in 1..=12 {
            assert_eq!(classify("Japan", Some(month)), Season::Unknown);
        }
        assert_eq!(classify("", Some(3)), Season::Unknown);
    }

    #[test]
    fn northern_months() {
        assert_eq!(classify("Spain", Some(1)), Season::Winter);
        assert_eq!(classify("Spain", Some(4)), Season::Spring);
        assert_eq!(classify("Spain", Some(7)), Season::Summer);
        assert_eq!(classify("Spain", Some(10)), Season::Autumn);
        assert_eq!(classify("Canada", Some(12)), Season::Winter);
    }

    #[test]
    fn southern_months_are_shifted() {
        assert_eq!(classify("Australia", Some(1)), Season::Summer);
        assert_eq!(classify("Australia", Some(7)), Season::Winter);
        assert_eq!(classify("Brazil", Some(10)), Season::Spring);
        assert_eq!(classify("Brazil", Some(4)), Season::Autumn);
    }

    #[test]
    fn every_month_differs_between_hemispheres() {
        for month in 1..=12 {
            assert_ne!(
                season_for(Hemisphere::Northern, Some(month)),
                season_for(Hemisphere::Southern, Some(month)),
                "month {month}"
            );
        }
    }

    #[test]
    fn missing_month_is_unknown() {
        assert_eq!(season_for(Hemisphere::Northern, None), Season::Unknown);
        assert_eq!(season_for(Hemisphere::Southern, None), Season::Unknown);
    }

    #[test]
    fn out_of_range_month_falls_through_to_autumn() {
        assert_eq!(season_for(Hemisphere::Northern, Some(0)), Season::Autumn);
        assert_eq!(season_for(Hemisphere::Northern, Some(13)), Season::Autumn);
        assert_eq!(season_for(Hemisphere::Southern, Some(13)), Season::Autumn);
        assert_eq!(season_for(Hemisphere::Unknown, Some(13)), Season::Unknown);
    }
}
