use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::data::aggregate::Analysis;
use crate::data::model::Season;
use crate::state::AppState;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const PLOT_HEIGHT: f32 = 280.0;

pub const NO_DATA: &str = "No data available for the selected filters.";

pub const NO_REVIEWED: &str =
    "No reviewed listings in the current selection, so there is no monthly trend.";

/// Placeholder for an empty monthly chart. `has_listings` is whether the
/// selection itself matched anything.
fn empty_monthly_message(has_listings: bool) -> &'static str {
    if has_listings { NO_REVIEWED } else { NO_DATA }
}

/// Tick label for a month position, blank between whole months.
fn month_label(x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || !(1.0..=12.0).contains(&rounded) {
        return String::new();
    }
    MONTHS[rounded as usize - 1].to_string()
}

/// Tick label for a bar position in a seasonal chart.
fn season_label(x: f64, seasons: &[Season]) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    seasons
        .get(rounded as usize)
        .map(|s| s.label().to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Monthly trend (line chart)
// ---------------------------------------------------------------------------

/// Line chart of the mean metric per review month.
pub fn monthly_trend_plot(ui: &mut Ui, analysis: &Analysis, has_listings: bool) {
    if analysis.monthly.is_empty() {
        ui.label(empty_monthly_message(has_listings));
        return;
    }

    let series: Vec<[f64; 2]> = analysis
        .monthly
        .iter()
        .map(|&(month, mean)| [month as f64, mean])
        .collect();
    let name = format!("Average {}", analysis.metric);
    let teal = Color32::from_rgb(0, 128, 128);

    Plot::new("monthly_trend")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Month (Last Review)")
        .y_axis_label(name.clone())
        .include_x(1.0)
        .include_x(12.0)
        .include_y(0.0)
        .x_axis_formatter(|mark: GridMark, _range| month_label(mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(series.clone()))
                    .name(&name)
                    .color(teal)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(series))
                    .name(&name)
                    .color(teal)
                    .radius(4.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Seasonal averages (bar chart)
// ---------------------------------------------------------------------------

/// Bar chart of the mean metric per season, one colour per season.
pub fn season_bar_chart(ui: &mut Ui, state: &AppState) {
    let analysis = &state.analysis;
    if analysis.seasonal.is_empty() {
        ui.label(NO_DATA);
        return;
    }

    let seasons: Vec<Season> = analysis.seasonal.keys().copied().collect();
    let bars: Vec<Bar> = analysis
        .seasonal
        .iter()
        .enumerate()
        .map(|(i, (&season, &mean))| {
            Bar::new(i as f64, mean)
                .name(season.label())
                .fill(state.season_colors.color_for(season))
                .width(0.6)
        })
        .collect();

    let chart = BarChart::new(bars)
        .name(format!("Average {} by Season", analysis.metric))
        .element_formatter(Box::new(|bar, _| format!("{}\n{:.2}", bar.name, bar.value)));

    Plot::new("season_bars")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Season")
        .y_axis_label(format!("Average {}", analysis.metric))
        .include_y(0.0)
        .x_axis_formatter(move |mark: GridMark, _range| season_label(mark.value, &seasons))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_ticks() {
        assert_eq!(month_label(1.0), "Jan");
        assert_eq!(month_label(12.0), "Dec");
        assert_eq!(month_label(6.5), "");
        assert_eq!(month_label(0.0), "");
        assert_eq!(month_label(13.0), "");
    }

    #[test]
    fn empty_monthly_chart_says_why() {
        assert_eq!(empty_monthly_message(false), NO_DATA);
        assert_eq!(empty_monthly_message(true), NO_REVIEWED);
    }

    #[test]
    fn season_ticks_follow_present_seasons() {
        let seasons = [Season::Winter, Season::Summer];
        assert_eq!(season_label(0.0, &seasons), "Winter");
        assert_eq!(season_label(1.0, &seasons), "Summer");
        assert_eq!(season_label(2.0, &seasons), "");
        assert_eq!(season_label(-1.0, &seasons), "");
        assert_eq!(season_label(0.5, &seasons), "");
    }
}
