use eframe::egui::{RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Explore Availability Analysis page (central panel)
// ---------------------------------------------------------------------------

pub fn explore_page(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a listings file to explore  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("📊 Explore Availability Analysis");
            selection_summary(ui, state);
            ui.add_space(8.0);

            ui.label(RichText::new("📈 Monthly Availability Trend").strong().size(18.0));
            plot::monthly_trend_plot(ui, &state.analysis, !state.visible_indices.is_empty());
            ui.add_space(12.0);

            ui.label(RichText::new("📊 Average Availability by Season").strong().size(18.0));
            plot::season_bar_chart(ui, state);
            ui.add_space(8.0);

            if !state.analysis.seasonal.is_empty() {
                season_table(ui, state);
            }
        });
}

/// The active selection with its values in bold.
fn selection_summary(ui: &mut Ui, state: &AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for (lead, value) in state.filters.highlights() {
            ui.label(RichText::new(lead).italics());
            ui.label(RichText::new(value).italics().strong());
        }
        ui.label(RichText::new(".").italics());
    });
}

/// Seasonal means as text, next to the bar chart.
fn season_table(ui: &mut Ui, state: &AppState) {
    let rows: Vec<(String, String)> = state
        .analysis
        .seasonal
        .iter()
        .map(|(season, mean)| (season.label().to_string(), format!("{mean:.2}")))
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(160.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Season");
            });
            header.col(|ui| {
                ui.strong(format!("Average {}", state.analysis.metric));
            });
        })
        .body(|mut body| {
            for (season, mean) in &rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(season.as_str());
                    });
                    row.col(|ui| {
                        ui.label(mean.as_str());
                    });
                });
            }
        });
}
