use eframe::egui::{RichText, Ui};

use crate::state::{AppState, Page};

/// Render the landing page.
pub fn home_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Welcome to the Rental Availability Explorer 👋");
    ui.add_space(8.0);
    ui.label(
        "Explore how the availability of short-term rental listings changes \
         month to month and by season, based on the location of the listing.",
    );

    ui.add_space(12.0);
    ui.label(RichText::new("🔍 Features").strong().size(18.0));
    ui.label("• Explore Availability Analysis: monthly trends and seasonal averages.");
    ui.label("• Filters: country, suburb, season and availability period.");
    ui.label("• Seasons follow the hemisphere of each listing's country.");

    ui.add_space(12.0);
    ui.label(RichText::new("📖 How to Use").strong().size(18.0));
    ui.label("1. Open a listings file (File → Open…) if none was given on the command line.");
    ui.label("2. Switch to Explore Availability Analysis.");
    ui.label("3. Narrow the data with the filters in the side panel.");

    ui.add_space(12.0);
    match &state.dataset {
        Some(ds) => {
            ui.label(format!(
                "{} listings across {} countries are loaded ({} rows outside the supported countries were skipped).",
                ds.len(),
                ds.countries.len(),
                ds.stats.rows_dropped
            ));
            if ui.button("Start exploring →").clicked() {
                state.page = Page::Explore;
            }
        }
        None => {
            ui.label(RichText::new("No dataset loaded yet.").weak());
        }
    }
}
