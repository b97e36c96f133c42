use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::country_options;
use crate::data::model::{Metric, Season};
use crate::data::season::hemisphere_of;
use crate::state::{AppState, Page};

const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Single-select combo box over `options` plus a leading "All" entry.
/// Returns the new selection when the user picked something.
fn select_or_all<T: Clone + PartialEq>(
    ui: &mut Ui,
    id: &str,
    current: &Option<T>,
    options: &[T],
    label: impl Fn(&T) -> String,
) -> Option<Option<T>> {
    let mut picked = None;
    let selected_text = current.as_ref().map(&label).unwrap_or_else(|| ALL.to_string());
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), ALL).clicked() {
                picked = Some(None);
            }
            for opt in options {
                let is_current = current.as_ref() == Some(opt);
                if ui.selectable_label(is_current, label(opt)).clicked() {
                    picked = Some(Some(opt.clone()));
                }
            }
        });
    picked
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state after the widgets.
    let countries = country_options(dataset).to_vec();
    let suburbs = state.suburb_options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("🌍 Select Country");
            let picked =
                select_or_all(ui, "country", &state.filters.country, &countries, |c| c.clone());
            if let Some(c) = picked {
                state.set_country(c);
            }
            if let Some(c) = &state.filters.country {
                let hint = format!("{} hemisphere", hemisphere_of(c));
                ui.label(RichText::new(hint).weak());
            }
            ui.add_space(6.0);

            ui.strong("🏙 Select Suburb");
            if suburbs.is_empty() {
                ui.label(RichText::new("No suburbs for this country").weak());
            }
            let picked =
                select_or_all(ui, "suburb", &state.filters.suburb, &suburbs, |s| s.clone());
            if let Some(s) = picked {
                state.set_suburb(s);
            }
            ui.add_space(6.0);

            ui.strong("🍂 Select Season");
            let colors = state.season_colors.clone();
            let current_season = state.filters.season;
            egui::ComboBox::from_id_salt("season")
                .selected_text(current_season.map(Season::label).unwrap_or(ALL))
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    if ui.selectable_label(current_season.is_none(), ALL).clicked() {
                        state.set_season(None);
                    }
                    for season in Season::ALL {
                        let text = RichText::new(season.label()).color(colors.color_for(season));
                        if ui
                            .selectable_label(current_season == Some(season), text)
                            .clicked()
                        {
                            state.set_season(Some(season));
                        }
                    }
                });
            ui.add_space(6.0);

            ui.strong("📆 Select Availability Period");
            let current_metric = state.filters.metric;
            egui::ComboBox::from_id_salt("metric")
                .selected_text(current_metric.column())
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for metric in Metric::ALL {
                        if ui
                            .selectable_label(current_metric == metric, metric.column())
                            .clicked()
                        {
                            state.set_metric(metric);
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for page in Page::ALL {
            if ui.selectable_label(state.page == page, page.title()).clicked() {
                state.page = page;
            }
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} listings loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open listings data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                state.set_dataset(dataset);
                state.page = Page::Explore;
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
