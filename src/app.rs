use eframe::egui;

use crate::state::{AppState, Page};
use crate::ui::{explore, home, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AvailabilityApp {
    pub state: AppState,
}

impl AvailabilityApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for AvailabilityApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and page navigation ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters (analysis page only) ----
        if self.state.page == Page::Explore {
            egui::SidePanel::left("filter_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: page content ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.page {
            Page::Home => home::home_page(ui, &mut self.state),
            Page::Explore => explore::explore_page(ui, &self.state),
        });
    }
}
