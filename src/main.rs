mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::AvailabilityApp;
use clap::Parser;
use data::filter::FilterState;
use data::model::{Metric, Season};
use eframe::egui;
use state::{AppState, Page};

/// Seasonal availability explorer for short-term rental listings.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Listings file to open at startup (.csv, .json or .parquet).
    #[arg(short, long, env = "LISTINGS_PATH")]
    data: Option<PathBuf>,

    /// Initial country filter.
    #[arg(long)]
    country: Option<String>,

    /// Initial suburb filter.
    #[arg(long)]
    suburb: Option<String>,

    /// Initial season filter (Winter, Spring, Summer, Autumn, Unknown).
    #[arg(long)]
    season: Option<Season>,

    /// Availability column to analyse.
    #[arg(long, default_value_t = Metric::Availability365)]
    metric: Metric,
}

impl Cli {
    fn filters(&self) -> FilterState {
        FilterState {
            country: self.country.clone(),
            suburb: self.suburb.clone(),
            season: self.season,
            metric: self.metric,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut state = AppState::default();
    if let Some(path) = &cli.data {
        let dataset = data::loader::load_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        state.set_dataset(dataset);
        state.page = Page::Explore;
    }
    state.apply_filters(cli.filters());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rental Availability Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(AvailabilityApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
