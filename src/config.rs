use std::path::PathBuf;

use clap::builder::TypedValueParser;
use clap::Parser;

use crate::data::aggregate::{SummaryOptions, DEFAULT_HISTOGRAM_BINS, DEFAULT_TOP_N};

pub const DEFAULT_DATASET: &str = "Cars Datasets 2025.csv";

/// Cars Dataset 2025 - data visualization dashboard
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct DashboardConfig {
    /// Path to the Latin-1 encoded cars CSV
    #[arg(env = "CARS_DASHBOARD_DATASET", default_value = DEFAULT_DATASET)]
    pub dataset: PathBuf,

    /// Rows shown in the dataset preview
    #[arg(long, default_value_t = 5)]
    pub preview_rows: usize,

    /// Number of bins in the horsepower histogram
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS,
          value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub histogram_bins: usize,

    /// How many cars the most-expensive ranking shows
    #[arg(long, default_value_t = DEFAULT_TOP_N,
          value_parser = clap::value_parser!(u16).range(1..).map(usize::from))]
    pub top_n: usize,

    /// Initial window width
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height
    #[arg(long, default_value_t = 800.0)]
    pub height: f32,
}

impl DashboardConfig {
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            histogram_bins: self.histogram_bins,
            top_n: self.top_n,
        }
    }
}
