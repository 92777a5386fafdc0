use std::path::PathBuf;

use clap::Parser;

use crate::infra::route_cache::CACHE_FILE_NAME;

/// Estimates profitable two-port trade loops from static price tables and
/// answers interactive queries about them.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Directory containing the four reference CSV files.
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Cache artifact location; defaults to global_trade_routes.csv.gz
    /// inside the data directory. Delete the file to force a recomputation.
    #[arg(long)]
    pub cache_file: Option<PathBuf>,

    /// Round trips must beat this total profit to be kept.
    #[arg(long, default_value_t = 0.0)]
    pub profit_threshold: f64,

    /// Routes shown for a worldwide query.
    #[arg(long, default_value_t = 100)]
    pub top_worldwide: usize,

    /// Routes shown when asking about a single port.
    #[arg(long, default_value_t = 20)]
    pub top_per_port: usize,

    /// Ranked routes kept before grouping; larger than the display counts so
    /// deduplication has slack.
    #[arg(long, default_value_t = 500)]
    pub selection_pool: usize,
}

impl CliArgs {
    pub fn cache_path(&self) -> PathBuf {
        self.cache_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(CACHE_FILE_NAME))
    }
}
