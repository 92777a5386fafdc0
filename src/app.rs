//! Interactive surface: load the reference data, get the global route set,
//! then answer prompt queries until the user leaves.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::cli_args::CliArgs;
use crate::domain::{grouping, routes, ProfitError, ReferenceData, TradeRoute};
use crate::infra::data_files::{self, DataFileError};
use crate::infra::route_cache::{self, CacheError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Data(#[from] DataFileError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Profit(#[from] ProfitError),
    #[error("terminal I/O failed: {0}")]
    Terminal(io::Error),
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    let data = data_files::load_reference_data(&args.data_dir)?;
    let global_routes = load_or_compute(&data, &args.cache_path(), args.profit_threshold)?;

    clear_screen();
    let stdin = io::stdin();
    loop {
        print!(
            "- Enter a port to get the top {} trade routes from that port,\n\
             - Leave blank for the top {} trade routes worldwide\n\
             - Add an asterisk (*) to only show short range routes\n\
             - Your spelling does not have to be exact, it will guess the port you meant.\n\
             - Type 'exit' to exit.\n\
             > ",
            args.top_per_port, args.top_worldwide
        );
        io::stdout().flush().map_err(AppError::Terminal)?;

        let mut line = String::new();
        let bytes_read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(AppError::Terminal)?;
        if bytes_read == 0 {
            break;
        }

        let mut input = line.trim();
        let short_range_only = input.ends_with('*');
        if short_range_only {
            input = input.trim_end_matches('*').trim_end();
        }
        if input == "exit" {
            break;
        }

        clear_screen();

        let port = if input.is_empty() {
            None
        } else {
            Some(data.resolve_port_name(input))
        };
        let display_count = match &port {
            Some(port) => {
                print!(
                    "Showing the top {} trade routes for port '{port}':",
                    args.top_per_port
                );
                args.top_per_port
            }
            None => {
                print!("Showing all {} trade routes globally:", args.top_worldwide);
                args.top_worldwide
            }
        };
        if short_range_only {
            print!(" (Short Range Only)");
        }
        println!();

        let pool = routes::select(
            &global_routes,
            args.selection_pool,
            port.as_deref(),
            short_range_only,
        );
        print_routes(&pool, display_count);
    }

    Ok(())
}

/// The cache short-circuits the full materialization; it is never checked for
/// freshness, so a stale artifact has to be deleted by hand.
fn load_or_compute(
    data: &ReferenceData,
    cache_path: &Path,
    profit_threshold: f64,
) -> Result<Vec<TradeRoute>, AppError> {
    if let Some(routes) = route_cache::load_if_present(cache_path)? {
        println!(
            "[cache] Loaded {} routes from '{}' (delete this file to recompute from scratch)",
            routes.len(),
            cache_path.display()
        );
        return Ok(routes);
    }

    println!(
        "[routes] One-time calculation of all global trade routes. Please stand by, this may take some time..."
    );
    let routes = routes::materialize(data, profit_threshold)?;
    route_cache::publish(cache_path, &routes)?;
    println!(
        "[cache] Saved {} routes to '{}'",
        routes.len(),
        cache_path.display()
    );
    Ok(routes)
}

fn print_routes(pool: &[TradeRoute], display_count: usize) {
    if pool.is_empty() {
        println!("  There are no records to display.");
        println!();
        return;
    }

    let groups = grouping::group_routes(pool);
    for group in grouping::diversify(groups, display_count) {
        println!("  {}", group.display_line());
    }
    println!();
}

fn clear_screen() {
    print!("\x1b[2J\x1b[1;1H");
}
