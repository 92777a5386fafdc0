mod app;
mod cli_args;
mod domain;
mod infra;
mod util;

use clap::Parser;

use crate::cli_args::CliArgs;

fn main() {
    let args = CliArgs::parse();
    if let Err(err) = app::run(args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
