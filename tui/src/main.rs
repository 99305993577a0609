mod args;
mod cli;
mod settings;
#[cfg(feature = "tui")]
mod tui;

use args::Args;
use env_logger::Env;
use std::process;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse().unwrap_or_else(|e| e.exit());
    if let Err(e) = cli::run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
