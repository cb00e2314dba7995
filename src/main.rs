mod auth;
mod config;
mod logging;
mod models;
mod report;
mod run;
mod store;
mod transfer;
mod ui;

use anyhow::Result;
use tracing::info;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    let _log_guard = logging::init(&config.data_dir)?;
    info!(version = env!("CARGO_PKG_VERSION"), data_dir = %config.data_dir.display(), "starting");

    let mut store = store::Store::open(&config.db_path())?;

    match args.len() {
        0 | 1 => run::as_tui(&mut store, &config),
        _ => run::as_cli(&args, &mut store, &config),
    }
}
