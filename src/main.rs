mod aggregate;
mod categories;
mod config;
mod db;
mod interchange;
mod logging;
mod models;
mod run;
mod ui;
mod views;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    logging::init(&config)?;
    let mut db = db::Database::open(&config.db_path)?;

    match args.len() {
        0 | 1 => run::as_tui(&mut db),
        _ => run::as_cli(&args, &mut db),
    }
}
