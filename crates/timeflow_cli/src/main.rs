//! CLI smoke entry point.
//!
//! # Responsibility
//! - Build an `AppContext` from an optional JSON config file.
//! - Print the current dashboard snapshot as JSON for quick local checks.
//!
//! Usage: `timeflow_cli [config.json]`

use chrono::Utc;
use log::error;
use std::process::ExitCode;
use timeflow_core::{
    core_version, init_logging_from_config, open_db, open_db_in_memory, AppContext, CoreConfig,
    SqliteLocalStorage,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_run module=cli status=error");
            eprintln!("timeflow_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|err| format!("cannot read config `{path}`: {err}"))?;
            CoreConfig::from_json(&raw).map_err(|err| format!("invalid config `{path}`: {err}"))?
        }
        None => CoreConfig::default(),
    };

    init_logging_from_config(&config).map_err(|err| err.to_string())?;

    let conn = match &config.storage_path {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    }
    .map_err(|err| err.to_string())?;

    let context = AppContext::new(config, SqliteLocalStorage::new(&conn))
        .map_err(|err| err.to_string())?;
    let snapshot = context.dashboard(Utc::now());
    let rendered = serde_json::to_string_pretty(&snapshot).map_err(|err| err.to_string())?;

    println!("timeflow_core version={}", core_version());
    println!("{rendered}");
    Ok(())
}
