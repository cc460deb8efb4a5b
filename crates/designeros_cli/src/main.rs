//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `designeros_core` linkage and storage bootstrap from a shell.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `designeros_cli [db_path] [log_dir]`

use designeros_core::{
    core_version, ping, CollectionOrigin, CoreConfig, KeyValueStore, MemoryKeyValueStore,
    QuickToolPanel, SqliteKeyValueStore,
};
use log::warn;

fn main() {
    println!("designeros_core ping={}", ping());
    println!("designeros_core version={}", core_version());

    let config = config_from_args(std::env::args().skip(1));
    if let Err(err) = config.init_logging() {
        println!("logging=unavailable error={err}");
    }

    match config.open_db() {
        Ok(conn) => report("sqlite", &QuickToolPanel::open(SqliteKeyValueStore::new(&conn))),
        Err(err) => {
            warn!("event=cli_storage module=cli status=fallback error={err}");
            println!("storage=unavailable error={err}");
            let memory = MemoryKeyValueStore::new();
            report("memory", &QuickToolPanel::open(&memory));
        }
    }
}

/// Builds the config from `[db_path] [log_dir]`; empty values are ignored.
fn config_from_args(mut args: impl Iterator<Item = String>) -> CoreConfig {
    let mut config = CoreConfig::default();
    if let Some(path) = args.next().filter(|value| !value.trim().is_empty()) {
        config = config.with_db_path(path);
    }
    if let Some(dir) = args.next().filter(|value| !value.trim().is_empty()) {
        config = config.with_log_dir(dir);
    }
    config
}

fn report<S: KeyValueStore>(backend: &str, panel: &QuickToolPanel<S>) {
    println!("storage={backend}");
    println!(
        "notes={} origin={}",
        panel.notes().len(),
        origin_label(panel.notes().origin())
    );
    println!(
        "reminders={} origin={}",
        panel.reminders().len(),
        origin_label(panel.reminders().origin())
    );
    println!(
        "invoice_number={} invoice_total={:.2}",
        panel.invoice().header.invoice_number,
        panel.invoice().totals().total
    );
}

fn origin_label(origin: CollectionOrigin) -> String {
    match origin {
        CollectionOrigin::Stored => "stored".to_string(),
        CollectionOrigin::Seeded(reason) => format!("seeded:{}", reason.as_str()),
    }
}
