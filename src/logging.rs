//! Logger setup for the CLI.
//!
//! Diagnostics go to stderr through `env_logger`; stdout is reserved for
//! command output (including `--json`). `RUST_LOG` wins over `-v` flags.

use log::LevelFilter;

/// Level for a `-v` count: 0 → warn, 1 → info, 2+ → debug
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Install the global logger. Safe to call more than once.
pub fn init(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(verbosity));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    let _ = builder.format_timestamp(None).try_init();
}
