//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log targets of this workspace; everything else stays at `warn`
const TARGETS: [&str; 2] = ["vibrance", "vibrance_http_client"];

/// Default filter directive for a verbosity level
pub fn default_directive(verbose: u8, quiet: bool) -> String {
    let level = match (quiet, verbose) {
        (true, _) => return "error".to_string(),
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };

    std::iter::once("warn".to_string())
        .chain(TARGETS.iter().map(|target| format!("{}={}", target, level)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install a stderr subscriber; `RUST_LOG` overrides the verbosity flags
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
