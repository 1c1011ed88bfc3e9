//! Setup and initialization functions for CLI

/// Map `-v` occurrences to a default log filter
pub fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize env_logger once; `RUST_LOG` takes precedence over `-v`
pub fn init_logging(verbose: u8) {
    let env = env_logger::Env::default().default_filter_or(default_log_filter(verbose));
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        // Already initialized - this is fine, just ignore
        log::debug!("Logger already initialized: {}", e);
    }
}
