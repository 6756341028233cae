//! Logging setup for the roster binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the client. The CLI calls [`init_logging`] once at startup.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    #[default]
    Quiet,
    /// Warnings and one line per request.
    Normal,
    /// Storage-level detail.
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: u8) -> Self {
        match verbose {
            0 => Verbosity::Quiet,
            1 => Verbosity::Normal,
            _ => Verbosity::Verbose,
        }
    }

    pub fn to_level(&self) -> Level {
        match self {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::INFO,
            Verbosity::Verbose => Level::DEBUG,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbosity`.
/// Output goes to stderr so command output on stdout stays parseable.
pub fn init_logging(verbosity: Verbosity) {
    let default_filter = format!("roster={}", verbosity.to_level());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time(),
    );

    // Already installed (e.g. a second call in tests) is fine.
    let _ = subscriber.try_init();
}
