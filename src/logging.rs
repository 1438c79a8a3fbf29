//! Tracing subscriber setup
//!
//! Logs go to stderr so JSON output on stdout stays clean. `RUST_LOG`
//! overrides the level derived from the verbosity flags.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Verbosity;

/// Default filter directive for a verbosity level
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "laptopdoc=error",
        Verbosity::Normal => "laptopdoc=warn",
        Verbosity::Verbose => "laptopdoc=info",
        Verbosity::VeryVerbose => "laptopdoc=debug",
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbosity: Verbosity, color: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(color)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_parse() {
        for verbosity in [
            Verbosity::Quiet,
            Verbosity::Normal,
            Verbosity::Verbose,
            Verbosity::VeryVerbose,
        ] {
            assert!(EnvFilter::try_new(default_directive(verbosity)).is_ok());
        }
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(Verbosity::Quiet, false);
        init(Verbosity::Verbose, false);
    }
}
