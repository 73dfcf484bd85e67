//! Logging setup.
//!
//! `RUST_LOG` wins when set; otherwise the filter follows `--debug` and
//! `--quiet`. Everything goes to stderr so stdout stays machine-readable.

use std::io::IsTerminal;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logging(debug: bool, quiet: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(debug, quiet)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(debug)
        .with_ansi(std::io::stderr().is_terminal());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

fn default_filter(debug: bool, quiet: bool) -> &'static str {
    if debug {
        "trello_cli=debug"
    } else if quiet {
        "error"
    } else {
        "trello_cli=warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_beats_quiet() {
        assert_eq!(default_filter(true, true), "trello_cli=debug");
        assert_eq!(default_filter(false, true), "error");
        assert_eq!(default_filter(false, false), "trello_cli=warn");
    }
}
