#![warn(missing_docs)]

//! Tracing setup shared by the tether crates.
//!
//! The placement library only emits `tracing` events; this crate decides how
//! they are filtered and rendered:
//! - [`LogArgs`] is flattened into the `tether-probe` command line and turns
//!   `--trace`, `--debug`, `--log-level` and `--log-filter` into an
//!   [`EnvFilter`] directive scoped to the workspace's own targets.
//! - [`fmt`] renders an event as its message followed by `key=value` fields.
//! - [`capture`] keeps rendered events in memory so tests can assert on the
//!   warnings emitted for degraded anchor and flip-hint input.

use std::env;

use clap::Args;
use tracing_subscriber::EnvFilter;

pub mod capture;
pub mod fmt;

/// Tracing targets of the workspace. Level flags only raise these, so
/// dependencies stay quiet.
pub const TARGETS: &[&str] = &["tether", "tether_probe", "logging"];

/// Level used when no flag is given and `RUST_LOG` is unset. Placement
/// failures and degraded input are logged at `warn`.
const DEFAULT_LEVEL: &str = "warn";

/// Log filtering flags for the probe CLI.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Log every solver step (tether targets only)
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Log placement summaries (tether targets only)
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Level for the tether targets (error|warn|info|debug|trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Raw filter directive, used as given,
    /// e.g. "tether::solve=trace,tether::rules=debug"
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// Filter directive for these flags.
    ///
    /// An explicit `--log-filter` wins, then `--trace`, `--debug` and
    /// `--log-level`, then `RUST_LOG`; otherwise the workspace targets log
    /// at `warn`.
    pub fn spec(&self) -> String {
        self.spec_with_env(env::var("RUST_LOG").ok())
    }

    /// [`LogArgs::spec`] with the `RUST_LOG` value supplied by the caller.
    fn spec_with_env(&self, rust_log: Option<String>) -> String {
        if let Some(filter) = &self.log_filter {
            return filter.clone();
        }
        let level = if self.trace {
            Some("trace")
        } else if self.debug {
            Some("debug")
        } else {
            self.log_level.as_deref()
        };
        match (level, rust_log) {
            (Some(level), _) => scoped_spec(level),
            (None, Some(env)) => env,
            (None, None) => scoped_spec(DEFAULT_LEVEL),
        }
    }
}

/// Directive setting `level` on every entry of [`TARGETS`].
pub fn scoped_spec(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the subscriber filter for a directive produced by [`LogArgs::spec`].
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_spec_covers_every_target() {
        assert_eq!(
            scoped_spec("DEBUG"),
            "tether=debug,tether_probe=debug,logging=debug"
        );
    }

    #[test]
    fn explicit_filter_wins() {
        let args = LogArgs {
            trace: true,
            log_level: Some("info".into()),
            log_filter: Some("tether::solve=trace".into()),
            ..LogArgs::default()
        };
        assert_eq!(
            args.spec_with_env(Some("off".into())),
            "tether::solve=trace"
        );
    }

    #[test]
    fn level_flags_beat_rust_log() {
        let env = || Some("tether=error".to_string());
        let trace = LogArgs {
            trace: true,
            ..LogArgs::default()
        };
        assert_eq!(trace.spec_with_env(env()), scoped_spec("trace"));
        let debug = LogArgs {
            debug: true,
            ..LogArgs::default()
        };
        assert_eq!(debug.spec_with_env(env()), scoped_spec("debug"));
        let level = LogArgs {
            log_level: Some("Info".into()),
            ..LogArgs::default()
        };
        assert_eq!(level.spec_with_env(env()), scoped_spec("info"));
    }

    #[test]
    fn rust_log_then_warn() {
        let args = LogArgs::default();
        assert_eq!(args.spec_with_env(Some("tether=info".into())), "tether=info");
        assert_eq!(args.spec_with_env(None), scoped_spec("warn"));
    }
}
