//! Shared tracing configuration for the weft workspace.
//!
//! Binaries, integration tests, and benches all install their `tracing`
//! subscriber through this crate so that filter directives and formatting
//! stay consistent instead of being copy-pasted per executable.
//!
//! ## Environment variables
//!
//! - `WEFT_TRACING_PROFILE`: `local` (default) or `ci`
//! - `WEFT_LOG`: filter directives, e.g. `weft_core=debug,info`; falls back
//!   to `RUST_LOG` and finally to the profile's default directive

use std::env;

use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use tracing::{debug, error, info, trace, warn};

/// Formatter flavor for the installed subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracingOutput {
    /// Multi-line human-readable output for local development.
    Pretty,
    /// Single-line output for CI logs and log collectors.
    Compact,
}

/// Describes how the shared tracing subscriber should behave.
#[derive(Clone, Debug)]
pub struct TracingConfig {
    /// Filter directives (e.g. `weft_core=debug,info`). When absent the
    /// crate falls back to `RUST_LOG` and finally to
    /// [`default_directive`](Self::default_directive).
    pub directives: Option<String>,
    /// Directive used when neither [`directives`](Self::directives) nor
    /// `RUST_LOG` resolve to a valid filter.
    pub default_directive: String,
    /// Whether event targets (module paths) appear in output.
    pub include_targets: bool,
    /// ANSI colour codes. Disable for CI logs that strip them.
    pub ansi: bool,
    /// Span lifecycle events to emit.
    pub span_events: FmtSpan,
    /// Formatter flavor.
    pub output: TracingOutput,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::for_local()
    }
}

impl TracingConfig {
    /// Configuration tuned for local development.
    pub fn for_local() -> Self {
        Self {
            directives: None,
            default_directive: "info".to_string(),
            include_targets: true,
            ansi: true,
            span_events: FmtSpan::NONE,
            output: TracingOutput::Pretty,
        }
    }

    /// Configuration tuned for CI and log collection environments.
    pub fn for_ci() -> Self {
        Self {
            directives: None,
            default_directive: "info".to_string(),
            include_targets: true,
            ansi: false,
            span_events: FmtSpan::NONE,
            output: TracingOutput::Compact,
        }
    }

    /// Builds a configuration from `WEFT_TRACING_PROFILE` / `WEFT_LOG`.
    pub fn from_env() -> Self {
        let mut config = match env::var("WEFT_TRACING_PROFILE").ok().as_deref() {
            Some("ci") => Self::for_ci(),
            _ => Self::for_local(),
        };
        if let Ok(directives) = env::var("WEFT_LOG") {
            if !directives.trim().is_empty() {
                config.directives = Some(directives);
            }
        }
        config
    }

    fn env_filter(&self) -> EnvFilter {
        if let Some(directives) = &self.directives {
            return EnvFilter::try_new(directives)
                .unwrap_or_else(|_| EnvFilter::new(&self.default_directive));
        }
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.default_directive))
    }

    /// Installs the described subscriber as the global default.
    ///
    /// Fails if another global subscriber has already been installed.
    pub fn init_global(&self) -> Result<(), TracingSetupError> {
        let filter = self.env_filter();
        let layer = fmt::layer()
            .with_target(self.include_targets)
            .with_ansi(self.ansi)
            .with_span_events(self.span_events.clone());
        let registry = tracing_subscriber::registry().with(filter);
        let result = match self.output {
            TracingOutput::Pretty => registry.with(layer.pretty()).try_init(),
            TracingOutput::Compact => registry.with(layer.compact()).try_init(),
        };
        result.map_err(|source| TracingSetupError::Init {
            message: source.to_string(),
        })
    }
}

/// Best-effort initialization for tests; repeated calls are no-ops.
pub fn init_for_tests() {
    let _ = TracingConfig::from_env().init_global();
}

/// Errors raised while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TracingSetupError {
    #[error("failed to install global tracing subscriber: {message}")]
    Init { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_presets() {
        let local = TracingConfig::for_local();
        assert!(local.ansi);
        assert_eq!(local.output, TracingOutput::Pretty);

        let ci = TracingConfig::for_ci();
        assert!(!ci.ansi);
        assert_eq!(ci.output, TracingOutput::Compact);
    }

    #[test]
    fn test_explicit_directives_win() {
        let mut config = TracingConfig::for_local();
        config.directives = Some("weft_core=trace".to_string());
        // Invalid directives fall back instead of erroring.
        let _ = config.env_filter();
        config.directives = Some("===".to_string());
        let _ = config.env_filter();
    }
}
