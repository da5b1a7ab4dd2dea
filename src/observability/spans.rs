//! Structured span definitions for tracing.

use std::time::Instant;

use tracing::{Level, Span, field, span};

/// Subscriber configuration used by `init_tracing`.
#[derive(Clone, Debug)]
pub struct TracingConfig {
    pub level: TracingLevel,
    /// Directive string in `EnvFilter` syntax; overrides `level` when set.
    pub filter: Option<String>,
    pub with_target: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TracingLevel {
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl TracingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: TracingLevel::Info,
            filter: None,
            with_target: true,
        }
    }
}

impl TracingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    pub fn filter(mut self, directives: impl Into<String>) -> Self {
        self.filter = Some(directives.into());
        self
    }

    pub fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }

    /// Directive handed to `EnvFilter` when `RUST_LOG` is unset.
    pub fn directives(&self) -> String {
        self.filter
            .clone()
            .unwrap_or_else(|| format!("ai_tools_hub={}", self.level.as_str()))
    }
}

/// Installs a global `fmt` subscriber. `RUST_LOG` takes precedence over the
/// configured directives. Returns `false` if a subscriber was already set.
#[cfg(feature = "tracing-init")]
pub fn init_tracing(config: &TracingConfig) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.directives()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .try_init()
        .is_ok()
}

/// Span around a single REST call; records status and latency on finish.
pub struct RequestSpan {
    span: Span,
    start: Instant,
}

impl RequestSpan {
    pub fn new(method: &str, path: &str) -> Self {
        let span = span!(
            Level::DEBUG,
            "hub.request",
            method = method,
            path = path,
            status = field::Empty,
            latency_ms = field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
        }
    }

    pub fn record_status(&self, status: u16) {
        self.span.record("status", status);
    }

    pub fn finish(self) -> u64 {
        let latency_ms = self.start.elapsed().as_millis() as u64;
        self.span.record("latency_ms", latency_ms);
        latency_ms
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}
