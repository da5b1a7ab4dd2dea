//! Tracing spans for outgoing requests and optional subscriber setup.
//!
//! The library only emits `tracing` events. Applications install their own
//! subscriber, or enable the `tracing-init` feature and call
//! [`init_tracing`]:
//!
//! ```toml
//! ai-tools-hub = { version = "0.1", features = ["tracing-init"] }
//! ```

mod spans;

pub use spans::{RequestSpan, TracingConfig, TracingLevel};

#[cfg(feature = "tracing-init")]
pub use spans::init_tracing;
