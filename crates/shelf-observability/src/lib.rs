//! Observability infrastructure for the Shelf browsing engine.
//!
//! This crate provides:
//! - `SessionId` - Correlation id for one browsing session
//! - `StructuredLogger` - Session and page-scope spans for `tracing` events
//! - `init_tracing` - Subscriber setup for binaries

mod logging;
mod subscriber;

pub use logging::*;
pub use subscriber::*;
