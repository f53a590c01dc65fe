//! Process-wide tracing setup for binaries and integration harnesses that
//! embed the sharetab domain crates.
//!
//! The domain crates only emit through the `tracing` facade and never depend
//! on this crate; the embedding binary calls [`init`] once at startup.

/// Install the global subscriber.
///
/// Safe to call multiple times; only the first call takes effect.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filters, formatting).
pub mod tracing;
