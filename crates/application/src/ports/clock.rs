//! Clock port for time-dependent behavior

use chrono::{DateTime, Utc};

/// Port for reading the current time.
///
/// Injected wherever expiry decisions are made so tests can drive a
/// manual clock instead of waiting out real TTLs.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
