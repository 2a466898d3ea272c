//! Wall-clock instant attached to remembered turns.
//!
//! Always UTC. Session memory and the transcript only ever need "when
//! did this turn happen"; arithmetic on instants lives with the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Captures the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps an already-known instant.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Exposes the underlying chrono value.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}
