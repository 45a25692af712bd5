//! Purchase event identifiers.
//!
//! An [`EventId`] is minted once per completed purchase and travels with the
//! analytics record so downstream consumers can drop repeated submissions.
//! Ids come from an [`EventIdGenerator`]; the default [`RandomEventIds`] draws
//! a random 128-bit UUIDv4, which is practically unique but not guaranteed.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix shared by every generated event id.
pub const EVENT_ID_PREFIX: &str = "evt_";

/// An opaque purchase event token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Wrap an existing token, e.g. one read back from storage.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Build an id from a UUID as `evt_<32 hex digits>`.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(format!("{EVENT_ID_PREFIX}{}", uuid.simple()))
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Source of fresh event ids.
pub trait EventIdGenerator {
    /// Produce a new id. Implementations should never return an empty token.
    fn next_id(&mut self) -> EventId;
}

/// Random UUIDv4-backed generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomEventIds;

impl EventIdGenerator for RandomEventIds {
    fn next_id(&mut self) -> EventId {
        EventId::from_uuid(Uuid::new_v4())
    }
}

/// Deterministic generator yielding `evt_<prefix>_1`, `evt_<prefix>_2`, ...
///
/// Meant for tests and replays where ids must be predictable.
#[derive(Debug, Clone)]
pub struct SequentialEventIds {
    prefix: String,
    next: u64,
}

impl SequentialEventIds {
    /// Start a sequence at 1.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl EventIdGenerator for SequentialEventIds {
    fn next_id(&mut self) -> EventId {
        let id = EventId(format!("{EVENT_ID_PREFIX}{}_{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

impl<G: EventIdGenerator + ?Sized> EventIdGenerator for Box<G> {
    fn next_id(&mut self) -> EventId {
        (**self).next_id()
    }
}
