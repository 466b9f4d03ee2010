#![forbid(unsafe_code)]

//! Identity types: transition ids, the injectable id generator, and handler ids.
//!
//! A [`TransitionId`] is the sole correlation key between a transition request
//! and its ledger entry. It is generated exactly once per transition and never
//! reused within a process lifetime. [`HandlerId`] identifies a transitions
//! handler in the runtime's registry; ledger records store handler ids rather
//! than handler references so the ledger never extends a handler's lifetime.

use std::cell::Cell;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque unique token identifying one completed (or in-flight) transition.
///
/// Ids are issued by a [`TransitionIdGenerator`] and are immutable afterwards.
/// There is no public constructor from raw data; tests that need fixed ids use
/// [`TransitionId::from_raw`] behind the `test-helpers` feature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionId(String);

impl TransitionId {
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of unique transition ids.
///
/// Injectable (constructor-supplied) rather than ambient, so tests can
/// substitute deterministic sequences. Implementations must never return a
/// value they previously issued.
pub trait TransitionIdGenerator {
    fn generate_new_transition_id(&self) -> TransitionId;
}

/// Monotonic counter serialized to string. The default generator.
#[derive(Debug, Default)]
pub struct SequentialTransitionIdGenerator {
    next: Cell<u64>,
}

impl SequentialTransitionIdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransitionIdGenerator for SequentialTransitionIdGenerator {
    fn generate_new_transition_id(&self) -> TransitionId {
        let raw = self.next.get();
        self.next.set(raw + 1);
        TransitionId(raw.to_string())
    }
}

/// Non-owning identity handle for a transitions handler.
///
/// Assigned by the runtime's handler registry. Records in the ledger refer to
/// handlers exclusively through these ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Create a handler id from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}
