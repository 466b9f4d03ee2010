#![forbid(unsafe_code)]

//! Switchback Core
//!
//! This crate holds the bookkeeping heart of Switchback: transition ids, the
//! immutable context records that describe navigation transitions, the ordered
//! ledger they are committed to, and the query layer that answers chain and
//! ownership questions over that ledger.
//!
//! # Key Components
//!
//! - [`TransitionId`] / [`TransitionIdGenerator`] - per-transition correlation keys
//! - [`ForwardTransitionContext`] - a requested transition (screen + launching style)
//! - [`CompletedTransitionContext`] / [`RestoredTransitionContext`] - committed records
//! - [`TransitionContextsStack`] - the ordered, id-keyed transition ledger
//! - [`TransitionContextsStackClient`] - chain/ownership queries over the ledger
//!
//! # Role in Switchback
//!
//! `switchback-core` knows nothing about how screens are built or rendered.
//! It records transition *metadata* and can say, at any point, which handler
//! performed a transition, what hangs off a handler's last transition, and
//! what must be reversed to return a handler to an earlier state. Performing
//! and reversing the visual side lives in `switchback-runtime`.
//!
//! # Threading
//!
//! The whole system is single-threaded by design: every operation runs on one
//! designated control thread (the UI thread in a GUI host). Types here use
//! `Rc`/`Cell`/`RefCell`, not locks.

pub mod context;
pub mod id;
pub mod stack;
pub mod stack_client;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use context::{
    CompletedTransitionContext, ForwardTransitionContext, LaunchingContext, LaunchingStyle,
    RestoredTransitionContext, Screen, StorableParameters, TargetTransitionsHandlerBox,
    TransitionsAnimator,
};
pub use id::{HandlerId, SequentialTransitionIdGenerator, TransitionId, TransitionIdGenerator};
pub use stack::TransitionContextsStack;
pub use stack_client::{HandlerTransitions, TransitionContextsStackClient};
