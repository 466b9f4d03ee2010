#![forbid(unsafe_code)]

//! Switchback Runtime
//!
//! This crate ties the bookkeeping core into a running navigation system: the
//! [`TransitionsHandler`] capability routers invoke, the
//! [`TransitionsCoordinator`] that executes and records transitions in the
//! shared ledger, and the registry of live handler performers.
//!
//! # Key Components
//!
//! - [`TransitionsHandler`] - polymorphic capability with safe no-op defaults
//! - [`CoordinatedTransitionsHandler`] - the provided implementation, one per
//!   navigation container
//! - [`TransitionsPerformer`] - the visual seam GUI glue implements
//! - [`TransitionsCoordinator`] - single writer of the transition ledger
//! - [`Switchback`] - facade wiring generator, ledger, registry, coordinator
//!
//! # Role in Switchback
//!
//! `switchback-runtime` is the orchestrator. Routers hand it forward
//! transition contexts; it generates ids, lets the registered performer run
//! the visual transition, commits the record, and later computes and executes
//! unwind plans, recursively collapsing chained handlers.
//!
//! # Threading
//!
//! Single-threaded by design: every operation runs on the host's control
//! thread. Calls on one handler never overlap; re-entrancy happens only
//! through chain recursion, and no ledger borrow is held across a performer
//! call.

pub mod coordinator;
pub mod facade;
pub mod handler;
pub mod performer;
pub mod registry;
pub mod seed;

pub use coordinator::TransitionsCoordinator;
pub use facade::Switchback;
pub use handler::{CoordinatedTransitionsHandler, TransitionContextBuilder, TransitionsHandler};
pub use performer::TransitionsPerformer;
pub use registry::TransitionsHandlersRegistry;
pub use seed::{DeriveScreen, RouterSeed};

pub use switchback_core::{
    CompletedTransitionContext, ForwardTransitionContext, HandlerId, HandlerTransitions,
    LaunchingContext, LaunchingStyle, RestoredTransitionContext, Screen,
    SequentialTransitionIdGenerator, StorableParameters, TargetTransitionsHandlerBox,
    TransitionContextsStack, TransitionContextsStackClient, TransitionId, TransitionIdGenerator,
    TransitionsAnimator,
};
