#![forbid(unsafe_code)]

//! One-stop assembly of a Switchback navigation system.
//!
//! The facade wires the id generator, the shared transition ledger, the
//! handler registry, and the coordinator, then mints coordinated handlers
//! for the application's navigation containers. Configuration is constructor
//! injection; there is nothing else to configure.

use std::rc::Rc;

use switchback_core::{SequentialTransitionIdGenerator, TransitionIdGenerator};

use crate::coordinator::TransitionsCoordinator;
use crate::handler::CoordinatedTransitionsHandler;
use crate::performer::TransitionsPerformer;

/// An assembled navigation system.
#[derive(Debug)]
pub struct Switchback {
    coordinator: Rc<TransitionsCoordinator>,
}

impl Switchback {
    /// Assemble with the default sequential id generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_transition_id_generator(Box::new(SequentialTransitionIdGenerator::new()))
    }

    /// Assemble with an injected id generator (deterministic in tests).
    #[must_use]
    pub fn with_transition_id_generator(id_generator: Box<dyn TransitionIdGenerator>) -> Self {
        Self {
            coordinator: Rc::new(TransitionsCoordinator::new(id_generator)),
        }
    }

    #[must_use]
    pub fn coordinator(&self) -> &Rc<TransitionsCoordinator> {
        &self.coordinator
    }

    /// Register `performer` and wrap its new handler id in a coordinated
    /// transitions handler for routers to hold.
    #[must_use]
    pub fn handler_for(
        &self,
        performer: Rc<dyn TransitionsPerformer>,
    ) -> Rc<CoordinatedTransitionsHandler> {
        let handler_id = self.coordinator.register_performer(performer);
        Rc::new(CoordinatedTransitionsHandler::new(
            Rc::clone(&self.coordinator),
            handler_id,
        ))
    }
}

impl Default for Switchback {
    fn default() -> Self {
        Self::new()
    }
}
