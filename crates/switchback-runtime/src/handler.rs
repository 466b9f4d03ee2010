#![forbid(unsafe_code)]

//! The transitions handler capability and its coordinator-backed
//! implementation.
//!
//! [`TransitionsHandler`] is what routers program against. Every operation
//! has a safe no-op default so a conforming handler opts into only the subset
//! it needs; a container that can present but never unwinds simply leaves the
//! undo methods alone.

use std::rc::Rc;

use switchback_core::{ForwardTransitionContext, HandlerId, TransitionId, TransitionsAnimator};

use crate::coordinator::TransitionsCoordinator;
use crate::seed::{DeriveScreen, RouterSeed};

/// Builds a forward transition context once the transition id has been
/// generated. The id is handed to the builder so the router can thread it
/// into the next module's seed.
pub type TransitionContextBuilder<'a> =
    Box<dyn FnOnce(TransitionId) -> ForwardTransitionContext + 'a>;

/// The capability routers invoke to perform and undo transitions.
///
/// Handlers own a visible navigation stack (or delegate to something that
/// does). All methods default to no-ops.
pub trait TransitionsHandler {
    /// Perform a transition to another module. `build` receives the freshly
    /// generated transition id and returns the transition's description.
    fn perform_transition(&self, build: TransitionContextBuilder<'_>) {
        let _ = build;
    }

    /// Unwind every transition performed after the given id, keeping the
    /// screen at that id on top.
    fn undo_transition_from(&self, transition_id: &TransitionId) {
        let _ = transition_id;
    }

    /// Unwind the given id and everything after it; the screen returns to the
    /// state before that transition.
    fn undo_transition_to(&self, transition_id: &TransitionId) {
        let _ = transition_id;
    }

    /// Collapse every descendant handler chain, leaving this handler's own
    /// screens untouched.
    fn undo_all_chained_transitions(&self) {}

    /// Collapse descendant chains and unwind this handler back to its root
    /// screen.
    fn undo_all_transitions(&self) {}

    /// Replace this handler's visible stack with a single new root screen.
    /// Earlier ledger records are kept; the replacement is itself recorded.
    fn reset_with_transition(&self, build: TransitionContextBuilder<'_>) {
        let _ = build;
    }
}

/// A transitions handler backed by a [`TransitionsCoordinator`].
///
/// One per navigation container; holds nothing but the coordinator and its
/// registered handler id, so it is cheap to hand to routers.
pub struct CoordinatedTransitionsHandler {
    coordinator: Rc<TransitionsCoordinator>,
    handler_id: HandlerId,
}

impl CoordinatedTransitionsHandler {
    #[must_use]
    pub fn new(coordinator: Rc<TransitionsCoordinator>, handler_id: HandlerId) -> Self {
        Self {
            coordinator,
            handler_id,
        }
    }

    #[must_use]
    pub fn handler_id(&self) -> HandlerId {
        self.handler_id
    }

    #[must_use]
    pub fn coordinator(&self) -> &Rc<TransitionsCoordinator> {
        &self.coordinator
    }

    /// Push the screen produced by `derive` within this handler's own stack.
    /// The factory receives a seed naming this handler and the generated id.
    pub fn push_screen(
        this: &Rc<Self>,
        derive: DeriveScreen<'_>,
        animator: Rc<dyn TransitionsAnimator>,
    ) {
        this.perform_transition(Box::new(|transition_id| {
            let seed = RouterSeed {
                transition_id,
                transitions_handler: Rc::clone(this) as Rc<dyn TransitionsHandler>,
                storable_parameters: None,
            };
            ForwardTransitionContext::push(derive(seed), animator)
        }));
    }

    /// Replace this handler's root with the screen produced by `derive`.
    pub fn set_root_screen(
        this: &Rc<Self>,
        derive: DeriveScreen<'_>,
        animator: Rc<dyn TransitionsAnimator>,
    ) {
        this.reset_with_transition(Box::new(|transition_id| {
            let seed = RouterSeed {
                transition_id,
                transitions_handler: Rc::clone(this) as Rc<dyn TransitionsHandler>,
                storable_parameters: None,
            };
            ForwardTransitionContext::resetting_navigation_root(derive(seed), animator)
        }));
    }
}

impl TransitionsHandler for CoordinatedTransitionsHandler {
    fn perform_transition(&self, build: TransitionContextBuilder<'_>) {
        self.coordinator.perform_transition(self.handler_id, build);
    }

    fn undo_transition_from(&self, transition_id: &TransitionId) {
        self.coordinator
            .undo_transitions_from(self.handler_id, transition_id);
    }

    fn undo_transition_to(&self, transition_id: &TransitionId) {
        self.coordinator
            .undo_transitions_to(self.handler_id, transition_id);
    }

    fn undo_all_chained_transitions(&self) {
        self.coordinator.undo_all_chained_transitions(self.handler_id);
    }

    fn undo_all_transitions(&self) {
        self.coordinator.undo_all_transitions(self.handler_id);
    }

    fn reset_with_transition(&self, build: TransitionContextBuilder<'_>) {
        self.coordinator
            .reset_with_transition(self.handler_id, build);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A handler that opts into nothing.
    struct InertHandler;

    impl TransitionsHandler for InertHandler {}

    #[test]
    fn every_operation_defaults_to_a_no_op() {
        use switchback_core::testing::{transition_id, FakeScreen, NoOpAnimator};

        let handler = InertHandler;
        handler.perform_transition(Box::new(|_| {
            ForwardTransitionContext::push(
                Rc::new(FakeScreen::named("unused")),
                Rc::new(NoOpAnimator),
            )
        }));
        handler.undo_transition_from(&transition_id("t"));
        handler.undo_transition_to(&transition_id("t"));
        handler.undo_all_chained_transitions();
        handler.undo_all_transitions();
        handler.reset_with_transition(Box::new(|_| {
            ForwardTransitionContext::resetting_navigation_root(
                Rc::new(FakeScreen::named("unused")),
                Rc::new(NoOpAnimator),
            )
        }));
    }
}
