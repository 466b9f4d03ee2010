#![forbid(unsafe_code)]

//! The transitions coordinator: the single writer of the transition ledger.
//!
//! Handlers delegate every operation here. On the forward path the
//! coordinator generates the transition id, lets the handler's performer run
//! the visual transition, and commits the completed record. On the undo path
//! it asks the stack client for an unwind plan, recursively collapses chained
//! handlers, reverses local transitions nearest-first, and removes exactly
//! the unwound entries.
//!
//! # Invariants
//!
//! 1. A transition either commits a record or never started: if the source
//!    handler's performer is gone, nothing is recorded.
//! 2. Bookkeeping is atomic with respect to other ledger operations: pushes
//!    and removals happen in single short borrows, never partially.
//! 3. No ledger borrow is held across a performer call, so chain recursion
//!    re-enters safely.
//! 4. Undo removes an entry only after its visual reversal ran (or was
//!    skipped because the performer is gone); unrelated handlers' entries
//!    are never touched.

use std::cell::RefCell;
use std::rc::Rc;

use switchback_core::{
    CompletedTransitionContext, HandlerId, LaunchingStyle, RestoredTransitionContext,
    TransitionContextsStack, TransitionContextsStackClient, TransitionId, TransitionIdGenerator,
};

use crate::handler::TransitionContextBuilder;
use crate::performer::TransitionsPerformer;
use crate::registry::TransitionsHandlersRegistry;

/// Mediates between transitions handlers and the shared transition ledger.
pub struct TransitionsCoordinator {
    stack: Rc<RefCell<TransitionContextsStack>>,
    stack_client: TransitionContextsStackClient,
    id_generator: Box<dyn TransitionIdGenerator>,
    registry: TransitionsHandlersRegistry,
}

impl TransitionsCoordinator {
    #[must_use]
    pub fn new(id_generator: Box<dyn TransitionIdGenerator>) -> Self {
        let stack = Rc::new(RefCell::new(TransitionContextsStack::new()));
        let stack_client = TransitionContextsStackClient::new(Rc::clone(&stack));
        Self {
            stack,
            stack_client,
            id_generator,
            registry: TransitionsHandlersRegistry::new(),
        }
    }

    /// Queries over the shared ledger, for routers that need to check a
    /// transition before asking for an undo.
    #[must_use]
    pub fn stack_client(&self) -> &TransitionContextsStackClient {
        &self.stack_client
    }

    /// Register the performer for a new handler and mint its id.
    pub fn register_performer(&self, performer: Rc<dyn TransitionsPerformer>) -> HandlerId {
        let handler_id = self.registry.register(Rc::downgrade(&performer));
        tracing::debug!(handler = handler_id.raw(), "registered transitions handler");
        handler_id
    }

    // ========================================================================
    // Forward path
    // ========================================================================

    /// Perform a push or modal presentation initiated by `source`.
    pub fn perform_transition(&self, source: HandlerId, build: TransitionContextBuilder<'_>) {
        let _span = tracing::debug_span!("perform_transition", handler = source.raw()).entered();
        let transition_id = self.id_generator.generate_new_transition_id();
        let forward = build(transition_id.clone());
        debug_assert!(
            forward.launching_context.style() != LaunchingStyle::ResettingNavigationRoot,
            "root replacement goes through reset_with_transition",
        );
        self.commit(source, transition_id, forward);
    }

    /// Replace `source`'s visible stack with a single new root screen. The
    /// replacement is recorded like any other transition; earlier records
    /// stay in the ledger.
    pub fn reset_with_transition(&self, source: HandlerId, build: TransitionContextBuilder<'_>) {
        let _span = tracing::debug_span!("reset_with_transition", handler = source.raw()).entered();
        let transition_id = self.id_generator.generate_new_transition_id();
        let forward = build(transition_id.clone());
        debug_assert!(
            forward.launching_context.style() == LaunchingStyle::ResettingNavigationRoot,
            "reset_with_transition requires a resetting launching context",
        );
        self.commit(source, transition_id, forward);
    }

    fn commit(
        &self,
        source: HandlerId,
        transition_id: TransitionId,
        forward: switchback_core::ForwardTransitionContext,
    ) {
        let completed = CompletedTransitionContext::new(transition_id, source, forward);
        let Some(performer) = self.registry.performer(source) else {
            tracing::warn!(
                handler = source.raw(),
                transition_id = %completed.transition_id,
                "dropping transition; performer is no longer alive",
            );
            return;
        };
        performer.launch_transition(&completed);
        tracing::debug!(
            transition_id = %completed.transition_id,
            source = completed.source_transitions_handler.raw(),
            target = completed.target_transitions_handler.raw(),
            style = ?completed.launching_style(),
            "committed transition",
        );
        self.stack.borrow_mut().push(completed.into());
    }

    // ========================================================================
    // Undo path
    // ========================================================================

    /// Unwind everything `handler` performed after `transition_id`,
    /// exclusive. Ignored if the id is not (or no longer) recorded for the
    /// handler.
    pub fn undo_transitions_from(&self, handler: HandlerId, transition_id: &TransitionId) {
        let _span = tracing::debug_span!(
            "undo_transitions_from",
            handler = handler.raw(),
            from = %transition_id,
        )
        .entered();
        self.undo_relative(handler, transition_id, false);
    }

    /// Unwind `transition_id` and everything `handler` performed after it.
    /// Ignored if the id is not (or no longer) recorded for the handler.
    pub fn undo_transitions_to(&self, handler: HandlerId, transition_id: &TransitionId) {
        let _span = tracing::debug_span!(
            "undo_transitions_to",
            handler = handler.raw(),
            to = %transition_id,
        )
        .entered();
        self.undo_relative(handler, transition_id, true);
    }

    /// Collapse every descendant chain hanging off `handler`, leaving its own
    /// screens untouched.
    pub fn undo_all_chained_transitions(&self, handler: HandlerId) {
        let _span =
            tracing::debug_span!("undo_all_chained_transitions", handler = handler.raw()).entered();
        while let Some(chained) = self.stack_client.chained_transition(handler) {
            self.collapse_chained(&chained);
        }
    }

    /// Collapse descendant chains and unwind `handler` back to its root
    /// screen, removing every record it performed.
    pub fn undo_all_transitions(&self, handler: HandlerId) {
        let _span = tracing::debug_span!("undo_all_transitions", handler = handler.raw()).entered();
        let Some(first) = self.stack_client.first_transition(handler) else {
            return;
        };
        let Some(plan) = self
            .stack_client
            .transitions_to(&first.transition_id, handler)
        else {
            return;
        };
        self.unwind(plan);
    }

    fn undo_relative(&self, handler: HandlerId, transition_id: &TransitionId, inclusive: bool) {
        if self
            .stack_client
            .transition_with(transition_id, handler)
            .is_none()
        {
            tracing::debug!(
                handler = handler.raw(),
                transition_id = %transition_id,
                "undo ignored; transition is not recorded for this handler",
            );
            return;
        }
        let plan = if inclusive {
            self.stack_client.transitions_to(transition_id, handler)
        } else {
            self.stack_client.transitions_from(transition_id, handler)
        };
        if let Some(plan) = plan {
            self.unwind(plan);
        }
    }

    /// Execute an unwind plan: chained tail first (it sits on top), then
    /// locals nearest-first. Mid-range chained entries collapse their target
    /// handler before being reversed, so removal cascades through every
    /// record whose chain of custody passed through an undone one.
    fn unwind(&self, plan: switchback_core::HandlerTransitions) {
        if let Some(chained) = plan.chained_transition {
            self.collapse_chained(&chained);
        }
        for context in plan.other_transitions.iter().rev() {
            if context.is_chained() {
                self.undo_all_transitions(context.target_transitions_handler);
            }
            self.reverse_and_remove(context);
        }
    }

    fn collapse_chained(&self, chained: &RestoredTransitionContext) {
        self.undo_all_transitions(chained.target_transitions_handler);
        self.reverse_and_remove(chained);
    }

    fn reverse_and_remove(&self, context: &RestoredTransitionContext) {
        match self.registry.performer(context.source_transitions_handler) {
            Some(performer) => performer.reverse_transition(context),
            None => tracing::warn!(
                handler = context.source_transitions_handler.raw(),
                transition_id = %context.transition_id,
                "performer is gone; removing record without visual reversal",
            ),
        }
        let removed = self.stack.borrow_mut().remove(&context.transition_id);
        debug_assert!(
            removed.is_some(),
            "unwind plans refer to live ledger entries",
        );
        tracing::trace!(transition_id = %context.transition_id, "removed transition record");
    }
}

impl std::fmt::Debug for TransitionsCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionsCoordinator")
            .field("recorded_transitions", &self.stack.borrow().len())
            .field("registry", &self.registry)
            .finish()
    }
}
