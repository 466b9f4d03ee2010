#![forbid(unsafe_code)]

//! Query layer over the transition contexts ledger.
//!
//! The client answers chain and ownership questions relative to a given
//! handler; it never mutates the ledger (mutation happens in the runtime's
//! coordinator after a decision is made here).
//!
//! # The backward walk
//!
//! [`transitions_from`](TransitionContextsStackClient::transitions_from) and
//! [`transitions_to`](TransitionContextsStackClient::transitions_to) compute
//! what must be reversed to return a handler's state to a given transition.
//! Starting at the handler's last recorded transition, the walk steps through
//! [`TransitionContextsStack::last_preceding`] toward the target id. The
//! first step is special: when the handler's last transition is chained
//! (target handler differs from source), that entry is split out as
//! `chained_transition`, reversed by collapsing the chained handler rather
//! than locally. Entries performed by other handlers encountered mid-walk are
//! skipped; they are either unrelated (and must survive the undo) or
//! descendants reached through a chained entry (and are removed by chain
//! recursion at undo time).

use std::cell::RefCell;
use std::rc::Rc;

use crate::context::RestoredTransitionContext;
use crate::id::{HandlerId, TransitionId};
use crate::stack::TransitionContextsStack;

/// The ordered set of transitions hanging off one handler, as computed by the
/// backward walk.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerTransitions {
    /// The handler's trailing chained transition, if its last recorded
    /// transition handed off to a different handler. Reversed by asking that
    /// handler to unwind itself.
    pub chained_transition: Option<RestoredTransitionContext>,
    /// Same-handler transitions to reverse locally, in chronological order.
    /// Undo consumers iterate this in reverse (nearest-first).
    pub other_transitions: Vec<RestoredTransitionContext>,
}

/// Read-only queries over a shared [`TransitionContextsStack`].
#[derive(Debug, Clone)]
pub struct TransitionContextsStackClient {
    stack: Rc<RefCell<TransitionContextsStack>>,
}

impl TransitionContextsStackClient {
    #[must_use]
    pub fn new(stack: Rc<RefCell<TransitionContextsStack>>) -> Self {
        Self { stack }
    }

    /// The record for `transition_id`, but only if `handler` performed it.
    #[must_use]
    pub fn transition_with(
        &self,
        transition_id: &TransitionId,
        handler: HandlerId,
    ) -> Option<RestoredTransitionContext> {
        self.stack
            .borrow()
            .lookup(transition_id)
            .filter(|restored| restored.was_performed_by(handler))
            .cloned()
    }

    /// The ledger's last entry recorded for `handler` (the latest entry whose
    /// source is `handler`). Determines whether the handler's most recent
    /// visible screen belongs to itself or to a chained descendant.
    #[must_use]
    pub fn last_transition(&self, handler: HandlerId) -> Option<RestoredTransitionContext> {
        self.stack
            .borrow()
            .iter()
            .rev()
            .find(|entry| entry.was_performed_by(handler))
            .cloned()
    }

    /// The ledger's first entry recorded for `handler`; the transition a full
    /// unwind rolls back through.
    #[must_use]
    pub fn first_transition(&self, handler: HandlerId) -> Option<RestoredTransitionContext> {
        self.stack
            .borrow()
            .iter()
            .find(|entry| entry.was_performed_by(handler))
            .cloned()
    }

    /// The handler's last transition, if it is chained.
    #[must_use]
    pub fn chained_transition(&self, handler: HandlerId) -> Option<RestoredTransitionContext> {
        self.last_transition(handler)
            .filter(RestoredTransitionContext::is_chained)
    }

    /// The child handler currently owning `handler`'s visible screen, if any.
    #[must_use]
    pub fn chained_transitions_handler(&self, handler: HandlerId) -> Option<HandlerId> {
        self.chained_transition(handler)
            .map(|chained| chained.target_transitions_handler)
    }

    /// Transitions to reverse to return `handler` to the state just *after*
    /// `transition_id`. The matching entry itself is excluded.
    ///
    /// Returns `None` when the handler has no recorded transitions.
    ///
    /// # Panics
    ///
    /// Panics if `transition_id` was not recorded for `handler`; callers are
    /// expected to check [`transition_with`](Self::transition_with) first.
    #[must_use]
    pub fn transitions_from(
        &self,
        transition_id: &TransitionId,
        handler: HandlerId,
    ) -> Option<HandlerTransitions> {
        self.transitions_relative(transition_id, handler, false)
    }

    /// Like [`transitions_from`](Self::transitions_from), but the matching
    /// entry is included among `other_transitions`, so the handler returns to
    /// the state *before* `transition_id`.
    ///
    /// # Panics
    ///
    /// Panics if `transition_id` was not recorded for `handler`.
    #[must_use]
    pub fn transitions_to(
        &self,
        transition_id: &TransitionId,
        handler: HandlerId,
    ) -> Option<HandlerTransitions> {
        self.transitions_relative(transition_id, handler, true)
    }

    fn transitions_relative(
        &self,
        transition_id: &TransitionId,
        handler: HandlerId,
        including_transition_to: bool,
    ) -> Option<HandlerTransitions> {
        assert!(
            self.transition_with(transition_id, handler).is_some(),
            "transition {transition_id} was not recorded for handler {}; \
             check transition_with before asking for an unwind range",
            handler.raw(),
        );

        let last = self.last_transition(handler)?;

        let mut chained_transition = None;
        let mut other_transitions = Vec::new();

        let stack = self.stack.borrow();
        let mut cursor = if last.is_chained() {
            chained_transition = Some(last.clone());
            if last.transition_id == *transition_id {
                // The target is the chained transition itself; nothing to
                // reverse locally.
                None
            } else {
                stack.last_preceding(&last.transition_id).cloned()
            }
        } else {
            Some(last)
        };

        while let Some(entry) = cursor {
            if entry.transition_id == *transition_id {
                if including_transition_to {
                    other_transitions.insert(0, entry);
                }
                break;
            }
            if entry.was_performed_by(handler) {
                other_transitions.insert(0, entry.clone());
            }
            cursor = stack.last_preceding(&entry.transition_id).cloned();
        }

        Some(HandlerTransitions {
            chained_transition,
            other_transitions,
        })
    }
}
