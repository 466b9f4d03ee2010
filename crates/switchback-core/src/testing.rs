#![forbid(unsafe_code)]

//! Fixtures for exercising the bookkeeping core in tests.
//!
//! Available to downstream crates behind the `test-helpers` feature. These
//! are deliberately dumb: fake screens with a name, animators that do
//! nothing, an id generator that replays a fixed sequence, and canned
//! completed contexts for the three launching styles.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::context::{
    CompletedTransitionContext, ForwardTransitionContext, Screen, TargetTransitionsHandlerBox,
    TransitionsAnimator,
};
use crate::id::{HandlerId, TransitionId, TransitionIdGenerator};
use crate::stack::TransitionContextsStack;

/// A screen that is only a name.
#[derive(Debug)]
pub struct FakeScreen {
    pub name: String,
}

impl FakeScreen {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Screen for FakeScreen {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An animator that animates nothing.
#[derive(Debug)]
pub struct NoOpAnimator;

impl TransitionsAnimator for NoOpAnimator {
    fn animate_performing(&self, _screen: &dyn Screen) {}

    fn animate_undoing(&self, _screen: &dyn Screen) {}
}

/// Replays a pre-seeded id sequence, then panics when exhausted.
#[derive(Debug)]
pub struct FixedTransitionIdGenerator {
    ids: RefCell<Vec<TransitionId>>,
    issued: Cell<usize>,
}

impl FixedTransitionIdGenerator {
    #[must_use]
    pub fn new(raw_ids: impl IntoIterator<Item = &'static str>) -> Self {
        let mut ids: Vec<TransitionId> = raw_ids.into_iter().map(TransitionId::from_raw).collect();
        ids.reverse();
        Self {
            ids: RefCell::new(ids),
            issued: Cell::new(0),
        }
    }

    /// How many ids have been handed out so far.
    #[must_use]
    pub fn issued(&self) -> usize {
        self.issued.get()
    }
}

impl TransitionIdGenerator for FixedTransitionIdGenerator {
    fn generate_new_transition_id(&self) -> TransitionId {
        let id = self
            .ids
            .borrow_mut()
            .pop()
            .expect("FixedTransitionIdGenerator ran out of seeded ids");
        self.issued.set(self.issued.get() + 1);
        id
    }
}

/// Shorthand for a fixed transition id.
#[must_use]
pub fn transition_id(raw: &str) -> TransitionId {
    TransitionId::from_raw(raw)
}

/// A completed push transition within `handler`'s own stack.
#[must_use]
pub fn completed_push_context(
    transition_id: TransitionId,
    handler: HandlerId,
) -> CompletedTransitionContext {
    let forward = ForwardTransitionContext::push(
        Rc::new(FakeScreen::named(format!("screen-{transition_id}"))),
        Rc::new(NoOpAnimator),
    );
    CompletedTransitionContext::new(transition_id, handler, forward)
}

/// A completed modal presentation chaining `source` into `target`.
#[must_use]
pub fn completed_chained_context(
    transition_id: TransitionId,
    source: HandlerId,
    target: HandlerId,
) -> CompletedTransitionContext {
    let forward = ForwardTransitionContext::present_modally(
        Rc::new(FakeScreen::named(format!("modal-{transition_id}"))),
        TargetTransitionsHandlerBox::Resolved(target),
        Rc::new(NoOpAnimator),
    );
    CompletedTransitionContext::new(transition_id, source, forward)
}

/// A completed root reset within `handler`'s own stack.
#[must_use]
pub fn completed_reset_context(
    transition_id: TransitionId,
    handler: HandlerId,
) -> CompletedTransitionContext {
    let forward = ForwardTransitionContext::resetting_navigation_root(
        Rc::new(FakeScreen::named(format!("root-{transition_id}"))),
        Rc::new(NoOpAnimator),
    );
    CompletedTransitionContext::new(transition_id, handler, forward)
}

/// A shared stack pre-populated with `contexts`, in order.
#[must_use]
pub fn shared_stack(
    contexts: Vec<CompletedTransitionContext>,
) -> Rc<RefCell<TransitionContextsStack>> {
    let mut stack = TransitionContextsStack::new();
    for context in contexts {
        stack.push(context.into());
    }
    Rc::new(RefCell::new(stack))
}
