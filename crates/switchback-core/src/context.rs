#![forbid(unsafe_code)]

//! Transition context types: the immutable value records describing a forward
//! transition and its committed/restored forms, plus the tagged variants the
//! undo logic branches on.
//!
//! # Lifecycle
//!
//! ```text
//! router builds                 coordinator commits          ledger stores
//! ForwardTransitionContext ──► CompletedTransitionContext ──► RestoredTransitionContext
//!   (no id, target may be        (+ id, source handler,        (read model; removed
//!    pending)                     resolved target)              when undone)
//! ```
//!
//! Screens and animators are opaque collaborators: this crate stores and
//! forwards them without inspecting behavior. Handlers are referenced by
//! [`HandlerId`] only.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::id::{HandlerId, TransitionId};

/// Opaque reference to a screen (view controller, window, widget tree...).
///
/// The bookkeeping core never looks inside a screen; `as_any` lets GUI glue
/// downcast back to its concrete type when performing or reversing the visual
/// transition.
pub trait Screen: fmt::Debug {
    fn as_any(&self) -> &dyn Any;
}

/// Opaque animator handle attached to a launching context.
///
/// Stored and forwarded by the core; only performer glue ever invokes it.
pub trait TransitionsAnimator: fmt::Debug {
    /// Animate the forward direction of a transition onto `screen`.
    fn animate_performing(&self, screen: &dyn Screen);

    /// Animate the reversal of a transition away from `screen`.
    fn animate_undoing(&self, screen: &dyn Screen);
}

/// Discriminant of a [`LaunchingContext`], for consumers that only branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaunchingStyle {
    Push,
    PresentModally,
    ResettingNavigationRoot,
}

/// How a transition is performed visually, with the animator that drives it.
///
/// Closed sum type: undo logic branches on the variant, so new styles are a
/// breaking change by design.
#[derive(Clone)]
pub enum LaunchingContext {
    /// Push onto the handler's navigation stack.
    Push { animator: Rc<dyn TransitionsAnimator> },
    /// Present over the handler's current screen, usually chaining to a new
    /// handler that owns the presented stack.
    PresentModally { animator: Rc<dyn TransitionsAnimator> },
    /// Replace the handler's navigation root with a single screen.
    ResettingNavigationRoot { animator: Rc<dyn TransitionsAnimator> },
}

impl LaunchingContext {
    #[must_use]
    pub fn style(&self) -> LaunchingStyle {
        match self {
            Self::Push { .. } => LaunchingStyle::Push,
            Self::PresentModally { .. } => LaunchingStyle::PresentModally,
            Self::ResettingNavigationRoot { .. } => LaunchingStyle::ResettingNavigationRoot,
        }
    }

    #[must_use]
    pub fn animator(&self) -> &Rc<dyn TransitionsAnimator> {
        match self {
            Self::Push { animator }
            | Self::PresentModally { animator }
            | Self::ResettingNavigationRoot { animator } => animator,
        }
    }
}

impl fmt::Debug for LaunchingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchingContext")
            .field("style", &self.style())
            .field("animator", self.animator())
            .finish()
    }
}

/// Which handler future transitions hang off once this one completes.
///
/// `Pending` resolves to the initiating handler at commit time; `Resolved`
/// names a specific other handler (the chained case).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetTransitionsHandlerBox {
    Pending,
    Resolved(HandlerId),
}

impl TargetTransitionsHandlerBox {
    /// Resolve the box against the handler that initiated the transition.
    #[must_use]
    pub fn resolve(self, source: HandlerId) -> HandlerId {
        match self {
            Self::Pending => source,
            Self::Resolved(target) => target,
        }
    }
}

/// Opaque serializable payload attached to a transition for external state
/// restoration. Carried through untouched, never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorableParameters {
    pub payload: serde_json::Value,
}

impl StorableParameters {
    #[must_use]
    pub fn new(payload: serde_json::Value) -> Self {
        Self { payload }
    }
}

/// A transition that has been requested but not yet recorded.
///
/// Built by routers (via the variant constructors below) and handed to a
/// transitions handler; the coordinator resolves it into a
/// [`CompletedTransitionContext`] at commit time.
#[derive(Debug, Clone)]
pub struct ForwardTransitionContext {
    pub target_screen: Rc<dyn Screen>,
    pub target_transitions_handler_box: TargetTransitionsHandlerBox,
    pub launching_context: LaunchingContext,
    pub storable_parameters: Option<StorableParameters>,
}

impl ForwardTransitionContext {
    /// Push `screen` within the initiating handler's own stack.
    #[must_use]
    pub fn push(screen: Rc<dyn Screen>, animator: Rc<dyn TransitionsAnimator>) -> Self {
        Self {
            target_screen: screen,
            target_transitions_handler_box: TargetTransitionsHandlerBox::Pending,
            launching_context: LaunchingContext::Push { animator },
            storable_parameters: None,
        }
    }

    /// Present `screen` modally. `target_box` names the handler that owns the
    /// presented stack; pass `Pending` when the presenter keeps ownership.
    #[must_use]
    pub fn present_modally(
        screen: Rc<dyn Screen>,
        target_box: TargetTransitionsHandlerBox,
        animator: Rc<dyn TransitionsAnimator>,
    ) -> Self {
        Self {
            target_screen: screen,
            target_transitions_handler_box: target_box,
            launching_context: LaunchingContext::PresentModally { animator },
            storable_parameters: None,
        }
    }

    /// Replace the initiating handler's navigation root with `screen`.
    #[must_use]
    pub fn resetting_navigation_root(
        screen: Rc<dyn Screen>,
        animator: Rc<dyn TransitionsAnimator>,
    ) -> Self {
        Self {
            target_screen: screen,
            target_transitions_handler_box: TargetTransitionsHandlerBox::Pending,
            launching_context: LaunchingContext::ResettingNavigationRoot { animator },
            storable_parameters: None,
        }
    }

    /// Attach a state-restoration payload.
    #[must_use]
    pub fn with_storable_parameters(mut self, parameters: StorableParameters) -> Self {
        self.storable_parameters = Some(parameters);
        self
    }
}

/// A transition the coordinator has committed: the forward context plus its
/// generated id, the handler that initiated it, and the resolved target
/// handler. Immutable once created.
#[derive(Debug, Clone)]
pub struct CompletedTransitionContext {
    pub transition_id: TransitionId,
    pub source_transitions_handler: HandlerId,
    pub target_transitions_handler: HandlerId,
    pub target_screen: Rc<dyn Screen>,
    pub launching_context: LaunchingContext,
    pub storable_parameters: Option<StorableParameters>,
}

impl CompletedTransitionContext {
    /// Resolve `forward` against the initiating handler.
    #[must_use]
    pub fn new(
        transition_id: TransitionId,
        source_transitions_handler: HandlerId,
        forward: ForwardTransitionContext,
    ) -> Self {
        let target_transitions_handler = forward
            .target_transitions_handler_box
            .resolve(source_transitions_handler);
        Self {
            transition_id,
            source_transitions_handler,
            target_transitions_handler,
            target_screen: forward.target_screen,
            launching_context: forward.launching_context,
            storable_parameters: forward.storable_parameters,
        }
    }

    #[must_use]
    pub fn launching_style(&self) -> LaunchingStyle {
        self.launching_context.style()
    }
}

/// The ledger's read model of a completed transition.
///
/// Same fields as [`CompletedTransitionContext`]; never mutated, only removed
/// from the ledger when the transition is undone. Cloning is cheap (`Rc`
/// fields).
#[derive(Debug, Clone)]
pub struct RestoredTransitionContext {
    pub transition_id: TransitionId,
    pub source_transitions_handler: HandlerId,
    pub target_transitions_handler: HandlerId,
    pub target_screen: Rc<dyn Screen>,
    pub launching_context: LaunchingContext,
    pub storable_parameters: Option<StorableParameters>,
}

impl From<CompletedTransitionContext> for RestoredTransitionContext {
    fn from(completed: CompletedTransitionContext) -> Self {
        Self {
            transition_id: completed.transition_id,
            source_transitions_handler: completed.source_transitions_handler,
            target_transitions_handler: completed.target_transitions_handler,
            target_screen: completed.target_screen,
            launching_context: completed.launching_context,
            storable_parameters: completed.storable_parameters,
        }
    }
}

impl RestoredTransitionContext {
    /// Whether `handler` initiated this transition.
    #[must_use]
    pub fn was_performed_by(&self, handler: HandlerId) -> bool {
        self.source_transitions_handler == handler
    }

    /// Whether this transition hands off to a different handler, establishing
    /// a parent-to-child handler relationship.
    #[must_use]
    pub fn is_chained(&self) -> bool {
        self.target_transitions_handler != self.source_transitions_handler
    }

    #[must_use]
    pub fn launching_style(&self) -> LaunchingStyle {
        self.launching_context.style()
    }
}

impl PartialEq for RestoredTransitionContext {
    fn eq(&self, other: &Self) -> bool {
        self.transition_id == other.transition_id
            && self.source_transitions_handler == other.source_transitions_handler
            && self.target_transitions_handler == other.target_transitions_handler
            && Rc::ptr_eq(&self.target_screen, &other.target_screen)
            && self.launching_style() == other.launching_style()
            && self.storable_parameters == other.storable_parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeScreen, NoOpAnimator};

    fn screen() -> Rc<dyn Screen> {
        Rc::new(FakeScreen::named("screen"))
    }

    fn animator() -> Rc<dyn TransitionsAnimator> {
        Rc::new(NoOpAnimator)
    }

    #[test]
    fn pending_box_resolves_to_source() {
        let source = HandlerId::new(1);
        assert_eq!(TargetTransitionsHandlerBox::Pending.resolve(source), source);
    }

    #[test]
    fn resolved_box_keeps_its_target() {
        let source = HandlerId::new(1);
        let target = HandlerId::new(2);
        assert_eq!(
            TargetTransitionsHandlerBox::Resolved(target).resolve(source),
            target
        );
    }

    #[test]
    fn variant_builders_pick_the_right_style() {
        let push = ForwardTransitionContext::push(screen(), animator());
        assert_eq!(push.launching_context.style(), LaunchingStyle::Push);
        assert_eq!(
            push.target_transitions_handler_box,
            TargetTransitionsHandlerBox::Pending
        );

        let modal = ForwardTransitionContext::present_modally(
            screen(),
            TargetTransitionsHandlerBox::Resolved(HandlerId::new(9)),
            animator(),
        );
        assert_eq!(
            modal.launching_context.style(),
            LaunchingStyle::PresentModally
        );

        let reset = ForwardTransitionContext::resetting_navigation_root(screen(), animator());
        assert_eq!(
            reset.launching_context.style(),
            LaunchingStyle::ResettingNavigationRoot
        );
    }

    #[test]
    fn completion_resolves_pending_target_to_source() {
        let source = HandlerId::new(3);
        let forward = ForwardTransitionContext::push(screen(), animator());
        let completed =
            CompletedTransitionContext::new(TransitionId::from_raw("t"), source, forward);
        assert_eq!(completed.target_transitions_handler, source);
        assert_eq!(completed.source_transitions_handler, source);
    }

    #[test]
    fn chained_predicate_compares_source_and_target() {
        let source = HandlerId::new(1);
        let target = HandlerId::new(2);
        let forward = ForwardTransitionContext::present_modally(
            screen(),
            TargetTransitionsHandlerBox::Resolved(target),
            animator(),
        );
        let restored: RestoredTransitionContext =
            CompletedTransitionContext::new(TransitionId::from_raw("t"), source, forward).into();

        assert!(restored.is_chained());
        assert!(restored.was_performed_by(source));
        assert!(!restored.was_performed_by(target));
    }

    #[test]
    fn storable_parameters_are_carried_through_untouched() {
        let payload = serde_json::json!({ "deep_link": "settings/profile" });
        let forward = ForwardTransitionContext::push(screen(), animator())
            .with_storable_parameters(StorableParameters::new(payload.clone()));
        let restored: RestoredTransitionContext = CompletedTransitionContext::new(
            TransitionId::from_raw("t"),
            HandlerId::new(1),
            forward,
        )
        .into();

        assert_eq!(
            restored.storable_parameters,
            Some(StorableParameters::new(payload))
        );
    }
}
