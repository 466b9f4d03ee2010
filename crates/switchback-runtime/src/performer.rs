#![forbid(unsafe_code)]

//! The visual seam between bookkeeping and the GUI toolkit.
//!
//! A performer owns the toolkit-side navigation container for one handler
//! (navigation stack, modal host, split pane...) and knows how to run a
//! transition forward and backward. The ledger can't hold references to
//! toolkit objects, and handlers must stay droppable while records about them
//! survive, so the registry keeps only `Weak` performer references and the
//! coordinator resolves them per call.

use switchback_core::{CompletedTransitionContext, RestoredTransitionContext};

/// Executes the visual side of transitions for one handler.
pub trait TransitionsPerformer {
    /// Run the forward visual transition described by `context`, typically by
    /// invoking the animator attached to its launching context.
    fn launch_transition(&self, context: &CompletedTransitionContext);

    /// Reverse a previously performed transition.
    fn reverse_transition(&self, context: &RestoredTransitionContext);
}
