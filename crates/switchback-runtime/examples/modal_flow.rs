//! A master/detail flow without any GUI toolkit: a console performer stands
//! in for the visual layer while the coordinator keeps the ledger.
//!
//! Run with `RUST_LOG=debug cargo run --example modal_flow` to watch the
//! coordinator's tracing output interleave with the performer's prints.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use switchback_runtime::{
    CompletedTransitionContext, ForwardTransitionContext, RestoredTransitionContext, Screen,
    Switchback, TargetTransitionsHandlerBox, TransitionId, TransitionsAnimator,
    TransitionsHandler, TransitionsPerformer,
};

#[derive(Debug)]
struct AppScreen {
    title: &'static str,
}

impl Screen for AppScreen {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct SlideAnimator;

impl TransitionsAnimator for SlideAnimator {
    fn animate_performing(&self, screen: &dyn Screen) {
        println!("  ~ slide in {screen:?}");
    }

    fn animate_undoing(&self, screen: &dyn Screen) {
        println!("  ~ slide out {screen:?}");
    }
}

/// Prints what a real container would render, and remembers the ids it
/// launched so the demo can unwind them later.
struct ConsolePerformer {
    name: &'static str,
    launched: RefCell<Vec<TransitionId>>,
}

impl ConsolePerformer {
    fn new(name: &'static str) -> Rc<Self> {
        Rc::new(Self {
            name,
            launched: RefCell::new(Vec::new()),
        })
    }
}

impl TransitionsPerformer for ConsolePerformer {
    fn launch_transition(&self, context: &CompletedTransitionContext) {
        println!(
            "[{}] perform {:?} -> {:?}",
            self.name,
            context.launching_style(),
            context.target_screen,
        );
        context
            .launching_context
            .animator()
            .animate_performing(context.target_screen.as_ref());
        self.launched.borrow_mut().push(context.transition_id.clone());
    }

    fn reverse_transition(&self, context: &RestoredTransitionContext) {
        println!(
            "[{}] undo {:?} -> {:?}",
            self.name,
            context.launching_style(),
            context.target_screen,
        );
        context
            .launching_context
            .animator()
            .animate_undoing(context.target_screen.as_ref());
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let switchback = Switchback::new();

    let master_performer = ConsolePerformer::new("master");
    let detail_performer = ConsolePerformer::new("detail");
    let master = switchback.handler_for(master_performer.clone());
    let detail = switchback.handler_for(detail_performer.clone());

    println!("--- push two screens on master");
    for title in ["inbox", "thread"] {
        master.perform_transition(Box::new(move |_| {
            ForwardTransitionContext::push(Rc::new(AppScreen { title }), Rc::new(SlideAnimator))
        }));
    }

    println!("--- present a modal owned by detail, which pushes once more");
    let detail_box = TargetTransitionsHandlerBox::Resolved(detail.handler_id());
    master.perform_transition(Box::new(move |_| {
        ForwardTransitionContext::present_modally(
            Rc::new(AppScreen { title: "composer" }),
            detail_box,
            Rc::new(SlideAnimator),
        )
    }));
    detail.perform_transition(Box::new(move |_| {
        ForwardTransitionContext::push(
            Rc::new(AppScreen { title: "attachments" }),
            Rc::new(SlideAnimator),
        )
    }));

    let client = switchback.coordinator().stack_client();
    println!(
        "master currently chains into handler {:?}",
        client.chained_transitions_handler(master.handler_id()),
    );

    println!("--- collapse the modal chain");
    master.undo_all_chained_transitions();

    println!("--- pop master back past its first push");
    let first = master_performer.launched.borrow()[0].clone();
    master.undo_transition_to(&first);

    println!(
        "done; master still has recorded transitions: {}",
        client.last_transition(master.handler_id()).is_some(),
    );
}
