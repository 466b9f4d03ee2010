//! End-to-end scenarios through the facade: perform, chain, and unwind
//! across nested handlers, asserting both the visual call order seen by
//! performers and the exact set of surviving ledger records.
//!
//! Performers are owned by the test harness; the registry only ever holds
//! weak references, exactly like GUI glue owning its containers.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use switchback_core::testing::{transition_id, FakeScreen, FixedTransitionIdGenerator};
use switchback_runtime::{
    CompletedTransitionContext, CoordinatedTransitionsHandler, ForwardTransitionContext,
    LaunchingStyle, RestoredTransitionContext, Screen, Switchback, TargetTransitionsHandlerBox,
    TransitionsAnimator, TransitionsHandler, TransitionsPerformer,
};

/// Records every visual call into a log shared across performers, so tests
/// can assert global ordering. Animators are invoked like real glue would.
struct RecordingPerformer {
    name: &'static str,
    events: Rc<RefCell<Vec<String>>>,
}

impl TransitionsPerformer for RecordingPerformer {
    fn launch_transition(&self, context: &CompletedTransitionContext) {
        context
            .launching_context
            .animator()
            .animate_performing(context.target_screen.as_ref());
        self.events
            .borrow_mut()
            .push(format!("{}:launch:{}", self.name, context.transition_id));
    }

    fn reverse_transition(&self, context: &RestoredTransitionContext) {
        context
            .launching_context
            .animator()
            .animate_undoing(context.target_screen.as_ref());
        self.events
            .borrow_mut()
            .push(format!("{}:reverse:{}", self.name, context.transition_id));
    }
}

/// Counts animation calls so the animator seam is observably exercised.
#[derive(Debug, Default)]
struct CountingAnimator {
    performed: Cell<usize>,
    undone: Cell<usize>,
}

impl TransitionsAnimator for CountingAnimator {
    fn animate_performing(&self, _screen: &dyn Screen) {
        self.performed.set(self.performed.get() + 1);
    }

    fn animate_undoing(&self, _screen: &dyn Screen) {
        self.undone.set(self.undone.get() + 1);
    }
}

struct Harness {
    switchback: Switchback,
    events: Rc<RefCell<Vec<String>>>,
    animator: Rc<CountingAnimator>,
    /// Strong performer references; the registry itself never owns them.
    performers: RefCell<Vec<Rc<RecordingPerformer>>>,
}

impl Harness {
    fn new(ids: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            switchback: Switchback::with_transition_id_generator(Box::new(
                FixedTransitionIdGenerator::new(ids),
            )),
            events: Rc::new(RefCell::new(Vec::new())),
            animator: Rc::new(CountingAnimator::default()),
            performers: RefCell::new(Vec::new()),
        }
    }

    fn handler(&self, name: &'static str) -> Rc<CoordinatedTransitionsHandler> {
        let performer = Rc::new(RecordingPerformer {
            name,
            events: Rc::clone(&self.events),
        });
        self.performers.borrow_mut().push(Rc::clone(&performer));
        self.switchback.handler_for(performer)
    }

    fn push(&self, handler: &CoordinatedTransitionsHandler, screen_name: &'static str) {
        let animator = Rc::clone(&self.animator) as Rc<dyn TransitionsAnimator>;
        handler.perform_transition(Box::new(move |_| {
            ForwardTransitionContext::push(Rc::new(FakeScreen::named(screen_name)), animator)
        }));
    }

    fn present_chained(
        &self,
        presenter: &CoordinatedTransitionsHandler,
        target: &CoordinatedTransitionsHandler,
        screen_name: &'static str,
    ) {
        let animator = Rc::clone(&self.animator) as Rc<dyn TransitionsAnimator>;
        let target_box = TargetTransitionsHandlerBox::Resolved(target.handler_id());
        presenter.perform_transition(Box::new(move |_| {
            ForwardTransitionContext::present_modally(
                Rc::new(FakeScreen::named(screen_name)),
                target_box,
                animator,
            )
        }));
    }

    fn reset(&self, handler: &CoordinatedTransitionsHandler, screen_name: &'static str) {
        let animator = Rc::clone(&self.animator) as Rc<dyn TransitionsAnimator>;
        handler.reset_with_transition(Box::new(move |_| {
            ForwardTransitionContext::resetting_navigation_root(
                Rc::new(FakeScreen::named(screen_name)),
                animator,
            )
        }));
    }

    fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }
}

#[test]
fn undo_transition_from_keeps_the_target_screen() {
    let harness = Harness::new(["t0", "t1", "t2"]);
    let master = harness.handler("master");

    harness.push(&master, "a");
    harness.push(&master, "b");
    harness.push(&master, "c");
    harness.clear_events();

    master.undo_transition_from(&transition_id("t0"));

    assert_eq!(
        harness.events(),
        vec!["master:reverse:t2", "master:reverse:t1"],
        "reversal is nearest-first and excludes the target",
    );

    let client = harness.switchback.coordinator().stack_client();
    assert!(client
        .transition_with(&transition_id("t0"), master.handler_id())
        .is_some());
    assert!(client
        .transition_with(&transition_id("t1"), master.handler_id())
        .is_none());
}

#[test]
fn undo_transition_to_removes_the_target_screen_too() {
    let harness = Harness::new(["t0", "t1"]);
    let master = harness.handler("master");

    harness.push(&master, "a");
    harness.push(&master, "b");
    harness.clear_events();

    master.undo_transition_to(&transition_id("t0"));

    assert_eq!(
        harness.events(),
        vec!["master:reverse:t1", "master:reverse:t0"],
    );
    let client = harness.switchback.coordinator().stack_client();
    assert!(client.last_transition(master.handler_id()).is_none());
}

#[test]
fn repeated_undo_of_the_same_id_is_benign() {
    let harness = Harness::new(["t0", "t1"]);
    let master = harness.handler("master");

    harness.push(&master, "a");
    harness.push(&master, "b");

    master.undo_transition_to(&transition_id("t1"));
    harness.clear_events();
    master.undo_transition_to(&transition_id("t1"));

    assert!(harness.events().is_empty(), "second undo must be a no-op");
    let client = harness.switchback.coordinator().stack_client();
    assert!(client
        .transition_with(&transition_id("t0"), master.handler_id())
        .is_some());
}

#[test]
fn chained_undo_collapses_the_descendant_before_the_handoff() {
    let harness = Harness::new(["t0", "t1", "d0"]);
    let master = harness.handler("master");
    let detail = harness.handler("detail");

    harness.push(&master, "a");
    harness.present_chained(&master, &detail, "modal");
    harness.push(&detail, "inner");
    harness.clear_events();

    master.undo_all_chained_transitions();

    assert_eq!(
        harness.events(),
        vec!["detail:reverse:d0", "master:reverse:t1"],
        "descendant unwinds first, then the handoff reverses",
    );

    let client = harness.switchback.coordinator().stack_client();
    assert!(
        client
            .transition_with(&transition_id("t0"), master.handler_id())
            .is_some(),
        "the handler's own earlier screens stay",
    );
    assert!(client.last_transition(detail.handler_id()).is_none());
    assert_eq!(client.chained_transitions_handler(master.handler_id()), None);
}

#[test]
fn undo_all_transitions_unwinds_to_the_root_through_chains() {
    let harness = Harness::new(["t0", "t1", "d0"]);
    let master = harness.handler("master");
    let detail = harness.handler("detail");

    harness.push(&master, "a");
    harness.present_chained(&master, &detail, "modal");
    harness.push(&detail, "inner");
    harness.clear_events();

    master.undo_all_transitions();

    assert_eq!(
        harness.events(),
        vec![
            "detail:reverse:d0",
            "master:reverse:t1",
            "master:reverse:t0",
        ],
    );
    let client = harness.switchback.coordinator().stack_client();
    assert!(client.last_transition(master.handler_id()).is_none());
    assert!(client.last_transition(detail.handler_id()).is_none());
    assert_eq!(harness.animator.undone.get(), 3);
}

#[test]
fn unrelated_handlers_survive_anothers_undo() {
    let harness = Harness::new(["t0", "x0", "t1"]);
    let master = harness.handler("master");
    let other_tab = harness.handler("other-tab");

    harness.push(&master, "a");
    harness.push(&other_tab, "elsewhere");
    harness.push(&master, "b");
    harness.clear_events();

    master.undo_all_transitions();

    let client = harness.switchback.coordinator().stack_client();
    assert!(client.last_transition(master.handler_id()).is_none());
    let survivor = client
        .last_transition(other_tab.handler_id())
        .expect("unrelated handler's record must be untouched");
    assert_eq!(survivor.transition_id, transition_id("x0"));
    assert_eq!(
        harness.events(),
        vec!["master:reverse:t1", "master:reverse:t0"],
    );
}

#[test]
fn reset_records_a_new_root_without_rewriting_history() {
    let harness = Harness::new(["t0", "t1"]);
    let master = harness.handler("master");

    harness.push(&master, "a");
    harness.reset(&master, "new-root");

    let client = harness.switchback.coordinator().stack_client();
    assert!(
        client
            .transition_with(&transition_id("t0"), master.handler_id())
            .is_some(),
        "reset must not retroactively alter history",
    );
    let last = client.last_transition(master.handler_id()).expect("last");
    assert_eq!(last.transition_id, transition_id("t1"));
    assert_eq!(last.launching_style(), LaunchingStyle::ResettingNavigationRoot);
    assert_eq!(
        harness.events(),
        vec!["master:launch:t0", "master:launch:t1"],
    );
}

#[test]
fn dropped_performer_still_gets_its_records_cleaned_up() {
    let harness = Harness::new(["t0", "t1", "d0"]);
    let master = harness.handler("master");

    // The detail performer is owned here, not by the harness, so it can be
    // torn down mid-history like a dismissed modal host.
    let detail_performer = Rc::new(RecordingPerformer {
        name: "detail",
        events: Rc::clone(&harness.events),
    });
    let detail = harness.switchback.handler_for(detail_performer.clone());

    harness.push(&master, "a");
    harness.present_chained(&master, &detail, "modal");
    harness.push(&detail, "inner");
    harness.clear_events();

    drop(detail_performer);
    master.undo_all_transitions();

    // Detail's reversal is skipped (performer gone) but its record is still
    // removed; master reverses its own transitions normally.
    assert_eq!(
        harness.events(),
        vec!["master:reverse:t1", "master:reverse:t0"],
    );
    let client = harness.switchback.coordinator().stack_client();
    assert!(client.last_transition(master.handler_id()).is_none());
    assert!(client.last_transition(detail.handler_id()).is_none());
}

#[test]
fn push_screen_threads_the_seed_into_the_factory() {
    let harness = Harness::new(["t0"]);
    let master = harness.handler("master");

    let seen_id = Rc::new(RefCell::new(None));
    let seen_id_in_factory = Rc::clone(&seen_id);
    CoordinatedTransitionsHandler::push_screen(
        &master,
        Box::new(move |seed| {
            *seen_id_in_factory.borrow_mut() = Some(seed.transition_id.clone());
            Rc::new(FakeScreen::named("derived"))
        }),
        Rc::new(CountingAnimator::default()),
    );

    assert_eq!(seen_id.borrow().clone(), Some(transition_id("t0")));
    let client = harness.switchback.coordinator().stack_client();
    let last = client.last_transition(master.handler_id()).expect("last");
    assert_eq!(last.transition_id, transition_id("t0"));
}
