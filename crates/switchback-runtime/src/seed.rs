#![forbid(unsafe_code)]

//! Seed data handed to screen factories.
//!
//! Routers build the next module's screen through a factory closure; the seed
//! carries everything the next module needs to participate in navigation
//! later: the transition id it was presented under, the transitions handler
//! owning its container, and any state-restoration payload.

use std::fmt;
use std::rc::Rc;

use switchback_core::{Screen, StorableParameters, TransitionId};

use crate::handler::TransitionsHandler;

/// Everything a newly created module needs to navigate onward.
#[derive(Clone)]
pub struct RouterSeed {
    /// The id of the transition presenting the new module. Routers keep it to
    /// unwind back to (or through) their own screen later.
    pub transition_id: TransitionId,
    /// The handler owning the container the new module lives in.
    pub transitions_handler: Rc<dyn TransitionsHandler>,
    /// Optional state-restoration payload, carried through untouched.
    pub storable_parameters: Option<StorableParameters>,
}

impl fmt::Debug for RouterSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterSeed")
            .field("transition_id", &self.transition_id)
            .field("storable_parameters", &self.storable_parameters)
            .finish()
    }
}

/// Factory supplying the next screen from its seed.
pub type DeriveScreen<'a> = Box<dyn FnOnce(RouterSeed) -> Rc<dyn Screen> + 'a>;
