#![forbid(unsafe_code)]

//! Registry of live transitions handlers.
//!
//! Assigns each handler its [`HandlerId`] and maps ids to `Weak` performer
//! references. The ledger refers to handlers only through ids, so dropping a
//! container (closing a tab, dismissing a modal host) never leaves dangling
//! references; the registry just stops resolving that id.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use ahash::AHashMap;

use switchback_core::HandlerId;

use crate::performer::TransitionsPerformer;

/// Id assignment plus id-to-performer resolution.
#[derive(Default)]
pub struct TransitionsHandlersRegistry {
    next_raw_id: Cell<u64>,
    performers: RefCell<AHashMap<HandlerId, Weak<dyn TransitionsPerformer>>>,
}

impl TransitionsHandlersRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a performer and mint the handler id records will carry.
    pub fn register(&self, performer: Weak<dyn TransitionsPerformer>) -> HandlerId {
        let raw = self.next_raw_id.get();
        self.next_raw_id.set(raw + 1);
        let handler_id = HandlerId::new(raw);
        self.performers.borrow_mut().insert(handler_id, performer);
        handler_id
    }

    /// Resolve a handler id to its live performer. Entries whose performer
    /// has been dropped are pruned on the spot.
    #[must_use]
    pub fn performer(&self, handler: HandlerId) -> Option<Rc<dyn TransitionsPerformer>> {
        let mut performers = self.performers.borrow_mut();
        match performers.get(&handler)?.upgrade() {
            Some(live) => Some(live),
            None => {
                performers.remove(&handler);
                None
            }
        }
    }

    /// Whether the id currently resolves to a live performer.
    #[must_use]
    pub fn is_live(&self, handler: HandlerId) -> bool {
        self.performer(handler).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.performers.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.performers.borrow().is_empty()
    }
}

impl std::fmt::Debug for TransitionsHandlersRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionsHandlersRegistry")
            .field("registered", &self.len())
            .finish()
    }
}
