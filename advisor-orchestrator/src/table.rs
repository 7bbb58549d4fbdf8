//! One handler slot per intent.

use std::sync::Arc;

use advisor_core::errors::{HandlerError, HandlerResult};
use advisor_core::Intent;
use advisor_handlers::{default_handlers, IHandler};
use tracing::debug;

/// Fixed-size handler lookup indexed by [`Intent::index`].
pub struct HandlerTable {
    slots: [Option<Arc<dyn IHandler>>; Intent::COUNT],
}

impl HandlerTable {
    /// Table with no handlers registered.
    pub fn empty() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Table holding the built-in tutor, portfolio and market handlers.
    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        for handler in default_handlers() {
            table.register(handler);
        }
        table
    }

    /// Install `handler` in the slot for its intent. Returns the handler it
    /// replaced, if any.
    pub fn register(&mut self, handler: Arc<dyn IHandler>) -> Option<Arc<dyn IHandler>> {
        let intent = handler.intent();
        debug!(intent = intent.as_str(), handler = handler.name(), "handler registered");
        self.slots[intent.index()].replace(handler)
    }

    pub fn unregister(&mut self, intent: Intent) -> Option<Arc<dyn IHandler>> {
        self.slots[intent.index()].take()
    }

    pub fn get(&self, intent: Intent) -> HandlerResult<&Arc<dyn IHandler>> {
        self.slots[intent.index()]
            .as_ref()
            .ok_or_else(|| HandlerError::NotRegistered {
                intent: intent.as_str().to_string(),
            })
    }

    /// Intents with a handler, in `Intent::ALL` order.
    pub fn registered(&self) -> Vec<Intent> {
        Intent::ALL
            .into_iter()
            .filter(|i| self.slots[i.index()].is_some())
            .collect()
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}
