//! The built-in handler set.

use std::sync::Arc;

use crate::handler::IHandler;
use crate::market::MarketHandler;
use crate::portfolio::PortfolioHandler;
use crate::tutor::TutorHandler;

/// One handler per intent, in `Intent::ALL` order.
pub fn default_handlers() -> Vec<Arc<dyn IHandler>> {
    vec![
        Arc::new(TutorHandler::new()),
        Arc::new(PortfolioHandler::default()),
        Arc::new(MarketHandler::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::Intent;

    #[test]
    fn one_handler_per_intent_in_order() {
        let intents: Vec<Intent> = default_handlers().iter().map(|h| h.intent()).collect();
        assert_eq!(intents, Intent::ALL.to_vec());
    }
}
