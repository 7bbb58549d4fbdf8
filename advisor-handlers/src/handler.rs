use advisor_core::errors::HandlerResult;
use advisor_core::models::HandlerOutput;
use advisor_core::Intent;
use async_trait::async_trait;

use crate::context::DispatchContext;

/// A domain handler. Exactly one is registered per intent.
///
/// Errors are reported, not recovered: the orchestrator turns them into a
/// degraded output.
#[async_trait]
pub trait IHandler: Send + Sync {
    /// The intent this handler serves.
    fn intent(&self) -> Intent;

    fn name(&self) -> &str;

    async fn handle(&self, ctx: &DispatchContext) -> HandlerResult<HandlerOutput>;
}
