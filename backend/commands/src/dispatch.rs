//! Command dispatch — route detected commands to handler functions.
//!
//! Command failures are soft: a handler that cannot serve the request still
//! returns a normal response with notices, and the protocol-level command
//! completes successfully.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::detection::CommandInvocation;

/// Context passed to every command handler.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub session_id: String,
}

/// Notices sent back to the invoking session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub notices: Vec<String>,
}

impl CommandResponse {
    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            notices: vec![text.into()],
        }
    }

    pub fn notices<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            notices: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext, args: &[String]) -> Result<CommandResponse>;
}

pub struct CommandDispatcher {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(name.into(), handler);
    }

    pub async fn dispatch(
        &self,
        ctx: &CommandContext,
        inv: &CommandInvocation,
    ) -> Result<CommandResponse> {
        if let Some(handler) = self.handlers.get(&inv.name) {
            info!(command = %inv.name, session = %ctx.session_id, "Dispatching command");
            handler.handle(ctx, &inv.args).await
        } else {
            Ok(CommandResponse::notice(format!(
                "Unknown command: {}",
                inv.name
            )))
        }
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
