//! The FILEHOST chat command.
//!
//! No argument: authenticate the caller through the account lookup, mint an
//! upload token, and reply with human-readable upload instructions. `info`:
//! static listing of limits and accepted extensions. Anything else: usage —
//! a soft failure, the command still completes.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use filehost_core::AccountLookup;
use filehost_token::TokenService;

use crate::dispatch::{CommandContext, CommandHandler, CommandResponse};

pub struct FilehostCommand {
    accounts: Arc<dyn AccountLookup>,
    tokens: Arc<TokenService>,
    public_url: String,
    auth_message: String,
    /// Human-readable size limit for the `info` reply.
    max_upload_size: String,
    /// Accepted extensions for the `info` reply, supplied by the wiring
    /// from the gateway's accepted-type table.
    accepted_extensions: Vec<String>,
}

impl FilehostCommand {
    pub fn new(
        accounts: Arc<dyn AccountLookup>,
        tokens: Arc<TokenService>,
        public_url: impl Into<String>,
        auth_message: impl Into<String>,
        max_upload_size: impl Into<String>,
        accepted_extensions: Vec<String>,
    ) -> Self {
        Self {
            accounts,
            tokens,
            public_url: public_url.into(),
            auth_message: auth_message.into(),
            max_upload_size: max_upload_size.into(),
            accepted_extensions,
        }
    }

    fn upload_instructions(&self, account: &str) -> CommandResponse {
        let token = self.tokens.issue(account);
        let minutes = self.tokens.ttl_seconds() / 60;
        info!(account = %account, "Minted upload token");
        CommandResponse::notices([
            format!("Upload URL: {}/upload?token={}", self.public_url, token),
            format!("Share files as: {}/files/<filename>", self.public_url),
            format!("Authorized as {account}; the link is valid for {minutes} minutes."),
        ])
    }

    fn info_reply(&self) -> CommandResponse {
        CommandResponse::notices([
            format!("Maximum upload size: {}", self.max_upload_size),
            format!("Accepted extensions: {}", self.accepted_extensions.join(", ")),
        ])
    }
}

#[async_trait]
impl CommandHandler for FilehostCommand {
    async fn handle(&self, ctx: &CommandContext, args: &[String]) -> Result<CommandResponse> {
        match args {
            [] => match self.accounts.account_name(&ctx.session_id) {
                Some(account) if !account.is_empty() => Ok(self.upload_instructions(&account)),
                _ => {
                    debug!(session = %ctx.session_id, "FILEHOST denied: no account");
                    Ok(CommandResponse::notice(self.auth_message.clone()))
                }
            },
            [arg] if arg.eq_ignore_ascii_case("info") => Ok(self.info_reply()),
            _ => Ok(CommandResponse::notice("Usage: FILEHOST [info]")),
        }
    }
}
