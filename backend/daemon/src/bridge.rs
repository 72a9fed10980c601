//! Chat-side assembly.
//!
//! The embedding chat server drives this bridge: outbound messages go
//! through the tag pipeline before delivery, and FILEHOST command lines go
//! through the dispatcher. The collaborators (account lookup, capability
//! negotiation, peer delivery) are supplied by the server.

use std::sync::Arc;

use filehost_commands::{CommandDispatcher, FilehostCommand};
use filehost_config::FilehostConfig;
use filehost_core::{AccountLookup, CapabilityCheck, PeerSink};
use filehost_tags::{
    FileUploadTagger, SecureShareGate, SessionTagStats, TagPipeline,
};
use filehost_token::TokenService;

/// Everything the chat server needs to run the filehost feature.
pub struct ChatBridge {
    pub pipeline: TagPipeline,
    pub dispatcher: CommandDispatcher,
    pub stats: Arc<SessionTagStats>,
}

/// Build the tag pipeline and command dispatcher from config and the
/// server-side collaborators.
pub fn build_bridge(
    config: &FilehostConfig,
    tokens: Arc<TokenService>,
    accounts: Arc<dyn AccountLookup>,
    caps: Arc<dyn CapabilityCheck>,
    sink: Arc<dyn PeerSink>,
) -> ChatBridge {
    let public_url = config.public_url();
    let stats = Arc::new(SessionTagStats::new());

    let mut pipeline = TagPipeline::new()
        .with_gate(SecureShareGate::new(public_url.clone(), config.requiressl));
    pipeline.register(Arc::new(FileUploadTagger::new(
        public_url.clone(),
        caps,
        sink,
        stats.clone(),
    )));

    let accepted_extensions: Vec<String> = filehost_gateway::mime::ACCEPTED_TYPES
        .iter()
        .map(|(_, ext)| ext.to_string())
        .collect();

    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register(
        "FILEHOST",
        Arc::new(FilehostCommand::new(
            accounts,
            tokens,
            public_url,
            config.auth_message.clone(),
            config.max_upload_size.clone(),
            accepted_extensions,
        )),
    );

    ChatBridge {
        pipeline,
        dispatcher,
        stats,
    }
}
