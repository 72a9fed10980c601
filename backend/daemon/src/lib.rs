//! Daemon wiring: assembles the chat-side bridge and the HTTP gateway from
//! one configuration.

pub mod bridge;

pub use bridge::{build_bridge, ChatBridge};
