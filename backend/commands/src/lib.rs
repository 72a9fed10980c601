pub mod detection;
pub mod dispatch;
pub mod filehost;

pub use detection::detect_command;
pub use dispatch::{CommandContext, CommandDispatcher, CommandHandler, CommandResponse};
pub use filehost::FilehostCommand;
