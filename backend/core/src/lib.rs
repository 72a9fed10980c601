pub mod error;
pub mod message;
pub mod traits;

pub use error::FilehostError;
pub use message::{MessageOrigin, OutboundMessage};
pub use traits::{AccountLookup, CapabilityCheck, PeerSink};
