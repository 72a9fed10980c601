//! Outbound-message tagging: detects gateway URLs in chat messages and
//! enriches them with structured metadata tags for capability-enabled
//! peers.

pub mod classify;
pub mod pipeline;
pub mod secure;
pub mod session_state;
pub mod uploader;

pub use classify::{classify, FileType};
pub use pipeline::{PipelineVerdict, TagHandler, TagPipeline};
pub use secure::SecureShareGate;
pub use session_state::SessionTagStats;
pub use uploader::{FileMetadata, FileUploadTagger, FILE_UPLOADER_TAG};
