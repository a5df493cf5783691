use std::io;

use council_core::{Attachment, ConversationId, MAX_ATTACHMENT_BYTES};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSettings {
    /// Upper bound on bytes actually read per file.
    pub max_bytes: u64,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            max_bytes: MAX_ATTACHMENT_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// One selection batch finished; attachments are in selection order and
    /// files that failed to read are absent.
    AttachmentsRead {
        conversation_id: ConversationId,
        attachments: Vec<Attachment>,
    },
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("file too large (max {max_bytes}, actual {actual})")]
    TooLarge { max_bytes: u64, actual: u64 },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
