use council_core::SelectedFile;

use crate::{IngestSettings, ReadError};

#[async_trait::async_trait]
pub trait AttachmentReader: Send + Sync {
    async fn read(&self, file: &SelectedFile) -> Result<Vec<u8>, ReadError>;
}

/// Reads files from the local filesystem on tokio's blocking pool.
#[derive(Debug, Clone, Default)]
pub struct TokioFileReader {
    settings: IngestSettings,
}

impl TokioFileReader {
    pub fn new(settings: IngestSettings) -> Self {
        Self { settings }
    }

    fn check_size(&self, actual: u64) -> Result<(), ReadError> {
        if actual > self.settings.max_bytes {
            return Err(ReadError::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual,
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl AttachmentReader for TokioFileReader {
    async fn read(&self, file: &SelectedFile) -> Result<Vec<u8>, ReadError> {
        let meta = tokio::fs::metadata(&file.path).await?;
        self.check_size(meta.len())?;

        // The file may have grown since the metadata call.
        let bytes = tokio::fs::read(&file.path).await?;
        self.check_size(bytes.len() as u64)?;
        Ok(bytes)
    }
}
