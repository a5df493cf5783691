use council_core::{Attachment, SelectedFile};
use council_logging::{council_debug, council_warn};
use futures_util::future::join_all;

use crate::{encode_data_uri, AttachmentReader};

/// Reads every file concurrently and returns the encoded attachments in
/// selection order. Files that fail to read are logged and left out.
pub async fn ingest_batch(reader: &dyn AttachmentReader, files: &[SelectedFile]) -> Vec<Attachment> {
    let reads = files.iter().map(|file| async move {
        match reader.read(file).await {
            Ok(bytes) => {
                council_debug!("Read {} ({} bytes)", file.name, bytes.len());
                Some(Attachment::new(
                    file.mime_type.clone(),
                    encode_data_uri(&file.mime_type, &bytes),
                    file.name.clone(),
                ))
            }
            Err(err) => {
                council_warn!("Error reading file {}: {}", file.name, err);
                None
            }
        }
    });

    join_all(reads).await.into_iter().flatten().collect()
}
