use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Per-file size ceiling enforced before a file is read.
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// MIME patterns offered by the file picker. A trailing `*` matches any subtype.
pub const ACCEPTED_MIME_PATTERNS: &[&str] = &["image/*", "application/pdf", "text/plain"];

/// Returns true if the picker should offer a file with this MIME type.
pub fn is_accepted_mime(mime_type: &str) -> bool {
    let mime = mime_type.trim().to_ascii_lowercase();
    ACCEPTED_MIME_PATTERNS.iter().any(|pattern| match pattern.strip_suffix('*') {
        Some(prefix) => mime.starts_with(prefix),
        None => mime == *pattern,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    File,
}

impl AttachmentKind {
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.starts_with("image/") {
            Self::Image
        } else {
            Self::File
        }
    }
}

/// An encoded file ready to travel with a user message.
///
/// `data` is a self-describing data URI and is kept intact all the way to the
/// backend. The kind is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(rename = "type")]
    kind: AttachmentKind,
    mime_type: String,
    data: String,
    filename: String,
}

impl Attachment {
    pub fn new(
        mime_type: impl Into<String>,
        data: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        let mime_type = mime_type.into();
        Self {
            kind: AttachmentKind::from_mime(&mime_type),
            mime_type,
            data: data.into(),
            filename: filename.into(),
        }
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Text after the last `.` in the filename, shown on non-image chips.
    pub fn extension(&self) -> &str {
        self.filename
            .rsplit_once('.')
            .map_or(self.filename.as_str(), |(_, ext)| ext)
    }
}

/// A file the user picked, described by what the selection surface knows
/// about it before any bytes are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}
