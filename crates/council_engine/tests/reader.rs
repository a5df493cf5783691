use std::fs;

use council_core::SelectedFile;
use council_engine::{AttachmentReader, IngestSettings, ReadError, TokioFileReader};
use tempfile::TempDir;

fn selected_at(dir: &TempDir, name: &str, contents: &[u8]) -> SelectedFile {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    SelectedFile {
        path,
        name: name.to_string(),
        size: contents.len() as u64,
        mime_type: "text/plain".to_string(),
    }
}

#[tokio::test]
async fn reads_file_bytes() {
    let temp = TempDir::new().unwrap();
    let file = selected_at(&temp, "notes.txt", b"hello");

    let bytes = TokioFileReader::default().read(&file).await.unwrap();
    assert_eq!(bytes, b"hello");
}

#[tokio::test]
async fn file_grown_past_the_ceiling_is_rejected() {
    let temp = TempDir::new().unwrap();
    let mut file = selected_at(&temp, "grown.txt", b"0123456789");
    file.size = 4;

    let reader = TokioFileReader::new(IngestSettings { max_bytes: 8 });
    let err = reader.read(&file).await.unwrap_err();
    assert!(matches!(
        err,
        ReadError::TooLarge {
            max_bytes: 8,
            actual: 10
        }
    ));
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let file = SelectedFile {
        path: temp.path().join("gone.txt"),
        name: "gone.txt".to_string(),
        size: 3,
        mime_type: "text/plain".to_string(),
    };

    let err = TokioFileReader::default().read(&file).await.unwrap_err();
    assert!(matches!(err, ReadError::Io(_)));
}
