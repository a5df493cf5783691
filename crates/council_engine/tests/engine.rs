use std::fs;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use council_core::SelectedFile;
use council_engine::{ChannelEventSink, EngineEvent, EngineHandle, IngestSettings};
use tempfile::TempDir;

#[test]
fn engine_reports_one_ordered_batch_per_selection() {
    council_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let mut files = Vec::new();
    for (name, mime, body) in [
        ("b.txt", "text/plain", &b"second"[..]),
        ("a.png", "image/png", &b"\x89PNG"[..]),
    ] {
        let path = temp.path().join(name);
        fs::write(&path, body).unwrap();
        files.push(SelectedFile {
            path,
            name: name.to_string(),
            size: body.len() as u64,
            mime_type: mime.to_string(),
        });
    }
    files.push(SelectedFile {
        path: temp.path().join("vanished.txt"),
        name: "vanished.txt".to_string(),
        size: 1,
        mime_type: "text/plain".to_string(),
    });

    let (tx, rx) = mpsc::channel();
    let engine =
        EngineHandle::new(IngestSettings::default(), Arc::new(ChannelEventSink::new(tx))).unwrap();
    engine.ingest("c1", files);

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("engine event");
    let EngineEvent::AttachmentsRead {
        conversation_id,
        attachments,
    } = event;
    assert_eq!(conversation_id, "c1");
    let names: Vec<_> = attachments.iter().map(|a| a.filename()).collect();
    assert_eq!(names, vec!["b.txt", "a.png"]);
    assert!(attachments[1].data().starts_with("data:image/png;base64,"));
}
