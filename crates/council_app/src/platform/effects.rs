use std::io::{self, Write};
use std::sync::{mpsc, Arc};

use council_core::{ConversationId, Effect, Msg};
use council_engine::{EngineEvent, EngineHandle, EventSink, IngestSettings};
use council_logging::{council_debug, council_error, council_info, council_warn};

use super::transport::{BackendRequest, LineTransport};

/// Routes engine completions back onto the event loop.
struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::AttachmentsRead {
                conversation_id,
                attachments,
            } => Msg::AttachmentsIngested {
                conversation_id,
                attachments,
            },
        };
        let _ = self.msg_tx.send(msg);
    }
}

pub struct EffectRunner<W: Write> {
    engine: EngineHandle,
    transport: LineTransport<W>,
    msg_tx: mpsc::Sender<Msg>,
    pointer_watch: Option<ConversationId>,
}

impl<W: Write> EffectRunner<W> {
    pub fn new(settings: IngestSettings, out: W, msg_tx: mpsc::Sender<Msg>) -> io::Result<Self> {
        let sink = Arc::new(MsgSink {
            msg_tx: msg_tx.clone(),
        });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self {
            engine,
            transport: LineTransport::new(out),
            msg_tx,
            pointer_watch: None,
        })
    }

    /// Whether a row menu is open and listening for outside clicks.
    pub fn is_watching_pointer(&self) -> bool {
        self.pointer_watch.is_some()
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::ReadAttachments {
                conversation_id,
                files,
            } => {
                council_info!(
                    "ReadAttachments conversation={} files={}",
                    conversation_id,
                    files.len()
                );
                self.engine.ingest(conversation_id, files);
            }
            Effect::ResetFilePicker => {
                council_debug!("File picker reset");
            }
            Effect::WarnUser { message } => {
                council_warn!("{}", message);
                eprintln!("! {message}");
            }
            Effect::SubmitMessage {
                conversation_id,
                content,
                attachments,
            } => {
                council_info!(
                    "SubmitMessage conversation={} content_len={} attachments={}",
                    conversation_id,
                    content.len(),
                    attachments.len()
                );
                let request = BackendRequest::SendMessage {
                    conversation_id: &conversation_id,
                    content: &content,
                    attachments: &attachments,
                };
                if let Err(err) = self.transport.send(&request) {
                    let _ = self.msg_tx.send(Msg::SendFailed {
                        conversation_id,
                        reason: err.to_string(),
                    });
                }
            }
            Effect::CreateConversation => {
                let summary = self.transport.create_conversation();
                council_info!("Created conversation {}", summary.id);
                let _ = self.msg_tx.send(Msg::ConversationCreated(summary));
            }
            Effect::LoadConversation { id } => {
                self.send_or_log(&BackendRequest::LoadConversation {
                    conversation_id: &id,
                });
            }
            Effect::RenameConversation { id, title } => {
                self.send_or_log(&BackendRequest::RenameConversation {
                    conversation_id: &id,
                    title: &title,
                });
            }
            Effect::DeleteConversation { id } => {
                self.send_or_log(&BackendRequest::DeleteConversation {
                    conversation_id: &id,
                });
            }
            Effect::FocusRenameInput { id } => {
                eprintln!("renaming {id}: /title {id} <text>, then /enter {id} or /escape {id}");
            }
            Effect::WatchPointerOutsideMenu { id } => {
                council_debug!("Watching pointer outside menu of {}", id);
                self.pointer_watch = Some(id);
            }
            Effect::ReleasePointerWatch => {
                if let Some(id) = self.pointer_watch.take() {
                    council_debug!("Released pointer watch for {}", id);
                }
            }
        }
    }

    fn send_or_log(&mut self, request: &BackendRequest<'_>) {
        if let Err(err) = self.transport.send(request) {
            council_error!("Failed to write backend request {:?}: {}", request, err);
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.transport.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_core::SelectedFile;
    use std::time::Duration;
    use tempfile::TempDir;

    fn runner() -> (EffectRunner<Vec<u8>>, mpsc::Receiver<Msg>) {
        council_logging::initialize_for_tests();
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner::new(IngestSettings::default(), Vec::new(), tx).unwrap();
        (runner, rx)
    }

    #[test]
    fn create_conversation_answers_on_the_loop() {
        let (mut runner, rx) = runner();
        runner.enqueue(vec![Effect::CreateConversation]);
        match rx.recv_timeout(Duration::from_secs(1)).unwrap() {
            Msg::ConversationCreated(summary) => assert!(!summary.id.is_empty()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn backend_effects_become_request_lines() {
        let (mut runner, _rx) = runner();
        runner.enqueue(vec![
            Effect::SubmitMessage {
                conversation_id: "c1".into(),
                content: "hi".into(),
                attachments: Vec::new(),
            },
            Effect::RenameConversation {
                id: "c1".into(),
                title: "Sky".into(),
            },
            Effect::ResetFilePicker,
        ]);
        let out = String::from_utf8(runner.into_output()).unwrap();
        let ops: Vec<String> = out
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["op"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(ops, vec!["send_message", "rename_conversation"]);
    }

    #[test]
    fn pointer_watch_follows_acquire_and_release() {
        let (mut runner, _rx) = runner();
        runner.enqueue(vec![Effect::WatchPointerOutsideMenu { id: "a".into() }]);
        assert!(runner.is_watching_pointer());
        runner.enqueue(vec![
            Effect::ReleasePointerWatch,
            Effect::WatchPointerOutsideMenu { id: "b".into() },
        ]);
        assert!(runner.is_watching_pointer());
        runner.enqueue(vec![Effect::ReleasePointerWatch]);
        assert!(!runner.is_watching_pointer());
    }

    #[test]
    fn read_attachments_comes_back_as_ingested_batch() {
        let (mut runner, rx) = runner();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        std::fs::write(&path, b"abc").unwrap();

        runner.enqueue(vec![Effect::ReadAttachments {
            conversation_id: "c1".into(),
            files: vec![SelectedFile {
                path,
                name: "a.txt".into(),
                size: 3,
                mime_type: "text/plain".into(),
            }],
        }]);

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            Msg::AttachmentsIngested {
                conversation_id,
                attachments,
            } => {
                assert_eq!(conversation_id, "c1");
                assert_eq!(attachments.len(), 1);
                assert_eq!(attachments[0].data(), "data:text/plain;base64,YWJj");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
