use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use council_core::{ConversationId, SelectedFile};
use council_logging::{council_error, council_info};

use crate::{ingest_batch, AttachmentReader, EngineEvent, IngestSettings, TokioFileReader};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Ingest {
        conversation_id: ConversationId,
        files: Vec<SelectedFile>,
    },
}

/// Owns a worker thread that runs file reads on a tokio runtime. Dropping
/// the handle stops accepting work; reads already started still report.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: IngestSettings, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        Self::with_reader(Arc::new(TokioFileReader::new(settings)), sink)
    }

    pub fn with_reader(
        reader: Arc<dyn AttachmentReader>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_time()
            .thread_name("council-engine")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::Builder::new()
            .name("council-engine-commands".into())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let reader = reader.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(reader.as_ref(), sink.as_ref(), command).await;
                    });
                }
                // Let in-flight reads finish before the runtime goes away.
                runtime.shutdown_timeout(std::time::Duration::from_secs(5));
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn ingest(&self, conversation_id: impl Into<ConversationId>, files: Vec<SelectedFile>) {
        let command = EngineCommand::Ingest {
            conversation_id: conversation_id.into(),
            files,
        };
        if self.cmd_tx.send(command).is_err() {
            council_error!("Engine worker stopped; dropping ingest request");
        }
    }
}

async fn handle_command(reader: &dyn AttachmentReader, sink: &dyn EventSink, command: EngineCommand) {
    match command {
        EngineCommand::Ingest {
            conversation_id,
            files,
        } => {
            let attachments = ingest_batch(reader, &files).await;
            council_info!(
                "Ingested {}/{} files for conversation {}",
                attachments.len(),
                files.len(),
                conversation_id
            );
            sink.emit(EngineEvent::AttachmentsRead {
                conversation_id,
                attachments,
            });
        }
    }
}
