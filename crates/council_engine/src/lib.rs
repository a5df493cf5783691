//! Council engine: file reads, encoding and effect execution off the UI loop.
mod data_uri;
mod engine;
mod ingest;
mod reader;
mod types;

pub use data_uri::encode_data_uri;
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use ingest::ingest_batch;
pub use reader::{AttachmentReader, TokioFileReader};
pub use types::{EngineEvent, IngestSettings, ReadError};
