//! Stand-in for the backend client: requests go out as JSON lines for a
//! driving process, and conversation creation is answered locally.

use std::io::{self, Write};

use council_core::{Attachment, ConversationId, ConversationSummary};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BackendRequest<'a> {
    SendMessage {
        conversation_id: &'a str,
        content: &'a str,
        attachments: &'a [Attachment],
    },
    LoadConversation {
        conversation_id: &'a str,
    },
    RenameConversation {
        conversation_id: &'a str,
        title: &'a str,
    },
    DeleteConversation {
        conversation_id: &'a str,
    },
}

pub struct LineTransport<W: Write> {
    out: W,
}

impl<W: Write> LineTransport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn send(&mut self, request: &BackendRequest<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, request)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    pub fn create_conversation(&self) -> ConversationSummary {
        ConversationSummary {
            id: new_conversation_id(),
            title: None,
            message_count: 0,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn new_conversation_id() -> ConversationId {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn requests_are_tagged_json_lines() {
        let mut transport = LineTransport::new(Vec::new());
        let attachments = vec![Attachment::new(
            "image/png",
            "data:image/png;base64,AA==",
            "a.png",
        )];
        transport
            .send(&BackendRequest::SendMessage {
                conversation_id: "c1",
                content: "hi",
                attachments: &attachments,
            })
            .unwrap();
        transport
            .send(&BackendRequest::DeleteConversation {
                conversation_id: "c1",
            })
            .unwrap();

        let out = String::from_utf8(transport.into_inner()).unwrap();
        let lines: Vec<Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(
            lines,
            vec![
                json!({
                    "op": "send_message",
                    "conversation_id": "c1",
                    "content": "hi",
                    "attachments": [{
                        "type": "image",
                        "mimeType": "image/png",
                        "data": "data:image/png;base64,AA==",
                        "filename": "a.png"
                    }]
                }),
                json!({"op": "delete_conversation", "conversation_id": "c1"}),
            ]
        );
    }

    #[test]
    fn created_conversations_get_distinct_ids() {
        let transport = LineTransport::new(io::sink());
        let a = transport.create_conversation();
        let b = transport.create_conversation();
        assert_ne!(a.id, b.id);
        assert_eq!(a.message_count, 0);
        assert!(a.title.is_none());
    }
}
