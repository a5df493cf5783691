use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Attachment;

/// Opaque identifier assigned by the backend.
pub type ConversationId = String;

/// Title shown for conversations that have not been named yet.
pub const DEFAULT_CONVERSATION_TITLE: &str = "New Conversation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    First,
    Second,
    Third,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::First, Stage::Second, Stage::Third];

    pub fn number(self) -> u8 {
        match self {
            Stage::First => 1,
            Stage::Second => 2,
            Stage::Third => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageLoading {
    pub stage1: bool,
    pub stage2: bool,
    pub stage3: bool,
}

impl StageLoading {
    pub fn get(&self, stage: Stage) -> bool {
        match stage {
            Stage::First => self.stage1,
            Stage::Second => self.stage2,
            Stage::Third => self.stage3,
        }
    }

    pub fn set(&mut self, stage: Stage, loading: bool) {
        match stage {
            Stage::First => self.stage1 = loading,
            Stage::Second => self.stage2 = loading,
            Stage::Third => self.stage3 = loading,
        }
    }

    pub fn any(&self) -> bool {
        self.stage1 || self.stage2 || self.stage3
    }
}

/// One model's answer (stage 1) or the chairman's synthesis (stage 3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResponse {
    pub model: String,
    pub response: String,
}

/// One model's evaluation of the anonymised stage 1 answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRanking {
    pub model: String,
    pub ranking: String,
    #[serde(default)]
    pub parsed_ranking: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRanking {
    pub model: String,
    pub average_rank: f64,
    #[serde(default)]
    pub rankings_count: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StageMetadata {
    #[serde(default)]
    pub label_to_model: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub aggregate_rankings: Option<Vec<AggregateRanking>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserMessage {
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Assistant turn. Stage results and loading flags are written by transport
/// events as the backend progresses.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub stage1: Option<Vec<StageResponse>>,
    #[serde(default)]
    pub stage2: Option<Vec<PeerRanking>>,
    #[serde(default)]
    pub stage3: Option<StageResponse>,
    #[serde(skip)]
    pub loading: StageLoading,
    #[serde(default)]
    pub metadata: Option<StageMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssistantMessage {
    pub fn has_result(&self, stage: Stage) -> bool {
        match stage {
            Stage::First => self.stage1.is_some(),
            Stage::Second => self.stage2.is_some(),
            Stage::Third => self.stage3.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    User(UserMessage),
    Assistant(AssistantMessage),
}

impl Message {
    pub fn user(content: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Message::User(UserMessage {
            content: content.into(),
            attachments,
        })
    }

    /// Empty assistant turn appended right after a user message is sent.
    pub fn assistant_placeholder() -> Self {
        Message::Assistant(AssistantMessage::default())
    }

    pub fn as_assistant(&self) -> Option<&AssistantMessage> {
        match self {
            Message::Assistant(assistant) => Some(assistant),
            Message::User(_) => None,
        }
    }

    pub fn as_assistant_mut(&mut self) -> Option<&mut AssistantMessage> {
        match self {
            Message::Assistant(assistant) => Some(assistant),
            Message::User(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message_count: usize,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn empty(id: impl Into<ConversationId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            message_count: 0,
            messages: Vec::new(),
        }
    }

    pub fn title_label(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_CONVERSATION_TITLE)
    }

    /// The assistant turn that stream events target: the last message, if it
    /// is an assistant message.
    pub fn last_assistant_mut(&mut self) -> Option<&mut AssistantMessage> {
        self.messages.last_mut().and_then(Message::as_assistant_mut)
    }
}

/// List entry as returned by a conversation list refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleUpdate {
    pub title: String,
}

/// Progress notifications streamed by the backend for one submitted message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouncilEvent {
    Stage1Start,
    Stage1Complete {
        data: Vec<StageResponse>,
    },
    Stage2Start,
    Stage2Complete {
        data: Vec<PeerRanking>,
        #[serde(default)]
        metadata: StageMetadata,
    },
    Stage3Start,
    Stage3Complete {
        data: StageResponse,
    },
    TitleComplete {
        data: TitleUpdate,
    },
    Complete,
    Error {
        message: String,
    },
}
