//! Council client core: pure conversation state machine and view-model helpers.
mod attachment;
mod conversation;
mod effect;
mod list_ui;
mod msg;
mod state;
mod update;
mod view_model;

pub use attachment::{
    is_accepted_mime, Attachment, AttachmentKind, SelectedFile, ACCEPTED_MIME_PATTERNS,
    MAX_ATTACHMENT_BYTES,
};
pub use conversation::{
    AggregateRanking, AssistantMessage, Conversation, ConversationId, ConversationSummary,
    CouncilEvent, Message, PeerRanking, Stage, StageLoading, StageMetadata, StageResponse,
    TitleUpdate, UserMessage, DEFAULT_CONVERSATION_TITLE,
};
pub use effect::Effect;
pub use list_ui::{ItemState, ListUiState};
pub use msg::{Msg, RenameKey};
pub use state::{AppState, Draft};
pub use update::update;
pub use view_model::{
    deanonymize, running_caption, short_model_name, ActiveConversationView, AppViewModel,
    AssistantView, AttachmentChipView, ConversationRowView, MessageView, RankingView,
    RankingsView, StageVerdict,
};
