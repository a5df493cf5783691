use std::collections::BTreeMap;

use crate::{
    AggregateRanking, AppState, AssistantMessage, Attachment, AttachmentKind, Conversation,
    ConversationId, ItemState, Message, PeerRanking, Stage, StageResponse,
};

/// What to show for one stage of an assistant turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageVerdict {
    Hidden,
    Running,
    Complete,
    /// The stage is running again while an earlier result is still present.
    RunningWithPrevious,
}

impl StageVerdict {
    pub fn from_flags(loading: bool, has_result: bool) -> Self {
        match (loading, has_result) {
            (false, false) => Self::Hidden,
            (true, false) => Self::Running,
            (false, true) => Self::Complete,
            (true, true) => Self::RunningWithPrevious,
        }
    }

    pub fn of(message: &AssistantMessage, stage: Stage) -> Self {
        Self::from_flags(message.loading.get(stage), message.has_result(stage))
    }

    pub fn shows_indicator(self) -> bool {
        matches!(self, Self::Running | Self::RunningWithPrevious)
    }

    pub fn shows_result(self) -> bool {
        matches!(self, Self::Complete | Self::RunningWithPrevious)
    }
}

pub fn running_caption(stage: Stage) -> &'static str {
    match stage {
        Stage::First => "Running Stage 1: Collecting individual responses...",
        Stage::Second => "Running Stage 2: Peer rankings...",
        Stage::Third => "Running Stage 3: Final synthesis...",
    }
}

/// `openai/gpt-5.1` -> `gpt-5.1`; ids without a provider prefix are kept.
pub fn short_model_name(model: &str) -> &str {
    match model.split_once('/') {
        Some((_, rest)) if !rest.is_empty() => rest.split('/').next().unwrap_or(rest),
        _ => model,
    }
}

/// Replaces anonymous labels such as `Response A` with the bolded short
/// name of the model behind them.
pub fn deanonymize(text: &str, label_to_model: Option<&BTreeMap<String, String>>) -> String {
    let Some(map) = label_to_model else {
        return text.to_owned();
    };
    map.iter().fold(text.to_owned(), |acc, (label, model)| {
        acc.replace(label.as_str(), &format!("**{}**", short_model_name(model)))
    })
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub conversations: Vec<ConversationRowView>,
    pub active: Option<ActiveConversationView>,
    pub is_loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationRowView {
    pub id: ConversationId,
    pub title: String,
    pub message_count: usize,
    pub is_active: bool,
    pub state: ItemState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveConversationView {
    pub id: ConversationId,
    pub title: String,
    pub messages: Vec<MessageView>,
    pub draft_text: String,
    pub draft_attachments: Vec<AttachmentChipView>,
    pub is_sending: bool,
    pub can_send: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentChipView {
    pub kind: AttachmentKind,
    pub filename: String,
    pub extension: String,
    /// Data URI usable directly as an image source.
    pub data: String,
}

impl From<&Attachment> for AttachmentChipView {
    fn from(att: &Attachment) -> Self {
        Self {
            kind: att.kind(),
            filename: att.filename().to_owned(),
            extension: att.extension().to_owned(),
            data: att.data().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageView {
    User {
        content: String,
        attachments: Vec<AttachmentChipView>,
    },
    Assistant(AssistantView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantView {
    pub stage1: StageVerdict,
    pub stage2: StageVerdict,
    pub stage3: StageVerdict,
    pub responses: Vec<StageResponse>,
    pub rankings: Option<RankingsView>,
    pub final_answer: Option<StageResponse>,
    pub error: Option<String>,
}

impl AssistantView {
    pub fn verdict(&self, stage: Stage) -> StageVerdict {
        match stage {
            Stage::First => self.stage1,
            Stage::Second => self.stage2,
            Stage::Third => self.stage3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingsView {
    pub rankings: Vec<RankingView>,
    /// Empty when the backend sent no aggregate.
    pub aggregate: Vec<AggregateRanking>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingView {
    pub model: String,
    pub text: String,
    /// Parsed order, with labels resolved to short model names when known.
    pub order: Vec<String>,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let active_id = self.active_id();
        let conversations = self
            .conversations()
            .iter()
            .map(|c| ConversationRowView {
                id: c.id.clone(),
                title: c.title_label().to_owned(),
                message_count: c.message_count,
                is_active: Some(&c.id) == active_id,
                state: self.list_ui().item_state(&c.id),
            })
            .collect();

        AppViewModel {
            conversations,
            active: self.active_conversation().map(|c| self.active_view(c)),
            is_loading: self.is_loading(),
        }
    }

    fn active_view(&self, conversation: &Conversation) -> ActiveConversationView {
        let draft = self.draft(&conversation.id).cloned().unwrap_or_default();
        let is_sending = self.is_sending(&conversation.id);
        let has_input = !draft.text.trim().is_empty() || !draft.attachments.is_empty();
        ActiveConversationView {
            id: conversation.id.clone(),
            title: conversation.title_label().to_owned(),
            messages: conversation.messages.iter().map(message_view).collect(),
            draft_attachments: draft.attachments.iter().map(Into::into).collect(),
            draft_text: draft.text,
            is_sending,
            can_send: has_input && !is_sending,
        }
    }
}

fn message_view(message: &Message) -> MessageView {
    match message {
        Message::User(user) => MessageView::User {
            content: user.content.clone(),
            attachments: user.attachments.iter().map(Into::into).collect(),
        },
        Message::Assistant(assistant) => MessageView::Assistant(assistant_view(assistant)),
    }
}

fn assistant_view(message: &AssistantMessage) -> AssistantView {
    let metadata = message.metadata.as_ref();
    let label_to_model = metadata.and_then(|m| m.label_to_model.as_ref());
    let rankings = message.stage2.as_ref().map(|rankings| RankingsView {
        rankings: rankings
            .iter()
            .map(|r| ranking_view(r, label_to_model))
            .collect(),
        aggregate: metadata
            .and_then(|m| m.aggregate_rankings.clone())
            .unwrap_or_default(),
    });

    AssistantView {
        stage1: StageVerdict::of(message, Stage::First),
        stage2: StageVerdict::of(message, Stage::Second),
        stage3: StageVerdict::of(message, Stage::Third),
        responses: message.stage1.clone().unwrap_or_default(),
        rankings,
        final_answer: message.stage3.clone(),
        error: message.error.clone(),
    }
}

fn ranking_view(
    ranking: &PeerRanking,
    label_to_model: Option<&BTreeMap<String, String>>,
) -> RankingView {
    let order = ranking
        .parsed_ranking
        .iter()
        .map(|label| {
            label_to_model
                .and_then(|map| map.get(label))
                .map_or_else(|| label.clone(), |model| short_model_name(model).to_owned())
        })
        .collect();
    RankingView {
        model: ranking.model.clone(),
        text: deanonymize(&ranking.ranking, label_to_model),
        order,
    }
}
