use std::collections::{BTreeMap, BTreeSet};

use crate::list_ui::ListUiState;
use crate::{
    AssistantMessage, Attachment, Conversation, ConversationId, ConversationSummary, CouncilEvent,
    Message, SelectedFile, Stage, MAX_ATTACHMENT_BYTES,
};

/// Unsent input of one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    conversations: Vec<Conversation>,
    active: Option<ConversationId>,
    drafts: BTreeMap<ConversationId, Draft>,
    in_flight: BTreeSet<ConversationId>,
    pub(crate) list_ui: ListUiState,
    max_attachment_bytes: u64,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            conversations: Vec::new(),
            active: None,
            drafts: BTreeMap::new(),
            in_flight: BTreeSet::new(),
            list_ui: ListUiState::default(),
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attachment_bytes(mut self, max_bytes: u64) -> Self {
        self.max_attachment_bytes = max_bytes;
        self
    }

    pub fn max_attachment_bytes(&self) -> u64 {
        self.max_attachment_bytes
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    fn conversation_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    pub fn active_id(&self) -> Option<&ConversationId> {
        self.active.as_ref()
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active.as_deref().and_then(|id| self.conversation(id))
    }

    pub fn draft(&self, id: &str) -> Option<&Draft> {
        self.drafts.get(id)
    }

    pub fn active_draft(&self) -> Option<&Draft> {
        self.active.as_deref().and_then(|id| self.drafts.get(id))
    }

    pub fn is_sending(&self, id: &str) -> bool {
        self.in_flight.contains(id)
    }

    /// True while any conversation has a send outstanding.
    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn list_ui(&self) -> &ListUiState {
        &self.list_ui
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_draft_text(&mut self, text: String) -> bool {
        let Some(id) = self.active.clone() else {
            return false;
        };
        self.drafts.entry(id).or_default().text = text;
        self.mark_dirty();
        true
    }

    /// Splits a selection into files small enough to read and the names of
    /// files over the ceiling, both in selection order.
    pub(crate) fn partition_selection(
        &self,
        files: Vec<SelectedFile>,
    ) -> (Vec<SelectedFile>, Vec<String>) {
        let mut accepted = Vec::with_capacity(files.len());
        let mut oversized = Vec::new();
        for file in files {
            if file.size > self.max_attachment_bytes {
                oversized.push(file.name);
            } else {
                accepted.push(file);
            }
        }
        (accepted, oversized)
    }

    pub(crate) fn append_attachments(&mut self, id: &str, attachments: Vec<Attachment>) -> bool {
        if attachments.is_empty() || self.conversation(id).is_none() {
            return false;
        }
        self.drafts
            .entry(id.to_owned())
            .or_default()
            .attachments
            .extend(attachments);
        self.mark_dirty();
        true
    }

    pub(crate) fn remove_attachment(&mut self, index: usize) -> bool {
        let Some(draft) = self.active.as_deref().and_then(|id| self.drafts.get_mut(id)) else {
            return false;
        };
        if index >= draft.attachments.len() {
            return false;
        }
        draft.attachments.remove(index);
        self.mark_dirty();
        true
    }

    /// Appends the user turn and an assistant placeholder to the active
    /// conversation. Returns the conversation id if the send was accepted.
    pub(crate) fn send(
        &mut self,
        text: &str,
        attachments: &[Attachment],
    ) -> Option<ConversationId> {
        if text.trim().is_empty() && attachments.is_empty() {
            return None;
        }
        let id = self.active.clone()?;
        if self.in_flight.contains(&id) {
            return None;
        }
        let conversation = self.conversation_mut(&id)?;
        conversation
            .messages
            .push(Message::user(text, attachments.to_vec()));
        conversation.messages.push(Message::assistant_placeholder());
        self.in_flight.insert(id.clone());
        self.mark_dirty();
        Some(id)
    }

    pub(crate) fn take_active_draft(&mut self) -> Option<(ConversationId, Draft)> {
        let id = self.active.clone()?;
        let draft = self.drafts.remove(&id).unwrap_or_default();
        Some((id, draft))
    }

    pub(crate) fn restore_draft(&mut self, id: ConversationId, draft: Draft) {
        if draft != Draft::default() {
            self.drafts.insert(id, draft);
        }
    }

    pub(crate) fn select(&mut self, id: &str) -> bool {
        if self.conversation(id).is_none() {
            return false;
        }
        self.active = Some(id.to_owned());
        self.mark_dirty();
        true
    }

    pub(crate) fn insert_created(&mut self, summary: ConversationSummary) {
        self.conversations.retain(|c| c.id != summary.id);
        let id = summary.id.clone();
        self.conversations.insert(
            0,
            Conversation {
                id: summary.id,
                title: summary.title,
                message_count: summary.message_count,
                messages: Vec::new(),
            },
        );
        self.active = Some(id);
        self.mark_dirty();
    }

    pub(crate) fn rename(&mut self, id: &str, title: &str) -> Option<String> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let conversation = self.conversation_mut(id)?;
        conversation.title = Some(title.to_owned());
        self.mark_dirty();
        Some(title.to_owned())
    }

    /// Removes a conversation and everything keyed by it. Returns true if the
    /// removed row had the open menu.
    pub(crate) fn delete(&mut self, id: &str) -> Option<bool> {
        let index = self.conversations.iter().position(|c| c.id == id)?;
        self.conversations.remove(index);
        Some(self.forget(id))
    }

    fn forget(&mut self, id: &str) -> bool {
        self.drafts.remove(id);
        self.in_flight.remove(id);
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        self.mark_dirty();
        self.list_ui.forget(id)
    }

    /// Rebuilds the list from a refresh, keeping already loaded messages.
    /// Returns true if the open menu belonged to a row that disappeared.
    pub(crate) fn replace_list(&mut self, summaries: Vec<ConversationSummary>) -> bool {
        let mut previous: BTreeMap<ConversationId, Conversation> = self
            .conversations
            .drain(..)
            .map(|c| (c.id.clone(), c))
            .collect();
        for summary in summaries {
            let messages = previous
                .remove(&summary.id)
                .map(|c| c.messages)
                .unwrap_or_default();
            self.conversations.push(Conversation {
                id: summary.id,
                title: summary.title,
                message_count: summary.message_count,
                messages,
            });
        }
        let mut released_menu = false;
        for id in previous.keys() {
            released_menu |= self.forget(id);
        }
        self.mark_dirty();
        released_menu
    }

    pub(crate) fn replace_conversation(&mut self, loaded: Conversation) -> bool {
        let sending = self.in_flight.contains(&loaded.id);
        let Some(conversation) = self.conversation_mut(&loaded.id) else {
            return false;
        };
        conversation.title = loaded.title;
        conversation.message_count = loaded.message_count;
        if !sending {
            conversation.messages = loaded.messages;
        }
        self.mark_dirty();
        true
    }

    /// Applies a stream event. Everything but the title update is dropped
    /// once the conversation's send has ended, so late events cannot touch a
    /// finished turn.
    pub(crate) fn apply_council_event(&mut self, id: &str, event: CouncilEvent) -> bool {
        let streaming = self.in_flight.contains(id);
        if !streaming && !matches!(event, CouncilEvent::TitleComplete { .. }) {
            return false;
        }
        let Some(conversation) = self.conversation_mut(id) else {
            return false;
        };
        let applied = match event {
            CouncilEvent::TitleComplete { data } => {
                conversation.title = Some(data.title);
                true
            }
            CouncilEvent::Complete => self.in_flight.remove(id),
            CouncilEvent::Error { message } => {
                if let Some(assistant) = conversation.last_assistant_mut() {
                    assistant.loading = Default::default();
                    assistant.error = Some(message);
                }
                self.in_flight.remove(id);
                true
            }
            CouncilEvent::Stage1Start => {
                on_last_assistant(conversation, |a| a.loading.set(Stage::First, true))
            }
            CouncilEvent::Stage1Complete { data } => on_last_assistant(conversation, |a| {
                a.stage1 = Some(data);
                a.loading.set(Stage::First, false);
            }),
            CouncilEvent::Stage2Start => {
                on_last_assistant(conversation, |a| a.loading.set(Stage::Second, true))
            }
            CouncilEvent::Stage2Complete { data, metadata } => {
                on_last_assistant(conversation, |a| {
                    a.stage2 = Some(data);
                    a.metadata = Some(metadata);
                    a.loading.set(Stage::Second, false);
                })
            }
            CouncilEvent::Stage3Start => {
                on_last_assistant(conversation, |a| a.loading.set(Stage::Third, true))
            }
            CouncilEvent::Stage3Complete { data } => on_last_assistant(conversation, |a| {
                a.stage3 = Some(data);
                a.loading.set(Stage::Third, false);
            }),
        };
        if applied {
            self.mark_dirty();
        }
        applied
    }

    /// Undoes the optimistic user/assistant pair of a send that never reached
    /// the backend.
    pub(crate) fn roll_back_send(&mut self, id: &str) -> bool {
        if !self.in_flight.remove(id) {
            return false;
        }
        if let Some(conversation) = self.conversation_mut(id) {
            let len = conversation.messages.len();
            let is_pending_pair = len >= 2
                && matches!(conversation.messages[len - 2], Message::User(_))
                && matches!(conversation.messages[len - 1], Message::Assistant(_));
            if is_pending_pair {
                conversation.messages.truncate(len - 2);
            }
        }
        self.mark_dirty();
        true
    }
}

fn on_last_assistant(
    conversation: &mut Conversation,
    apply: impl FnOnce(&mut AssistantMessage),
) -> bool {
    match conversation.last_assistant_mut() {
        Some(assistant) => {
            apply(assistant);
            true
        }
        None => false,
    }
}
