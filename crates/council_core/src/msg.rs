use crate::{
    Attachment, Conversation, ConversationId, ConversationSummary, CouncilEvent, SelectedFile,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the message input of the active conversation.
    DraftTextChanged(String),
    /// User picked files to attach to the active conversation's draft.
    FilesSelected(Vec<SelectedFile>),
    /// Engine finished reading a batch; attachments are in selection order.
    AttachmentsIngested {
        conversation_id: ConversationId,
        attachments: Vec<Attachment>,
    },
    /// User removed the draft attachment at this position.
    RemoveAttachment(usize),
    /// Send text and attachments to the active conversation.
    SendMessage {
        text: String,
        attachments: Vec<Attachment>,
    },
    /// Send the active conversation's draft.
    SubmitDraft,
    SelectConversation(ConversationId),
    NewConversation,
    DeleteConversation(ConversationId),
    RenameConversation {
        id: ConversationId,
        title: String,
    },

    /// Conversation list: menu button on a row.
    MenuButtonClicked(ConversationId),
    /// Conversation list: pointer activation outside the open menu.
    PointerDownOutsideMenu,
    RenameMenuItemClicked(ConversationId),
    RenameDraftChanged {
        id: ConversationId,
        text: String,
    },
    RenameKeyPressed {
        id: ConversationId,
        key: RenameKey,
    },
    RenameInputBlurred(ConversationId),
    DeleteMenuItemClicked(ConversationId),
    DeleteConfirmed(ConversationId),
    DeleteCancelled(ConversationId),
    /// Click on a row body; ignored while the row is renaming or confirming.
    RowClicked(ConversationId),

    /// Transport: fresh conversation list.
    ConversationsLoaded(Vec<ConversationSummary>),
    /// Transport: full record of one conversation.
    ConversationLoaded(Conversation),
    /// Transport: backend created a conversation.
    ConversationCreated(ConversationSummary),
    /// Transport: stream event for the conversation's latest turn.
    Council {
        conversation_id: ConversationId,
        event: CouncilEvent,
    },
    /// Transport: the submission never reached the backend.
    SendFailed {
        conversation_id: ConversationId,
        reason: String,
    },

    /// Shell is tearing the list down.
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameKey {
    Enter,
    Escape,
}
