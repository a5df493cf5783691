use crate::{Attachment, ConversationId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read and encode these files, in this order, for the given draft.
    ReadAttachments {
        conversation_id: ConversationId,
        files: Vec<SelectedFile>,
    },
    /// Clear the file picker so the same file can be chosen again.
    ResetFilePicker,
    /// Show a warning to the user.
    WarnUser { message: String },
    SubmitMessage {
        conversation_id: ConversationId,
        content: String,
        attachments: Vec<Attachment>,
    },
    CreateConversation,
    LoadConversation { id: ConversationId },
    RenameConversation { id: ConversationId, title: String },
    DeleteConversation { id: ConversationId },
    /// Focus the inline rename input and select its content.
    FocusRenameInput { id: ConversationId },
    /// Start listening for pointer activations outside this row's menu.
    WatchPointerOutsideMenu { id: ConversationId },
    /// Stop listening for pointer activations outside the menu.
    ReleasePointerWatch,
}
