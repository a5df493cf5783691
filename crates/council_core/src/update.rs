use crate::list_ui::MenuToggle;
use crate::{AppState, Attachment, Effect, Msg, RenameKey};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DraftTextChanged(text) => {
            state.set_draft_text(text);
            Vec::new()
        }
        Msg::FilesSelected(files) => {
            let Some(conversation_id) = state.active_id().cloned() else {
                return (state, Vec::new());
            };
            if files.is_empty() {
                return (state, Vec::new());
            }
            let limit = size_label(state.max_attachment_bytes());
            let (accepted, oversized) = state.partition_selection(files);
            let mut effects: Vec<Effect> = oversized
                .into_iter()
                .map(|name| Effect::WarnUser {
                    message: format!("File {name} is too large (max {limit})"),
                })
                .collect();
            if !accepted.is_empty() {
                effects.push(Effect::ReadAttachments {
                    conversation_id,
                    files: accepted,
                });
            }
            effects.push(Effect::ResetFilePicker);
            effects
        }
        Msg::AttachmentsIngested {
            conversation_id,
            attachments,
        } => {
            state.append_attachments(&conversation_id, attachments);
            Vec::new()
        }
        Msg::RemoveAttachment(index) => {
            state.remove_attachment(index);
            Vec::new()
        }
        Msg::SendMessage { text, attachments } => send(&mut state, text, attachments),
        Msg::SubmitDraft => {
            let Some((id, draft)) = state.take_active_draft() else {
                return (state, Vec::new());
            };
            let effects = send(&mut state, draft.text.clone(), draft.attachments.clone());
            if effects.is_empty() {
                state.restore_draft(id, draft);
            }
            effects
        }
        Msg::SelectConversation(id) => select(&mut state, id),
        Msg::NewConversation => vec![Effect::CreateConversation],
        Msg::DeleteConversation(id) => delete(&mut state, id),
        Msg::RenameConversation { id, title } => rename(&mut state, id, &title),

        Msg::MenuButtonClicked(id) => match state.list_ui.toggle_menu(&id) {
            MenuToggle::Opened { previous } => {
                state.mark_dirty();
                let mut effects = Vec::with_capacity(2);
                if previous.is_some() {
                    effects.push(Effect::ReleasePointerWatch);
                }
                effects.push(Effect::WatchPointerOutsideMenu { id });
                effects
            }
            MenuToggle::Closed => {
                state.mark_dirty();
                vec![Effect::ReleasePointerWatch]
            }
            MenuToggle::Ignored => Vec::new(),
        },
        Msg::PointerDownOutsideMenu | Msg::Shutdown => close_menu(&mut state),
        Msg::RenameMenuItemClicked(id) => {
            let Some(seed) = state.conversation(&id).map(|c| c.title_label().to_owned()) else {
                return (state, Vec::new());
            };
            if state.list_ui.start_rename(&id, seed) {
                state.mark_dirty();
                vec![Effect::ReleasePointerWatch, Effect::FocusRenameInput { id }]
            } else {
                Vec::new()
            }
        }
        Msg::RenameDraftChanged { id, text } => {
            if state.list_ui.set_rename_draft(&id, text) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RenameKeyPressed {
            id,
            key: RenameKey::Enter,
        }
        | Msg::RenameInputBlurred(id) => match state.list_ui.finish_rename(&id) {
            Some(draft) => {
                state.mark_dirty();
                rename(&mut state, id, &draft)
            }
            None => Vec::new(),
        },
        Msg::RenameKeyPressed {
            id,
            key: RenameKey::Escape,
        } => {
            if state.list_ui.finish_rename(&id).is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DeleteMenuItemClicked(id) => {
            if state.list_ui.start_delete(&id) {
                state.mark_dirty();
                vec![Effect::ReleasePointerWatch]
            } else {
                Vec::new()
            }
        }
        Msg::DeleteConfirmed(id) => {
            if state.list_ui.end_delete(&id) {
                state.mark_dirty();
                delete(&mut state, id)
            } else {
                Vec::new()
            }
        }
        Msg::DeleteCancelled(id) => {
            if state.list_ui.end_delete(&id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RowClicked(id) => {
            if state.list_ui.blocks_selection(&id) {
                Vec::new()
            } else {
                select(&mut state, id)
            }
        }

        Msg::ConversationsLoaded(summaries) => {
            if state.replace_list(summaries) {
                vec![Effect::ReleasePointerWatch]
            } else {
                Vec::new()
            }
        }
        Msg::ConversationLoaded(conversation) => {
            state.replace_conversation(conversation);
            Vec::new()
        }
        Msg::ConversationCreated(summary) => {
            state.insert_created(summary);
            Vec::new()
        }
        Msg::Council {
            conversation_id,
            event,
        } => {
            state.apply_council_event(&conversation_id, event);
            Vec::new()
        }
        Msg::SendFailed {
            conversation_id,
            reason,
        } => {
            if state.roll_back_send(&conversation_id) {
                vec![Effect::WarnUser {
                    message: format!("Failed to send message: {reason}"),
                }]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}

const MIB: u64 = 1024 * 1024;

/// `5MB` for whole mebibytes, one decimal above 1 MiB, plain bytes below.
fn size_label(bytes: u64) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= MIB {
        format!("{:.1}MB", bytes as f64 / MIB as f64)
    } else {
        format!("{bytes} bytes")
    }
}

fn send(state: &mut AppState, text: String, attachments: Vec<Attachment>) -> Vec<Effect> {
    match state.send(&text, &attachments) {
        Some(conversation_id) => vec![Effect::SubmitMessage {
            conversation_id,
            content: text,
            attachments,
        }],
        None => Vec::new(),
    }
}

fn select(state: &mut AppState, id: String) -> Vec<Effect> {
    if state.select(&id) {
        vec![Effect::LoadConversation { id }]
    } else {
        Vec::new()
    }
}

fn rename(state: &mut AppState, id: String, title: &str) -> Vec<Effect> {
    match state.rename(&id, title) {
        Some(title) => vec![Effect::RenameConversation { id, title }],
        None => Vec::new(),
    }
}

fn delete(state: &mut AppState, id: String) -> Vec<Effect> {
    match state.delete(&id) {
        Some(had_open_menu) => {
            let mut effects = Vec::with_capacity(2);
            if had_open_menu {
                effects.push(Effect::ReleasePointerWatch);
            }
            effects.push(Effect::DeleteConversation { id });
            effects
        }
        None => Vec::new(),
    }
}

fn close_menu(state: &mut AppState) -> Vec<Effect> {
    if state.list_ui.close_menu() {
        state.mark_dirty();
        vec![Effect::ReleasePointerWatch]
    } else {
        Vec::new()
    }
}
