#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;

use council_core::{update, AppState, Attachment, ConversationSummary, Effect, Msg, SelectedFile};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(council_logging::initialize_for_tests);
}

pub fn summary(id: &str, title: Option<&str>) -> ConversationSummary {
    ConversationSummary {
        id: id.to_string(),
        title: title.map(str::to_string),
        message_count: 0,
    }
}

/// State with the given conversations created in order; the last one is active.
pub fn with_conversations(ids: &[&str]) -> AppState {
    ids.iter().fold(AppState::new(), |state, id| {
        apply(state, Msg::ConversationCreated(summary(id, None)))
    })
}

pub fn apply(state: AppState, msg: Msg) -> AppState {
    update(state, msg).0
}

pub fn apply_all(state: AppState, msgs: Vec<Msg>) -> (AppState, Vec<Effect>) {
    msgs.into_iter()
        .fold((state, Vec::new()), |(state, mut effects), msg| {
            let (state, new_effects) = update(state, msg);
            effects.extend(new_effects);
            (state, effects)
        })
}

pub fn selected(name: &str, size: u64, mime_type: &str) -> SelectedFile {
    SelectedFile {
        path: PathBuf::from(format!("/tmp/{name}")),
        name: name.to_string(),
        size,
        mime_type: mime_type.to_string(),
    }
}

pub fn image(name: &str) -> Attachment {
    Attachment::new("image/png", "data:image/png;base64,iVBORw0KGgo=", name)
}

pub fn text_file(name: &str) -> Attachment {
    Attachment::new("text/plain", "data:text/plain;base64,aGk=", name)
}
