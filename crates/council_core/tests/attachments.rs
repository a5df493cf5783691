mod common;

use common::{apply, image, init_logging, selected, text_file, with_conversations};
use council_core::{update, AppState, AttachmentKind, Effect, Msg, MAX_ATTACHMENT_BYTES};
use pretty_assertions::assert_eq;

fn draft_names(state: &AppState) -> Vec<String> {
    state
        .view()
        .active
        .expect("active conversation")
        .draft_attachments
        .into_iter()
        .map(|chip| chip.filename)
        .collect()
}

#[test]
fn oversized_files_warn_and_the_rest_are_read_in_order() {
    init_logging();
    let state = with_conversations(&["c1"]);
    let files = vec![
        selected("a.png", 10, "image/png"),
        selected("huge.pdf", MAX_ATTACHMENT_BYTES + 1, "application/pdf"),
        selected("b.txt", MAX_ATTACHMENT_BYTES, "text/plain"),
    ];

    let (_state, effects) = update(state, Msg::FilesSelected(files));

    assert_eq!(
        effects,
        vec![
            Effect::WarnUser {
                message: "File huge.pdf is too large (max 5MB)".to_string(),
            },
            Effect::ReadAttachments {
                conversation_id: "c1".to_string(),
                files: vec![
                    selected("a.png", 10, "image/png"),
                    selected("b.txt", MAX_ATTACHMENT_BYTES, "text/plain"),
                ],
            },
            Effect::ResetFilePicker,
        ]
    );
}

#[test]
fn all_oversized_still_resets_picker_without_reading() {
    init_logging();
    let state = with_conversations(&["c1"]).with_max_attachment_bytes(4);
    let (_state, effects) = update(
        state,
        Msg::FilesSelected(vec![selected("a.png", 5, "image/png")]),
    );

    assert_eq!(effects.len(), 2);
    assert!(matches!(effects[0], Effect::WarnUser { .. }));
    assert_eq!(effects[1], Effect::ResetFilePicker);
}

#[test]
fn small_ceilings_are_reported_in_bytes() {
    init_logging();
    let state = with_conversations(&["c1"]).with_max_attachment_bytes(1024);
    let (_state, effects) = update(
        state,
        Msg::FilesSelected(vec![selected("big.txt", 2048, "text/plain")]),
    );

    assert_eq!(
        effects[0],
        Effect::WarnUser {
            message: "File big.txt is too large (max 1024 bytes)".to_string(),
        }
    );
}

#[test]
fn same_file_can_be_selected_twice() {
    init_logging();
    let state = with_conversations(&["c1"]);
    let file = selected("a.png", 10, "image/png");
    let (state, first) = update(state, Msg::FilesSelected(vec![file.clone()]));
    let (_state, second) = update(state, Msg::FilesSelected(vec![file]));
    assert_eq!(first, second);
}

#[test]
fn ingested_batches_append_in_given_order() {
    init_logging();
    let state = with_conversations(&["c1"]);
    let state = apply(
        state,
        Msg::AttachmentsIngested {
            conversation_id: "c1".into(),
            attachments: vec![image("one.png"), text_file("two.txt")],
        },
    );
    let mut state = apply(
        state,
        Msg::AttachmentsIngested {
            conversation_id: "c1".into(),
            attachments: vec![image("three.png")],
        },
    );

    assert_eq!(draft_names(&state), vec!["one.png", "two.txt", "three.png"]);
    let kinds: Vec<_> = state
        .active_draft()
        .unwrap()
        .attachments
        .iter()
        .map(|a| a.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![AttachmentKind::Image, AttachmentKind::File, AttachmentKind::Image]
    );
    assert!(state.consume_dirty());
}

#[test]
fn ingest_lands_in_the_conversation_it_was_selected_in() {
    init_logging();
    let state = with_conversations(&["c1", "c2"]);
    assert_eq!(state.active_id().map(String::as_str), Some("c2"));

    let state = apply(
        state,
        Msg::AttachmentsIngested {
            conversation_id: "c1".into(),
            attachments: vec![image("late.png")],
        },
    );

    assert!(state.active_draft().is_none());
    assert_eq!(state.draft("c1").unwrap().attachments.len(), 1);
}

#[test]
fn ingest_for_deleted_conversation_is_dropped() {
    init_logging();
    let state = with_conversations(&["c1"]);
    let mut state = apply(state, Msg::DeleteConversation("c1".into()));
    assert!(state.consume_dirty());

    let (mut state, effects) = update(
        state,
        Msg::AttachmentsIngested {
            conversation_id: "c1".into(),
            attachments: vec![image("late.png")],
        },
    );
    assert!(effects.is_empty());
    assert!(state.draft("c1").is_none());
    assert!(!state.consume_dirty());
}

#[test]
fn remove_takes_out_exactly_one_and_keeps_order() {
    init_logging();
    let state = with_conversations(&["c1"]);
    let state = apply(
        state,
        Msg::AttachmentsIngested {
            conversation_id: "c1".into(),
            attachments: vec![image("a.png"), image("b.png"), image("c.png")],
        },
    );

    let state = apply(state, Msg::RemoveAttachment(1));
    assert_eq!(draft_names(&state), vec!["a.png", "c.png"]);

    let (state, effects) = update(state, Msg::RemoveAttachment(7));
    assert!(effects.is_empty());
    assert_eq!(draft_names(&state), vec!["a.png", "c.png"]);
}

#[test]
fn file_selection_without_active_conversation_is_ignored() {
    init_logging();
    let (_state, effects) = update(
        AppState::new(),
        Msg::FilesSelected(vec![selected("a.png", 10, "image/png")]),
    );
    assert!(effects.is_empty());
}
