use council_core::{
    running_caption, short_model_name, ActiveConversationView, AppViewModel, AssistantView,
    AttachmentChipView, AttachmentKind, ConversationRowView, ItemState, MessageView, Stage,
};

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec!["== Conversations ==".to_string()];
    if view.conversations.is_empty() {
        lines.push("  (none, /new to start)".to_string());
    }
    lines.extend(view.conversations.iter().map(row_line));

    match &view.active {
        Some(active) => render_active(active, &mut lines),
        None => lines.push("No conversation selected.".to_string()),
    }
    if view.is_loading {
        lines.push("(waiting for the council...)".to_string());
    }
    lines
}

fn row_line(row: &ConversationRowView) -> String {
    let marker = if row.is_active { '*' } else { ' ' };
    let suffix = match &row.state {
        ItemState::Idle => String::new(),
        ItemState::MenuOpen => "  [menu: /rename /delete]".to_string(),
        ItemState::Renaming { draft } => format!("  [rename: {draft}_]"),
        ItemState::ConfirmingDelete => "  [delete? /yes /no]".to_string(),
    };
    format!(
        "{marker} {}  {} ({} messages){suffix}",
        row.id, row.title, row.message_count
    )
}

fn render_active(active: &ActiveConversationView, lines: &mut Vec<String>) {
    lines.push(format!("== {} ==", active.title));
    for message in &active.messages {
        match message {
            MessageView::User {
                content,
                attachments,
            } => {
                lines.push(format!("you: {content}"));
                lines.extend(attachments.iter().map(|chip| format!("  {}", chip_label(chip))));
            }
            MessageView::Assistant(assistant) => render_assistant(assistant, lines),
        }
    }

    let status = if active.is_sending {
        " (sending)"
    } else if active.can_send {
        ""
    } else {
        " (empty)"
    };
    lines.push(format!("draft{status}: {}", active.draft_text));
    for (index, chip) in active.draft_attachments.iter().enumerate() {
        lines.push(format!("  {}. {}", index + 1, chip_label(chip)));
    }
}

fn render_assistant(assistant: &AssistantView, lines: &mut Vec<String>) {
    lines.push("council:".to_string());
    for stage in Stage::ALL {
        let verdict = assistant.verdict(stage);
        if verdict.shows_indicator() {
            lines.push(format!("  {}", running_caption(stage)));
        }
        if !verdict.shows_result() {
            continue;
        }
        match stage {
            Stage::First => {
                for response in &assistant.responses {
                    lines.push(format!(
                        "  [1] {}: {}",
                        short_model_name(&response.model),
                        response.response
                    ));
                }
            }
            Stage::Second => {
                let Some(rankings) = &assistant.rankings else {
                    continue;
                };
                for ranking in &rankings.rankings {
                    lines.push(format!(
                        "  [2] {}: {}",
                        short_model_name(&ranking.model),
                        ranking.order.join(" > ")
                    ));
                    lines.extend(ranking.text.lines().map(|line| format!("      {line}")));
                }
                for (place, aggregate) in rankings.aggregate.iter().enumerate() {
                    lines.push(format!(
                        "      #{} {} avg {:.2} ({} votes)",
                        place + 1,
                        short_model_name(&aggregate.model),
                        aggregate.average_rank,
                        aggregate.rankings_count
                    ));
                }
            }
            Stage::Third => {
                if let Some(answer) = &assistant.final_answer {
                    lines.push(format!(
                        "  [3] {}: {}",
                        short_model_name(&answer.model),
                        answer.response
                    ));
                }
            }
        }
    }
    if let Some(error) = &assistant.error {
        lines.push(format!("  error: {error}"));
    }
}

fn chip_label(chip: &AttachmentChipView) -> String {
    match chip.kind {
        AttachmentKind::Image => format!("[image {}]", chip.filename),
        AttachmentKind::File => {
            format!("[{} {}]", chip.extension.to_ascii_uppercase(), chip.filename)
        }
    }
}
