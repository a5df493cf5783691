//! Parses stdin lines into shell commands.
//!
//! Plain text becomes the draft and is submitted. Slash commands map onto the
//! list-item and transport messages the pure core understands.

use std::path::PathBuf;

use council_core::{Conversation, ConversationSummary, CouncilEvent, Msg, RenameKey};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Dispatch(Vec<Msg>),
    /// Files to run through selection before dispatch.
    Attach(Vec<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command /{0} (try /help)")]
    Unknown(String),
    #[error("/{command} expects {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },
    #[error("'{0}' is not an attachment number")]
    BadIndex(String),
    #[error("invalid stream event: {0}")]
    BadEvent(String),
    #[error("invalid {what} payload: {reason}")]
    BadPayload { what: &'static str, reason: String },
}

pub const HELP: &str = "\
text                  set the draft and send it
/new                  create a conversation
/select <id>          open a conversation
/attach <path>...     attach files to the draft
/remove <n>           remove draft attachment n
/menu <id>            toggle a row's menu
/outside              click outside the open menu
/rename <id>          rename from the open menu
/title <id> <text>    edit the rename draft
/enter <id>           commit the rename
/escape <id>          discard the rename
/blur <id>            leave the rename input
/delete <id>          delete from the open menu
/yes <id>, /no <id>   answer the delete prompt
/event <id> <json>    feed a backend stream event
/list <json>          replace the list with backend summaries
/loaded <json>        deliver a full conversation record
/fail <id> <reason>   report a failed submission
/quit                 exit";

/// Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }
    let Some(body) = line.trim_start().strip_prefix('/') else {
        return Ok(Some(ShellCommand::Dispatch(vec![
            Msg::DraftTextChanged(line.to_string()),
            Msg::SubmitDraft,
        ])));
    };

    let (name, rest) = split_word(body);
    let dispatch = |msg: Msg| -> Result<Option<ShellCommand>, CommandError> {
        Ok(Some(ShellCommand::Dispatch(vec![msg])))
    };

    match name {
        "new" => dispatch(Msg::NewConversation),
        "select" => dispatch(Msg::RowClicked(id_arg(name, rest)?)),
        "attach" => {
            let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
            if paths.is_empty() {
                return Err(missing(name, "one or more file paths"));
            }
            Ok(Some(ShellCommand::Attach(paths)))
        }
        "remove" => {
            let raw = split_word(rest).0;
            if raw.is_empty() {
                return Err(missing(name, "an attachment number"));
            }
            // Chips are numbered from 1 on screen.
            match raw.parse::<usize>() {
                Ok(n) if n > 0 => dispatch(Msg::RemoveAttachment(n - 1)),
                _ => Err(CommandError::BadIndex(raw.to_string())),
            }
        }
        "menu" => dispatch(Msg::MenuButtonClicked(id_arg(name, rest)?)),
        "outside" => dispatch(Msg::PointerDownOutsideMenu),
        "rename" => dispatch(Msg::RenameMenuItemClicked(id_arg(name, rest)?)),
        "title" => {
            let id = id_arg(name, rest)?;
            let text = split_word(rest).1;
            dispatch(Msg::RenameDraftChanged {
                id,
                text: text.to_string(),
            })
        }
        "enter" => dispatch(Msg::RenameKeyPressed {
            id: id_arg(name, rest)?,
            key: RenameKey::Enter,
        }),
        "escape" => dispatch(Msg::RenameKeyPressed {
            id: id_arg(name, rest)?,
            key: RenameKey::Escape,
        }),
        "blur" => dispatch(Msg::RenameInputBlurred(id_arg(name, rest)?)),
        "delete" => dispatch(Msg::DeleteMenuItemClicked(id_arg(name, rest)?)),
        "yes" => dispatch(Msg::DeleteConfirmed(id_arg(name, rest)?)),
        "no" => dispatch(Msg::DeleteCancelled(id_arg(name, rest)?)),
        "event" => {
            let conversation_id = id_arg(name, rest)?;
            let json = split_word(rest).1;
            if json.is_empty() {
                return Err(missing(name, "<id> <json>"));
            }
            let event: CouncilEvent = serde_json::from_str(json)
                .map_err(|err| CommandError::BadEvent(err.to_string()))?;
            dispatch(Msg::Council {
                conversation_id,
                event,
            })
        }
        "list" => {
            let summaries: Vec<ConversationSummary> = payload(name, "conversation list", rest)?;
            dispatch(Msg::ConversationsLoaded(summaries))
        }
        "loaded" => {
            let conversation: Conversation = payload(name, "conversation", rest)?;
            dispatch(Msg::ConversationLoaded(conversation))
        }
        "fail" => {
            let conversation_id = id_arg(name, rest)?;
            let reason = match split_word(rest).1 {
                "" => "unknown error",
                reason => reason,
            };
            dispatch(Msg::SendFailed {
                conversation_id,
                reason: reason.to_string(),
            })
        }
        "help" => Ok(Some(ShellCommand::Help)),
        "quit" | "exit" => Ok(Some(ShellCommand::Quit)),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

fn id_arg(command: &str, rest: &str) -> Result<String, CommandError> {
    match split_word(rest).0 {
        "" => Err(missing(command, "a conversation id")),
        id => Ok(id.to_string()),
    }
}

fn payload<T: serde::de::DeserializeOwned>(
    command: &str,
    what: &'static str,
    json: &str,
) -> Result<T, CommandError> {
    if json.is_empty() {
        return Err(missing(command, "a JSON payload"));
    }
    serde_json::from_str(json).map_err(|err| CommandError::BadPayload {
        what,
        reason: err.to_string(),
    })
}

fn missing(command: &str, expected: &'static str) -> CommandError {
    CommandError::MissingArgument {
        command: command.to_string(),
        expected,
    }
}
