//! Canned replies for `--debug-dummy`, which exercises the controller without running the agent.

use std::fs;
use std::path::Path;

/// What the controller asked for; only changes the canned dummy reply.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum ReplyKind {
    #[default]
    Command,
    Explain,
}

impl ReplyKind {
    /// `explain` (trimmed) selects `Explain`; anything else, blank included, is `Command`.
    pub fn from_flag(value: &str) -> Self {
        match value.trim() {
            "explain" => ReplyKind::Explain,
            _ => ReplyKind::Command,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyKind::Command => "command",
            ReplyKind::Explain => "explain",
        }
    }
}

pub const DUMMY_COMMAND: &str = "# This is a dummy command,\nls";
pub const DUMMY_EXPLANATION: &str = "This is a dummy explanation,\nwhich extends over two lines.";

/// Pick the dummy reply: explicit text, else file contents, else the canned text for `kind`.
pub fn dummy_reply(kind: ReplyKind, text: Option<&str>, file: Option<&Path>) -> String {
    let mut reply = text.map(str::trim).unwrap_or_default().to_string();

    if reply.is_empty() {
        if let Some(path) = file {
            match fs::read_to_string(path) {
                Ok(s) => reply = s.trim().to_string(),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "cannot read dummy reply file");
                }
            }
        }
    }

    if reply.is_empty() {
        reply = match kind {
            ReplyKind::Explain => DUMMY_EXPLANATION,
            ReplyKind::Command => DUMMY_COMMAND,
        }
        .to_string();
    }
    reply
}
