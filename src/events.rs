//! Collapse the NDJSON event stream of `opencode run --format json` into text plus session id.
//!
//! Lines that are blank, not JSON, or not JSON objects are skipped; the agent interleaves
//! plain diagnostics with events and one bad line must not lose the rest of the reply.

use serde_json::{Map, Value};

use crate::util::normalize_output;

const SESSION_ID_KEY: &str = "sessionID";
const TYPE_KEY: &str = "type";
const TEXT_EVENT: &str = "text";
const PART_KEY: &str = "part";
const PART_TEXT_KEY: &str = "text";

/// What a run of the agent produced, reduced to the two fields the controller needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSummary {
    /// All `text` part fragments, concatenated in stream order with no separator.
    pub text: String,
    /// Last non-empty `sessionID` seen; empty when none was.
    pub session_id: String,
    /// Number of `text` fragments that contributed to `text`.
    pub fragments: usize,
}

fn decode_object(line: &str) -> Option<Map<String, Value>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            tracing::trace!(error = %e, "skipping non-JSON line");
            None
        }
    }
}

fn text_fragment(event: &Map<String, Value>) -> Option<&str> {
    if event.get(TYPE_KEY).and_then(Value::as_str) != Some(TEXT_EVENT) {
        return None;
    }
    event
        .get(PART_KEY)
        .and_then(Value::as_object)?
        .get(PART_TEXT_KEY)
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
}

/// Fold every decodable event line into an [`EventSummary`].
///
/// Never fails: the worst case is an empty summary.
pub fn parse_events(raw: &str) -> EventSummary {
    raw.lines()
        .filter_map(decode_object)
        .fold(EventSummary::default(), |mut acc, event| {
            if let Some(sid) = event
                .get(SESSION_ID_KEY)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
            {
                acc.session_id = sid.to_string();
            }
            if let Some(fragment) = text_fragment(&event) {
                acc.text.push_str(fragment);
                acc.fragments += 1;
            }
            acc
        })
}

/// Normalize captured agent stdout and reduce it to the reply text and session id.
///
/// When the stream carried no text fragments the normalized raw output stands in for the
/// reply, so a non-JSON failure message still reaches the user. The result is trimmed.
pub fn collapse_output(raw: &str) -> EventSummary {
    let normalized = normalize_output(raw);
    let mut summary = parse_events(&normalized);
    let chosen = if summary.text.is_empty() {
        normalized.as_str()
    } else {
        summary.text.as_str()
    };
    summary.text = chosen.trim().to_string();
    summary
}
