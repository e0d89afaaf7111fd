//! opencode-tab: bridge between a zsh line-editor widget and `opencode run --format json`.
//!
//! The controller passes a natural-language request; this crate wraps it in an envelope,
//! runs the agent, collapses its NDJSON event stream into plain text plus a session id and
//! writes one unit-separator framed line back.

pub mod adapter;
mod color;
pub mod config;
pub mod dummy;
mod errors;
pub mod events;
pub mod invocation;
pub mod prompt;
pub mod protocol;
pub mod session;
mod telemetry;
pub mod util;

pub use color::*;
pub use config::{blank_to_none, default_workdir, AdapterConfig, CONFIG_VERSION};
pub use dummy::ReplyKind;
pub use errors::*;
pub use events::{collapse_output, parse_events, EventSummary};
pub use invocation::{build_invocation, locate_agent_binary, Invocation, InvocationOptions, RunMode};
pub use prompt::{render_envelope, RequestContext};
pub use protocol::{frame, ResultRecord, UNIT_SEPARATOR};
pub use session::delete_session;
pub use telemetry::telemetry_init;
pub use util::{dollar_quote, shell_escape, strip_ansi};
