//! Error mapping guide:
//! - Every `AdapterError` exits with 1 (`ExitCode::FAILURE`); clap usage errors keep clap's 2.
//! - Malformed agent output and session cleanup never become errors.
use std::fmt;
use std::io;

/// Failures that stop the adapter before a record is written.
#[derive(Debug)]
pub enum AdapterError {
    /// The agent executable could not be resolved; nothing was spawned.
    BinaryNotFound(String),
    Io(io::Error),
    Message(String),
}

impl From<io::Error> for AdapterError {
    fn from(e: io::Error) -> Self {
        AdapterError::Io(e)
    }
}

impl From<anyhow::Error> for AdapterError {
    fn from(e: anyhow::Error) -> Self {
        // Keep bare io errors typed; anything with context keeps its full message chain.
        if e.chain().nth(1).is_none() {
            return match e.downcast::<io::Error>() {
                Ok(ioe) => AdapterError::Io(ioe),
                Err(other) => AdapterError::Message(format!("{other:#}")),
            };
        }
        AdapterError::Message(format!("{e:#}"))
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_for(self))
    }
}

impl std::error::Error for AdapterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdapterError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Render a user-facing one-liner for stderr.
pub fn display_for(e: &AdapterError) -> String {
    match e {
        AdapterError::BinaryNotFound(name) => format!("{name} not found in PATH"),
        AdapterError::Io(ioe) => ioe.to_string(),
        AdapterError::Message(s) => s.clone(),
    }
}
