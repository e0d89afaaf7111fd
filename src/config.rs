//! Resolved adapter configuration.
//!
//! Both historical controller variants (echo-prompt vs. mode flag, with or without debug
//! dummy replies and config-dir override) map onto this one struct; new knobs are added as
//! further optional fields.

use std::env;
use std::path::{Path, PathBuf};

use crate::dummy::ReplyKind;
use crate::invocation::{InvocationOptions, RunMode};
use crate::prompt::RequestContext;

/// Bumped whenever a field with controller-visible behavior is added.
pub const CONFIG_VERSION: u32 = 2;

/// Directory name under the temp root used when no working directory is given.
pub const DEFAULT_WORKDIR_NAME: &str = "zsh-opencode-tab";

/// `<temp root>/zsh-opencode-tab`; the temp root honours `TMPDIR`.
pub fn default_workdir() -> PathBuf {
    env::temp_dir().join(DEFAULT_WORKDIR_NAME)
}

/// Trimmed value, or `None` when nothing is left.
pub fn blank_to_none(v: &str) -> Option<String> {
    Some(v.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Default)]
pub struct AdapterConfig {
    pub request: RequestContext,
    pub kind: ReplyKind,
    pub workdir: PathBuf,
    pub model: Option<String>,
    pub backend_url: Option<String>,
    pub run_mode: RunMode,
    pub agent: Option<String>,
    pub variant: Option<String>,
    pub title: Option<String>,
    pub log_level: Option<String>,
    pub print_logs: bool,
    pub delete_session: bool,
    pub config_dir: Option<PathBuf>,
    pub opencode_bin: Option<PathBuf>,
    pub debug_dummy: bool,
    pub debug_dummy_text: Option<String>,
    pub debug_dummy_file: Option<PathBuf>,
    pub emit_repro: bool,
}

impl AdapterConfig {
    pub fn version(&self) -> u32 {
        CONFIG_VERSION
    }

    pub fn invocation_options(&self, program: &Path) -> InvocationOptions {
        InvocationOptions {
            program: program.to_path_buf(),
            print_logs: self.print_logs,
            log_level: self.log_level.clone(),
            model: self.model.clone(),
            run_mode: self.run_mode,
            backend_url: self.backend_url.clone(),
            agent: self.agent.clone(),
            variant: self.variant.clone(),
            title: self.title.clone(),
            workdir: Some(self.workdir.clone()),
            config_dir: self.config_dir.clone(),
        }
    }

    /// Backend to clean up, when deletion was requested and a backend is known.
    pub fn cleanup_backend(&self) -> Option<&str> {
        if self.delete_session {
            self.backend_url.as_deref()
        } else {
            None
        }
    }
}
