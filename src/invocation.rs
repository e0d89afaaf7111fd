//! Argument vector for `opencode run --format json` and its copy/paste repro line.

use std::io;
use std::path::{Path, PathBuf};

use which::which;

use crate::util::exec::ExecRequest;
use crate::util::{dollar_quote, exec_arg, shell_escape, shell_join};

/// Agent executable looked up on `PATH` when no explicit binary is configured.
pub const AGENT_BINARY: &str = "opencode";

/// Child environment variable carrying the config-directory override.
pub const CONFIG_DIR_ENV: &str = "OPENCODE_CONFIG_DIR";

/// How the agent reaches its backend.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum RunMode {
    /// Start a fresh backend inside the agent process.
    #[default]
    Cold,
    /// Connect to an already-running backend (`--attach <url>`).
    Attach,
}

impl RunMode {
    /// `attach` (trimmed) selects `Attach`; blank or unrecognized values fall back to `Cold`.
    pub fn from_flag(value: &str) -> Self {
        match value.trim() {
            "attach" => RunMode::Attach,
            _ => RunMode::Cold,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Cold => "cold",
            RunMode::Attach => "attach",
        }
    }
}

/// Optional knobs of one agent run. `None` fields are left off the command line entirely.
#[derive(Debug, Clone, Default)]
pub struct InvocationOptions {
    pub program: PathBuf,
    pub print_logs: bool,
    pub log_level: Option<String>,
    pub model: Option<String>,
    pub run_mode: RunMode,
    pub backend_url: Option<String>,
    pub agent: Option<String>,
    pub variant: Option<String>,
    pub title: Option<String>,
    pub workdir: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
}

/// A fully assembled agent run: argv (program first, envelope last), working dir and env overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub argv: Vec<String>,
    pub workdir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

/// Assemble the argv in its fixed order:
/// program, `run --format json`, `--print-logs`, `--log-level`, `--model`, `--attach`,
/// `--agent`, `--variant`, `--title`, then the envelope.
pub fn build_invocation(opts: &InvocationOptions, envelope: &str) -> Invocation {
    let mut argv: Vec<String> = vec![
        opts.program.to_string_lossy().into_owned(),
        "run".to_string(),
        "--format".to_string(),
        "json".to_string(),
    ];

    if opts.print_logs {
        argv.push("--print-logs".to_string());
    }
    if let Some(level) = non_empty(&opts.log_level) {
        argv.push("--log-level".to_string());
        argv.push(exec_arg(level).to_string());
    }
    if let Some(model) = non_empty(&opts.model) {
        argv.push("--model".to_string());
        argv.push(exec_arg(model).to_string());
    }
    if opts.run_mode == RunMode::Attach {
        if let Some(url) = non_empty(&opts.backend_url) {
            argv.push("--attach".to_string());
            argv.push(exec_arg(url).to_string());
        }
    }
    if let Some(agent) = non_empty(&opts.agent) {
        argv.push("--agent".to_string());
        argv.push(exec_arg(agent).to_string());
    }
    if let Some(variant) = non_empty(&opts.variant) {
        argv.push("--variant".to_string());
        argv.push(exec_arg(variant).to_string());
    }
    if let Some(title) = non_empty(&opts.title) {
        argv.push("--title".to_string());
        argv.push(exec_arg(title).to_string());
    }
    argv.push(exec_arg(envelope).to_string());

    let mut env = Vec::new();
    if let Some(dir) = &opts.config_dir {
        env.push((CONFIG_DIR_ENV.to_string(), dir.display().to_string()));
    }

    Invocation {
        argv,
        workdir: opts.workdir.clone(),
        env,
    }
}

impl Invocation {
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Single-line rendering a human can paste into zsh/bash to rerun this exact invocation.
    pub fn repro_command(&self) -> String {
        let mut out = String::new();
        if let Some(dir) = &self.workdir {
            out.push_str("cd ");
            out.push_str(&shell_escape(&dir.display().to_string()));
            out.push_str(" && ");
        }
        for (key, value) in &self.env {
            out.push_str(key);
            out.push('=');
            out.push_str(&shell_escape(value));
            out.push(' ');
        }
        // The envelope spans lines; only $'..' keeps it on one line.
        if let Some((envelope, head)) = self.argv.split_last() {
            out.push_str(&shell_join(head));
            out.push(' ');
            out.push_str(&dollar_quote(envelope));
        }
        out
    }

    pub fn to_exec_request(&self) -> ExecRequest {
        let mut req = ExecRequest::new(self.program()).args(self.argv.iter().skip(1));
        if let Some(dir) = &self.workdir {
            req = req.cwd(dir);
        }
        for (key, value) in &self.env {
            req = req.env(key, value);
        }
        req
    }
}

/// Resolve the agent executable: an explicit binary (name or path) or `opencode` on `PATH`.
pub fn locate_agent_binary(explicit: Option<&Path>) -> io::Result<PathBuf> {
    let wanted = explicit.unwrap_or_else(|| Path::new(AGENT_BINARY));
    if let Ok(p) = which(wanted) {
        return Ok(p);
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} not found in PATH", wanted.display()),
    ))
}

/// Program to show in repro lines: the resolved path, or the bare name when lookup fails.
pub fn agent_program(explicit: Option<&Path>) -> PathBuf {
    locate_agent_binary(explicit).unwrap_or_else(|_| {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(AGENT_BINARY))
    })
}
