use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

use anyhow::{Context, Result};

/// Runs one agent process to completion and captures both output streams.
///
/// There is no timeout: the agent either finishes or the caller waits with it.
#[derive(Debug, Clone, Default)]
pub struct ExecService;

impl ExecService {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, request: ExecRequest) -> Result<ExecOutput> {
        if let Some(ref cwd) = request.cwd {
            fs::create_dir_all(cwd)
                .with_context(|| format!("failed to create working directory {}", cwd.display()))?;
        }

        let mut cmd = Command::new(&request.program);
        for arg in &request.args {
            cmd.arg(arg);
        }
        if let Some(ref cwd) = request.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in &request.env {
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::debug!(program = ?request.program, args = request.args.len(), "spawning agent");
        let started = Instant::now();
        let child = cmd.spawn().map_err(|e| {
            let kind = e.kind();
            anyhow::Error::new(io::Error::new(
                kind,
                format!("failed to spawn {:?}: {e}", request.program),
            ))
        })?;

        // Reads stdout and stderr concurrently, so a chatty stderr cannot stall the child.
        let output = child
            .wait_with_output()
            .context("failed to wait for process")?;

        tracing::debug!(
            status = ?output.status,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "agent finished"
        );

        Ok(ExecOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[derive(Debug, Default)]
pub struct ExecRequest {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    env: Vec<(OsString, OsString)>,
}

impl ExecRequest {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

#[derive(Debug)]
pub struct ExecOutput {
    pub status: std::process::ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ExecOutput {
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}
