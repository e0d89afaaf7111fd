#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub const BIN: &str = env!("CARGO_BIN_EXE_opencode-tab");

/// Temp dir holding a fake `opencode` script plus the files it reads and writes.
pub struct FakeAgent {
    pub dir: tempfile::TempDir,
}

impl FakeAgent {
    /// Fake agent that prints `stdout` and exits with `exit_code`.
    ///
    /// It records its argv (NUL-separated), cwd and `OPENCODE_CONFIG_DIR`.
    #[cfg(unix)]
    pub fn new(stdout: &str, exit_code: i32) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let bin_dir = dir.path().join("bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        std::fs::write(dir.path().join("reply.ndjson"), stdout).unwrap();

        let script = format!(
            "#!/bin/sh\n\
             printf '%s\\0' \"$@\" > '{root}/args'\n\
             pwd > '{root}/cwd'\n\
             printf '%s' \"$OPENCODE_CONFIG_DIR\" > '{root}/config_dir'\n\
             echo 'agent diagnostics on stderr' >&2\n\
             /bin/cat '{root}/reply.ndjson'\n\
             exit {exit_code}\n",
            root = dir.path().display(),
        );
        let bin = bin_dir.join("opencode");
        std::fs::write(&bin, script).unwrap();
        let mut perms = std::fs::metadata(&bin).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&bin, perms).unwrap();
        FakeAgent { dir }
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    pub fn workdir(&self) -> PathBuf {
        self.dir.path().join("work").join("nested")
    }

    pub fn recorded_args(&self) -> Vec<String> {
        let raw = std::fs::read(self.dir.path().join("args")).unwrap();
        let mut args: Vec<String> = raw
            .split(|b| *b == 0)
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .collect();
        // printf leaves a trailing NUL
        if args.last().map(String::is_empty).unwrap_or(false) {
            args.pop();
        }
        args
    }

    pub fn recorded_cwd(&self) -> String {
        std::fs::read_to_string(self.dir.path().join("cwd"))
            .unwrap()
            .trim_end()
            .to_string()
    }

    pub fn recorded_config_dir(&self) -> String {
        std::fs::read_to_string(self.dir.path().join("config_dir")).unwrap()
    }

    /// Command with PATH limited to the fake agent and system tools.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(BIN);
        cmd.env("PATH", format!("{}:/usr/bin:/bin", self.bin_dir().display()))
            .env_remove("OPENCODE_TAB_LOG")
            .env_remove("OPENCODE_CONFIG_DIR")
            .env("NO_COLOR", "1");
        cmd
    }
}

/// Command whose PATH contains no `opencode` at all.
pub fn command_without_agent(empty_dir: &Path) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.env("PATH", empty_dir)
        .env_remove("OPENCODE_TAB_LOG")
        .env_remove("OPENCODE_CONFIG_DIR")
        .env("NO_COLOR", "1");
    cmd
}

/// Split a framed record into its fields, asserting the single trailing newline.
pub fn split_record(out: &Output) -> Vec<String> {
    let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
    let body = stdout
        .strip_suffix('\n')
        .unwrap_or_else(|| panic!("record lacks trailing newline: {stdout:?}"));
    body.split('\x1f').map(str::to_string).collect()
}

pub fn assert_success(out: &Output) {
    assert!(
        out.status.success(),
        "opencode-tab exited non-zero: {:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );
}
