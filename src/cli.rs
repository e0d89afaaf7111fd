use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use opencode_tab::{blank_to_none, default_workdir, AdapterConfig, ReplyKind, RequestContext, RunMode};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ntarget: ",
    env!("OPENCODE_TAB_BUILD_TARGET"),
    "\nprofile: ",
    env!("OPENCODE_TAB_BUILD_PROFILE"),
);

#[derive(Parser, Debug)]
#[command(
    name = "opencode-tab",
    version,
    long_version = LONG_VERSION,
    about = "Run `opencode run --format json` for a zsh widget and print one US-separated result line.",
    after_long_help = "Output (stdout, one line):\n  <session_id>\\x1f[<repro_cmd>\\x1f]<text>\\n\n\nExamples:\n  opencode-tab --user-request 'list large files' --ostype \"$OSTYPE\"\n  opencode-tab --user-request 'why?' --kind explain --run-mode attach --backend-url http://127.0.0.1:4096 --delete-session\n"
)]
pub(crate) struct Cli {
    /// Natural-language request typed by the user
    #[arg(long = "user-request", allow_hyphen_values = true)]
    pub(crate) user_request: String,

    /// Value of $OSTYPE in the calling shell
    #[arg(long, default_value = "")]
    pub(crate) ostype: String,

    /// Whether GNU coreutils are available (1/0)
    #[arg(long, default_value = "1")]
    pub(crate) gnu: String,

    /// Reply kind requested by the widget: command|explain (anything else means command)
    #[arg(long, default_value = "command")]
    pub(crate) kind: String,

    /// Echo/mode flag embedded in the envelope (blank means 0)
    #[arg(long = "echo-prompt", default_value = "0")]
    pub(crate) echo_prompt: String,

    /// Working directory for the agent (default: $TMPDIR/zsh-opencode-tab)
    #[arg(long, default_value = "")]
    pub(crate) workdir: String,

    /// Model passed as --model
    #[arg(long, default_value = "")]
    pub(crate) model: String,

    /// Address of a running opencode backend
    #[arg(long = "backend-url", default_value = "")]
    pub(crate) backend_url: String,

    /// cold: start a fresh backend; attach: connect to --backend-url (blank means cold)
    #[arg(long = "run-mode", default_value = "cold")]
    pub(crate) run_mode: String,

    /// Agent persona passed as --agent
    #[arg(long, default_value = "")]
    pub(crate) agent: String,

    /// Model variant passed as --variant
    #[arg(long, default_value = "")]
    pub(crate) variant: String,

    /// Session title passed as --title
    #[arg(long, default_value = "")]
    pub(crate) title: String,

    /// Agent log level passed as --log-level
    #[arg(long = "log-level", default_value = "")]
    pub(crate) log_level: String,

    /// Ask the agent to print its logs
    #[arg(long = "print-logs")]
    pub(crate) print_logs: bool,

    /// Delete the created session on the backend afterwards (best effort)
    #[arg(long = "delete-session")]
    pub(crate) delete_session: bool,

    /// Config directory exported to the agent as OPENCODE_CONFIG_DIR
    #[arg(long = "config-dir", default_value = "")]
    pub(crate) config_dir: String,

    /// Agent executable (default: opencode on PATH)
    #[arg(long = "opencode-bin", default_value = "")]
    pub(crate) opencode_bin: String,

    /// Skip opencode execution and return a mock reply
    #[arg(long = "debug-dummy")]
    pub(crate) debug_dummy: bool,

    /// Mock reply text to emit when --debug-dummy is set
    #[arg(long = "debug-dummy-text", default_value = "")]
    pub(crate) debug_dummy_text: String,

    /// Read mock reply text from this file when --debug-dummy is set
    #[arg(long = "debug-dummy-file", default_value = "")]
    pub(crate) debug_dummy_file: String,

    /// Omit the repro command segment from the output line
    #[arg(long = "no-repro")]
    pub(crate) no_repro: bool,

    /// Colorize stderr messages: auto|always|never
    #[arg(long = "color", value_enum)]
    pub(crate) color: Option<opencode_tab::ColorMode>,
}

impl Cli {
    pub(crate) fn into_config(self) -> AdapterConfig {
        let workdir = blank_to_none(&self.workdir)
            .map(PathBuf::from)
            .unwrap_or_else(default_workdir);
        AdapterConfig {
            request: RequestContext {
                user_request: self.user_request,
                ostype: self.ostype,
                gnu: self.gnu,
                echo_prompt: self.echo_prompt,
            },
            kind: ReplyKind::from_flag(&self.kind),
            workdir,
            model: blank_to_none(&self.model),
            backend_url: blank_to_none(&self.backend_url),
            run_mode: RunMode::from_flag(&self.run_mode),
            agent: blank_to_none(&self.agent),
            variant: blank_to_none(&self.variant),
            title: blank_to_none(&self.title),
            log_level: blank_to_none(&self.log_level),
            print_logs: self.print_logs,
            delete_session: self.delete_session,
            config_dir: blank_to_none(&self.config_dir).map(PathBuf::from),
            opencode_bin: blank_to_none(&self.opencode_bin).map(PathBuf::from),
            debug_dummy: self.debug_dummy,
            debug_dummy_text: blank_to_none(&self.debug_dummy_text),
            debug_dummy_file: blank_to_none(&self.debug_dummy_file).map(PathBuf::from),
            emit_repro: !self.no_repro,
        }
    }
}

/// Split argv into what `Cli` understands and what it does not.
///
/// Controllers of other protocol revisions pass flags this build lacks; those, stray
/// positionals and everything after `--` are set aside instead of failing the run.
/// Values of known options are kept even when they start with `-`.
pub(crate) fn split_known_args<I>(argv: I) -> (Vec<OsString>, Vec<OsString>)
where
    I: IntoIterator<Item = OsString>,
{
    let cmd = Cli::command();
    let mut known = Vec::new();
    let mut ignored = Vec::new();
    let mut iter = argv.into_iter();
    if let Some(bin) = iter.next() {
        known.push(bin);
    }

    while let Some(tok) = iter.next() {
        let text = match tok.to_str() {
            Some(t) => t.to_owned(),
            None => {
                ignored.push(tok);
                continue;
            }
        };
        if text == "--" {
            ignored.push(tok);
            ignored.extend(iter.by_ref());
            break;
        }
        if matches!(text.as_str(), "-h" | "--help" | "-V" | "--version") {
            known.push(tok);
            continue;
        }
        let Some(long) = text.strip_prefix("--") else {
            ignored.push(tok);
            continue;
        };
        let (name, inline_value) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        let takes_value = cmd
            .get_arguments()
            .find(|a| a.get_long() == Some(name))
            .map(|a| a.get_action().takes_values());

        match takes_value {
            Some(takes_value) => {
                known.push(tok);
                if takes_value && !inline_value {
                    if let Some(value) = iter.next() {
                        known.push(value);
                    }
                }
            }
            None => ignored.push(tok),
        }
    }
    (known, ignored)
}
