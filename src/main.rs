use std::io;
use std::process::ExitCode;

use clap::Parser;

mod cli;

use cli::{split_known_args, Cli};

fn main() -> ExitCode {
    let (known, ignored) = split_known_args(std::env::args_os());
    let cli = Cli::parse_from(known);

    if let Some(mode) = cli.color {
        opencode_tab::set_color_mode(mode);
    }
    opencode_tab::telemetry_init();
    if !ignored.is_empty() {
        tracing::debug!(ignored = ?ignored, "ignoring unrecognized arguments");
    }

    let cfg = cli.into_config();
    tracing::debug!(
        config_version = cfg.version(),
        workdir = %cfg.workdir.display(),
        dummy = cfg.debug_dummy,
        "starting"
    );

    let use_err = opencode_tab::color_enabled_stderr();
    let record = match opencode_tab::adapter::run(&cfg) {
        Ok(r) => r,
        Err(e) => {
            opencode_tab::log_error_stderr(use_err, &opencode_tab::display_for(&e));
            return ExitCode::FAILURE;
        }
    };

    tracing::debug!(
        record = %serde_json::to_string(&record).unwrap_or_default(),
        "writing record"
    );

    // The controller reads exactly one line from stdout.
    if let Err(e) = record.write_to(io::stdout().lock()) {
        opencode_tab::log_error_stderr(use_err, &format!("opencode-tab: failed to write result: {e}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
