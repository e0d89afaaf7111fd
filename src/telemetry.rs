//! Diagnostic tracing on stderr, off unless `OPENCODE_TAB_LOG` asks for it.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `debug` or `opencode_tab=trace`.
pub const LOG_ENV: &str = "OPENCODE_TAB_LOG";

static INIT: OnceCell<()> = OnceCell::new();

fn filter_from_env() -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(v) if !v.trim().is_empty() => {
            EnvFilter::try_new(v.trim()).unwrap_or_else(|e| {
                eprintln!("opencode-tab: telemetry: invalid {LOG_ENV} ({e}); logging disabled");
                EnvFilter::new("off")
            })
        }
        _ => EnvFilter::new("off"),
    }
}

/// Install the global subscriber once. stdout is never written to.
pub fn telemetry_init() {
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter_from_env())
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(crate::color_enabled_stderr())
            .try_init();
    });
}
