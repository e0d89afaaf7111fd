//! One adapter run: envelope, invocation, agent process, event collapse, cleanup.

use crate::config::AdapterConfig;
use crate::dummy::dummy_reply;
use crate::errors::AdapterError;
use crate::events::collapse_output;
use crate::invocation::{agent_program, build_invocation, locate_agent_binary, AGENT_BINARY};
use crate::prompt::render_envelope;
use crate::protocol::ResultRecord;
use crate::session::delete_session;
use crate::util::exec::ExecService;

/// Produce the record for `cfg`. Only a missing agent binary or a failed spawn is an error;
/// a non-zero agent exit still yields whatever text it printed.
pub fn run(cfg: &AdapterConfig) -> Result<ResultRecord, AdapterError> {
    let envelope = render_envelope(&cfg.request);
    let explicit = cfg.opencode_bin.as_deref();

    if cfg.debug_dummy {
        let inv = build_invocation(
            &cfg.invocation_options(&agent_program(explicit)),
            &envelope,
        );
        let text = dummy_reply(
            cfg.kind,
            cfg.debug_dummy_text.as_deref(),
            cfg.debug_dummy_file.as_deref(),
        );
        tracing::debug!(kind = cfg.kind.as_str(), "debug dummy reply");
        return Ok(ResultRecord {
            session_id: String::new(),
            repro_command: Some(inv.repro_command()),
            text,
        });
    }

    let program = locate_agent_binary(explicit).map_err(|e| {
        tracing::debug!(error = %e, "agent lookup failed");
        let name = explicit
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| AGENT_BINARY.to_string());
        AdapterError::BinaryNotFound(name)
    })?;

    let inv = build_invocation(&cfg.invocation_options(&program), &envelope);
    let repro = inv.repro_command();
    tracing::debug!(repro = %repro, run_mode = cfg.run_mode.as_str(), "running agent");

    let output = ExecService::new().run(inv.to_exec_request())?;
    if !output.status.success() {
        tracing::warn!(
            status = ?output.status,
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "agent exited unsuccessfully"
        );
    }

    let summary = collapse_output(&output.stdout_lossy());
    tracing::debug!(
        session_id = %summary.session_id,
        fragments = summary.fragments,
        "collapsed agent events"
    );

    if let Some(backend) = cfg.cleanup_backend() {
        if !summary.session_id.is_empty() {
            delete_session(backend, &summary.session_id);
        }
    }

    Ok(ResultRecord {
        session_id: summary.session_id,
        repro_command: cfg.emit_repro.then_some(repro),
        text: summary.text,
    })
}
