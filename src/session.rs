//! Best-effort removal of the session the agent created on an attached backend.

use std::io::Read;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use url::{Host, Url};

/// Upper bound for the whole DELETE round trip.
pub const DELETE_TIMEOUT: Duration = Duration::from_secs(2);

/// Run `op` and drop its outcome, logging failures at debug level only.
///
/// Used for cleanup that must never change the adapter's output or exit status.
pub fn best_effort<T, F>(what: &str, op: F)
where
    F: FnOnce() -> Result<T>,
{
    if let Err(e) = op() {
        tracing::debug!(error = %format!("{e:#}"), "{what} failed; ignoring");
    }
}

/// `<backend>/session/<id>` with the id encoded as a single path segment.
pub fn session_url(backend_url: &str, session_id: &str) -> Result<Url> {
    let backend = backend_url.trim().trim_end_matches('/');
    let mut url =
        Url::parse(backend).with_context(|| format!("invalid backend url {backend:?}"))?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("backend url {backend:?} cannot carry a path"))?
        .pop_if_empty()
        .push("session")
        .push(session_id);
    Ok(url)
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(d)) => d.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

/// Issue `DELETE <backend>/session/<id>` and read one byte of the response.
///
/// Any status is accepted; only transport failures are errors.
pub fn try_delete_session(backend_url: &str, session_id: &str) -> Result<()> {
    let session_id = session_id.trim();
    if backend_url.trim().is_empty() || session_id.is_empty() {
        return Ok(());
    }
    let url = session_url(backend_url, session_id)?;
    let mut builder = reqwest::blocking::Client::builder().timeout(DELETE_TIMEOUT);
    // A local opencode server is never reached through an HTTP proxy.
    if is_loopback(&url) {
        builder = builder.no_proxy();
    }
    let client = builder
        .build()
        .context("failed to build http client")?;
    let mut response = client
        .delete(url.clone())
        .send()
        .with_context(|| format!("DELETE {url} failed"))?;
    tracing::debug!(status = response.status().as_u16(), %url, "session delete answered");
    let mut first = [0u8; 1];
    let _ = response.read(&mut first)?;
    Ok(())
}

/// Fire-and-forget session cleanup. Never reports failure.
pub fn delete_session(backend_url: &str, session_id: &str) {
    best_effort("session delete", || try_delete_session(backend_url, session_id));
}
