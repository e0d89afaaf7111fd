//! Request envelope handed to the agent as its final positional argument.

/// Mode/echo flag used when the caller leaves it blank.
pub const DEFAULT_ECHO_PROMPT: &str = "0";

/// Caller-supplied context embedded into the envelope.
///
/// `user_request` is carried verbatim; it may span lines and is never passed through a shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_request: String,
    pub ostype: String,
    pub gnu: String,
    pub echo_prompt: String,
}

/// Render the `<user>` envelope: a config block with three `{KEY}=value` lines
/// followed by the raw request between `<request>` tags.
pub fn render_envelope(ctx: &RequestContext) -> String {
    let echo_prompt = match ctx.echo_prompt.trim() {
        "" => DEFAULT_ECHO_PROMPT,
        v => v,
    };
    let mut out = String::with_capacity(ctx.user_request.len() + 128);
    out.push_str("<user>\n");
    out.push_str("<config>\n");
    out.push_str(&format!("{{OSTYPE}}={}\n", ctx.ostype));
    out.push_str(&format!("{{GNU}}={}\n", ctx.gnu));
    out.push_str(&format!("{{ECHO_PROMPT}}={echo_prompt}\n"));
    out.push_str("</config>\n");
    out.push_str("<request>\n");
    out.push_str(&ctx.user_request);
    out.push('\n');
    out.push_str("</request>\n");
    out.push_str("</user>");
    out
}
