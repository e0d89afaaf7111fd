//! Single-line record written to stdout for the zsh controller.
//!
//! Layout: `session_id US [repro US] text LF`, where US is ASCII 0x1F. The session id may be
//! empty; the repro segment is present only when the caller asked for it.

use std::io::{self, Write};

use serde::Serialize;

/// ASCII Unit Separator.
pub const UNIT_SEPARATOR: char = '\u{1f}';

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub session_id: String,
    pub repro_command: Option<String>,
    pub text: String,
}

impl ResultRecord {
    pub fn frame(&self) -> String {
        frame(&self.session_id, self.repro_command.as_deref(), &self.text)
    }

    /// Write the framed line in one call and flush.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        w.write_all(self.frame().as_bytes())?;
        w.flush()
    }
}

pub fn frame(session_id: &str, repro_command: Option<&str>, text: &str) -> String {
    let mut out = String::with_capacity(
        session_id.len() + repro_command.map_or(0, str::len) + text.len() + 3,
    );
    out.push_str(session_id);
    out.push(UNIT_SEPARATOR);
    if let Some(repro) = repro_command {
        out.push_str(repro);
        out.push(UNIT_SEPARATOR);
    }
    out.push_str(text);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_without_repro() {
        assert_eq!(frame("sess123", None, "hello"), "sess123\x1fhello\n");
    }

    #[test]
    fn frames_with_repro() {
        assert_eq!(
            frame("s", Some("opencode run $'x'"), "ls"),
            "s\x1fopencode run $'x'\x1fls\n"
        );
    }

    #[test]
    fn empty_session_id_keeps_leading_separator() {
        assert_eq!(frame("", None, "ok"), "\x1fok\n");
        assert_eq!(frame("", Some(""), ""), "\x1f\x1f\n");
    }

    #[test]
    fn multi_line_text_is_not_altered() {
        let rec = ResultRecord {
            session_id: "ses_1".into(),
            repro_command: None,
            text: "# comment\nls -la".into(),
        };
        let framed = rec.frame();
        assert_eq!(framed, "ses_1\x1f# comment\nls -la\n");
        let (sid, rest) = framed.split_once(UNIT_SEPARATOR).unwrap();
        assert_eq!(sid, "ses_1");
        assert_eq!(rest.strip_suffix('\n'), Some("# comment\nls -la"));
    }

    #[test]
    fn write_to_emits_exact_bytes() {
        let rec = ResultRecord {
            session_id: "a".into(),
            repro_command: Some("r".into()),
            text: "t".into(),
        };
        let mut buf = Vec::new();
        rec.write_to(&mut buf).unwrap();
        assert_eq!(buf, b"a\x1fr\x1ft\n");
    }
}
