#![allow(clippy::module_name_repetitions)]
//! Small utilities: argument quoting for direct exec and for copy/paste shells,
//! terminal-output normalization.

use once_cell::sync::Lazy;
use regex::Regex;

pub mod exec;

/// CSI sequences only: ESC `[`, parameters, one final letter.
static ANSI_CSI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("valid regex"));

/// Token for an argument handed straight to `Command::arg`.
///
/// No shell re-parses these arguments, so the value is passed through untouched.
pub fn exec_arg(s: &str) -> &str {
    s
}

pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|a| shell_escape(a))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        "''".to_string()
    } else if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./:@%+,".contains(c))
    {
        s.to_string()
    } else {
        let escaped = s.replace('\'', "'\"'\"'");
        format!("'{}'", escaped)
    }
}

/// Render `s` as a `$'...'` literal that zsh/bash/ksh expand back to the exact input.
///
/// Backslash, single quote, `\n`, `\r` and `\t` get their two-character escapes,
/// remaining C0 controls and DEL become `\xNN`; everything else is copied as-is.
pub fn dollar_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 3);
    out.push_str("$'");
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Remove CSI escape sequences, repeating until none are left.
///
/// A single pass can splice a new sequence together (`ESC ESC[0m[1m`), so the
/// loop keeps the result stable under a second call.
pub fn strip_ansi(s: &str) -> String {
    let mut out = s.to_string();
    loop {
        let next = ANSI_CSI.replace_all(&out, "");
        if next.len() == out.len() {
            return out;
        }
        out = next.into_owned();
    }
}

/// Strip CSI escapes first, then every carriage return.
pub fn normalize_output(s: &str) -> String {
    strip_ansi(s).replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_arg_is_identity() {
        let payload = "line one\nline 'two'\t$HOME";
        assert_eq!(exec_arg(payload), payload);
    }

    #[test]
    fn test_shell_escape_simple() {
        assert_eq!(shell_escape("abc-123_./:@"), "abc-123_./:@");
        assert_eq!(shell_escape("anthropic/claude-sonnet"), "anthropic/claude-sonnet");
    }

    #[test]
    fn test_shell_escape_with_spaces_and_quotes() {
        assert_eq!(shell_escape("a b c"), "'a b c'");
        assert_eq!(shell_escape("O'Reilly"), "'O'\"'\"'Reilly'");
        assert_eq!(shell_escape(""), "''");
    }

    #[test]
    fn test_shell_join() {
        let args = vec!["a".to_string(), "b c".to_string(), "d".to_string()];
        assert_eq!(shell_join(&args), "a 'b c' d");
    }

    #[test]
    fn test_dollar_quote_escapes() {
        assert_eq!(dollar_quote("plain"), "$'plain'");
        assert_eq!(dollar_quote("a\nb"), "$'a\\nb'");
        assert_eq!(dollar_quote("it's"), "$'it\\'s'");
        assert_eq!(dollar_quote("c:\\dir"), "$'c:\\\\dir'");
        assert_eq!(dollar_quote("\t\r"), "$'\\t\\r'");
        assert_eq!(dollar_quote("\x1b[0m\x7f\x01"), "$'\\x1b[0m\\x7f\\x01'");
        assert_eq!(dollar_quote(""), "$''");
    }

    #[test]
    fn test_dollar_quote_keeps_non_ascii() {
        assert_eq!(dollar_quote("grüße ✓"), "$'grüße ✓'");
    }

    #[test]
    fn test_dollar_quote_round_trips_through_bash() {
        let bash = match which::which("bash") {
            Ok(p) => p,
            Err(_) => {
                eprintln!("skipping: bash not found in PATH");
                return;
            }
        };
        let input = "ls -la 'x'\n\tdone \\ \"q\" \x01\x7f\r$HOME `id`";
        let script = format!("printf '%s' {}", dollar_quote(input));
        let out = std::process::Command::new(bash)
            .args(["-c", &script])
            .output()
            .unwrap();
        assert!(out.status.success());
        assert_eq!(out.stdout, input.as_bytes());
    }

    #[test]
    fn test_strip_ansi_csi() {
        assert_eq!(strip_ansi("\x1b[32mok\x1b[0m"), "ok");
        assert_eq!(strip_ansi("\x1b[1;31mred\x1b[m"), "red");
        assert_eq!(strip_ansi("\x1b[2K\x1b[1Gdone"), "done");
        assert_eq!(strip_ansi("no escapes"), "no escapes");
    }

    #[test]
    fn test_strip_ansi_is_idempotent() {
        let samples = [
            "\x1b[32mok\x1b[0m",
            "\x1b\x1b[0m[1mnested",
            "\x1b[[31m",
            "plain\r\n",
        ];
        for s in samples {
            let once = strip_ansi(s);
            assert_eq!(strip_ansi(&once), once, "input {s:?}");
        }
        assert_eq!(strip_ansi("\x1b\x1b[0m[1mnested"), "nested");
    }

    #[test]
    fn test_normalize_output_drops_carriage_returns() {
        assert_eq!(normalize_output("a\r\nb\x1b[0m\r"), "a\nb");
    }
}
