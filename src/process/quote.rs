//! Literal quoting for the tokens the front-end injects ahead of a user command.
//!
//! Only the session preamble goes through here. The user's own command is
//! passed to the child shell untouched.

use shell_quote::{QuoteRefExt, Sh};

use super::ShellDialect;

/// Quotes `path` so it can follow the dialect's change-directory directive.
pub fn quote_path(dialect: ShellDialect, path: &str) -> String {
    match dialect {
        ShellDialect::Cmd => cmd_quote(path),
        ShellDialect::Posix => sh_quote(path),
    }
}

/// Quotes `name=value` as a single token for the dialect's assignment directive.
///
/// The whole pair is wrapped, not just the value, so separators, spaces or
/// quotes inside either half cannot split the token.
pub fn quote_assignment(dialect: ShellDialect, name: &str, value: &str) -> String {
    let mut pair = String::with_capacity(name.len() + value.len() + 1);
    pair.push_str(name);
    pair.push('=');
    pair.push_str(value);
    quote_path(dialect, &pair)
}

/// `"..."` with every embedded `"` doubled.
pub fn cmd_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

pub fn sh_quote(s: &str) -> String {
    let bytes: Vec<u8> = s.quoted(Sh);
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(&err.into_bytes()).into_owned(),
    }
}
