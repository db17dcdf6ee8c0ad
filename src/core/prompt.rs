//! `$`-code prompt templates in the style of `prompt` in cmd.

use std::path::Path;

pub fn render(format: &str, cwd: &Path) -> String {
    let mut out = String::with_capacity(format.len() + 32);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let Some(code) = chars.next() else {
            break;
        };
        match code.to_ascii_uppercase() {
            'P' => out.push_str(&cwd.to_string_lossy()),
            'G' => out.push('>'),
            'L' => out.push('<'),
            'B' => out.push('|'),
            'Q' => out.push('='),
            'S' => out.push(' '),
            'A' => out.push('&'),
            'C' => out.push('('),
            'F' => out.push(')'),
            'E' => out.push('\x1b'),
            '_' => out.push('\n'),
            '$' => out.push('$'),
            'V' => out.push_str(env!("CARGO_PKG_VERSION")),
            _ => {}
        }
    }

    out
}
