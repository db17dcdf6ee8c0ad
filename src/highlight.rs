use std::io::IsTerminal;

use inksac::prelude::*;

/// Colours the front-end's own messages; child output is never touched.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    enabled: bool,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        let colour = !matches!(support, ColorSupport::NoColor);
        Self {
            enabled: colour && std::io::stderr().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn error(&self, message: &str) -> String {
        if !self.enabled {
            return message.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();

        message.style(error_style).to_string()
    }

    pub fn hint(&self, message: &str) -> String {
        if !self.enabled {
            return message.to_string();
        }

        let hint_style = Style::builder().foreground(Color::Yellow).build();

        message.style(hint_style).to_string()
    }
}
