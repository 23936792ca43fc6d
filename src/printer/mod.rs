//! Terminal coloring for prompts, headers and errors.

use std::io;

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Prompts and result headers.
    Header,
    Error,
    /// Alias names in listings.
    Alias,
    /// Hints and secondary information.
    Note,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextPrinter {
    pub color: bool,
}

impl TextPrinter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Header => text.green().to_string(),
            Tone::Error => text.red().to_string(),
            Tone::Alias => text.cyan().to_string(),
            Tone::Note => text.dimmed().to_string(),
        }
    }
}

/// Color only for a real terminal, unless disabled by flag, config or `NO_COLOR`.
pub fn color_wanted(no_color_flag: bool, config_allows: bool) -> bool {
    !no_color_flag
        && config_allows
        && std::env::var_os("NO_COLOR").is_none()
        && io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_printer_leaves_text_alone() {
        let p = TextPrinter::new(false);
        assert_eq!(p.paint("exit status:", Tone::Header), "exit status:");
    }

    #[test]
    fn colored_printer_wraps_in_escapes() {
        let p = TextPrinter::new(true);
        let s = p.paint("oops", Tone::Error);
        assert!(s.contains("oops") && s.starts_with("\u{1b}["));
    }
}
