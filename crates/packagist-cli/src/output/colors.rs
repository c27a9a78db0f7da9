//! Terminal color support detection and formatting.
//!
//! Colors are used only when both stdout and stderr are terminals and
//! NO_COLOR is unset.

use std::env;
use std::io::{self, IsTerminal};

const GREEN: &str = "32";
const YELLOW: &str = "33";
const RED: &str = "31";
const CYAN: &str = "36";
const DIM: &str = "2";
const BOLD: &str = "1";

/// Color support detection and formatting
#[derive(Debug, Clone, Copy)]
pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    /// Detect color support automatically
    pub fn detect() -> Self {
        Self {
            enabled: Self::should_use_colors(),
        }
    }

    /// Force disable colors
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    fn should_use_colors() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        io::stderr().is_terminal() && io::stdout().is_terminal()
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    pub fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    pub fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    /// Package names
    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_colors_leave_text_untouched() {
        let colors = ColorSupport::disabled();
        assert_eq!(colors.red("error"), "error");
        assert_eq!(colors.cyan("clue/graph"), "clue/graph");
    }

    #[test]
    fn test_enabled_colors_wrap_text() {
        let colors = ColorSupport { enabled: true };
        assert_eq!(colors.green("ok"), "\x1b[32mok\x1b[0m");
    }
}
