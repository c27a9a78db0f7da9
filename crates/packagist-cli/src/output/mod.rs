//! Terminal output formatting and utilities.
//!
//! Status messages go to stderr so stdout only carries results and can be
//! piped.

pub mod colors;
pub mod errors;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
        }
    }

    /// Print a result line, highlighting the leading package name
    pub fn result(&self, name: &str, rest: &str) {
        let rest = rest.strip_prefix(name).unwrap_or(rest);
        println!("{}{}", self.colors.cyan(name), self.colors.dim(rest));
    }

    /// Print a header line
    pub fn header(&self, message: &str) {
        println!("{}", self.colors.bold(message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print a step message with emoji
    pub fn step(&self, emoji: &str, message: &str) {
        eprintln!("{} {}", emoji, message);
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
