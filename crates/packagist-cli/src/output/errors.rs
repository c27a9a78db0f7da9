//! Error message formatting with actionable suggestions.

use packagist_core::error::PackagistError;
use super::colors::ColorSupport;
use std::error::Error;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self::with_colors(ColorSupport::detect())
    }

    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with its suggestion and source chain
    pub fn format_error(&self, error: &PackagistError) -> String {
        let mut output = String::new();

        output.push_str(&self.colors.red("error"));
        output.push_str(": ");
        output.push_str(&error.to_string());
        output.push('\n');

        let mut source = error.source();
        while let Some(err) = source {
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            output.push('\n');
            source = err.source();
        }

        if let Some(suggestion) = error.suggestion() {
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        output
    }

    /// Format a warning message
    pub fn format_warning(&self, message: &str) -> String {
        format!("{}: {}", self.colors.yellow("warning"), message)
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}
