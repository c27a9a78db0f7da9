//! Utility functions and helpers.
//!
//! Common functionality used across multiple Packagist crates.

pub mod template;

// Re-export commonly used utilities
pub use template::{encode_component, expand, TemplateValue, Variables};
