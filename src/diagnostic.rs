//! Non-fatal diagnostics.
//!
//! Library stages never print. Conditions that degrade a run without
//! failing it are returned as warnings and rendered by the CLI.

use std::fmt;

/// A warning produced while building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Machine-readable code (e.g. "iconsprite::source::missing-dir").
    pub code: String,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    /// Add help text to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_builder() {
        let d = Diagnostic::warning("iconsprite::source::empty", "No icons found")
            .with_help("Add .svg files to icons-source/");

        assert_eq!(d.code, "iconsprite::source::empty");
        assert_eq!(d.help.as_deref(), Some("Add .svg files to icons-source/"));
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::warning("iconsprite::source::missing-dir", "Path not found");
        assert_eq!(d.to_string(), "[iconsprite::source::missing-dir]: Path not found");
    }
}
