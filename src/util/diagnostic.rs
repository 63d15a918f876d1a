//! User-friendly diagnostic messages.
//!
//! Every resolution failure is rendered with its root cause, the constraint
//! that was violated, and at least one suggested fix.

use std::fmt;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when some modules failed to resolve.
    pub const RUN_CHECK: &str = "help: Run `berth check` to list every failing module";

    /// Suggestion when a referenced module cannot be found.
    pub const CHECK_SPELLING: &str =
        "help: Check that the referenced name matches a declared module exactly";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

impl Severity {
    fn colored(self) -> &'static str {
        match self {
            Severity::Error => "\x1b[1;31merror\x1b[0m",
            Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
            Severity::Note => "\x1b[1;36mnote\x1b[0m",
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let severity = if color {
            self.severity.colored().to_string()
        } else {
            self.severity.to_string()
        };

        let mut output = format!("{}: {}\n", severity, self.message);

        for ctx in &self.context {
            output.push_str(&format!("  -> {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            let help = if color { "\x1b[1;32mhelp\x1b[0m" } else { "help" };
            output.push_str(&format!("{}: consider:\n", help));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("package `nfc@1.1` references unknown root `android.hw`")
            .with_context("declared in //hardware/nfc")
            .with_suggestion("Declare a package_root named `android.hw`")
            .with_suggestion("Fix the root reference in the package declaration");

        let output = diag.format(false);
        assert!(output.contains("error: package `nfc@1.1`"));
        assert!(output.contains("-> declared in //hardware/nfc"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Declare a package_root"));
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
