//! Diagnostic severity levels

use serde::Serialize;

/// Severity level of a compilation diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The module failed to build or a dependency could not be resolved
    Error,
    /// Something suspicious that does not prevent the build
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}
