use std::sync::Arc;

use super::types::{Severity, SourceLocation};

/// An error or warning raised while building a module.
///
/// Diagnostics are data: they never abort a compilation, they are collected
/// alongside whatever did build successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub(crate) severity: Severity,
    pub(crate) message: String,
    pub(crate) module_type: String,
    pub(crate) module_identifier: Option<String>,
    pub(crate) location: Option<SourceLocation>,
    pub(crate) source: Option<Arc<str>>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            module_type: "javascript/auto".to_string(),
            module_identifier: None,
            location: None,
            source: None,
        }
    }

    /// Attach the owning module.
    pub fn with_module(
        mut self,
        identifier: impl Into<String>,
        module_type: impl Into<String>,
    ) -> Self {
        self.module_identifier = Some(identifier.into());
        self.module_type = module_type.into();
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach the full module source so a code frame can be rendered later.
    pub fn with_source(mut self, source: Arc<str>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn module_type(&self) -> &str {
        &self.module_type
    }

    pub fn module_identifier(&self) -> Option<&str> {
        self.module_identifier.as_deref()
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    pub fn source(&self) -> Option<&Arc<str>> {
        self.source.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
