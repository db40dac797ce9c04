use super::ModuleIdentifier;
use crate::diagnostics::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyId(pub(crate) usize);

impl DependencyId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Entry,
    EsmImport,
    EsmExport,
    Require,
    DynamicImport,
}

impl DependencyKind {
    /// Reason type tag shown in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            DependencyKind::Entry => "entry",
            DependencyKind::EsmImport => "import",
            DependencyKind::EsmExport => "export from",
            DependencyKind::Require => "require",
            DependencyKind::DynamicImport => "import()",
        }
    }

    /// Async dependencies start a new chunk.
    pub fn is_async(self) -> bool {
        self == DependencyKind::DynamicImport
    }
}

/// An edge in the module graph, recorded before it is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub id: DependencyId,
    pub kind: DependencyKind,
    /// The request exactly as the user wrote it.
    pub request: String,
    /// Module containing the request; `None` for entries.
    pub origin: Option<ModuleIdentifier>,
    pub location: Option<SourceLocation>,
    /// Byte range of the request literal (quotes included) in the origin source.
    pub span: Option<(usize, usize)>,
}
