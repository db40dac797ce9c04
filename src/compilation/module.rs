use std::fmt;
use std::sync::Arc;

use crate::utils::hash::{short_hash, to_hex};

/// Portable module identifier, e.g. `<PROJECT_ROOT>/src/index.js`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleIdentifier(Arc<str>);

impl ModuleIdentifier {
    pub fn new(identifier: impl Into<Arc<str>>) -> Self {
        Self(identifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Stable module id: the truncated content hash of the identifier.
    pub fn module_id(&self) -> String {
        to_hex(short_hash(self.0.as_bytes()))
    }
}

impl fmt::Display for ModuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleType {
    JavascriptAuto,
    Json,
    AssetResource,
}

impl ModuleType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleType::JavascriptAuto => "javascript/auto",
            ModuleType::Json => "json",
            ModuleType::AssetResource => "asset/resource",
        }
    }

    /// Pick a module type from a resource extension (without the dot).
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "json" => ModuleType::Json,
            "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "txt" | "woff" | "woff2" => {
                ModuleType::AssetResource
            }
            _ => ModuleType::JavascriptAuto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceEncoding {
    Utf8,
    Binary,
}

impl SourceEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf8",
            SourceEncoding::Binary => "binary",
        }
    }
}

/// Raw module bytes plus the encoding they were read as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSource {
    bytes: Arc<[u8]>,
    encoding: SourceEncoding,
}

impl ModuleSource {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let encoding = if std::str::from_utf8(&bytes).is_ok() {
            SourceEncoding::Utf8
        } else {
            SourceEncoding::Binary
        };
        Self {
            bytes: Arc::from(bytes),
            encoding,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }

    /// Encoded byte length, which is what every size in a report counts.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.encoding {
            SourceEncoding::Utf8 => std::str::from_utf8(&self.bytes).ok(),
            SourceEncoding::Binary => None,
        }
    }
}

/// A module built from a single resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalModule {
    pub identifier: ModuleIdentifier,
    pub id: String,
    /// `./`-relative display name.
    pub name: String,
    pub module_type: ModuleType,
    pub source: ModuleSource,
    /// Outgoing dependencies in source order.
    pub dependencies: Vec<super::DependencyId>,
    /// Assets this module emits on its own (asset modules).
    pub assets: Vec<String>,
    /// Set when the module failed to parse; its code is replaced by a throw.
    pub build_error: Option<String>,
}

impl NormalModule {
    pub fn new(
        identifier: ModuleIdentifier,
        name: impl Into<String>,
        module_type: ModuleType,
        source: ModuleSource,
    ) -> Self {
        Self {
            id: identifier.module_id(),
            identifier,
            name: name.into(),
            module_type,
            source,
            dependencies: Vec::new(),
            assets: Vec::new(),
            build_error: None,
        }
    }

    pub fn size(&self) -> usize {
        self.source.size()
    }
}
