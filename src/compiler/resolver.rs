use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::trace;

use crate::utils::path::portable_identifier;

/// Extensions tried, in order, for requests that do not name a file exactly.
pub const RESOLVE_EXTENSIONS: &[&str] = &[".js", ".mjs", ".cjs", ".json"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Can't resolve '{request}' in '{dir}'")]
    NotFound { request: String, dir: String },
}

/// Resolves relative and absolute file requests. Bare package requests are
/// never found: there is no `node_modules` lookup.
#[derive(Debug, Clone)]
pub struct Resolver {
    context: PathBuf,
}

impl Resolver {
    pub fn new(context: impl Into<PathBuf>) -> Self {
        Self {
            context: context.into(),
        }
    }

    /// Resolve `request` as written inside a module living in `dir`.
    pub fn resolve(&self, dir: &Path, request: &str) -> Result<PathBuf, ResolveError> {
        let not_found = || ResolveError::NotFound {
            request: request.to_string(),
            dir: portable_identifier(&self.context, dir),
        };

        if !is_file_request(request) {
            return Err(not_found());
        }

        let base = dir.join(request);
        let found = self
            .candidates(&base)
            .into_iter()
            .find(|candidate| candidate.is_file())
            .ok_or_else(not_found)?;

        trace!(request, resolved = %found.display(), "resolved request");
        found.canonicalize().map_err(|_| not_found())
    }

    fn candidates(&self, base: &Path) -> Vec<PathBuf> {
        let mut candidates = vec![base.to_path_buf()];
        candidates.extend(RESOLVE_EXTENSIONS.iter().map(|ext| append_extension(base, ext)));
        let index = base.join("index");
        candidates.extend(RESOLVE_EXTENSIONS.iter().map(|ext| append_extension(&index, ext)));
        candidates
    }
}

fn is_file_request(request: &str) -> bool {
    request.starts_with("./")
        || request.starts_with("../")
        || request == "."
        || request == ".."
        || Path::new(request).is_absolute()
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(extension);
    PathBuf::from(raw)
}
