use std::path::{Component, Path};

/// Placeholder substituted for the compilation context in module identifiers.
pub const PROJECT_ROOT: &str = "<PROJECT_ROOT>";

/// Absolute path with the context replaced by [`PROJECT_ROOT`], using `/`
/// separators on every platform.
pub fn portable_identifier(context: &Path, path: &Path) -> String {
    match path.strip_prefix(context) {
        Ok(rest) if rest.as_os_str().is_empty() => PROJECT_ROOT.to_string(),
        Ok(rest) => format!("{PROJECT_ROOT}/{}", join_components(rest)),
        Err(_) => path.to_string_lossy().replace('\\', "/"),
    }
}

/// `./`-prefixed display name relative to the context.
pub fn relative_name(context: &Path, path: &Path) -> String {
    match path.strip_prefix(context) {
        Ok(rest) if !rest.as_os_str().is_empty() => format!("./{}", join_components(rest)),
        _ => path.to_string_lossy().replace('\\', "/"),
    }
}

fn join_components(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
