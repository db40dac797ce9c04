use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use super::StatsOptions;
use crate::compiler::CompileError;

/// Name given to the chunk of a bare-string entry.
pub const DEFAULT_ENTRY_NAME: &str = "main";

/// Either a single request or a map from entry name to request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EntryDescription {
    Single(String),
    Named(IndexMap<String, String>),
}

impl EntryDescription {
    pub fn named<N, R>(entries: impl IntoIterator<Item = (N, R)>) -> Self
    where
        N: Into<String>,
        R: Into<String>,
    {
        EntryDescription::Named(
            entries
                .into_iter()
                .map(|(name, request)| (name.into(), request.into()))
                .collect(),
        )
    }

    /// `(name, request)` pairs in declaration order.
    pub fn entries(&self) -> Vec<(String, String)> {
        match self {
            EntryDescription::Single(request) => {
                vec![(DEFAULT_ENTRY_NAME.to_string(), request.clone())]
            }
            EntryDescription::Named(map) => map
                .iter()
                .map(|(name, request)| (name.clone(), request.clone()))
                .collect(),
        }
    }
}

impl From<&str> for EntryDescription {
    fn from(request: &str) -> Self {
        EntryDescription::Single(request.to_string())
    }
}

impl From<String> for EntryDescription {
    fn from(request: String) -> Self {
        EntryDescription::Single(request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputOptions {
    /// Output directory; relative paths are taken from the context.
    pub path: PathBuf,
    pub public_path: String,
    /// Template for entry chunk files. Supports `[name]` and `[id]`.
    pub filename: String,
    /// Template for async chunk files. Supports `[name]` and `[id]`.
    pub chunk_filename: String,
    /// Empty the output directory on the first emit and remove files that
    /// later builds no longer produce.
    pub clean: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("dist"),
            public_path: "auto".to_string(),
            filename: "[name].js".to_string(),
            chunk_filename: "[id].js".to_string(),
            clean: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Base directory for resolving entry requests.
    pub context: PathBuf,
    pub entry: EntryDescription,
    #[serde(default)]
    pub output: OutputOptions,
    /// Skip writing assets to the output file system.
    #[serde(default)]
    pub no_emit_assets: bool,
    /// Options used by [`Stats::summary`](crate::stats::Stats::summary).
    #[serde(default)]
    pub stats: StatsOptions,
}

impl CompilerOptions {
    pub fn new(context: impl Into<PathBuf>, entry: impl Into<EntryDescription>) -> Self {
        Self {
            context: context.into(),
            entry: entry.into(),
            output: OutputOptions::default(),
            no_emit_assets: false,
            stats: StatsOptions::default(),
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.path = path.into();
        self
    }

    pub fn with_public_path(mut self, public_path: impl Into<String>) -> Self {
        self.output.public_path = public_path.into();
        self
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.output.clean = clean;
        self
    }

    pub fn with_no_emit_assets(mut self, no_emit_assets: bool) -> Self {
        self.no_emit_assets = no_emit_assets;
        self
    }

    pub fn with_stats(mut self, stats: StatsOptions) -> Self {
        self.stats = stats;
        self
    }

    /// Absolute output directory.
    pub fn output_path(&self) -> PathBuf {
        if self.output.path.is_absolute() {
            self.output.path.clone()
        } else {
            self.context.join(&self.output.path)
        }
    }

    pub fn validate(&self) -> Result<(), CompileError> {
        if !self.context.is_dir() {
            return Err(CompileError::InvalidContext(self.context.clone()));
        }

        let entries = self.entry.entries();
        if entries.is_empty() {
            return Err(CompileError::InvalidOptions(
                "entry must name at least one module".to_string(),
            ));
        }
        for (name, request) in &entries {
            if name.is_empty() {
                return Err(CompileError::InvalidOptions(
                    "entry names must not be empty".to_string(),
                ));
            }
            if request.trim().is_empty() {
                return Err(CompileError::InvalidOptions(format!(
                    "entry `{name}` has an empty request"
                )));
            }
        }

        validate_filename_template("output.filename", &self.output.filename)?;
        validate_filename_template("output.chunkFilename", &self.output.chunk_filename)?;
        Ok(())
    }

    pub(crate) fn with_canonical_context(mut self) -> Result<Self, CompileError> {
        self.context = canonicalize_dir(&self.context)?;
        Ok(self)
    }
}

fn validate_filename_template(option: &str, template: &str) -> Result<(), CompileError> {
    if template.contains("[name]") || template.contains("[id]") {
        Ok(())
    } else {
        Err(CompileError::InvalidOptions(format!(
            "{option} `{template}` must contain `[name]` or `[id]`"
        )))
    }
}

fn canonicalize_dir(path: &Path) -> Result<PathBuf, CompileError> {
    path.canonicalize()
        .map_err(|_| CompileError::InvalidContext(path.to_path_buf()))
}
