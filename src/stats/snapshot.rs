//! The immutable report produced by the collector.
//!
//! Leaf records serialize directly into the JSON report. Modules and chunks
//! carry everything either renderer may need; the JSON renderer projects them
//! according to the resolved options.

use std::sync::Arc;

use serde::Serialize;

use crate::compilation::ModuleSource;
use crate::diagnostics::{FrameError, Severity, format_error_frame};

#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub version: String,
    pub hash: Option<String>,
    pub time: u64,
    pub built_at: u64,
    pub output_path: String,
    pub public_path: String,
    pub assets: Vec<StatsAsset>,
    pub chunks: Vec<StatsChunk>,
    pub modules: Vec<StatsModule>,
    pub entrypoints: Vec<StatsChunkGroup>,
    pub named_chunk_groups: Vec<StatsChunkGroup>,
    pub errors: Vec<StatsDiagnostic>,
    pub warnings: Vec<StatsDiagnostic>,
}

impl StatsSnapshot {
    pub fn module(&self, id: &str) -> Option<&StatsModule> {
        self.modules.iter().find(|module| module.id == id)
    }

    /// Names of the entrypoints that list `asset` among their assets.
    pub fn entrypoints_of(&self, asset: &str) -> Vec<&str> {
        self.entrypoints
            .iter()
            .filter(|entrypoint| entrypoint.assets.iter().any(|a| a.name == asset))
            .map(|entrypoint| entrypoint.name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsAssetInfo {
    pub development: bool,
    pub hot_module_replacement: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsAsset {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub size: usize,
    /// Ids of the chunks that own the asset.
    pub chunks: Vec<String>,
    pub chunk_names: Vec<String>,
    pub emitted: bool,
    pub info: StatsAssetInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReason {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub user_request: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsIssuer {
    pub id: String,
    pub identifier: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsModule {
    pub id: String,
    pub identifier: String,
    pub name: String,
    pub module_type: &'static str,
    pub size: usize,
    pub source: ModuleSource,
    /// Ids of the chunks containing the module.
    pub chunks: Vec<String>,
    pub reasons: Vec<StatsReason>,
    pub assets: Vec<String>,
    pub issuer: Option<StatsIssuer>,
    pub issuer_path: Vec<StatsIssuer>,
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsChunk {
    pub id: String,
    pub names: Vec<String>,
    pub files: Vec<String>,
    pub auxiliary_files: Vec<String>,
    pub entry: bool,
    pub initial: bool,
    pub size: usize,
    /// Module ids in chunk order.
    pub modules: Vec<String>,
    pub parents: Vec<String>,
    pub children: Vec<String>,
    pub siblings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsChunkGroupAsset {
    pub name: String,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsChunkGroup {
    pub name: String,
    pub chunks: Vec<String>,
    pub assets: Vec<StatsChunkGroupAsset>,
    /// Always the sum of `assets[*].size`.
    pub assets_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDiagnostic {
    pub severity: Severity,
    pub module_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_identifier: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
    /// Full module source, kept for code frames.
    #[serde(skip)]
    pub source: Option<Arc<str>>,
}

impl StatsDiagnostic {
    /// Code frame for this diagnostic, or `None` without a location or source.
    pub fn render_frame(&self) -> Option<Result<String, FrameError>> {
        let (Some(file), Some(line), Some(column), Some(source)) =
            (&self.file, self.line, self.column, &self.source)
        else {
            return None;
        };
        Some(format_error_frame(
            file,
            line,
            column,
            source,
            self.length.unwrap_or(1),
        ))
    }
}
