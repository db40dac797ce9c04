//! Structured report: a projection of the snapshot filtered by the resolved
//! options. Disabled categories are absent from the output, never empty.

use indexmap::IndexMap;
use serde::Serialize;

use super::snapshot::{
    StatsAsset, StatsChunk, StatsChunkGroup, StatsDiagnostic, StatsIssuer, StatsModule,
    StatsReason, StatsSnapshot,
};
use crate::compilation::SourceEncoding;
use crate::options::ResolvedStatsOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsCompilation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_at: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets_by_chunk_name: Option<IndexMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<StatsAsset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<Vec<JsonChunk>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<JsonModule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoints: Option<IndexMap<String, StatsChunkGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_chunk_groups: Option<IndexMap<String, StatsChunkGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<StatsDiagnostic>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<StatsDiagnostic>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonChunk {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub names: Vec<String>,
    pub files: Vec<String>,
    pub auxiliary_files: Vec<String>,
    pub entry: bool,
    pub initial: bool,
    pub size: usize,
    pub modules: Vec<JsonModule>,
    pub parents: Vec<String>,
    pub children: Vec<String>,
    pub siblings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonModule {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub module_type: &'static str,
    pub identifier: String,
    pub name: String,
    pub id: String,
    pub size: usize,
    pub chunks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_id: Option<String>,
    pub issuer_path: Vec<StatsIssuer>,
    pub assets: Vec<String>,
    pub failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Vec<StatsReason>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<&'static str>,
    /// UTF-8 text as is; binary sources as lowercase hex.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

pub fn render_json(snapshot: &StatsSnapshot, options: &ResolvedStatsOptions) -> StatsCompilation {
    let chunks = options.chunks.then(|| {
        snapshot
            .chunks
            .iter()
            .map(|chunk| json_chunk(snapshot, chunk, options))
            .collect()
    });

    StatsCompilation {
        version: options.version.then(|| snapshot.version.clone()),
        hash: options.hash.then(|| snapshot.hash.clone()).flatten(),
        time: options.timings.then_some(snapshot.time),
        built_at: options.built_at.then_some(snapshot.built_at),
        public_path: options.public_path.then(|| snapshot.public_path.clone()),
        output_path: options.output_path.then(|| snapshot.output_path.clone()),
        assets_by_chunk_name: options.assets.then(|| assets_by_chunk_name(&snapshot.chunks)),
        assets: options.assets.then(|| snapshot.assets.clone()),
        chunks,
        modules: options.modules.then(|| {
            snapshot
                .modules
                .iter()
                .map(|module| json_module(module, options))
                .collect()
        }),
        entrypoints: options.entrypoints.then(|| by_name(&snapshot.entrypoints)),
        named_chunk_groups: options
            .chunk_groups
            .then(|| by_name(&snapshot.named_chunk_groups)),
        errors: options.errors.then(|| snapshot.errors.clone()),
        errors_count: options.errors_count.then_some(snapshot.errors.len()),
        warnings: options.warnings.then(|| snapshot.warnings.clone()),
        warnings_count: options.warnings_count.then_some(snapshot.warnings.len()),
    }
}

fn assets_by_chunk_name(chunks: &[StatsChunk]) -> IndexMap<String, Vec<String>> {
    let mut map: IndexMap<String, Vec<String>> = IndexMap::new();
    for chunk in chunks {
        for name in &chunk.names {
            map.entry(name.clone())
                .or_default()
                .extend(chunk.files.iter().cloned());
        }
    }
    map
}

fn by_name(groups: &[StatsChunkGroup]) -> IndexMap<String, StatsChunkGroup> {
    groups
        .iter()
        .map(|group| (group.name.clone(), group.clone()))
        .collect()
}

fn json_chunk(
    snapshot: &StatsSnapshot,
    chunk: &StatsChunk,
    options: &ResolvedStatsOptions,
) -> JsonChunk {
    JsonChunk {
        kind: "chunk",
        id: chunk.id.clone(),
        names: chunk.names.clone(),
        files: chunk.files.clone(),
        auxiliary_files: chunk.auxiliary_files.clone(),
        entry: chunk.entry,
        initial: chunk.initial,
        size: chunk.size,
        modules: chunk
            .modules
            .iter()
            .filter_map(|id| snapshot.module(id))
            .map(|module| json_module(module, options))
            .collect(),
        parents: chunk.parents.clone(),
        children: chunk.children.clone(),
        siblings: chunk.siblings.clone(),
    }
}

fn json_module(module: &StatsModule, options: &ResolvedStatsOptions) -> JsonModule {
    let issuer = module.issuer.as_ref();
    JsonModule {
        kind: "module",
        module_type: module.module_type,
        identifier: module.identifier.clone(),
        name: module.name.clone(),
        id: module.id.clone(),
        size: module.size,
        chunks: module.chunks.clone(),
        issuer: issuer.map(|issuer| issuer.identifier.clone()),
        issuer_name: issuer.map(|issuer| issuer.name.clone()),
        issuer_id: issuer.map(|issuer| issuer.id.clone()),
        issuer_path: module.issuer_path.clone(),
        assets: module.assets.clone(),
        failed: module.failed,
        reasons: options.reasons.then(|| module.reasons.clone()),
        encoding: options.source.then(|| module.source.encoding().as_str()),
        source: options.source.then(|| source_text(module)),
    }
}

fn source_text(module: &StatsModule) -> String {
    match (module.source.encoding(), module.source.as_str()) {
        (SourceEncoding::Utf8, Some(text)) => text.to_string(),
        _ => module
            .source
            .bytes()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect(),
    }
}
