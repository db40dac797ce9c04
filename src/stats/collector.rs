//! Walks a finished compilation once and flattens it into a [`StatsSnapshot`].

use indexmap::{IndexMap, IndexSet};
use tracing::instrument;

use super::snapshot::{
    StatsAsset, StatsAssetInfo, StatsChunk, StatsChunkGroup, StatsChunkGroupAsset,
    StatsDiagnostic, StatsIssuer, StatsModule, StatsReason, StatsSnapshot,
};
use crate::compilation::{ChunkGroup, Compilation, ModuleIdentifier, NormalModule};
use crate::diagnostics::{Diagnostic, get_source_line};
use crate::utils::hash::to_hex;

#[instrument(name = "collect_stats", skip_all)]
pub fn collect(compilation: &Compilation) -> StatsSnapshot {
    StatsSnapshot {
        version: env!("CARGO_PKG_VERSION").to_string(),
        hash: compilation.hash.map(to_hex),
        time: compilation.time,
        built_at: compilation.built_at,
        output_path: compilation
            .options
            .output_path()
            .to_string_lossy()
            .into_owned(),
        public_path: compilation.options.output.public_path.clone(),
        assets: collect_assets(compilation),
        chunks: collect_chunks(compilation),
        modules: collect_modules(compilation),
        entrypoints: compilation
            .entrypoints
            .values()
            .map(|ukey| collect_chunk_group(compilation, compilation.chunk_group(*ukey)))
            .collect(),
        named_chunk_groups: compilation
            .chunk_groups
            .iter()
            .filter(|group| group.name.is_some())
            .map(|group| collect_chunk_group(compilation, group))
            .collect(),
        errors: compilation.errors().map(collect_diagnostic).collect(),
        warnings: compilation.warnings().map(collect_diagnostic).collect(),
    }
}

fn collect_assets(compilation: &Compilation) -> Vec<StatsAsset> {
    compilation
        .assets
        .iter()
        .map(|(name, asset)| {
            let owners = compilation
                .chunks
                .iter()
                .filter(|chunk| chunk.contains_file(name));
            let mut chunks = Vec::new();
            let mut chunk_names = IndexSet::new();
            for chunk in owners {
                chunks.push(chunk.id.clone());
                chunk_names.extend(chunk.names.iter().cloned());
            }
            StatsAsset {
                kind: "asset",
                name: name.clone(),
                size: asset.size(),
                chunks,
                chunk_names: chunk_names.into_iter().collect(),
                emitted: compilation.emitted_assets.contains(name),
                info: StatsAssetInfo {
                    development: asset.info.development,
                    hot_module_replacement: asset.info.hot_module_replacement,
                },
            }
        })
        .collect()
}

fn collect_chunks(compilation: &Compilation) -> Vec<StatsChunk> {
    let graph = &compilation.module_graph;
    compilation
        .chunks
        .iter()
        .map(|chunk| {
            let size = chunk
                .modules
                .keys()
                .filter_map(|identifier| graph.module(identifier))
                .map(NormalModule::size)
                .sum();
            let mut siblings = IndexSet::new();
            for group in &chunk.groups {
                for sibling in &compilation.chunk_group(*group).chunks {
                    if *sibling != chunk.ukey {
                        siblings.insert(compilation.chunk(*sibling).id.clone());
                    }
                }
            }
            StatsChunk {
                id: chunk.id.clone(),
                names: chunk.names.iter().cloned().collect(),
                files: chunk.files.iter().cloned().collect(),
                auxiliary_files: chunk.auxiliary_files.iter().cloned().collect(),
                entry: chunk.has_entry_module(),
                initial: chunk.can_be_initial(),
                size,
                modules: chunk
                    .modules
                    .keys()
                    .map(ModuleIdentifier::module_id)
                    .collect(),
                parents: chunk
                    .parents
                    .iter()
                    .map(|ukey| compilation.chunk(*ukey).id.clone())
                    .collect(),
                children: chunk
                    .children
                    .iter()
                    .map(|ukey| compilation.chunk(*ukey).id.clone())
                    .collect(),
                siblings: siblings.into_iter().collect(),
            }
        })
        .collect()
}

fn collect_modules(compilation: &Compilation) -> Vec<StatsModule> {
    let graph = &compilation.module_graph;

    let mut chunks_of: IndexMap<&ModuleIdentifier, Vec<String>> = IndexMap::new();
    for chunk in &compilation.chunks {
        for identifier in chunk.modules.keys() {
            chunks_of.entry(identifier).or_default().push(chunk.id.clone());
        }
    }

    let issuer = |identifier: &ModuleIdentifier| {
        graph.module(identifier).map(|module| StatsIssuer {
            id: module.id.clone(),
            identifier: module.identifier.to_string(),
            name: module.name.clone(),
        })
    };

    graph
        .modules()
        .map(|module| {
            let reasons = graph
                .incoming(&module.identifier)
                .iter()
                .map(|id| {
                    let dependency = graph.dependency(*id);
                    let origin = dependency
                        .origin
                        .as_ref()
                        .and_then(|origin| graph.module(origin));
                    StatsReason {
                        kind: dependency.kind.as_str(),
                        user_request: dependency.request.clone(),
                        module_id: origin.map(|origin| origin.id.clone()),
                        module_identifier: origin.map(|origin| origin.identifier.to_string()),
                        module_name: origin.map(|origin| origin.name.clone()),
                    }
                })
                .collect();

            let issuer_path: Vec<StatsIssuer> = graph
                .issuer_path(&module.identifier)
                .iter()
                .filter_map(&issuer)
                .collect();

            StatsModule {
                id: module.id.clone(),
                identifier: module.identifier.to_string(),
                name: module.name.clone(),
                module_type: module.module_type.as_str(),
                size: module.size(),
                source: module.source.clone(),
                chunks: chunks_of
                    .get(&module.identifier)
                    .cloned()
                    .unwrap_or_default(),
                reasons,
                assets: module.assets.clone(),
                issuer: issuer_path.last().cloned(),
                issuer_path,
                failed: module.build_error.is_some(),
            }
        })
        .collect()
}

fn collect_chunk_group(compilation: &Compilation, group: &ChunkGroup) -> StatsChunkGroup {
    let mut assets = Vec::new();
    for ukey in &group.chunks {
        for file in &compilation.chunk(*ukey).files {
            if let Some(asset) = compilation.assets.get(file) {
                assets.push(StatsChunkGroupAsset {
                    name: file.clone(),
                    size: asset.size(),
                });
            }
        }
    }
    StatsChunkGroup {
        name: group.name.clone().unwrap_or_default(),
        chunks: group
            .chunks
            .iter()
            .map(|ukey| compilation.chunk(*ukey).id.clone())
            .collect(),
        assets_size: assets.iter().map(|asset| asset.size).sum(),
        assets,
    }
}

fn collect_diagnostic(diagnostic: &Diagnostic) -> StatsDiagnostic {
    let location = diagnostic.location();
    let source_line = location.zip(diagnostic.source()).and_then(|(location, source)| {
        get_source_line(source, location.line).map(str::to_string)
    });
    StatsDiagnostic {
        severity: diagnostic.severity(),
        module_type: diagnostic.module_type().to_string(),
        module_identifier: diagnostic.module_identifier().map(str::to_string),
        message: diagnostic.message().to_string(),
        file: location.map(|location| location.file.clone()),
        line: location.map(|location| location.line),
        column: location.map(|location| location.column),
        length: location.map(|location| location.length),
        source_line,
        source: diagnostic.source().cloned(),
    }
}
