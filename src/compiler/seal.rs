//! Chunk graph construction, asset rendering and hashing.

use std::collections::VecDeque;

use indexmap::IndexMap;
use tracing::{debug, instrument};

use super::runtime::render_chunk;
use crate::compilation::{
    AssetInfo, Chunk, ChunkGroupKind, ChunkKind, ChunkUkey, Compilation, CompilationAsset,
    ModuleGraph, ModuleIdentifier,
};
use crate::utils::hash::ContentHasher;

#[instrument(name = "seal", skip_all)]
pub(super) fn seal(compilation: &mut Compilation) {
    build_chunk_graph(compilation);
    render_assets(compilation);
    compilation.hash = Some(compute_hash(compilation));
}

fn build_chunk_graph(compilation: &mut Compilation) {
    let entries: Vec<_> = compilation
        .entries
        .iter()
        .map(|(name, dependency)| (name.clone(), *dependency))
        .collect();
    let mut async_queue: VecDeque<(ChunkUkey, ModuleIdentifier)> = VecDeque::new();

    for (name, dependency) in entries {
        let Some(root) = compilation.module_graph.target(dependency).cloned() else {
            debug!(entry = %name, "entry did not resolve, no chunk created");
            continue;
        };
        let chunk = compilation.add_chunk(name.clone(), ChunkKind::Entry);
        compilation.chunk_mut(chunk).names.insert(name.clone());
        let group = compilation.add_chunk_group(Some(name.clone()), ChunkGroupKind::Entrypoint, chunk);
        compilation.entrypoints.insert(name, group);
        fill_chunk(
            &compilation.module_graph,
            &mut compilation.chunks[chunk.0],
            &root,
            &mut async_queue,
        );
    }

    let mut async_chunks: IndexMap<ModuleIdentifier, ChunkUkey> = IndexMap::new();
    while let Some((parent, target)) = async_queue.pop_front() {
        let chunk = match async_chunks.get(&target) {
            Some(chunk) => *chunk,
            None => {
                let chunk = compilation.add_chunk(target.module_id(), ChunkKind::Async);
                compilation.add_chunk_group(None, ChunkGroupKind::AsyncEntrypoint, chunk);
                async_chunks.insert(target.clone(), chunk);
                fill_chunk(
                    &compilation.module_graph,
                    &mut compilation.chunks[chunk.0],
                    &target,
                    &mut async_queue,
                );
                chunk
            }
        };
        compilation.chunk_mut(parent).children.insert(chunk);
        compilation.chunk_mut(chunk).parents.insert(parent);
    }
}

/// Depth-first, pre-order walk over static edges from `root`. Dynamic
/// imports are queued so they get chunks of their own.
fn fill_chunk(
    graph: &ModuleGraph,
    chunk: &mut Chunk,
    root: &ModuleIdentifier,
    async_queue: &mut VecDeque<(ChunkUkey, ModuleIdentifier)>,
) {
    let mut stack = vec![root.clone()];
    while let Some(identifier) = stack.pop() {
        if !chunk.add_module(identifier.clone()) {
            continue;
        }
        if let Some(module) = graph.module(&identifier) {
            chunk.auxiliary_files.extend(module.assets.iter().cloned());
        }

        let mut statics = Vec::new();
        for (dependency, target) in graph.outgoing(&identifier) {
            if dependency.kind.is_async() {
                async_queue.push_back((chunk.ukey, target.clone()));
            } else {
                statics.push(target.clone());
            }
        }
        stack.extend(statics.into_iter().rev());
    }
}

fn render_assets(compilation: &mut Compilation) {
    let options = compilation.options.clone();
    // Chunk files come first, module-emitted files after them.
    let module_assets = std::mem::take(&mut compilation.assets);

    for index in 0..compilation.chunks.len() {
        let chunk = &compilation.chunks[index];
        let template = match chunk.kind {
            ChunkKind::Entry => &options.output.filename,
            ChunkKind::Async => &options.output.chunk_filename,
        };
        let name = chunk.names.first().unwrap_or(&chunk.id);
        let file = template.replace("[name]", name).replace("[id]", &chunk.id);
        let source = render_chunk(&compilation.module_graph, chunk, &options.output.public_path);

        debug!(file = %file, size = source.len(), "rendered chunk");
        compilation.emit_asset(file.clone(), CompilationAsset::new(source, AssetInfo::default()));
        compilation.chunks[index].files.insert(file);
    }

    for (name, asset) in module_assets {
        compilation.assets.entry(name).or_insert(asset);
    }
}

/// Hash over module identifiers and sources, then asset names and contents,
/// all in insertion order.
fn compute_hash(compilation: &Compilation) -> u64 {
    let mut hasher = ContentHasher::new();
    for module in compilation.module_graph.modules() {
        hasher
            .update(module.identifier.as_str().as_bytes())
            .update(module.source.bytes());
    }
    for (name, asset) in &compilation.assets {
        hasher.update(name.as_bytes()).update(asset.source());
    }
    hasher.finish()
}
