//! The finished result of a build: an arena of modules, chunks, chunk groups
//! and assets cross-referenced by ids.

mod asset;
mod chunk;
mod chunk_group;
mod dependency;
mod module;
mod module_graph;

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

pub use asset::{AssetInfo, CompilationAsset};
pub use chunk::{Chunk, ChunkKind, ChunkUkey};
pub use chunk_group::{ChunkGroup, ChunkGroupKind, ChunkGroupUkey};
pub use dependency::{Dependency, DependencyId, DependencyKind};
pub use module::{ModuleIdentifier, ModuleSource, ModuleType, NormalModule, SourceEncoding};
pub use module_graph::ModuleGraph;

use crate::diagnostics::Diagnostic;
use crate::options::CompilerOptions;

#[derive(Debug, Clone)]
pub struct Compilation {
    pub options: Arc<CompilerOptions>,
    pub module_graph: ModuleGraph,
    /// Entry name to its entry dependency.
    pub entries: IndexMap<String, DependencyId>,
    pub chunks: Vec<Chunk>,
    pub chunk_groups: Vec<ChunkGroup>,
    /// Entry name to its entrypoint chunk group.
    pub entrypoints: IndexMap<String, ChunkGroupUkey>,
    pub assets: IndexMap<String, CompilationAsset>,
    pub emitted_assets: IndexSet<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub hash: Option<u64>,
    /// Wall-clock build time in milliseconds.
    pub time: u64,
    /// Milliseconds since the Unix epoch at which the build started.
    pub built_at: u64,
}

impl Compilation {
    pub fn new(options: Arc<CompilerOptions>) -> Self {
        Self {
            options,
            module_graph: ModuleGraph::default(),
            entries: IndexMap::new(),
            chunks: Vec::new(),
            chunk_groups: Vec::new(),
            entrypoints: IndexMap::new(),
            assets: IndexMap::new(),
            emitted_assets: IndexSet::new(),
            diagnostics: Vec::new(),
            hash: None,
            time: 0,
            built_at: 0,
        }
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn push_batch_diagnostic(&mut self, diagnostics: Vec<Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn chunk(&self, ukey: ChunkUkey) -> &Chunk {
        &self.chunks[ukey.0]
    }

    pub fn chunk_mut(&mut self, ukey: ChunkUkey) -> &mut Chunk {
        &mut self.chunks[ukey.0]
    }

    pub fn chunk_group(&self, ukey: ChunkGroupUkey) -> &ChunkGroup {
        &self.chunk_groups[ukey.0]
    }

    pub fn add_chunk(&mut self, id: impl Into<String>, kind: ChunkKind) -> ChunkUkey {
        let ukey = ChunkUkey(self.chunks.len());
        self.chunks.push(Chunk::new(ukey, id, kind));
        ukey
    }

    pub fn add_chunk_group(
        &mut self,
        name: Option<String>,
        kind: ChunkGroupKind,
        chunk: ChunkUkey,
    ) -> ChunkGroupUkey {
        let ukey = ChunkGroupUkey(self.chunk_groups.len());
        self.chunk_groups.push(ChunkGroup {
            ukey,
            name,
            kind,
            chunks: vec![chunk],
        });
        self.chunk_mut(chunk).groups.push(ukey);
        ukey
    }

    pub fn emit_asset(&mut self, name: impl Into<String>, asset: CompilationAsset) {
        self.assets.insert(name.into(), asset);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|diag| diag.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|diag| !diag.is_error())
    }
}
