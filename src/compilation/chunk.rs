use indexmap::{IndexMap, IndexSet};

use super::{ChunkGroupUkey, ModuleIdentifier};

/// Index of a chunk in [`Compilation::chunks`](super::Compilation::chunks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkUkey(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// Loaded up front and carries the runtime.
    Entry,
    /// Loaded on demand through a dynamic import.
    Async,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub ukey: ChunkUkey,
    pub id: String,
    pub names: IndexSet<String>,
    pub kind: ChunkKind,
    pub files: IndexSet<String>,
    /// Files emitted on behalf of the chunk's modules (asset modules).
    pub auxiliary_files: IndexSet<String>,
    /// Modules in traversal order, each mapped to its index in the rendered chunk.
    pub modules: IndexMap<ModuleIdentifier, usize>,
    pub groups: Vec<ChunkGroupUkey>,
    pub parents: IndexSet<ChunkUkey>,
    pub children: IndexSet<ChunkUkey>,
}

impl Chunk {
    pub fn new(ukey: ChunkUkey, id: impl Into<String>, kind: ChunkKind) -> Self {
        Self {
            ukey,
            id: id.into(),
            names: IndexSet::new(),
            kind,
            files: IndexSet::new(),
            auxiliary_files: IndexSet::new(),
            modules: IndexMap::new(),
            groups: Vec::new(),
            parents: IndexSet::new(),
            children: IndexSet::new(),
        }
    }

    pub fn has_entry_module(&self) -> bool {
        self.kind == ChunkKind::Entry
    }

    pub fn can_be_initial(&self) -> bool {
        self.kind == ChunkKind::Entry
    }

    /// Add a module, returning false if it was already present.
    pub fn add_module(&mut self, identifier: ModuleIdentifier) -> bool {
        if self.modules.contains_key(&identifier) {
            return false;
        }
        let index = self.modules.len();
        self.modules.insert(identifier, index);
        true
    }

    pub fn contains_file(&self, file: &str) -> bool {
        self.files.contains(file) || self.auxiliary_files.contains(file)
    }
}
