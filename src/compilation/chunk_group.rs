use super::ChunkUkey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkGroupUkey(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkGroupKind {
    Entrypoint,
    AsyncEntrypoint,
}

/// Chunks that are loaded together: an entrypoint or an async import target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkGroup {
    pub ukey: ChunkGroupUkey,
    pub name: Option<String>,
    pub kind: ChunkGroupKind,
    pub chunks: Vec<ChunkUkey>,
}

impl ChunkGroup {
    pub fn is_entrypoint(&self) -> bool {
        self.kind == ChunkGroupKind::Entrypoint
    }
}
