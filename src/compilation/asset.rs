use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetInfo {
    /// Only needed during development (never set by this pipeline's templates).
    pub development: bool,
    pub hot_module_replacement: bool,
}

/// An output file produced by the compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationAsset {
    source: Arc<[u8]>,
    pub info: AssetInfo,
}

impl CompilationAsset {
    pub fn new(source: Vec<u8>, info: AssetInfo) -> Self {
        Self {
            source: Arc::from(source),
            info,
        }
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn size(&self) -> usize {
        self.source.len()
    }
}
