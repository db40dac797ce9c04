use sha2::{Digest, Sha256};

pub fn hash_bytes(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

/// Truncates a SHA-256 digest to its leading 64 bits.
pub fn short_hash(bytes: &[u8]) -> u64 {
    fold_digest(&hash_bytes(bytes))
}

/// Lowercase, zero-padded hex rendering of a 64-bit hash.
pub fn to_hex(value: u64) -> String {
    format!("{value:016x}")
}

fn fold_digest(digest: &[u8; 32]) -> u64 {
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

/// Incremental hasher for compilation content.
///
/// Every field is followed by a NUL separator so that `("ab", "c")` and
/// `("a", "bc")` never collide.
#[derive(Default)]
pub struct ContentHasher {
    inner: Sha256,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
        self.inner.update(bytes);
        self.inner.update([0u8]);
        self
    }

    pub fn finish(self) -> u64 {
        let result = self.inner.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        fold_digest(&out)
    }
}
