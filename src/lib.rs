pub mod compilation;
pub mod compiler;
pub mod diagnostics;
pub mod options;
pub mod stats;
pub mod utils;

pub use compiler::{
    CompileError, Compiler, MemoryFileSystem, NativeFileSystem, OutputFileSystem, compile,
};
pub use options::{CompilerOptions, EntryDescription, OutputOptions, StatsOptions, StatsPreset};
pub use stats::{Stats, StatsCompilation, StatsError};
