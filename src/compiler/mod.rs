//! The build pipeline: make the module graph, seal it into chunks and
//! assets, then emit the assets.

mod make;
mod output_fs;
pub mod parser;
mod resolver;
mod runtime;
mod seal;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, info, instrument};

pub use output_fs::{MemoryFileSystem, NativeFileSystem, OutputFileSystem};
pub use resolver::{RESOLVE_EXTENSIONS, ResolveError, Resolver};

use crate::compilation::Compilation;
use crate::options::CompilerOptions;
use crate::stats::Stats;
use crate::utils::hash::short_hash;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("context `{}` is not a readable directory", .0.display())]
    InvalidContext(PathBuf),
    #[error("invalid compiler options: {0}")]
    InvalidOptions(String),
    #[error("failed to emit `{}`: {source}", path.display())]
    Emit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Runs builds for one set of options, writing into `F`.
///
/// Assets whose content did not change since the previous run of the same
/// compiler are not written again.
pub struct Compiler<F: OutputFileSystem = MemoryFileSystem> {
    options: Arc<CompilerOptions>,
    resolver: Resolver,
    output_filesystem: F,
    emitted_asset_versions: IndexMap<String, u64>,
}

impl<F: OutputFileSystem> Compiler<F> {
    pub fn new(options: CompilerOptions, output_filesystem: F) -> Result<Self, CompileError> {
        options.validate()?;
        let options = options.with_canonical_context()?;
        Ok(Self {
            resolver: Resolver::new(&options.context),
            options: Arc::new(options),
            output_filesystem,
            emitted_asset_versions: IndexMap::new(),
        })
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn output_filesystem(&self) -> &F {
        &self.output_filesystem
    }

    #[instrument(name = "build", skip_all)]
    pub fn run(&mut self) -> Result<Stats, CompileError> {
        let started = Instant::now();
        let built_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or_default();

        let mut compilation = Compilation::new(self.options.clone());
        compilation.built_at = built_at;

        make::make(&mut compilation, &self.resolver);
        seal::seal(&mut compilation);
        if !self.options.no_emit_assets {
            self.emit_assets(&mut compilation)?;
        }

        compilation.time = started.elapsed().as_millis() as u64;
        info!(
            modules = compilation.module_graph.module_count(),
            assets = compilation.assets.len(),
            errors = compilation.errors().count(),
            warnings = compilation.warnings().count(),
            "compilation finished"
        );
        Ok(Stats::new(compilation))
    }

    #[instrument(name = "emit_assets", skip_all)]
    fn emit_assets(&mut self, compilation: &mut Compilation) -> Result<(), CompileError> {
        let output_path = self.options.output_path();
        if self.options.output.clean {
            self.clean_output(&output_path, compilation)?;
        }
        let mut versions = IndexMap::new();

        for (name, asset) in &compilation.assets {
            let version = short_hash(asset.source());
            versions.insert(name.clone(), version);
            if self.emitted_asset_versions.get(name) == Some(&version) {
                debug!(file = %name, "unchanged, skipping");
                continue;
            }

            let file_path = output_path.join(strip_query(name));
            let dir = file_path.parent().unwrap_or(&output_path).to_path_buf();
            self.output_filesystem
                .create_dir_all(&dir)
                .map_err(|source| CompileError::Emit {
                    path: dir.clone(),
                    source,
                })?;
            self.output_filesystem
                .write(&file_path, asset.source())
                .map_err(|source| CompileError::Emit {
                    path: file_path.clone(),
                    source,
                })?;
            debug!(file = %file_path.display(), "emitted asset");
            compilation.emitted_assets.insert(name.clone());
        }

        self.emitted_asset_versions = versions;
        Ok(())
    }

    /// Wipe the output directory before the first emit. Later runs only
    /// remove files emitted before that the compilation no longer produces.
    fn clean_output(
        &mut self,
        output_path: &Path,
        compilation: &Compilation,
    ) -> Result<(), CompileError> {
        if self.emitted_asset_versions.is_empty() {
            debug!(path = %output_path.display(), "cleaning output directory");
            return self
                .output_filesystem
                .remove_dir_all(output_path)
                .map_err(|source| CompileError::Emit {
                    path: output_path.to_path_buf(),
                    source,
                });
        }

        for name in self.emitted_asset_versions.keys() {
            if compilation.assets.contains_key(name) {
                continue;
            }
            let file_path = output_path.join(strip_query(name));
            debug!(file = %file_path.display(), "removing stale asset");
            self.output_filesystem
                .remove_file(&file_path)
                .map_err(|source| CompileError::Emit {
                    path: file_path.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}

fn strip_query(name: &str) -> &str {
    name.split_once('?')
        .map(|(filename, _query)| filename)
        .unwrap_or(name)
}

/// Build once with an in-memory output file system.
pub fn compile(options: CompilerOptions) -> Result<Stats, CompileError> {
    Compiler::new(options, MemoryFileSystem::new())?.run()
}
