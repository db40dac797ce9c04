//! Reporting over a finished compilation.
//!
//! [`Stats`] owns the compilation and lazily collects a [`StatsSnapshot`]
//! the first time a report is requested. Both renderers are pure functions
//! of that snapshot and the resolved options, so a `Stats` can be shared
//! between threads and rendered concurrently.

mod collector;
mod json;
mod snapshot;
mod text;

use std::sync::OnceLock;

use serde_json::Value;
use thiserror::Error;

pub use collector::collect;
pub use json::{JsonChunk, JsonModule, StatsCompilation, render_json};
pub use snapshot::{
    StatsAsset, StatsAssetInfo, StatsChunk, StatsChunkGroup, StatsChunkGroupAsset,
    StatsDiagnostic, StatsIssuer, StatsModule, StatsReason, StatsSnapshot,
};
pub use text::render_text;

use crate::compilation::Compilation;
use crate::options::{StatsOptions, StatsOptionsError, StatsPreset};

#[derive(Debug, Error)]
pub enum StatsError {
    #[error(transparent)]
    Options(#[from] StatsOptionsError),
    #[error("failed to serialize stats: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct Stats {
    compilation: Compilation,
    snapshot: OnceLock<StatsSnapshot>,
}

impl Stats {
    pub fn new(compilation: Compilation) -> Self {
        Self {
            compilation,
            snapshot: OnceLock::new(),
        }
    }

    pub fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    /// The collected report, built on first use.
    pub fn snapshot(&self) -> &StatsSnapshot {
        self.snapshot.get_or_init(|| collect(&self.compilation))
    }

    /// Compilation hash as 16 lowercase hex chars.
    pub fn hash(&self) -> &str {
        self.snapshot().hash.as_deref().unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        self.compilation.errors().next().is_some()
    }

    pub fn has_warnings(&self) -> bool {
        self.compilation.warnings().next().is_some()
    }

    /// Structured report. Unset options fall back to the `verbose` preset.
    pub fn to_json(&self, options: &StatsOptions) -> StatsCompilation {
        render_json(self.snapshot(), &options.resolve(StatsPreset::Verbose))
    }

    /// Text report. Unset options fall back to the `normal` preset.
    pub fn to_string(&self, options: &StatsOptions) -> String {
        render_text(self.snapshot(), &options.resolve(StatsPreset::Normal))
    }

    /// Structured report for raw options, as a JSON value.
    pub fn to_json_value(&self, options: &Value) -> Result<Value, StatsError> {
        let options = StatsOptions::from_value(options)?;
        Ok(serde_json::to_value(self.to_json(&options))?)
    }

    /// Text report using the stats options the compilation was configured with.
    pub fn summary(&self) -> String {
        self.to_string(&self.compilation.options.stats)
    }
}
