mod compiler_options;
mod stats_options;

pub use compiler_options::{
    CompilerOptions, DEFAULT_ENTRY_NAME, EntryDescription, OutputOptions,
};
pub use stats_options::{
    ResolvedStatsOptions, STATS_OPTION_KEYS, StatsOptions, StatsOptionsError, StatsPreset,
};
