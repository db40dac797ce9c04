//! Stats options: which report categories to include.
//!
//! Raw options come in as a boolean, a preset name, or an object with an
//! optional `preset`, an optional `all` shorthand and per-category values.
//! Resolution order for every category is: explicit value, then `all`, then
//! the preset, then the renderer's default preset.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsOptionsError {
    #[error("stats option `{key}` expects a boolean, got {value}")]
    NotBoolean { key: String, value: String },
    #[error("unknown stats preset `{0}`")]
    UnknownPreset(String),
    #[error("stats options must be a boolean, a preset name or an object, got {0}")]
    InvalidShape(String),
}

/// Named bundles of category defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatsPreset {
    None,
    Summary,
    ErrorsOnly,
    ErrorsWarnings,
    Normal,
    Verbose,
}

impl FromStr for StatsPreset {
    type Err = StatsOptionsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(StatsPreset::None),
            "summary" => Ok(StatsPreset::Summary),
            "errors-only" => Ok(StatsPreset::ErrorsOnly),
            "errors-warnings" => Ok(StatsPreset::ErrorsWarnings),
            "normal" => Ok(StatsPreset::Normal),
            "verbose" => Ok(StatsPreset::Verbose),
            other => Err(StatsOptionsError::UnknownPreset(other.to_string())),
        }
    }
}

// Columns: normal, summary, errors-only, errors-warnings, verbose.
// `none` turns everything off.
macro_rules! stats_flags {
    ($( $field:ident => $key:literal [$normal:literal, $summary:literal, $errors_only:literal, $errors_warnings:literal, $verbose:literal] ),* $(,)?) => {
        /// Unresolved stats options as supplied by the caller.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
        #[serde(try_from = "Value")]
        pub struct StatsOptions {
            pub preset: Option<StatsPreset>,
            pub all: Option<bool>,
            $( pub $field: Option<bool>, )*
        }

        /// Concrete inclusion flag for every report category.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct ResolvedStatsOptions {
            $( pub $field: bool, )*
        }

        /// Keys recognised inside a stats options object, besides `preset` and `all`.
        pub const STATS_OPTION_KEYS: &[&str] = &[$( $key ),*];

        impl ResolvedStatsOptions {
            pub fn from_preset(preset: StatsPreset) -> Self {
                match preset {
                    StatsPreset::None => Self { $( $field: false, )* },
                    StatsPreset::Summary => Self { $( $field: $summary, )* },
                    StatsPreset::ErrorsOnly => Self { $( $field: $errors_only, )* },
                    StatsPreset::ErrorsWarnings => Self { $( $field: $errors_warnings, )* },
                    StatsPreset::Normal => Self { $( $field: $normal, )* },
                    StatsPreset::Verbose => Self { $( $field: $verbose, )* },
                }
            }

            /// True when no category is enabled at all.
            pub fn is_empty(&self) -> bool {
                !($( self.$field )||*)
            }
        }

        impl StatsOptions {
            /// Resolve against `fallback`, the preset used when none was given.
            pub fn resolve(&self, fallback: StatsPreset) -> ResolvedStatsOptions {
                let base = ResolvedStatsOptions::from_preset(self.preset.unwrap_or(fallback));
                ResolvedStatsOptions {
                    $( $field: self.$field.or(self.all).unwrap_or(base.$field), )*
                }
            }

            fn apply_key(&mut self, key: &str, value: &Value) -> Result<(), StatsOptionsError> {
                match key {
                    "preset" => {
                        self.preset = match value {
                            Value::Null => None,
                            Value::String(name) => Some(name.parse()?),
                            other => return Err(StatsOptionsError::InvalidShape(other.to_string())),
                        };
                    }
                    "all" => self.all = coerce_bool(key, value)?,
                    $( $key => self.$field = coerce_bool(key, value)?, )*
                    _ => {}
                }
                Ok(())
            }
        }
    };
}

stats_flags! {
    assets => "assets" [true, false, false, false, true],
    chunks => "chunks" [false, false, false, false, true],
    modules => "modules" [false, false, false, false, true],
    reasons => "reasons" [false, false, false, false, true],
    entrypoints => "entrypoints" [true, false, false, false, true],
    chunk_groups => "chunkGroups" [false, false, false, false, true],
    errors => "errors" [true, false, true, true, true],
    errors_count => "errorsCount" [true, true, true, true, true],
    warnings => "warnings" [true, false, false, true, true],
    warnings_count => "warningsCount" [true, true, false, true, true],
    hash => "hash" [true, true, false, false, true],
    version => "version" [false, false, false, false, true],
    timings => "timings" [false, false, false, false, true],
    built_at => "builtAt" [false, false, false, false, true],
    output_path => "outputPath" [false, false, false, false, true],
    public_path => "publicPath" [false, false, false, false, true],
    source => "source" [false, false, false, false, false],
}

impl StatsOptions {
    pub fn preset(preset: StatsPreset) -> Self {
        Self {
            preset: Some(preset),
            ..Self::default()
        }
    }

    /// Shorthand for `{ all: <value> }`.
    pub fn all(value: bool) -> Self {
        Self {
            all: Some(value),
            ..Self::default()
        }
    }

    pub fn from_value(value: &Value) -> Result<Self, StatsOptionsError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Bool(true) => Ok(Self::preset(StatsPreset::Normal)),
            Value::Bool(false) => Ok(Self::preset(StatsPreset::None)),
            Value::String(name) => Ok(Self::preset(name.parse()?)),
            Value::Object(map) => {
                let mut options = Self::default();
                for (key, value) in map {
                    options.apply_key(key, value)?;
                }
                Ok(options)
            }
            other => Err(StatsOptionsError::InvalidShape(other.to_string())),
        }
    }
}

impl TryFrom<Value> for StatsOptions {
    type Error = StatsOptionsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

/// `null` means unset; numbers are truthy when non-zero; the strings
/// `"true"` and `"false"` are accepted. Anything else is rejected.
fn coerce_bool(key: &str, value: &Value) -> Result<Option<bool>, StatsOptionsError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(flag) => Ok(Some(*flag)),
        Value::Number(number) => Ok(Some(number.as_f64().is_some_and(|n| n != 0.0))),
        Value::String(text) if text == "true" => Ok(Some(true)),
        Value::String(text) if text == "false" => Ok(Some(false)),
        other => Err(StatsOptionsError::NotBoolean {
            key: key.to_string(),
            value: other.to_string(),
        }),
    }
}
