use std::path::PathBuf;

use indexmap::IndexMap;
use rspack_stats::options::DEFAULT_ENTRY_NAME;
use rspack_stats::{
    CompileError, CompilerOptions, EntryDescription, OutputOptions, StatsOptions, StatsPreset,
    compile,
};
use serde_json::json;

fn tests_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests")
}

#[test]
fn deserializes_with_defaults() {
    let options: CompilerOptions = serde_json::from_value(json!({
        "context": "/project",
        "entry": "./src/index.js",
    }))
    .unwrap();

    assert_eq!(options.context, PathBuf::from("/project"));
    assert_eq!(options.entry, EntryDescription::from("./src/index.js"));
    assert_eq!(options.output, OutputOptions::default());
    assert_eq!(options.output.path, PathBuf::from("dist"));
    assert_eq!(options.output.public_path, "auto");
    assert_eq!(options.output.filename, "[name].js");
    assert_eq!(options.output.chunk_filename, "[id].js");
    assert!(!options.output.clean);
    assert!(!options.no_emit_assets);
    assert_eq!(options.stats, StatsOptions::default());
    assert_eq!(options.output_path(), PathBuf::from("/project/dist"));
}

#[test]
fn deserializes_camel_case_fields() {
    let options: CompilerOptions = serde_json::from_value(json!({
        "context": "/project",
        "entry": { "app": "./app", "admin": "./admin" },
        "output": {
            "path": "/out",
            "publicPath": "/static/",
            "chunkFilename": "chunks/[id].js",
            "clean": true,
        },
        "noEmitAssets": true,
        "stats": "errors-only",
    }))
    .unwrap();

    let entries = options.entry.entries();
    assert_eq!(
        entries,
        vec![
            ("app".to_string(), "./app".to_string()),
            ("admin".to_string(), "./admin".to_string()),
        ]
    );
    assert_eq!(options.output.public_path, "/static/");
    assert_eq!(options.output.filename, "[name].js");
    assert_eq!(options.output.chunk_filename, "chunks/[id].js");
    assert!(options.output.clean);
    assert_eq!(options.output_path(), PathBuf::from("/out"));
    assert!(options.no_emit_assets);
    assert_eq!(options.stats, StatsOptions::preset(StatsPreset::ErrorsOnly));
}

#[test]
fn single_entry_is_named_main() {
    assert_eq!(
        EntryDescription::from("./index.js").entries(),
        vec![(DEFAULT_ENTRY_NAME.to_string(), "./index.js".to_string())]
    );
}

#[test]
fn valid_options_pass() {
    let options = CompilerOptions::new(tests_dir(), "./fixtures/a");
    assert!(options.validate().is_ok());
}

#[test]
fn empty_entry_map_is_rejected() {
    let options = CompilerOptions::new(tests_dir(), EntryDescription::Named(IndexMap::new()));
    assert!(matches!(
        options.validate(),
        Err(CompileError::InvalidOptions(message)) if message.contains("at least one")
    ));
}

#[test]
fn blank_request_is_rejected() {
    let options = CompilerOptions::new(tests_dir(), EntryDescription::named([("main", "  ")]));
    assert!(matches!(
        options.validate(),
        Err(CompileError::InvalidOptions(message)) if message.contains("`main`")
    ));
}

#[test]
fn filename_template_needs_a_placeholder() {
    let mut options = CompilerOptions::new(tests_dir(), "./fixtures/a");
    options.output.filename = "bundle.js".to_string();
    assert!(matches!(
        options.validate(),
        Err(CompileError::InvalidOptions(message)) if message.contains("output.filename")
    ));
}

#[test]
fn missing_context_is_rejected() {
    let options = CompilerOptions::new("/definitely/not/here", "./index.js");
    assert!(matches!(
        options.validate(),
        Err(CompileError::InvalidContext(path)) if path == PathBuf::from("/definitely/not/here")
    ));
}

#[test]
fn compile_reports_invalid_options() {
    let err = compile(CompilerOptions::new("/definitely/not/here", "./index.js")).unwrap_err();
    assert!(matches!(err, CompileError::InvalidContext(_)));

    let err = compile(CompilerOptions::new(
        tests_dir(),
        EntryDescription::named([("main", "")]),
    ))
    .unwrap_err();
    assert!(matches!(err, CompileError::InvalidOptions(_)));
}
