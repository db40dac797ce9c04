#[path = "../common/fixtures.rs"]
mod fixtures;

use rspack_stats::{CompilerOptions, EntryDescription, StatsOptions, compile};
use serde_json::json;

fn without_hash() -> StatsOptions {
    StatsOptions::from_value(&json!({ "hash": false })).unwrap()
}

#[test]
fn single_module_bundle_is_reported_in_bytes() {
    let options = CompilerOptions::new(
        fixtures::tests_dir(),
        EntryDescription::named([("main", "./fixtures/a")]),
    );
    let stats = compile(options).expect("compile");
    let snapshot = stats.snapshot();

    assert_eq!(snapshot.modules.len(), 1);
    assert_eq!(snapshot.modules[0].size, 55);
    assert_eq!(snapshot.modules[0].name, "./fixtures/a.js");

    assert_eq!(snapshot.assets.len(), 1);
    assert_eq!(snapshot.assets[0].name, "main.js");
    assert_eq!(snapshot.assets[0].size, 215);

    assert_eq!(snapshot.chunks.len(), 1);
    let chunk = &snapshot.chunks[0];
    assert_eq!(chunk.id, "main");
    assert!(chunk.entry);
    assert!(chunk.initial);
    assert_eq!(chunk.size, 55);

    let text = stats.to_string(&StatsOptions::default());
    assert!(text.ends_with(&format!("rspack compiled successfully ({})", stats.hash())));

    let text = stats.to_string(&without_hash());
    insta::assert_snapshot!(text, @r"
    asset main.js 215 bytes {main} [emitted] (name: main)
    Entrypoint main 215 bytes = main.js
    rspack compiled successfully
    ");
}

#[test]
fn everything_disabled_serializes_to_an_empty_object() {
    let stats = compile(CompilerOptions::new(fixtures::tests_dir(), "./fixtures/a")).unwrap();

    let value = serde_json::to_value(stats.to_json(&StatsOptions::all(false))).unwrap();
    assert_eq!(value, json!({}));

    let raw = stats.to_json_value(&json!({ "all": false })).unwrap();
    assert_eq!(raw, json!({}));
    assert_eq!(serde_json::to_string(&raw).unwrap(), "{}");
}

#[test]
fn broken_module_does_not_stop_the_build() {
    let stats = fixtures::scenario_c();
    let snapshot = stats.snapshot();

    assert_eq!(snapshot.errors.len(), 1);
    assert!(snapshot.warnings.is_empty());
    let error = &snapshot.errors[0];
    assert_eq!(
        error.message,
        "Module parse failed: 'return' outside of function"
    );
    assert_eq!(error.file.as_deref(), Some("./broken.js"));
    assert_eq!((error.line, error.column, error.length), (Some(2), Some(1), Some(6)));
    assert_eq!(error.source_line.as_deref(), Some("return;"));

    let names: Vec<_> = snapshot.modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["./index.js", "./b.js", "./c.js", "./broken.js"]);
    assert_eq!(snapshot.assets[0].size, 456);

    let json = stats.to_json_value(&json!({})).unwrap();
    assert_eq!(json["modules"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["errorsCount"], json!(1));

    let text = stats.to_string(&StatsOptions::default());
    assert!(text.ends_with(&format!("rspack compiled with 1 error ({})", stats.hash())));

    let text = stats.to_string(&without_hash());
    insta::assert_snapshot!(text, @r"
    asset main.js 456 bytes {main} [emitted] (name: main)
    Entrypoint main 456 bytes = main.js

    error[javascript/auto]: Module parse failed: 'return' outside of function
      ┌─ ./broken.js:2:1
      │
    2 │ return;
      │ ^^^^^^

    rspack compiled with 1 error
    ");
}

#[test]
fn skipped_emit_leaves_assets_unmarked() {
    let options = CompilerOptions::new(fixtures::tests_dir(), "./fixtures/a").with_no_emit_assets(true);
    let stats = compile(options).unwrap();

    assert!(!stats.snapshot().assets[0].emitted);
    let text = stats.to_string(&StatsOptions::default());
    assert!(text.starts_with("asset main.js 215 bytes {main} (name: main)\n"));
}
