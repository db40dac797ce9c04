#[path = "../common/fixtures.rs"]
mod fixtures;

use fixtures::TempProject;
use rspack_stats::stats::render_text;
use rspack_stats::{CompilerOptions, StatsOptions, StatsPreset, compile};
use serde_json::json;

fn options(raw: serde_json::Value) -> StatsOptions {
    StatsOptions::from_value(&raw).unwrap()
}

#[test]
fn chunk_view_nests_modules_and_reasons() {
    let stats = fixtures::scenario_c();
    let text = stats.to_string(&options(json!({
        "chunks": true,
        "reasons": true,
        "hash": false,
    })));

    insta::assert_snapshot!(text, @r"
    asset main.js 456 bytes {main} [emitted] (name: main)
    Entrypoint main 456 bytes = main.js
    chunk {main} main.js (main) [entry]
        [84757076bb80d506] ./index.js 59 bytes
            entry ./index.js
        [83cb805551d6d351] ./b.js 22 bytes
            import ./b [84757076bb80d506] ./index.js
        [4d390debca67ec2d] ./c.js 27 bytes
            require ./c [84757076bb80d506] ./index.js
        [294d26dd2bfa5513] ./broken.js 28 bytes
            import ./broken [84757076bb80d506] ./index.js

    error[javascript/auto]: Module parse failed: 'return' outside of function
      ┌─ ./broken.js:2:1
      │
    2 │ return;
      │ ^^^^^^

    rspack compiled with 1 error
    ");
}

#[test]
fn flat_module_view_lists_chunk_ids() {
    let stats = fixtures::scenario_c();
    let text = stats.to_string(&options(json!({
        "all": false,
        "modules": true,
    })));

    insta::assert_snapshot!(text, @r"
    [84757076bb80d506] ./index.js 59 bytes {main}
    [83cb805551d6d351] ./b.js 22 bytes {main}
    [4d390debca67ec2d] ./c.js 27 bytes {main}
    [294d26dd2bfa5513] ./broken.js 28 bytes {main}
    rspack compiled with 1 error
    ");
}

#[test]
fn flat_reasons_are_indented_under_their_module() {
    let stats = fixtures::compile_fixture("lazy", "./index.js");
    let text = stats.to_string(&options(json!({
        "all": false,
        "modules": true,
        "reasons": true,
    })));

    insta::assert_snapshot!(text, @r"
    [84757076bb80d506] ./index.js 61 bytes {main}
        entry ./index.js
    [608c3959f9520c22] ./page.js 87 bytes {608c3959f9520c22}
        import() ./page [84757076bb80d506] ./index.js
    [7986e9c84901e968] ./shared.js 27 bytes {608c3959f9520c22}
        require ./shared [608c3959f9520c22] ./page.js
    rspack compiled successfully
    ");
}

#[test]
fn warnings_are_counted_in_the_summary() {
    let project = TempProject::new();
    project.write(
        "index.js",
        "const a = 'x';\nrequire('./' + a);\nrequire(a + '.js');\n",
    );
    let stats = project.compile("./index.js");

    let text = stats.to_string(&StatsOptions::default());
    assert!(text.ends_with(&format!(
        "rspack compiled with 0 errors and 2 warnings ({})",
        stats.hash()
    )));
    assert_eq!(text.matches("warning[javascript/auto]: ").count(), 2);

    let quiet = stats.to_string(&StatsOptions::preset(StatsPreset::ErrorsOnly));
    assert_eq!(quiet, "rspack compiled with 0 errors and 2 warnings");
}

#[test]
fn unrenderable_frame_falls_back_to_the_message() {
    let stats = fixtures::scenario_c();
    let mut snapshot = stats.snapshot().clone();
    snapshot.errors[0].line = Some(9);

    let resolved = options(json!({ "hash": false })).resolve(StatsPreset::Normal);
    let text = render_text(&snapshot, &resolved);
    insta::assert_snapshot!(text, @r"
    asset main.js 456 bytes {main} [emitted] (name: main)
    Entrypoint main 456 bytes = main.js

    error[javascript/auto]: Module parse failed: 'return' outside of function

    rspack compiled with 1 error
    ");
}

#[test]
fn public_path_line_comes_first() {
    let options_in = CompilerOptions::new(fixtures::tests_dir(), "./fixtures/a")
        .with_public_path("/static/");
    let stats = compile(options_in).unwrap();

    let text = stats.to_string(&options(json!({ "publicPath": true })));
    assert!(text.starts_with("PublicPath: /static/\nasset main.js "));
}

#[test]
fn hash_flag_controls_the_suffix() {
    let stats = fixtures::scenario_c();

    let with_hash = stats.to_string(&StatsOptions::default());
    let without = stats.to_string(&options(json!({ "hash": false })));
    assert_eq!(with_hash, format!("{without} ({})", stats.hash()));
}

#[test]
fn everything_off_keeps_the_summary() {
    let stats = fixtures::scenario_c();
    assert_eq!(
        stats.to_string(&StatsOptions::all(false)),
        "rspack compiled with 1 error"
    );
}

#[test]
fn repeated_rendering_is_byte_identical() {
    let stats = fixtures::scenario_c();
    let verbose = StatsOptions::preset(StatsPreset::Verbose);
    let first = stats.to_string(&verbose);
    for _ in 0..3 {
        assert_eq!(stats.to_string(&verbose), first);
    }
}

#[test]
fn summary_uses_configured_options() {
    let configured = CompilerOptions::new(fixtures::tests_dir(), "./fixtures/a")
        .with_stats(StatsOptions::preset(StatsPreset::Summary));
    let stats = compile(configured).unwrap();

    assert_eq!(
        stats.summary(),
        format!("rspack compiled successfully ({})", stats.hash())
    );
}
