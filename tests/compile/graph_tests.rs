#[path = "../common/fixtures.rs"]
mod fixtures;

use fixtures::TempProject;
use rspack_stats::compilation::ModuleIdentifier;
use rspack_stats::{Compiler, MemoryFileSystem, NativeFileSystem, OutputFileSystem, StatsOptions};

#[test]
fn module_ids_hash_the_portable_identifier() {
    let stats = fixtures::scenario_c();
    let ids: Vec<(&str, &str)> = stats
        .snapshot()
        .modules
        .iter()
        .map(|module| (module.identifier.as_str(), module.id.as_str()))
        .collect();

    assert_eq!(
        ids,
        vec![
            ("<PROJECT_ROOT>/index.js", "84757076bb80d506"),
            ("<PROJECT_ROOT>/b.js", "83cb805551d6d351"),
            ("<PROJECT_ROOT>/c.js", "4d390debca67ec2d"),
            ("<PROJECT_ROOT>/broken.js", "294d26dd2bfa5513"),
        ]
    );
    for (identifier, id) in ids {
        assert_eq!(ModuleIdentifier::new(identifier).module_id(), id);
    }
}

#[test]
fn hash_is_stable_and_tracks_content() {
    let first = fixtures::scenario_c();
    let second = fixtures::scenario_c();
    assert_eq!(first.hash(), second.hash());
    assert_eq!(first.hash().len(), 16);
    assert!(first.hash().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

    let project = TempProject::new();
    project.write("index.js", "console.log(1);\n");
    let before = project.compile("./index.js");
    project.write("index.js", "console.log(2);\n");
    let after = project.compile("./index.js");
    assert_ne!(before.hash(), after.hash());
}

#[test]
fn chunk_size_is_the_sum_of_module_sizes() {
    let stats = fixtures::scenario_c();
    let snapshot = stats.snapshot();
    let chunk = &snapshot.chunks[0];
    let total: usize = snapshot.modules.iter().map(|module| module.size).sum();
    assert_eq!(chunk.size, total);
    assert_eq!(chunk.modules.len(), 4);
}

#[test]
fn entrypoint_size_is_the_sum_of_its_assets() {
    let stats = fixtures::compile_fixture("lazy", "./index.js");
    for entrypoint in &stats.snapshot().entrypoints {
        let total: usize = entrypoint.assets.iter().map(|asset| asset.size).sum();
        assert_eq!(entrypoint.assets_size, total);
    }
}

#[test]
fn dynamic_import_gets_an_async_chunk() {
    let stats = fixtures::compile_fixture("lazy", "./index.js");
    let snapshot = stats.snapshot();

    let page_id = "608c3959f9520c22";
    let shared_id = "7986e9c84901e968";
    assert_eq!(snapshot.chunks.len(), 2);

    let main = &snapshot.chunks[0];
    assert_eq!(main.id, "main");
    assert_eq!(main.modules.len(), 1);
    assert_eq!(main.children, vec![page_id.to_string()]);

    let lazy = &snapshot.chunks[1];
    assert_eq!(lazy.id, page_id);
    assert!(!lazy.entry && !lazy.initial);
    assert!(lazy.names.is_empty());
    assert_eq!(lazy.modules, vec![page_id.to_string(), shared_id.to_string()]);
    assert_eq!(lazy.files, vec![format!("{page_id}.js")]);
    assert_eq!(lazy.parents, vec!["main".to_string()]);

    let entry = &snapshot.entrypoints[0];
    assert_eq!(entry.chunks, vec!["main".to_string()]);
    assert_eq!(entry.assets.len(), 1);
    assert_eq!(entry.assets[0].name, "main.js");

    let names: Vec<_> = snapshot.assets.iter().map(|asset| asset.name.clone()).collect();
    assert_eq!(names, vec!["main.js".to_string(), format!("{page_id}.js")]);
    assert!(snapshot.assets[1].chunk_names.is_empty());
}

#[test]
fn reasons_and_issuers_follow_the_graph() {
    let stats = fixtures::compile_fixture("lazy", "./index.js");
    let snapshot = stats.snapshot();

    let index = snapshot.modules.iter().find(|m| m.name == "./index.js").unwrap();
    assert_eq!(index.reasons.len(), 1);
    assert_eq!(index.reasons[0].kind, "entry");
    assert_eq!(index.reasons[0].user_request, "./index.js");
    assert!(index.reasons[0].module_id.is_none());
    assert!(index.issuer.is_none());

    let page = snapshot.modules.iter().find(|m| m.name == "./page.js").unwrap();
    assert_eq!(page.reasons[0].kind, "import()");
    assert_eq!(page.reasons[0].module_name.as_deref(), Some("./index.js"));

    let shared = snapshot.modules.iter().find(|m| m.name == "./shared.js").unwrap();
    assert_eq!(shared.reasons[0].kind, "require");
    assert_eq!(shared.reasons[0].user_request, "./shared");
    let path: Vec<_> = shared.issuer_path.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(path, vec!["./index.js", "./page.js"]);
    assert_eq!(shared.issuer.as_ref().map(|i| i.name.as_str()), Some("./page.js"));
}

#[test]
fn sizes_count_bytes_for_multi_byte_sources() {
    let stats = fixtures::compile_fixture("unicode", "./index.js");
    let snapshot = stats.snapshot();

    assert_eq!(snapshot.modules[0].size, 38);
    let error = &snapshot.errors[0];
    assert_eq!((error.line, error.column, error.length), (Some(2), Some(9), Some(6)));
}

#[test]
fn unresolved_requests_are_diagnostics() {
    let project = TempProject::new();
    project
        .write("index.js", "import './present';\nimport './missing';\n")
        .write("present.js", "export default 1;\n");
    let stats = project.compile("./index.js");
    let snapshot = stats.snapshot();

    assert_eq!(snapshot.modules.len(), 2);
    assert_eq!(snapshot.errors.len(), 1);
    let error = &snapshot.errors[0];
    assert_eq!(
        error.message,
        "Module not found: Can't resolve './missing' in '<PROJECT_ROOT>'"
    );
    assert_eq!(error.module_identifier.as_deref(), Some("<PROJECT_ROOT>/index.js"));
    assert_eq!((error.line, error.column, error.length), (Some(2), Some(8), Some(11)));
    assert!(stats.has_errors());
}

#[test]
fn missing_entry_still_produces_a_report() {
    let project = TempProject::new();
    let stats = project.compile("./nowhere");
    let snapshot = stats.snapshot();

    assert!(snapshot.modules.is_empty());
    assert!(snapshot.chunks.is_empty());
    assert_eq!(snapshot.errors.len(), 1);
    assert!(snapshot.errors[0].module_identifier.is_none());
    assert!(
        stats
            .to_string(&StatsOptions::default())
            .ends_with(&format!("rspack compiled with 1 error ({})", stats.hash()))
    );
}

#[test]
fn expression_requests_are_warnings() {
    let project = TempProject::new();
    project.write("index.js", "const name = 'a';\nrequire('./' + name);\n");
    let stats = project.compile("./index.js");

    assert!(!stats.has_errors());
    assert!(stats.has_warnings());
    let warning = &stats.snapshot().warnings[0];
    assert_eq!(
        warning.message,
        "Critical dependency: the request of a dependency is an expression"
    );
    assert_eq!((warning.line, warning.column), (Some(2), Some(1)));
}

#[test]
fn json_and_asset_modules() {
    let project = TempProject::new();
    project
        .write("index.js", "const data = require('./data');\nconst logo = require('./logo.svg');\n")
        .write("data.json", "{ \"name\": \"é\" }")
        .write("logo.svg", "<svg xmlns=\"http://www.w3.org/2000/svg\"/>");
    let stats = project.compile("./index.js");
    let snapshot = stats.snapshot();

    assert!(snapshot.errors.is_empty());
    let types: Vec<_> = snapshot.modules.iter().map(|m| m.module_type).collect();
    assert_eq!(types, vec!["javascript/auto", "json", "asset/resource"]);
    assert_eq!(snapshot.modules[1].size, 16);

    let logo = &snapshot.modules[2];
    assert_eq!(logo.assets.len(), 1);
    let logo_file = &logo.assets[0];
    assert!(logo_file.ends_with(".svg"));

    let chunk = &snapshot.chunks[0];
    assert_eq!(chunk.auxiliary_files, vec![logo_file.clone()]);
    let asset = snapshot.assets.iter().find(|a| &a.name == logo_file).unwrap();
    assert_eq!(asset.chunk_names, vec!["main".to_string()]);
    assert_eq!(snapshot.assets[0].name, "main.js");
}

#[test]
fn native_output_is_written_once_per_version() {
    let project = TempProject::new();
    project.write("index.js", "console.log('disk');\n");
    let out = tempfile::tempdir().unwrap();

    let options = project.options("./index.js").with_output_path(out.path());
    let mut compiler = Compiler::new(options, NativeFileSystem).unwrap();

    let first = compiler.run().unwrap();
    assert!(out.path().join("main.js").is_file());
    assert!(first.snapshot().assets[0].emitted);

    let second = compiler.run().unwrap();
    assert!(!second.snapshot().assets[0].emitted);
    assert_eq!(first.hash(), second.hash());
}

#[test]
fn memory_output_holds_every_asset() {
    let project = TempProject::new();
    project.write("index.js", "import('./later');\n").write("later.js", "");

    let options = project.options("./index.js").with_output_path("/virtual/dist");
    let mut compiler = Compiler::new(options, MemoryFileSystem::new()).unwrap();
    let stats = compiler.run().unwrap();

    let written: Vec<_> = compiler
        .output_filesystem()
        .files()
        .map(|path| path.to_path_buf())
        .collect();
    assert_eq!(written.len(), stats.snapshot().assets.len());
    assert!(written[0].ends_with("main.js"));
    let main = compiler
        .output_filesystem()
        .read(std::path::Path::new("/virtual/dist/main.js"))
        .unwrap();
    assert_eq!(main.len(), stats.snapshot().assets[0].size);
}

#[test]
fn clean_empties_the_output_then_drops_stale_files() {
    let project = TempProject::new();
    project
        .write("index.js", "import('./later');\n")
        .write("later.js", "module.exports = 1;\n");
    let out = tempfile::tempdir().unwrap();
    std::fs::write(out.path().join("leftover.txt"), "old build").unwrap();

    let options = project
        .options("./index.js")
        .with_output_path(out.path())
        .with_clean(true);
    let mut compiler = Compiler::new(options, NativeFileSystem).unwrap();

    let first = compiler.run().unwrap();
    assert!(!out.path().join("leftover.txt").exists());
    let lazy_file = first.snapshot().assets[1].name.clone();
    assert!(out.path().join(&lazy_file).is_file());

    project.write("index.js", "console.log('no more lazy');\n");
    let second = compiler.run().unwrap();
    assert_eq!(second.snapshot().assets.len(), 1);
    assert!(out.path().join("main.js").is_file());
    assert!(!out.path().join(&lazy_file).exists());
}

#[test]
fn without_clean_stale_files_stay() {
    let project = TempProject::new();
    project.write("index.js", "console.log('kept');\n");

    let options = project.options("./index.js").with_output_path("/virtual/dist");
    let mut output = MemoryFileSystem::new();
    output
        .write(std::path::Path::new("/virtual/dist/old.js"), b"old")
        .unwrap();
    let mut compiler = Compiler::new(options, output).unwrap();
    compiler.run().unwrap();

    let files = compiler.output_filesystem();
    assert!(files.read(std::path::Path::new("/virtual/dist/old.js")).is_some());
    assert!(files.read(std::path::Path::new("/virtual/dist/main.js")).is_some());
}
