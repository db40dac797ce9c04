//! Module graph construction.
//!
//! Starting from the entries, requests are resolved one frontier at a time.
//! Modules discovered in a frontier are read and scanned in parallel, then
//! merged back in discovery order so the graph never depends on scheduling.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use tracing::{debug, instrument};

use super::parser::{ParseError, ScannedDependency, scan_javascript};
use super::resolver::{ResolveError, Resolver};
use crate::compilation::{
    AssetInfo, Compilation, CompilationAsset, Dependency, DependencyId, DependencyKind,
    ModuleIdentifier, ModuleSource, ModuleType, NormalModule,
};
use crate::diagnostics::rendering::{char_column, get_source_line};
use crate::diagnostics::{Diagnostic, SourceLocation};
use crate::utils::hash::{short_hash, to_hex};
use crate::utils::path::{portable_identifier, relative_name};

struct BuildJob {
    identifier: ModuleIdentifier,
    name: String,
    resource: PathBuf,
}

struct BuildResult {
    module: NormalModule,
    dependencies: Vec<ScannedDependency>,
    diagnostics: Vec<Diagnostic>,
    assets: Vec<(String, CompilationAsset)>,
}

#[instrument(name = "make", skip_all)]
pub(super) fn make(compilation: &mut Compilation, resolver: &Resolver) {
    let context = compilation.options.context.clone();
    let mut resources: IndexMap<ModuleIdentifier, PathBuf> = IndexMap::new();
    let mut pending: Vec<DependencyId> = Vec::new();

    for (name, request) in compilation.options.entry.entries() {
        let dependency = compilation.module_graph.add_dependency(
            DependencyKind::Entry,
            request,
            None,
            None,
            None,
        );
        compilation.entries.insert(name, dependency);
        pending.push(dependency);
    }

    while !pending.is_empty() {
        let mut jobs = Vec::new();
        let mut queued = IndexSet::new();

        for dependency_id in std::mem::take(&mut pending) {
            let dependency = compilation.module_graph.dependency(dependency_id).clone();
            let dir = match &dependency.origin {
                Some(origin) => resources
                    .get(origin)
                    .and_then(|path| path.parent())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| context.clone()),
                None => context.clone(),
            };

            let resolved = match resolver.resolve(&dir, &dependency.request) {
                Ok(path) => path,
                Err(err) => {
                    debug!(request = %dependency.request, "unresolved request");
                    let diagnostic = unresolved_diagnostic(compilation, &dependency, &err);
                    compilation.push_diagnostic(diagnostic);
                    continue;
                }
            };

            let identifier = ModuleIdentifier::new(portable_identifier(&context, &resolved));
            compilation
                .module_graph
                .set_resolved(dependency_id, identifier.clone());

            if compilation.module_graph.contains(&identifier) || !queued.insert(identifier.clone())
            {
                continue;
            }
            jobs.push(BuildJob {
                name: relative_name(&context, &resolved),
                identifier,
                resource: resolved,
            });
        }

        debug!(modules = jobs.len(), "building frontier");
        let results: Vec<BuildResult> = jobs.par_iter().map(build_module).collect();

        for (job, result) in jobs.into_iter().zip(results) {
            let BuildResult {
                mut module,
                dependencies,
                diagnostics,
                assets,
            } = result;

            for scanned in dependencies {
                let location =
                    SourceLocation::new(&module.name, scanned.line, scanned.column, scanned.length);
                let id = compilation.module_graph.add_dependency(
                    scanned.kind,
                    scanned.request,
                    Some(module.identifier.clone()),
                    Some(location),
                    Some(scanned.span),
                );
                module.dependencies.push(id);
                pending.push(id);
            }
            for (name, asset) in assets {
                compilation.emit_asset(name, asset);
            }
            compilation.push_batch_diagnostic(diagnostics);
            resources.insert(job.identifier, job.resource);
            compilation.module_graph.add_module(module);
        }
    }
}

fn unresolved_diagnostic(
    compilation: &Compilation,
    dependency: &Dependency,
    err: &ResolveError,
) -> Diagnostic {
    let mut diagnostic = Diagnostic::error(format!("Module not found: {err}"));
    let origin = dependency
        .origin
        .as_ref()
        .and_then(|origin| compilation.module_graph.module(origin));
    if let Some(origin) = origin {
        diagnostic = diagnostic.with_module(origin.identifier.as_str(), origin.module_type.as_str());
        if let Some(location) = &dependency.location {
            diagnostic = diagnostic.with_location(location.clone());
        }
        if let Some(text) = origin.source.as_str() {
            diagnostic = diagnostic.with_source(Arc::from(text));
        }
    }
    diagnostic
}

fn build_module(job: &BuildJob) -> BuildResult {
    debug!(module = %job.identifier, "building module");
    let extension = job
        .resource
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let module_type = ModuleType::from_extension(&extension);

    let bytes = match fs::read(&job.resource) {
        Ok(bytes) => bytes,
        Err(err) => {
            let message = format!("Module build failed: {err}");
            let mut module = NormalModule::new(
                job.identifier.clone(),
                &job.name,
                module_type,
                ModuleSource::from_bytes(Vec::new()),
            );
            module.build_error = Some(message.clone());
            return BuildResult {
                module,
                dependencies: Vec::new(),
                diagnostics: vec![
                    Diagnostic::error(message)
                        .with_module(job.identifier.as_str(), module_type.as_str()),
                ],
                assets: Vec::new(),
            };
        }
    };

    let mut result = BuildResult {
        module: NormalModule::new(
            job.identifier.clone(),
            &job.name,
            module_type,
            ModuleSource::from_bytes(bytes),
        ),
        dependencies: Vec::new(),
        diagnostics: Vec::new(),
        assets: Vec::new(),
    };

    match module_type {
        ModuleType::JavascriptAuto => build_javascript(&mut result),
        ModuleType::Json => build_json(&mut result),
        ModuleType::AssetResource => {
            let source = result.module.source.bytes();
            let filename = format!("{}.{extension}", to_hex(short_hash(source)));
            let asset = CompilationAsset::new(source.to_vec(), AssetInfo::default());
            result.module.assets.push(filename.clone());
            result.assets.push((filename, asset));
        }
    }
    result
}

fn build_javascript(result: &mut BuildResult) {
    let module = &mut result.module;
    let Some(text) = module.source.as_str() else {
        let message = "Module parse failed: source is not valid UTF-8".to_string();
        result.diagnostics.push(
            Diagnostic::error(&message)
                .with_module(module.identifier.as_str(), module.module_type.as_str()),
        );
        module.build_error = Some(message);
        return;
    };

    let scan = scan_javascript(text);
    if scan.errors.is_empty() && scan.warnings.is_empty() {
        result.dependencies = scan.dependencies;
        return;
    }

    let source: Arc<str> = Arc::from(text);
    let located = |diagnostic: Diagnostic, problem: &ParseError| {
        diagnostic
            .with_module(module.identifier.as_str(), module.module_type.as_str())
            .with_location(SourceLocation::new(
                &module.name,
                problem.line,
                problem.column,
                problem.length,
            ))
            .with_source(source.clone())
    };
    for error in &scan.errors {
        result
            .diagnostics
            .push(located(Diagnostic::error(&error.message), error));
    }
    for warning in &scan.warnings {
        result
            .diagnostics
            .push(located(Diagnostic::warning(&warning.message), warning));
    }

    if scan.errors.is_empty() {
        result.dependencies = scan.dependencies;
    } else {
        module.build_error = scan.errors.first().map(|error| error.message.clone());
    }
}

fn build_json(result: &mut BuildResult) {
    let module = &mut result.module;
    let text = match module.source.as_str() {
        Some(text) => text,
        None => {
            let message = "Module parse failed: JSON source is not valid UTF-8".to_string();
            result.diagnostics.push(
                Diagnostic::error(&message)
                    .with_module(module.identifier.as_str(), module.module_type.as_str()),
            );
            module.build_error = Some(message);
            return;
        }
    };

    let Err(err) = serde_json::from_str::<serde_json::Value>(text) else {
        return;
    };

    let message = format!("Module parse failed: {err}");
    let mut diagnostic = Diagnostic::error(&message)
        .with_module(module.identifier.as_str(), module.module_type.as_str());
    if let Some(line_text) = get_source_line(text, err.line()) {
        let column = char_column(line_text, err.column());
        diagnostic = diagnostic
            .with_location(SourceLocation::new(&module.name, err.line(), column, 1))
            .with_source(Arc::from(text));
    }
    result.diagnostics.push(diagnostic);
    module.build_error = Some(message);
}
