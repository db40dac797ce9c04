//! Renders a chunk's modules into a single output file.
//!
//! Entry chunks carry a tiny module loader and start module `0`, which is
//! always the entry module. Async chunks only register their module table.

use crate::compilation::{Chunk, ChunkKind, DependencyKind, ModuleGraph, ModuleType, NormalModule};

const ENTRY_PRELUDE: &str = "(function(m){var c={};function r(i){var e=c[i];if(!e)m[i](e=c[i]={exports:{}},e.exports,r);return e.exports}r(0)})([\n";
const ENTRY_EPILOGUE: &str = "\n])\n";
const MODULE_HEADER: &str = "function(module, exports, require) {\n";
const MODULE_FOOTER: &str = "\n}";
const MODULE_SEPARATOR: &str = ",\n";

pub(super) fn render_chunk(graph: &ModuleGraph, chunk: &Chunk, public_path: &str) -> Vec<u8> {
    let mut out = Vec::new();
    match chunk.kind {
        ChunkKind::Entry => out.extend_from_slice(ENTRY_PRELUDE.as_bytes()),
        ChunkKind::Async => {
            out.extend_from_slice(b"(self.__chunks__=self.__chunks__||[]).push([");
            out.extend_from_slice(json_string(&chunk.id).as_bytes());
            out.extend_from_slice(b",[\n");
        }
    }

    for (position, identifier) in chunk.modules.keys().enumerate() {
        if position > 0 {
            out.extend_from_slice(MODULE_SEPARATOR.as_bytes());
        }
        out.extend_from_slice(MODULE_HEADER.as_bytes());
        if let Some(module) = graph.module(identifier) {
            render_module_body(&mut out, graph, chunk, module, public_path);
        }
        out.extend_from_slice(MODULE_FOOTER.as_bytes());
    }

    match chunk.kind {
        ChunkKind::Entry => out.extend_from_slice(ENTRY_EPILOGUE.as_bytes()),
        ChunkKind::Async => out.extend_from_slice(b"\n]]);\n"),
    }
    out
}

fn render_module_body(
    out: &mut Vec<u8>,
    graph: &ModuleGraph,
    chunk: &Chunk,
    module: &NormalModule,
    public_path: &str,
) {
    if let Some(error) = &module.build_error {
        out.extend_from_slice(format!("throw new Error({});", json_string(error)).as_bytes());
        return;
    }

    match module.module_type {
        ModuleType::AssetResource => {
            let prefix = if public_path == "auto" { "" } else { public_path };
            for file in &module.assets {
                let url = json_string(&format!("{prefix}{file}"));
                out.extend_from_slice(format!("module.exports = {url};").as_bytes());
            }
        }
        ModuleType::Json => {
            out.extend_from_slice(b"module.exports = ");
            out.extend_from_slice(module.source.bytes());
            out.extend_from_slice(b";");
        }
        ModuleType::JavascriptAuto => {
            let source = module.source.bytes();
            let mut cursor = 0;
            for id in &module.dependencies {
                let dependency = graph.dependency(*id);
                if dependency.kind != DependencyKind::Require {
                    continue;
                }
                let (Some((start, end)), Some(target)) = (dependency.span, graph.target(*id))
                else {
                    continue;
                };
                let Some(index) = chunk.modules.get(target) else {
                    continue;
                };
                if start < cursor || end > source.len() {
                    continue;
                }
                out.extend_from_slice(&source[cursor..start]);
                out.extend_from_slice(index.to_string().as_bytes());
                cursor = end;
            }
            out.extend_from_slice(&source[cursor..]);
        }
    }
}

fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
