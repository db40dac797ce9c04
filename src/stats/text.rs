//! Human-readable report.
//!
//! Every section is optional except the closing summary line. Lines are
//! joined with `\n` and the output has no trailing newline.

use super::snapshot::{StatsDiagnostic, StatsModule, StatsReason, StatsSnapshot};
use crate::options::ResolvedStatsOptions;

pub fn render_text(snapshot: &StatsSnapshot, options: &ResolvedStatsOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    if options.public_path {
        lines.push(format!("PublicPath: {}", snapshot.public_path));
    }

    if options.assets {
        for asset in &snapshot.assets {
            let mut line = format!("asset {} {} bytes", asset.name, asset.size);
            if !asset.chunk_names.is_empty() {
                line.push_str(&format!(" {{{}}}", asset.chunk_names.join(", ")));
            }
            if asset.emitted {
                line.push_str(" [emitted]");
            }
            let entrypoints = snapshot.entrypoints_of(&asset.name);
            if !entrypoints.is_empty() {
                line.push_str(&format!(" (name: {})", entrypoints.join(", ")));
            }
            lines.push(line);
        }
    }

    if options.entrypoints {
        for entrypoint in &snapshot.entrypoints {
            let mut line = format!(
                "Entrypoint {} {} bytes",
                entrypoint.name, entrypoint.assets_size
            );
            if !entrypoint.assets.is_empty() {
                let names: Vec<&str> = entrypoint
                    .assets
                    .iter()
                    .map(|asset| asset.name.as_str())
                    .collect();
                line.push_str(&format!(" = {}", names.join(" ")));
            }
            lines.push(line);
        }
    }

    if options.chunks {
        for chunk in &snapshot.chunks {
            let mut line = format!("chunk {{{}}}", chunk.id);
            if !chunk.files.is_empty() {
                line.push_str(&format!(" {}", chunk.files.join(", ")));
            }
            if !chunk.names.is_empty() {
                line.push_str(&format!(" ({})", chunk.names.join(", ")));
            }
            if chunk.entry {
                line.push_str(" [entry]");
            }
            lines.push(line);

            for module in chunk.modules.iter().filter_map(|id| snapshot.module(id)) {
                lines.push(format!("    {}", module_line(module)));
                if options.reasons {
                    push_reasons(&mut lines, &module.reasons, 8);
                }
            }
        }
    } else if options.modules {
        for module in &snapshot.modules {
            let mut line = module_line(module);
            if !module.chunks.is_empty() {
                line.push_str(&format!(" {{{}}}", module.chunks.join(", ")));
            }
            lines.push(line);
            if options.reasons {
                push_reasons(&mut lines, &module.reasons, 4);
            }
        }
    }

    let mut printed_diagnostics = false;
    if options.errors {
        for error in &snapshot.errors {
            push_diagnostic(&mut lines, error);
            printed_diagnostics = true;
        }
    }
    if options.warnings {
        for warning in &snapshot.warnings {
            push_diagnostic(&mut lines, warning);
            printed_diagnostics = true;
        }
    }

    if printed_diagnostics {
        lines.push(String::new());
    }
    lines.push(summary_line(snapshot, options));

    lines.join("\n")
}

fn module_line(module: &StatsModule) -> String {
    format!("[{}] {} {} bytes", module.id, module.name, module.size)
}

fn push_reasons(lines: &mut Vec<String>, reasons: &[StatsReason], indent: usize) {
    for reason in reasons {
        let mut line = format!(
            "{:indent$}{} {}",
            "",
            reason.kind,
            reason.user_request,
            indent = indent
        );
        if let (Some(id), Some(name)) = (&reason.module_id, &reason.module_name) {
            line.push_str(&format!(" [{id}] {name}"));
        }
        lines.push(line);
    }
}

fn push_diagnostic(lines: &mut Vec<String>, diagnostic: &StatsDiagnostic) {
    lines.push(String::new());
    lines.push(format!(
        "{}[{}]: {}",
        diagnostic.severity.as_str(),
        diagnostic.module_type,
        diagnostic.message
    ));

    // An unrenderable frame leaves just the message.
    if let Some(Ok(frame)) = diagnostic.render_frame() {
        lines.extend(frame.lines().map(str::to_string));
    }
}

fn summary_line(snapshot: &StatsSnapshot, options: &ResolvedStatsOptions) -> String {
    let errors = snapshot.errors.len();
    let warnings = snapshot.warnings.len();

    let mut line = if errors == 0 && warnings == 0 {
        "rspack compiled successfully".to_string()
    } else {
        let mut line = format!("rspack compiled with {}", plural(errors, "error"));
        if warnings > 0 {
            line.push_str(&format!(" and {}", plural(warnings, "warning")));
        }
        line
    };

    if options.hash
        && let Some(hash) = &snapshot.hash
    {
        line.push_str(&format!(" ({hash})"));
    }
    line
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
