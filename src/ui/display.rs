//! Display functions for build results and module interfaces

use console::Style;

use crate::compiler::interface::{ExternKind, ModuleInterface};
use crate::pipeline::BuildReport;

/// Human readable byte size
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

/// Print the summary of a committed build
pub fn display_build_report(report: &BuildReport, out_dir_display: &str) {
    let functions = report
        .manifest
        .module
        .exports
        .iter()
        .filter(|e| e.kind == ExternKind::Function)
        .count();
    let manifest = &report.manifest;
    let bold = Style::new().bold();

    println!(
        "{} {} in {:.2}s ({})",
        Style::new().green().bold().apply_to("Built"),
        out_dir_display,
        report.elapsed.as_secs_f64(),
        manifest.mode
    );
    println!(
        "  {} {} ({}, {} exported functions)",
        bold.apply_to("module"),
        manifest.module.file,
        format_size(manifest.module.size),
        functions
    );
    println!("  {} {}", bold.apply_to("shim  "), manifest.shim);
    if let Some(ref typings) = manifest.typings {
        println!("  {} {}", bold.apply_to("types "), typings);
    }
    if !manifest.snippets.is_empty() {
        println!(
            "  {} {} imported by the shim",
            bold.apply_to("snips "),
            manifest.snippets.len()
        );
    }
    for (name, file) in &manifest.entries {
        println!(
            "  {} {} -> {}",
            bold.apply_to("entry "),
            Style::new().yellow().apply_to(name),
            file
        );
    }
    println!(
        "  {} {} copied",
        bold.apply_to("assets"),
        manifest.assets.len()
    );
}

/// Print a module interface as text
pub fn display_interface(interface: &ModuleInterface) {
    let bold = Style::new().bold();

    println!(
        "{}",
        bold.apply_to(format!(
            "Exports ({}, {} functions):",
            interface.exports.len(),
            interface.functions().count()
        ))
    );
    for export in &interface.exports {
        match (&export.kind, &export.signature) {
            (ExternKind::Function, Some(signature)) => println!(
                "  {} {}{}",
                Style::new().dim().apply_to("function"),
                Style::new().cyan().apply_to(&export.name),
                signature
            ),
            (kind, _) => println!("  {} {}", Style::new().dim().apply_to(kind), export.name),
        }
    }

    if !interface.imports.is_empty() {
        println!();
        println!("{}", bold.apply_to(format!("Imports ({}):", interface.imports.len())));
        for import in &interface.imports {
            let signature = import
                .signature
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            println!(
                "  {} {}.{}{}",
                Style::new().dim().apply_to(import.kind),
                import.module,
                import.name,
                signature
            );
        }
    }
}
