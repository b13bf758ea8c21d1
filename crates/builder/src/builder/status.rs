//! Source-tree and staging-root reporting.

#![allow(clippy::cast_precision_loss)] // Staged sizes don't need u64 precision for display

use anyhow::Result;
use serde::Serialize;
use walkdir::WalkDir;

use crate::builder::components::{registry, Buildable};
use crate::builder::config::{BuildConfig, Env};

#[derive(Serialize)]
pub struct StatusReport {
    pub staging_root: String,
    pub staging_exists: bool,
    pub staged_files: u64,
    pub staged_bytes: u64,
    pub libraries: Vec<LibraryStatus>,
}

#[derive(Serialize)]
pub struct LibraryStatus {
    pub name: &'static str,
    pub source_var: &'static str,
    pub source: Option<String>,
    pub present: bool,
    pub flags: String,
}

/// Print the report, human-readable or as JSON.
pub fn report(json: bool) -> Result<()> {
    let env = Env::system();
    let config = BuildConfig::resolve(&env)?;
    let report = collect(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Sysroot status:\n");
    for library in &report.libraries {
        match (&library.source, library.present) {
            (Some(source), true) => println!("  {:12} [ready]   {source}", library.name),
            (Some(source), false) => println!("  {:12} [missing] {source}", library.name),
            (None, _) => {
                println!("  {:12} [skipped] {} not set", library.name, library.source_var);
            }
        }
    }

    println!();
    if report.staging_exists {
        println!(
            "  Staging: {} ({} files, {:.1} MB)",
            report.staging_root,
            report.staged_files,
            report.staged_bytes as f64 / 1_000_000.0
        );
    } else {
        println!("  Staging: {} (not created)", report.staging_root);
    }

    Ok(())
}

fn collect(config: &BuildConfig) -> Result<StatusReport> {
    let libraries = registry::COMPONENTS
        .iter()
        .map(|component| {
            let source = config.source_dir(component.source_var());
            LibraryStatus {
                name: component.name(),
                source_var: component.source_var(),
                present: source.as_deref().is_some_and(std::path::Path::exists),
                source: source.map(|path| path.display().to_string()),
                flags: config.flags(component.config_var()).to_string(),
            }
        })
        .collect();

    let mut staged_files = 0;
    let mut staged_bytes = 0;
    let staging_exists = config.staging_root.exists();
    if staging_exists {
        for entry in WalkDir::new(&config.staging_root) {
            let entry = entry?;
            if entry.file_type().is_file() {
                staged_files += 1;
                staged_bytes += entry.metadata().map(|meta| meta.len()).unwrap_or(0);
            }
        }
    }

    Ok(StatusReport {
        staging_root: config.staging_root.display().to_string(),
        staging_exists,
        staged_files,
        staged_bytes,
        libraries,
    })
}
