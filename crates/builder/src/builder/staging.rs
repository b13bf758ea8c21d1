//! Staging-root layout and post-install cleanup.

use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Install-prefix subdirectories shared by every library.
const LAYOUT: &[&str] = &["usr/include", "usr/lib", "usr/lib/pkgconfig", "usr/bin"];

/// Create the staging layout. Idempotent; existing files are left alone, so
/// repeated runs only ever add to the tree.
pub fn prepare(root: &Path) -> Result<()> {
    for dir in LAYOUT {
        let path = root.join(dir);
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Remove libtool `.la` archives from the staged `usr/lib`.
///
/// Installed `.la` files carry absolute paths from the build machine and
/// confuse the downstream link against the staged tree.
pub fn strip_libtool_archives(root: &Path) -> Result<()> {
    let lib = root.join("usr").join("lib");
    if !lib.is_dir() {
        return Ok(());
    }

    for entry in WalkDir::new(&lib).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "la") {
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            println!("  Removed: {}", path.display());
        }
    }
    Ok(())
}

/// Best-effort copy into the staging tree; a missing source is reported and
/// skipped rather than failing the run.
pub fn copy_if_exists(src: &Path, dest: &Path) -> Result<bool> {
    if !src.exists() {
        println!("  Warning: {} not found", src.display());
        return Ok(false);
    }
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::copy(src, dest)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dest.display()))?;
    println!("  Copied: {}", src.display());
    Ok(true)
}
