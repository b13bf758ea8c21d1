//! Sysroot build orchestration.
//!
//! Structure:
//! - `config` - environment resolution (staging root, jobs, flag tables)
//! - `platform` - platform/toolchain selection
//! - `staging` - staging-root layout and post-install cleanup
//! - `components/` - one module per third-party library
//! - `status` - source-tree and staging reporting

pub mod components;
pub mod config;
pub mod platform;
pub mod staging;
pub mod status;

use anyhow::{bail, Context, Result};
use clap::Subcommand;

use components::registry::{self, COMPONENTS};
use components::{BuildContext, Buildable};
use config::{BuildConfig, Env};
use platform::Platform;

/// Build commands for the CLI.
#[derive(Subcommand)]
pub enum BuildCommands {
    /// Build all configured libraries into the staging sysroot
    Build {
        /// Target platform (windows, linux or darwin)
        platform: String,
        /// Host triplet of the target toolchain (e.g. x86_64-w64-mingw32)
        host: String,
        /// Build a single library instead of all of them
        #[arg(long)]
        only: Option<String>,
    },
    /// Show source-tree and staging-root status
    Status {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove the staging root
    Clean {
        /// Also remove build subdirectories of configured source trees
        #[arg(long)]
        sources: bool,
    },
}

/// Build all (or one) of the configured libraries for `platform`/`host`.
pub fn build(platform_name: &str, host: &str, only: Option<&str>) -> Result<()> {
    let env = Env::system();
    let platform = Platform::parse(platform_name);
    let mut config = BuildConfig::resolve(&env)?;
    let toolchain = platform::resolve(platform, host, &mut config);

    if let Some(name) = only {
        if registry::get(name).is_none() {
            bail!(
                "unknown library: {name} (expected one of: {})",
                registry::names().collect::<Vec<_>>().join(", ")
            );
        }
    }

    preflight(&config, platform, only)?;
    staging::prepare(&config.staging_root)?;

    let ctx = BuildContext {
        platform,
        toolchain,
        config,
    };

    println!("=== Building sysroot for {platform_name} ({host}) ===\n");

    for component in COMPONENTS {
        if only.is_some_and(|name| name != component.name()) {
            continue;
        }
        let Some(src) = ctx.config.source_dir(component.source_var()) else {
            println!(
                "Skipping {} ({} not set)",
                component.name(),
                component.source_var()
            );
            continue;
        };
        if !src.exists() {
            println!("Skipping {} ({} missing)", component.name(), src.display());
            continue;
        }
        if !component.enabled(ctx.platform) {
            println!(
                "Skipping {} (not built on {})",
                component.name(),
                ctx.platform
            );
            continue;
        }

        // Configure scripts run from the build subdirectory; hand them an
        // absolute source path.
        let src = src
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", src.display()))?;
        component.build(&ctx, &src)?;
        staging::strip_libtool_archives(&ctx.config.staging_root)?;
    }

    println!("\n=== Sysroot ready: {} ===", ctx.config.staging_root.display());
    Ok(())
}

/// Remove the staging root (and, optionally, source build directories).
pub fn clean(sources: bool) -> Result<()> {
    let env = Env::system();
    let config = BuildConfig::resolve(&env)?;

    if config.staging_root.exists() {
        std::fs::remove_dir_all(&config.staging_root)
            .with_context(|| format!("Failed to remove {}", config.staging_root.display()))?;
        println!("Removed: {}", config.staging_root.display());
    } else {
        println!("Staging root not present: {}", config.staging_root.display());
    }

    if sources {
        for component in COMPONENTS {
            let Some(src) = config.source_dir(component.source_var()) else {
                continue;
            };
            let build_dir = src.join("build");
            if build_dir.exists() {
                std::fs::remove_dir_all(&build_dir)
                    .with_context(|| format!("Failed to remove {}", build_dir.display()))?;
                println!("Removed: {}", build_dir.display());
            }
        }
    }

    Ok(())
}

/// Verify the external tools the selected steps need are on PATH before
/// any upstream build starts.
fn preflight(config: &BuildConfig, platform: Platform, only: Option<&str>) -> Result<()> {
    let runnable: Vec<&dyn Buildable> = COMPONENTS
        .iter()
        .copied()
        .filter(|component| {
            only.is_none_or(|name| name == component.name())
                && component.enabled(platform)
                && config
                    .source_dir(component.source_var())
                    .is_some_and(|src| src.exists())
        })
        .collect();
    if runnable.is_empty() {
        return Ok(());
    }

    which::which("make").context("make not found on PATH")?;
    if runnable.iter().any(|component| component.uses_cmake()) {
        which::which("cmake").context("cmake not found on PATH")?;
    }
    Ok(())
}
