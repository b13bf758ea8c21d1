//! Buildable third-party libraries.
//!
//! Each module drives one upstream build system (autoconf-style configure
//! or CMake) with flags from the resolved configuration.

pub mod capstone;
pub mod hidapi;
pub mod jimtcl;
pub mod libftdi;
pub mod libjaylink;
pub mod libusb;
pub mod registry;

use anyhow::{bail, Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::builder::config::BuildConfig;
use crate::builder::platform::{Platform, Toolchain};

/// Everything a library build needs: the target platform, the resolved
/// toolchain and the flag/source tables.
pub struct BuildContext {
    pub platform: Platform,
    pub toolchain: Toolchain,
    pub config: BuildConfig,
}

impl BuildContext {
    /// Install prefix inside the staging root.
    pub fn prefix(&self) -> PathBuf {
        self.config.staging_root.join("usr")
    }
}

/// One third-party library build step.
pub trait Buildable: Sync {
    fn name(&self) -> &'static str;

    /// Environment variable locating this library's source tree.
    fn source_var(&self) -> &'static str;

    /// Environment variable overriding this library's configure flags.
    fn config_var(&self) -> &'static str;

    /// Whether this library is built at all for `platform`.
    fn enabled(&self, _platform: Platform) -> bool {
        true
    }

    /// Whether the build goes through CMake (affects tool preflight).
    fn uses_cmake(&self) -> bool {
        false
    }

    fn build(&self, ctx: &BuildContext, src: &Path) -> Result<()>;
}

/// Out-of-tree build directory inside the source tree.
pub(crate) fn build_dir(src: &Path) -> Result<PathBuf> {
    let dir = src.join("build");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}

/// Run an external build tool with the toolchain environment applied,
/// inheriting stdio so upstream output reaches the operator unchanged.
pub(crate) fn run_cmd<S: AsRef<OsStr>>(
    ctx: &BuildContext,
    cmd: impl AsRef<OsStr>,
    args: &[S],
    dir: &Path,
) -> Result<()> {
    let cmd = cmd.as_ref();
    let status = Command::new(cmd)
        .args(args)
        .current_dir(dir)
        .envs(ctx.toolchain.child_env(&ctx.config.staging_root))
        .status()
        .with_context(|| format!("Failed to run {}", cmd.to_string_lossy()))?;

    if !status.success() {
        bail!("{} failed in {}", cmd.to_string_lossy(), dir.display());
    }
    Ok(())
}

/// Assemble `configure` arguments: prefix, host flag, then the library's
/// configure string split on whitespace.
pub(crate) fn configure_args(ctx: &BuildContext, config_var: &str) -> Vec<String> {
    let mut args = vec![format!("--prefix={}", ctx.prefix().display())];
    if let Some(host_flag) = &ctx.toolchain.host_flag {
        args.push(host_flag.clone());
    }
    args.extend(ctx.config.flags(config_var).split_whitespace().map(String::from));
    args
}

/// Assemble CMake arguments: source dir, install prefix, cross-compilation
/// hints, then the library's configure string split on whitespace.
pub(crate) fn cmake_args(ctx: &BuildContext, src: &Path, config_var: &str) -> Vec<String> {
    let mut args = vec![
        src.display().to_string(),
        format!("-DCMAKE_INSTALL_PREFIX={}", ctx.prefix().display()),
        format!("-DCMAKE_PREFIX_PATH={}", ctx.prefix().display()),
    ];
    if ctx.toolchain.host_flag.is_some() {
        if let Some(system) = ctx.platform.cmake_system_name() {
            args.push(format!("-DCMAKE_SYSTEM_NAME={system}"));
        }
    }
    args.extend(ctx.config.flags(config_var).split_whitespace().map(String::from));
    args
}
