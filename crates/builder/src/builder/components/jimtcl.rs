//! Jim Tcl build (embeddable command interpreter).
//!
//! jimtcl's `make install` is unreliable when cross-compiling; if it fails,
//! the headers, static library and pkg-config file are copied into the
//! staging tree by hand and the run carries on.

use super::{build_dir, configure_args, run_cmd, BuildContext, Buildable};
use crate::builder::staging;
use anyhow::Result;
use std::path::Path;

/// Headers shipped in the source tree.
const SOURCE_HEADERS: &[&str] = &[
    "jim.h",
    "jim-eventloop.h",
    "jim-signal.h",
    "jim-subcmd.h",
    "jim-win32compat.h",
];

/// Headers generated into the build tree by configure.
const GENERATED_HEADERS: &[&str] = &["jim-config.h", "jimautoconf.h"];

/// Jim Tcl component.
pub struct JimTcl;

impl Buildable for JimTcl {
    fn name(&self) -> &'static str {
        "jimtcl"
    }

    fn source_var(&self) -> &'static str {
        "JIMTCL_SRC"
    }

    fn config_var(&self) -> &'static str {
        "JIMTCL_CONFIG"
    }

    fn build(&self, ctx: &BuildContext, src: &Path) -> Result<()> {
        println!("=== Building jimtcl ===");

        let build = build_dir(src)?;
        let configure = src.join("configure");
        let args = configure_args(ctx, self.config_var());

        run_cmd(ctx, &configure, &args, &build)?;
        run_cmd(ctx, "make", &["-j", ctx.config.jobs.as_str()], &build)?;

        if let Err(err) = run_cmd(ctx, "make", &["install"], &build) {
            println!("  Warning: make install failed ({err:#}), copying artifacts by hand");
            manual_install(src, &build, &ctx.config.staging_root)?;
        }

        println!("  Installed: jimtcl -> {}", ctx.prefix().display());
        Ok(())
    }
}

/// Best-effort install: copy whatever exists, skip the rest.
fn manual_install(src: &Path, build: &Path, staging_root: &Path) -> Result<()> {
    let include = staging_root.join("usr").join("include");
    let lib = staging_root.join("usr").join("lib");

    for header in SOURCE_HEADERS {
        staging::copy_if_exists(&src.join(header), &include.join(header))?;
    }
    for header in GENERATED_HEADERS {
        staging::copy_if_exists(&build.join(header), &include.join(header))?;
    }
    staging::copy_if_exists(&build.join("libjim.a"), &lib.join("libjim.a"))?;
    staging::copy_if_exists(&build.join("jimtcl.pc"), &lib.join("pkgconfig").join("jimtcl.pc"))?;

    Ok(())
}
