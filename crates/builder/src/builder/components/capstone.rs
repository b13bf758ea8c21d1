//! Capstone build (CPU disassembly engine).

use super::{build_dir, cmake_args, run_cmd, BuildContext, Buildable};
use anyhow::Result;
use std::path::Path;

/// Capstone component.
pub struct Capstone;

impl Buildable for Capstone {
    fn name(&self) -> &'static str {
        "capstone"
    }

    fn source_var(&self) -> &'static str {
        "CAPSTONE_SRC"
    }

    fn config_var(&self) -> &'static str {
        "CAPSTONE_CONFIG"
    }

    fn uses_cmake(&self) -> bool {
        true
    }

    fn build(&self, ctx: &BuildContext, src: &Path) -> Result<()> {
        println!("=== Building capstone ===");

        let build = build_dir(src)?;
        let args = cmake_args(ctx, src, self.config_var());

        run_cmd(ctx, "cmake", &args, &build)?;
        run_cmd(ctx, "make", &["-j", ctx.config.jobs.as_str()], &build)?;
        run_cmd(ctx, "make", &["install"], &build)?;

        println!("  Installed: capstone -> {}", ctx.prefix().display());
        Ok(())
    }
}
