//! libjaylink build (SEGGER J-Link probe access).

use super::{build_dir, configure_args, run_cmd, BuildContext, Buildable};
use anyhow::Result;
use std::path::Path;

/// libjaylink component.
pub struct Libjaylink;

impl Buildable for Libjaylink {
    fn name(&self) -> &'static str {
        "libjaylink"
    }

    fn source_var(&self) -> &'static str {
        "LIBJAYLINK_SRC"
    }

    fn config_var(&self) -> &'static str {
        "LIBJAYLINK_CONFIG"
    }

    fn build(&self, ctx: &BuildContext, src: &Path) -> Result<()> {
        println!("=== Building libjaylink ===");

        let build = build_dir(src)?;
        let configure = src.join("configure");
        let args = configure_args(ctx, self.config_var());

        run_cmd(ctx, &configure, &args, &build)?;
        run_cmd(ctx, "make", &["-j", ctx.config.jobs.as_str()], &build)?;
        run_cmd(ctx, "make", &["install"], &build)?;

        println!("  Installed: libjaylink -> {}", ctx.prefix().display());
        Ok(())
    }
}
