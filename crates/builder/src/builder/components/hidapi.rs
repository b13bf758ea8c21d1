//! hidapi build (HID device access).
//!
//! Needs the staged libusb-1.0 on Linux, which configure finds through the
//! exported PKG_CONFIG_PATH; on darwin the IOKit/CoreFoundation link flags
//! come in through LDFLAGS.

use super::{build_dir, configure_args, run_cmd, BuildContext, Buildable};
use anyhow::Result;
use std::path::Path;

/// hidapi component.
pub struct Hidapi;

impl Buildable for Hidapi {
    fn name(&self) -> &'static str {
        "hidapi"
    }

    fn source_var(&self) -> &'static str {
        "HIDAPI_SRC"
    }

    fn config_var(&self) -> &'static str {
        "HIDAPI_CONFIG"
    }

    fn build(&self, ctx: &BuildContext, src: &Path) -> Result<()> {
        println!("=== Building hidapi ===");

        let build = build_dir(src)?;
        let configure = src.join("configure");
        let args = configure_args(ctx, self.config_var());

        run_cmd(ctx, &configure, &args, &build)?;
        run_cmd(ctx, "make", &["-j", ctx.config.jobs.as_str()], &build)?;
        run_cmd(ctx, "make", &["install"], &build)?;

        println!("  Installed: hidapi -> {}", ctx.prefix().display());
        Ok(())
    }
}
