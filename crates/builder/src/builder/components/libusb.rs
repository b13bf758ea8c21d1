//! libusb-1.0 build (USB device access).

use super::{build_dir, configure_args, run_cmd, BuildContext, Buildable};
use anyhow::Result;
use std::path::Path;

/// libusb-1.0 component.
pub struct Libusb;

impl Buildable for Libusb {
    fn name(&self) -> &'static str {
        "libusb1"
    }

    fn source_var(&self) -> &'static str {
        "LIBUSB1_SRC"
    }

    fn config_var(&self) -> &'static str {
        "LIBUSB1_CONFIG"
    }

    fn build(&self, ctx: &BuildContext, src: &Path) -> Result<()> {
        println!("=== Building libusb1 ===");

        let build = build_dir(src)?;
        let configure = src.join("configure");
        let args = configure_args(ctx, self.config_var());

        run_cmd(ctx, &configure, &args, &build)?;
        run_cmd(ctx, "make", &["-j", ctx.config.jobs.as_str()], &build)?;
        run_cmd(ctx, "make", &["install"], &build)?;

        println!("  Installed: libusb-1.0 -> {}", ctx.prefix().display());
        Ok(())
    }
}
