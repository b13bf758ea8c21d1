//! libftdi build (FTDI chip driver).

use super::{build_dir, cmake_args, run_cmd, BuildContext, Buildable};
use crate::builder::platform::Platform;
use anyhow::Result;
use std::path::Path;

/// libftdi component.
pub struct Libftdi;

impl Buildable for Libftdi {
    fn name(&self) -> &'static str {
        "libftdi"
    }

    fn source_var(&self) -> &'static str {
        "LIBFTDI_SRC"
    }

    fn config_var(&self) -> &'static str {
        "LIBFTDI_CONFIG"
    }

    /// Windows targets use the stock FTDI D2XX driver instead.
    fn enabled(&self, platform: Platform) -> bool {
        platform != Platform::Windows
    }

    fn uses_cmake(&self) -> bool {
        true
    }

    fn build(&self, ctx: &BuildContext, src: &Path) -> Result<()> {
        println!("=== Building libftdi ===");

        let build = build_dir(src)?;
        let args = cmake_args(ctx, src, self.config_var());

        run_cmd(ctx, "cmake", &args, &build)?;
        run_cmd(ctx, "make", &["-j", ctx.config.jobs.as_str()], &build)?;
        run_cmd(ctx, "make", &["install"], &build)?;

        println!("  Installed: libftdi1 -> {}", ctx.prefix().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn libftdi_is_never_built_for_windows() {
        assert!(!Libftdi.enabled(Platform::Windows));
        assert!(Libftdi.enabled(Platform::Linux));
        assert!(Libftdi.enabled(Platform::Darwin));
        assert!(Libftdi.enabled(Platform::Other));
    }
}
