//! # Sysroot Builder
//!
//! Cross-compile the native libraries a debug-probe tool links against
//! (USB, HID, FTDI, disassembly, J-Link, Jim Tcl) into a staging sysroot.
//!
//! ## Usage
//!
//! ```bash
//! sysroot-builder build linux x86_64-pc-linux-gnu    # native build
//! sysroot-builder build windows x86_64-w64-mingw32   # MinGW cross build
//! sysroot-builder status                             # source/staging state
//! sysroot-builder clean --sources                    # drop staging + build dirs
//! ```
//!
//! Source trees are located through `<NAME>_SRC` environment variables; a
//! library whose variable is unset is skipped. Configure flags come from
//! `<NAME>_CONFIG`, the staging root from `SYSROOT`, parallelism from `JOBS`.

use anyhow::Result;
use clap::Parser;

mod builder;

#[derive(Parser)]
#[command(
    name = "sysroot-builder",
    about = "Cross-compilation sysroot builder for debug-probe libraries"
)]
struct Cli {
    #[command(subcommand)]
    command: builder::BuildCommands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        builder::BuildCommands::Build {
            platform,
            host,
            only,
        } => builder::build(&platform, &host, only.as_deref())?,
        builder::BuildCommands::Status { json } => builder::status::report(json)?,
        builder::BuildCommands::Clean { sources } => builder::clean(sources)?,
    }

    Ok(())
}
