//! Platform and toolchain selection.
//!
//! A three-way branch over the target platform picks tool names, flag
//! strings and the `--host` triplet flag, and adjusts per-library configure
//! defaults (Linux targets prefer shared libraries, Windows targets link the
//! compiler runtime statically, macOS targets need framework link flags).

use std::fmt;
use std::path::Path;

use crate::builder::config::BuildConfig;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Platform {
    Windows,
    Linux,
    Darwin,
    Other,
}

impl Platform {
    /// Unrecognized names get no special configuration rather than an error.
    pub fn parse(name: &str) -> Self {
        match name {
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            "darwin" => Self::Darwin,
            _ => Self::Other,
        }
    }

    /// `CMAKE_SYSTEM_NAME` value for cross builds.
    pub fn cmake_system_name(self) -> Option<&'static str> {
        match self {
            Self::Windows => Some("Windows"),
            Self::Linux => Some("Linux"),
            Self::Darwin => Some("Darwin"),
            Self::Other => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Darwin => "darwin",
            Self::Other => "generic",
        };
        f.write_str(name)
    }
}

/// Per-platform toolchain descriptor, fixed for the duration of the run.
#[derive(Clone, Debug)]
pub struct Toolchain {
    pub cc: String,
    pub cxx: String,
    pub ar: String,
    pub ranlib: String,
    pub cflags: String,
    pub cxxflags: String,
    pub ldflags: String,
    pub host_flag: Option<String>,
}

impl Toolchain {
    fn native() -> Self {
        Self {
            cc: "cc".to_string(),
            cxx: "c++".to_string(),
            ar: "ar".to_string(),
            ranlib: "ranlib".to_string(),
            cflags: String::new(),
            cxxflags: String::new(),
            ldflags: String::new(),
            host_flag: None,
        }
    }

    fn gcc_prefixed(host: &str) -> Self {
        Self {
            cc: format!("{host}-gcc"),
            cxx: format!("{host}-g++"),
            ar: format!("{host}-ar"),
            ranlib: format!("{host}-ranlib"),
            cflags: String::new(),
            cxxflags: String::new(),
            ldflags: String::new(),
            host_flag: Some(format!("--host={host}")),
        }
    }

    fn clang_prefixed(host: &str) -> Self {
        Self {
            cc: format!("{host}-clang"),
            cxx: format!("{host}-clang++"),
            ar: format!("{host}-ar"),
            ranlib: format!("{host}-ranlib"),
            cflags: String::new(),
            cxxflags: String::new(),
            ldflags: String::new(),
            host_flag: Some(format!("--host={host}")),
        }
    }

    /// Environment exported to every child build process. Include and
    /// library search paths point into the staging root so each library can
    /// pick up headers installed by an earlier step.
    pub fn child_env(&self, staging_root: &Path) -> Vec<(String, String)> {
        let usr = staging_root.join("usr");
        let cppflags = format!("-I{}", usr.join("include").display());
        let ldflags = format!("{} -L{}", self.ldflags, usr.join("lib").display());

        let mut env = vec![
            ("CC".to_string(), self.cc.clone()),
            ("CXX".to_string(), self.cxx.clone()),
            ("AR".to_string(), self.ar.clone()),
            ("RANLIB".to_string(), self.ranlib.clone()),
            ("CFLAGS".to_string(), self.cflags.clone()),
            ("CXXFLAGS".to_string(), self.cxxflags.clone()),
            ("CPPFLAGS".to_string(), cppflags),
            ("LDFLAGS".to_string(), ldflags.trim().to_string()),
            (
                "PKG_CONFIG_PATH".to_string(),
                usr.join("lib").join("pkgconfig").display().to_string(),
            ),
        ];
        // An empty-but-set CFLAGS would suppress the upstream defaults.
        env.retain(|(_, value)| !value.is_empty());
        env
    }
}

/// Resolve the toolchain for `platform`/`host` and apply the platform's
/// library-config overrides.
pub fn resolve(platform: Platform, host: &str, config: &mut BuildConfig) -> Toolchain {
    resolve_with_arch(platform, host, config, std::env::consts::ARCH)
}

fn resolve_with_arch(
    platform: Platform,
    host: &str,
    config: &mut BuildConfig,
    machine_arch: &str,
) -> Toolchain {
    match platform {
        Platform::Windows => {
            let mut toolchain = Toolchain::gcc_prefixed(host);
            // Ship binaries without a MinGW runtime DLL dependency.
            toolchain.ldflags = "-static -static-libgcc -static-libstdc++".to_string();
            toolchain
        }
        Platform::Linux => {
            config.apply_platform_default("LIBUSB1_CONFIG", "--enable-shared --disable-static");
            config.apply_platform_default("HIDAPI_CONFIG", "--enable-shared --disable-static");
            config.apply_platform_default(
                "CAPSTONE_CONFIG",
                "-DCAPSTONE_BUILD_SHARED=ON -DCAPSTONE_BUILD_STATIC=OFF \
                 -DCAPSTONE_BUILD_TESTS=OFF -DCAPSTONE_BUILD_CSTOOL=OFF",
            );
            // Prefix match, not substring: "arm" would otherwise match the
            // vendor field of unrelated triplets.
            if host.starts_with(machine_arch) {
                Toolchain::native()
            } else {
                Toolchain::gcc_prefixed(host)
            }
        }
        Platform::Darwin => {
            let mut toolchain = Toolchain::clang_prefixed(host);
            let arch = match host.split('-').next().unwrap_or("x86_64") {
                "aarch64" | "arm64" => "arm64",
                other => other,
            };
            let arch_flags = format!("-arch {arch} -mmacosx-version-min=10.13");
            toolchain.cflags = arch_flags.clone();
            toolchain.cxxflags = arch_flags.clone();
            toolchain.ldflags =
                format!("{arch_flags} -framework IOKit -framework CoreFoundation");
            toolchain
        }
        Platform::Other => Toolchain::native(),
    }
}
