//! Environment and argument resolution.
//!
//! Everything the run needs is fixed up front: the staging root, the make
//! job count, per-library configure flags and per-library source locations.

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Staging root override.
pub const STAGING_VAR: &str = "SYSROOT";

/// Make job count override.
pub const JOBS_VAR: &str = "JOBS";

/// Built-in configure flags, overridable through the named variable.
///
/// Static archives are the default everywhere; platform selection switches
/// individual libraries to shared where the target wants that.
const DEFAULT_FLAGS: &[(&str, &str)] = &[
    ("LIBUSB1_CONFIG", "--enable-static --disable-shared"),
    ("HIDAPI_CONFIG", "--enable-static --disable-shared"),
    (
        "LIBFTDI_CONFIG",
        "-DSTATICLIBS=ON -DEXAMPLES=OFF -DFTDI_EEPROM=OFF -DPYTHON_BINDINGS=OFF",
    ),
    (
        "CAPSTONE_CONFIG",
        "-DCAPSTONE_BUILD_SHARED=OFF -DCAPSTONE_BUILD_STATIC=ON \
         -DCAPSTONE_BUILD_TESTS=OFF -DCAPSTONE_BUILD_CSTOOL=OFF",
    ),
    ("LIBJAYLINK_CONFIG", "--enable-static --disable-shared"),
    ("JIMTCL_CONFIG", "--minimal --disable-ssl --with-ext=eventloop,regexp,stdlib,tclcompat"),
];

/// Source-tree location variables. A library whose variable is unset is
/// skipped entirely.
const SOURCE_VARS: &[&str] = &[
    "LIBUSB1_SRC",
    "HIDAPI_SRC",
    "LIBFTDI_SRC",
    "CAPSTONE_SRC",
    "LIBJAYLINK_SRC",
    "JIMTCL_SRC",
];

/// Snapshot of the process environment.
///
/// Nothing below this layer reads `std::env` directly; tests build an `Env`
/// from a plain map instead of mutating process state.
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    pub fn system() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_vars(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// An empty value counts as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Resolved run configuration: staging root, job count and the per-library
/// flag/source tables. Mutated only while platform selection runs.
pub struct BuildConfig {
    pub staging_root: PathBuf,
    pub jobs: String,
    flags: HashMap<&'static str, String>,
    from_env: HashSet<&'static str>,
    sources: HashMap<&'static str, PathBuf>,
}

impl BuildConfig {
    pub fn resolve(env: &Env) -> Result<Self> {
        let staging_root = env
            .get(STAGING_VAR)
            .map_or_else(|| PathBuf::from("sysroot"), PathBuf::from);
        // Configure scripts run from build subdirectories, so the install
        // prefix has to be absolute.
        let staging_root = if staging_root.is_absolute() {
            staging_root
        } else {
            std::env::current_dir()
                .context("Failed to resolve working directory")?
                .join(staging_root)
        };

        let jobs = env
            .get(JOBS_VAR)
            .map_or_else(default_jobs, str::to_string);

        let mut flags = HashMap::new();
        let mut from_env = HashSet::new();
        for (var, default) in DEFAULT_FLAGS {
            if let Some(value) = env.get(var) {
                flags.insert(*var, value.to_string());
                from_env.insert(*var);
            } else {
                flags.insert(*var, (*default).to_string());
            }
        }

        let mut sources = HashMap::new();
        for var in SOURCE_VARS {
            if let Some(path) = env.get(var) {
                sources.insert(*var, PathBuf::from(path));
            }
        }

        Ok(Self {
            staging_root,
            jobs,
            flags,
            from_env,
            sources,
        })
    }

    /// Configure flags for one library.
    pub fn flags(&self, var: &str) -> &str {
        self.flags.get(var).map_or("", String::as_str)
    }

    /// Platform branches adjust library defaults, but an operator-provided
    /// environment override always wins.
    pub fn apply_platform_default(&mut self, var: &'static str, value: &str) {
        if !self.from_env.contains(var) {
            self.flags.insert(var, value.to_string());
        }
    }

    /// Source tree for one library, if configured.
    pub fn source_dir(&self, var: &str) -> Option<PathBuf> {
        self.sources.get(var).cloned()
    }
}

fn default_jobs() -> String {
    std::thread::available_parallelism()
        .map(std::num::NonZero::get)
        .unwrap_or(1)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_environment() {
        let config = BuildConfig::resolve(&Env::from_vars(&[])).unwrap();

        assert!(config.staging_root.ends_with("sysroot"));
        assert!(config.staging_root.is_absolute());
        assert!(config.jobs.parse::<usize>().unwrap() >= 1);
        assert_eq!(config.flags("LIBUSB1_CONFIG"), "--enable-static --disable-shared");
        assert_eq!(config.source_dir("LIBUSB1_SRC"), None);
    }

    #[test]
    fn environment_overrides_are_honored() {
        let env = Env::from_vars(&[
            ("SYSROOT", "/opt/stage"),
            ("JOBS", "3"),
            ("JIMTCL_CONFIG", "--full"),
            ("JIMTCL_SRC", "/src/jimtcl"),
        ]);
        let config = BuildConfig::resolve(&env).unwrap();

        assert_eq!(config.staging_root, PathBuf::from("/opt/stage"));
        assert_eq!(config.jobs, "3");
        assert_eq!(config.flags("JIMTCL_CONFIG"), "--full");
        assert_eq!(config.source_dir("JIMTCL_SRC"), Some(PathBuf::from("/src/jimtcl")));
    }

    #[test]
    fn empty_variables_count_as_unset() {
        let env = Env::from_vars(&[("LIBUSB1_SRC", ""), ("HIDAPI_CONFIG", "")]);
        let config = BuildConfig::resolve(&env).unwrap();

        assert_eq!(config.source_dir("LIBUSB1_SRC"), None);
        assert_eq!(config.flags("HIDAPI_CONFIG"), "--enable-static --disable-shared");
    }

    #[test]
    fn platform_defaults_never_clobber_operator_overrides() {
        let env = Env::from_vars(&[("LIBUSB1_CONFIG", "--custom")]);
        let mut config = BuildConfig::resolve(&env).unwrap();

        config.apply_platform_default("LIBUSB1_CONFIG", "--enable-shared --disable-static");
        config.apply_platform_default("HIDAPI_CONFIG", "--enable-shared --disable-static");

        assert_eq!(config.flags("LIBUSB1_CONFIG"), "--custom");
        assert_eq!(config.flags("HIDAPI_CONFIG"), "--enable-shared --disable-static");
    }
}
