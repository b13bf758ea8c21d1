//! End-to-end CLI checks.
//!
//! The fake-build tests drive a real configure/make cycle against a stub
//! source tree and are skipped when make or sh is unavailable.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

/// Every variable the builder reads; removed so ambient configuration
/// can't leak into the tests.
const BUILDER_VARS: &[&str] = &[
    "SYSROOT",
    "JOBS",
    "LIBUSB1_SRC",
    "HIDAPI_SRC",
    "LIBFTDI_SRC",
    "CAPSTONE_SRC",
    "LIBJAYLINK_SRC",
    "JIMTCL_SRC",
    "LIBUSB1_CONFIG",
    "HIDAPI_CONFIG",
    "LIBFTDI_CONFIG",
    "CAPSTONE_CONFIG",
    "LIBJAYLINK_CONFIG",
    "JIMTCL_CONFIG",
];

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("sysroot-builder").unwrap();
    for var in BUILDER_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn native_host() -> String {
    format!("{}-unknown-linux-gnu", std::env::consts::ARCH)
}

fn have_build_tools() -> bool {
    which::which("make").is_ok() && which::which("sh").is_ok()
}

#[cfg(unix)]
fn write_script(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::write(path, content).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn build_with_no_sources_skips_everything_and_succeeds() {
    let tmp = tempfile::tempdir().unwrap();
    let staging = tmp.path().join("sysroot");

    cmd()
        .env("SYSROOT", &staging)
        .args(["build", "linux", "x86_64-pc-linux-gnu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping libusb1 (LIBUSB1_SRC not set)"))
        .stdout(predicate::str::contains("Skipping jimtcl (JIMTCL_SRC not set)"));

    // The staging layout is created even when nothing builds.
    assert!(staging.join("usr/include").is_dir());
    assert!(staging.join("usr/lib/pkgconfig").is_dir());
    assert!(staging.join("usr/bin").is_dir());
}

#[test]
fn unrecognized_platform_is_not_an_error() {
    let tmp = tempfile::tempdir().unwrap();

    cmd()
        .env("SYSROOT", tmp.path().join("sysroot"))
        .args(["build", "plan9", "mips-weird-os"])
        .assert()
        .success();
}

#[test]
fn windows_never_builds_libftdi_even_with_a_source_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("libftdi");
    std::fs::create_dir_all(&src).unwrap();

    cmd()
        .env("SYSROOT", tmp.path().join("sysroot"))
        .env("LIBFTDI_SRC", &src)
        .args(["build", "windows", "x86_64-w64-mingw32"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping libftdi (not built on windows)"));
}

#[test]
fn only_rejects_unknown_library_names() {
    let tmp = tempfile::tempdir().unwrap();

    cmd()
        .env("SYSROOT", tmp.path().join("sysroot"))
        .args(["build", "linux", "x86_64-pc-linux-gnu", "--only", "openssl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown library: openssl"));
}

#[test]
fn only_silences_the_other_libraries() {
    let tmp = tempfile::tempdir().unwrap();

    cmd()
        .env("SYSROOT", tmp.path().join("sysroot"))
        .args(["build", "linux", "x86_64-pc-linux-gnu", "--only", "jimtcl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping jimtcl"))
        .stdout(predicate::str::contains("libusb1").not());
}

#[test]
fn repeated_runs_leave_a_superset_of_staged_files() {
    let tmp = tempfile::tempdir().unwrap();
    let staging = tmp.path().join("sysroot");

    cmd()
        .env("SYSROOT", &staging)
        .args(["build", "linux", "x86_64-pc-linux-gnu"])
        .assert()
        .success();

    let marker = staging.join("usr/lib/libmarker.a");
    std::fs::write(&marker, b"marker").unwrap();

    cmd()
        .env("SYSROOT", &staging)
        .args(["build", "linux", "x86_64-pc-linux-gnu"])
        .assert()
        .success();

    assert_eq!(std::fs::read(&marker).unwrap(), b"marker");
}

#[test]
fn status_lists_all_libraries() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("capstone");
    std::fs::create_dir_all(&src).unwrap();

    cmd()
        .env("SYSROOT", tmp.path().join("sysroot"))
        .env("CAPSTONE_SRC", &src)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("capstone"))
        .stdout(predicate::str::contains("[ready]"))
        .stdout(predicate::str::contains("jimtcl"))
        .stdout(predicate::str::contains("not created"));
}

#[test]
fn status_json_is_machine_readable() {
    let tmp = tempfile::tempdir().unwrap();

    let output = cmd()
        .env("SYSROOT", tmp.path().join("sysroot"))
        .args(["status", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["libraries"].as_array().unwrap().len(), 6);
    assert_eq!(report["staging_exists"], serde_json::Value::Bool(false));
}

#[test]
fn clean_removes_the_staging_root() {
    let tmp = tempfile::tempdir().unwrap();
    let staging = tmp.path().join("sysroot");

    cmd()
        .env("SYSROOT", &staging)
        .args(["build", "linux", "x86_64-pc-linux-gnu"])
        .assert()
        .success();
    assert!(staging.exists());

    cmd().env("SYSROOT", &staging).arg("clean").assert().success();
    assert!(!staging.exists());
}

/// Stub configure script: parses --prefix, generates a Makefile whose
/// install target stages a header, an archive and a libtool file.
#[cfg(unix)]
const FAKE_CONFIGURE: &str = "#!/bin/sh
prefix=
for arg in \"$@\"; do
  case \"$arg\" in
    --prefix=*) prefix=${arg#--prefix=} ;;
  esac
done
{
printf 'PREFIX = %s\\n' \"$prefix\"
cat <<'EOF'
all:
\ttouch built.stamp
install:
\tmkdir -p $(PREFIX)/include $(PREFIX)/lib
\ttouch $(PREFIX)/include/fake.h
\ttouch $(PREFIX)/lib/libfake.a
\ttouch $(PREFIX)/lib/libfake.la
EOF
} > Makefile
";

/// Stub configure for the interpreter library: the build works but
/// `make install` always fails.
#[cfg(unix)]
const FAKE_JIM_CONFIGURE: &str = "#!/bin/sh
touch jim-config.h
{
cat <<'EOF'
all:
\ttouch libjim.a
install:
\texit 1
EOF
} > Makefile
";

#[cfg(unix)]
#[test]
fn fake_autoconf_build_installs_and_strips_libtool_archives() {
    if !have_build_tools() {
        eprintln!("skipping: make/sh not available");
        return;
    }

    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("libusb");
    let staging = tmp.path().join("sysroot");
    std::fs::create_dir_all(&src).unwrap();
    write_script(&src.join("configure"), FAKE_CONFIGURE);

    cmd()
        .env("SYSROOT", &staging)
        .env("JOBS", "2")
        .env("LIBUSB1_SRC", &src)
        .args(["build", "linux", &native_host(), "--only", "libusb1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Building libusb1 ==="))
        .stdout(predicate::str::contains("Removed:"));

    assert!(staging.join("usr/include/fake.h").exists());
    assert!(staging.join("usr/lib/libfake.a").exists());
    assert!(!staging.join("usr/lib/libfake.la").exists());
}

#[cfg(unix)]
#[test]
fn jimtcl_install_failure_degrades_to_manual_copy() {
    if !have_build_tools() {
        eprintln!("skipping: make/sh not available");
        return;
    }

    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("jimtcl");
    let staging = tmp.path().join("sysroot");
    std::fs::create_dir_all(&src).unwrap();
    write_script(&src.join("configure"), FAKE_JIM_CONFIGURE);
    std::fs::write(src.join("jim.h"), b"header").unwrap();

    cmd()
        .env("SYSROOT", &staging)
        .env("JOBS", "2")
        .env("JIMTCL_SRC", &src)
        .args(["build", "linux", &native_host(), "--only", "jimtcl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warning: make install failed"));

    assert!(staging.join("usr/include/jim.h").exists());
    assert!(staging.join("usr/include/jim-config.h").exists());
    assert!(staging.join("usr/lib/libjim.a").exists());
}
