//! Fake `jj` binaries for executor tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Shell script standing in for `jj`.
///
/// Behaviour is selected by the first argument:
/// - `status`: prints a clean working copy message
/// - `warn`: prints to stdout and a warning to stderr, exits 0
/// - `fail`: prints an error to stderr, exits 1
/// - `sleep`: sleeps for five seconds
/// - `echo`: prints every remaining argument followed by a NUL byte
/// - `pwd`: prints the current directory
const FAKE_JJ: &str = r#"#!/bin/sh
case "$1" in
  status) printf 'The working copy has no changes.\n' ;;
  warn) printf 'Rebased 1 commits\n'; printf 'Warning: Refused to snapshot some files\n' >&2 ;;
  fail) printf 'Error: Revision `nope` does not exist\n' >&2; exit 1 ;;
  sleep) sleep 5 ;;
  echo) shift; for arg in "$@"; do printf '%s\0' "$arg"; done ;;
  pwd) pwd ;;
  *) printf 'unknown command\n' >&2; exit 2 ;;
esac
"#;

/// Write the fake binary into `dir` and return its path.
pub fn fake_jj(dir: &Path) -> PathBuf {
    let path = dir.join("fake-jj");
    fs::write(&path, FAKE_JJ).unwrap_or_else(|e| panic!("fake_jj: failed to write script: {e}"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .unwrap_or_else(|e| panic!("fake_jj: failed to chmod script: {e}"));
    }

    path
}

/// Split NUL-terminated output from the `echo` command.
pub fn split_echo(stdout: &str) -> Vec<String> {
    stdout
        .split_terminator('\0')
        .map(str::to_string)
        .collect()
}
