//! Fake `jj` binaries.
//!
//! Realism level: **FAKE** - a shell script answering a handful of
//! subcommands with canned output. Use for tests that need a real
//! subprocess but must not depend on `jj` being installed.

use std::fs;
use std::path::{Path, PathBuf};

const FAKE_JJ: &str = r#"#!/bin/sh
case "$1" in
  --version) printf 'jj 0.30.0\n' ;;
  status) printf 'The working copy has no changes.\nWorking copy : qpvuntsm 230dd059 (empty) (no description set)\n' ;;
  log) printf '@  qpvuntsm test@example.com 2024-01-01 230dd059\n│  (empty) (no description set)\n◆  zzzzzzzz root() 00000000\n' ;;
  abandon) printf 'Error: Revision `%s` does not exist\n' "$3" >&2; exit 1 ;;
  *) printf '%s\n' "$*" ;;
esac
"#;

/// Write a fake `jj` into `dir` and return its path.
///
/// Subcommands:
/// - `--version`, `status`, `log`: canned output
/// - `abandon`: fails with a missing-revision error
/// - anything else: echoes its arguments on one line
///
/// # Panics
/// Panics if the script cannot be written or made executable.
pub fn fake_jj(dir: &Path) -> PathBuf {
    let path = dir.join("jj");
    fs::write(&path, FAKE_JJ).unwrap_or_else(|e| panic!("fake_jj: failed to write script: {e}"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .unwrap_or_else(|e| panic!("fake_jj: failed to chmod script: {e}"));
    }

    path
}
