// Test helpers: shell-script stand-ins for lightning-cli

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

/// Write an executable `/bin/sh` script with `body` and return its path.
/// `$1` is the `--network=` flag, `$2` the RPC command.
pub fn fake_cli(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("fake-lightning-cli");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
