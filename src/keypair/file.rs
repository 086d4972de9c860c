// Key pair files (JSON byte arrays, solana-keygen format)

use super::keys::{Keypair, SECRET_KEY_LEN, SEED_LEN};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Owner read/write only
#[cfg(unix)]
const KEYPAIR_FILE_MODE: u32 = 0o600;

/// Read a key pair file.
///
/// A 64-byte array is a full secret key, a 32-byte array is a seed.
pub fn read_keypair<P: AsRef<Path>>(path: P) -> Result<Keypair, String> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read keypair file {}: {}", path.display(), e))?;

    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|_| "Invalid Solana keypair JSON".to_string())?;

    let items = value
        .as_array()
        .ok_or("Solana keypair must be a JSON array")?;

    let bytes = items
        .iter()
        .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect::<Option<Vec<u8>>>()
        .ok_or("Solana keypair must contain only byte values (0-255)")?;

    match bytes.len() {
        SECRET_KEY_LEN => {
            let mut secret = [0u8; SECRET_KEY_LEN];
            secret.copy_from_slice(&bytes);
            Keypair::from_secret_key(&secret)
        }
        SEED_LEN => {
            let mut seed = [0u8; SEED_LEN];
            seed.copy_from_slice(&bytes);
            Ok(Keypair::from_seed(&seed))
        }
        n => Err(format!(
            "Solana keypair must be 64 bytes (solana-keygen) or 32 bytes (seed), got {}",
            n
        )),
    }
}

/// Write a key pair file, returning the absolute path written.
///
/// Fails if the file exists and `overwrite` is false.
pub fn write_keypair<P: AsRef<Path>>(
    path: P,
    keypair: &Keypair,
    overwrite: bool,
) -> Result<PathBuf, String> {
    let out_path = absolute_path(path.as_ref())?;

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }

    if !overwrite && out_path.exists() {
        return Err(format!(
            "Refusing to overwrite existing keypair: {}",
            out_path.display()
        ));
    }

    let json = serde_json::to_string(&keypair.secret_key_bytes().to_vec())
        .map_err(|e| format!("Failed to serialize keypair: {}", e))?;

    let mut file = open_for_write(&out_path)
        .map_err(|e| format!("Failed to open {}: {}", out_path.display(), e))?;
    file.write_all(format!("{}\n", json).as_bytes())
        .map_err(|e| format!("Failed to write keypair file: {}", e))?;

    restrict_permissions(&out_path)?;

    log::info!("Wrote keypair {} to {}", keypair.pubkey(), out_path.display());

    Ok(out_path)
}

fn absolute_path(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir()
        .map_err(|e| format!("Failed to resolve current directory: {}", e))?;
    Ok(cwd.join(path))
}

#[cfg(unix)]
fn open_for_write(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(KEYPAIR_FILE_MODE)
        .open(path)
}

#[cfg(not(unix))]
fn open_for_write(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

// Mode on open only applies to new files; an overwritten file keeps its old mode
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), String> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(KEYPAIR_FILE_MODE))
        .map_err(|e| format!("Failed to set permissions on {}: {}", path.display(), e))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), String> {
    Ok(())
}
