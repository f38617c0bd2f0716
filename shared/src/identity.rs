//! Device identity persisted across sessions.
//!
//! A single opaque string stored under a fixed file name, read at startup
//! and generated on first run. Everything else the client holds is
//! transient.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use crate::Result;

/// File name the device id is stored under inside the state directory.
pub const DEVICE_ID_FILE: &str = "device_id";

/// State directory: `MEMORA_STATE_DIR`, else `~/.memora`, else `./.memora`.
pub fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MEMORA_STATE_DIR") {
        return PathBuf::from(dir);
    }
    match std::env::var("HOME") {
        Ok(home) => Path::new(&home).join(".memora"),
        Err(_) => PathBuf::from(".memora"),
    }
}

/// Read the stored device id, generating and persisting a fresh UUID when
/// the file is absent or empty.
pub fn load_or_create(dir: &Path) -> Result<String> {
    let path = dir.join(DEVICE_ID_FILE);

    if let Ok(existing) = fs::read_to_string(&path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    let id = Uuid::new_v4().to_string();
    fs::create_dir_all(dir)?;
    fs::write(&path, &id)?;
    info!("generated device id at {}", path.display());
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_id_round_trips() {
        let dir = std::env::temp_dir().join(format!("memora-test-{}", Uuid::new_v4()));

        let first = load_or_create(&dir).unwrap();
        let second = load_or_create(&dir).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, first.trim());
        assert!(!first.is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }
}
