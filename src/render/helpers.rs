use std::fs;
use std::path::Path;

use serde_json::Value;

pub fn read_text(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))
}

pub fn read_json(path: &Path) -> Result<Value, String> {
    let raw = read_text(path)?;
    serde_json::from_str(&raw).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

/// Writes a generated artifact, creating missing parent directories first.
pub fn write_artifact(path: &Path, content: &str) -> Result<(), String> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
        }
        _ => {}
    }
    fs::write(path, content).map_err(|e| format!("failed to write {}: {e}", path.display()))
}
