//! Binary assets embedded into the profile document.
//!
//! Images, icons and logos are referenced from the model by paths relative
//! to the model file and embedded as base64 text.

use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::warn;

/// Resolve a model-relative asset path.
///
/// Backslash separators are accepted. Returns `None` for an empty path.
pub fn resolve_asset_path(base_dir: Option<&Path>, rel_path: &str) -> Option<PathBuf> {
    let rel_path = rel_path.trim();
    if rel_path.is_empty() {
        return None;
    }
    let normalized = rel_path.replace('\\', "/");
    Some(match base_dir {
        Some(dir) => dir.join(normalized),
        None => PathBuf::from(normalized),
    })
}

/// Read a file and encode it as base64.
///
/// Unreadable files are logged and yield `None`.
pub fn read_base64(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(STANDARD.encode(bytes)),
        Err(err) => {
            warn!(path = path.display().to_string(), err = err.to_string(); "Could not read asset");
            None
        }
    }
}

/// File name without extension, used as the image name in the document.
pub fn asset_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_asset_path() {
        let base = Path::new("/models");
        assert_eq!(
            resolve_asset_path(Some(base), "img\\gate.png"),
            Some(PathBuf::from("/models/img/gate.png"))
        );
        assert_eq!(
            resolve_asset_path(None, "gate.png"),
            Some(PathBuf::from("gate.png"))
        );
        assert_eq!(resolve_asset_path(Some(base), "  "), None);
    }

    #[test]
    fn test_read_base64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.bmp");
        fs::write(&path, b"BM").unwrap();

        assert_eq!(read_base64(&path), Some("Qk0=".to_string()));
        assert_eq!(read_base64(&dir.path().join("missing.bmp")), None);
    }

    #[test]
    fn test_asset_stem() {
        assert_eq!(asset_stem(Path::new("img/gate.icon.png")), "gate.icon");
        assert_eq!(asset_stem(Path::new("")), "");
    }
}
