use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StudyDeskError;

/// Directory of homework image uploads, keyed by stored filename.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StudyDeskError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the upload under a sanitized, collision-free name derived from
    /// the client's filename, and return the stored name. The stored name is
    /// what callers persist, so a row never references a file it doesn't own.
    pub fn store(&self, client_name: &str, bytes: &[u8]) -> Result<String, StudyDeskError> {
        let base = sanitize_filename(client_name).ok_or_else(|| {
            StudyDeskError::Error(format!("Invalid upload filename: '{}'", client_name))
        })?;
        let stored = self.unique_name(&base);
        fs::write(self.dir.join(&stored), bytes)?;
        log::debug!("Stored upload '{}' as '{}'", client_name, stored);
        Ok(stored)
    }

    /// Look up a stored file by name. The requested name goes through the
    /// same basename sanitization as storage, so traversal sequences cannot
    /// escape the upload directory.
    pub fn read(&self, requested: &str) -> Option<(Vec<u8>, String)> {
        let base = sanitize_filename(requested)?;
        let path = self.dir.join(&base);
        let bytes = fs::read(&path).ok()?;
        let mime = mime_guess::from_path(&path).first_or_octet_stream();
        Some((bytes, mime.essence_str().to_string()))
    }

    /// First free variant of `base`: the name itself, then stem-1.ext,
    /// stem-2.ext, ...
    fn unique_name(&self, base: &str) -> String {
        if !self.dir.join(base).exists() {
            return base.to_string();
        }

        let path = Path::new(base);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(base);
        let ext = path.extension().and_then(|e| e.to_str());

        let mut n = 1;
        loop {
            let candidate = match ext {
                Some(ext) => format!("{}-{}.{}", stem, n, ext),
                None => format!("{}-{}", stem, n),
            };
            if !self.dir.join(&candidate).exists() {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Reduce a client-supplied filename to a safe basename. Both '/' and '\\'
/// count as separators (the client may be on either platform).
fn sanitize_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");
    if base.is_empty() || base == "." || base == ".." {
        return None;
    }
    Some(base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, UploadStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("uploads")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_store_and_read_roundtrip() {
        let (_dir, store) = test_store();
        let stored = store.store("x.png", b"png-bytes").unwrap();
        assert_eq!(stored, "x.png");

        let (bytes, mime) = store.read("x.png").unwrap();
        assert_eq!(bytes, b"png-bytes");
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn test_collision_gets_suffixed_name() {
        let (_dir, store) = test_store();
        assert_eq!(store.store("x.png", b"first").unwrap(), "x.png");
        assert_eq!(store.store("x.png", b"second").unwrap(), "x-1.png");
        assert_eq!(store.store("x.png", b"third").unwrap(), "x-2.png");

        // The first upload is untouched
        let (bytes, _) = store.read("x.png").unwrap();
        assert_eq!(bytes, b"first");
    }

    #[test]
    fn test_traversal_is_reduced_to_basename() {
        let (_dir, store) = test_store();
        let stored = store.store("../../etc/passwd", b"data").unwrap();
        assert_eq!(stored, "passwd");
        assert!(store.dir().join("passwd").exists());
    }

    #[test]
    fn test_windows_style_paths_are_reduced() {
        let (_dir, store) = test_store();
        let stored = store.store("C:\\Users\\me\\photo.jpg", b"data").unwrap();
        assert_eq!(stored, "photo.jpg");
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        let (_dir, store) = test_store();
        assert!(store.store("", b"data").is_err());
        assert!(store.store("..", b"data").is_err());
        assert!(store.store("uploads/", b"data").is_err());
    }

    #[test]
    fn test_read_missing_file_returns_none() {
        let (_dir, store) = test_store();
        assert!(store.read("nope.png").is_none());
    }

    #[test]
    fn test_read_does_not_escape_directory() {
        let (dir, store) = test_store();
        std::fs::write(dir.path().join("secret.txt"), b"secret").unwrap();
        // A traversal request resolves inside the upload dir, where the file
        // does not exist
        assert!(store.read("../secret.txt").is_none());
    }
}
