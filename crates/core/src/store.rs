use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Derive the local path for a downloaded URL: the final path segment of the
/// URL (text after the last `/`) joined to the image directory.
/// Pure and deterministic: the same `(url, dir)` always yields the same path.
pub fn derive_path(url: &str, dir: &Path) -> Result<PathBuf> {
    let name = url
        .rsplit_once('/')
        .map(|(_, name)| name)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::InvalidUrl(url.to_string()))?;
    Ok(dir.join(name))
}

/// Compute the SHA-256 fingerprint of downloaded content as lowercase hex.
/// This is the dedup key for the catalog.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── derive_path ─────────────────────────────────────────────

    #[test]
    fn test_derive_path_basic() {
        let path = derive_path("https://example.com/img/abc.jpg", Path::new("/tmp/x")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/x/abc.jpg"));
    }

    #[test]
    fn test_derive_path_deterministic() {
        let dir = Path::new("/var/cache/skypaper");
        let a = derive_path("https://apod.nasa.gov/apod/image/2406/ngc6188.png", dir).unwrap();
        let b = derive_path("https://apod.nasa.gov/apod/image/2406/ngc6188.png", dir).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_derive_path_uses_last_segment() {
        let path = derive_path("https://host/a/b/c/deep.gif", Path::new("/out")).unwrap();
        assert_eq!(path, PathBuf::from("/out/deep.gif"));
    }

    #[test]
    fn test_derive_path_no_slash_rejected() {
        let err = derive_path("not-a-url", Path::new("/tmp")).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_derive_path_trailing_slash_rejected() {
        let err = derive_path("https://example.com/img/", Path::new("/tmp")).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    // ── fingerprint ─────────────────────────────────────────────

    #[test]
    fn test_fingerprint_known_vector() {
        // Known SHA-256 of "hello world"
        assert_eq!(
            fingerprint(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_fingerprint_empty_input() {
        // Known SHA-256 of the empty string
        assert_eq!(
            fingerprint(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_fingerprint_stable() {
        let bytes = vec![0xAB; 4096];
        assert_eq!(fingerprint(&bytes), fingerprint(&bytes));
    }

    #[test]
    fn test_fingerprint_different_content() {
        assert_ne!(fingerprint(b"content A"), fingerprint(b"content B"));
    }
}
