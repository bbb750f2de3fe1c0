//! SHA-256 comparison of copied files

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{IoOperation, Result, UpdateError};

/// Hex SHA-256 of a file's content
pub fn file_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(UpdateError::io(IoOperation::Hash, path))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0; 8192];
    loop {
        let n = file
            .read(&mut buffer)
            .map_err(UpdateError::io(IoOperation::Hash, path))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Fails with `CopyVerification` when `copy` differs from `original`
pub fn verify_copy(original: &Path, copy: &Path) -> Result<()> {
    if file_sha256(original)? != file_sha256(copy)? {
        return Err(UpdateError::CopyVerification(copy.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_known_digest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.png");
        fs::write(&path, b"Hello, World!").unwrap();

        assert_eq!(
            file_sha256(&path).unwrap(),
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn test_verify_copy() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.png");
        let b = temp_dir.path().join("b.png");
        fs::write(&a, b"same").unwrap();
        fs::write(&b, b"same").unwrap();
        assert!(verify_copy(&a, &b).is_ok());

        fs::write(&b, b"different").unwrap();
        assert!(matches!(
            verify_copy(&a, &b).unwrap_err(),
            UpdateError::CopyVerification(_)
        ));
    }
}
