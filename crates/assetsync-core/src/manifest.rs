//! `Contents.json` editing
//!
//! An asset folder carries one manifest listing its images:
//!
//! ```json
//! {
//!   "images": [
//!     { "idiom": "universal", "filename": "logo.jpg", "scale": "1x" }
//!   ],
//!   "info": { "version": 1, "author": "xcode" }
//! }
//! ```
//!
//! When an image changes extension the entry pointing at the old file is
//! renamed. Everything else in the document is written back untouched, in
//! its original key order.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::config::MatchMode;
use crate::error::{IoOperation, Result, UpdateError};

const IMAGES_KEY: &str = "images";
const FILENAME_KEY: &str = "filename";

/// In-memory manifest document
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    document: Value,
}

/// Record of one rewritten entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEdit {
    pub manifest_path: PathBuf,
    pub entry_index: usize,
    pub old_filename: String,
    pub new_filename: String,
}

impl Manifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(UpdateError::ManifestNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(UpdateError::io(IoOperation::ReadManifest, path)(e)),
        };

        let document: Value =
            serde_json::from_str(&text).map_err(|source| UpdateError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?;

        let manifest = Self {
            path: path.to_path_buf(),
            document,
        };
        manifest.images()?;
        Ok(manifest)
    }

    fn shape_error(&self, reason: impl Into<String>) -> UpdateError {
        UpdateError::ManifestShape {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }

    fn images(&self) -> Result<&Vec<Value>> {
        self.document
            .as_object()
            .ok_or_else(|| self.shape_error("top level is not an object"))?
            .get(IMAGES_KEY)
            .ok_or_else(|| self.shape_error("missing `images` field"))?
            .as_array()
            .ok_or_else(|| self.shape_error("`images` is not an array"))
    }

    /// Every `filename` currently listed, in document order
    pub fn filenames(&self) -> Result<Vec<&str>> {
        Ok(self
            .images()?
            .iter()
            .filter_map(|image| image.get(FILENAME_KEY).and_then(Value::as_str))
            .collect())
    }

    /// Index of the first image whose `filename` refers to `old_basename`
    pub fn find_entry(&self, old_basename: &str, mode: MatchMode) -> Result<Option<usize>> {
        Ok(self.images()?.iter().position(|image| {
            image
                .get(FILENAME_KEY)
                .and_then(Value::as_str)
                .is_some_and(|filename| match mode {
                    MatchMode::Exact => filename == old_basename,
                    MatchMode::Substring => filename.contains(old_basename),
                })
        }))
    }

    /// Point the entry for `old_basename` at `new_basename`
    pub fn rename_entry(
        &mut self,
        old_basename: &str,
        new_basename: &str,
        mode: MatchMode,
    ) -> Result<ManifestEdit> {
        let index = self.find_entry(old_basename, mode)?.ok_or_else(|| {
            UpdateError::ManifestEntryNotFound {
                path: self.path.clone(),
                filename: old_basename.to_string(),
            }
        })?;

        // find_entry already proved this slot is an object with a filename
        let entry = &mut self.document[IMAGES_KEY][index][FILENAME_KEY];
        let old_filename = entry.as_str().unwrap_or_default().to_string();
        *entry = Value::String(new_basename.to_string());

        Ok(ManifestEdit {
            manifest_path: self.path.clone(),
            entry_index: index,
            old_filename,
            new_filename: new_basename.to_string(),
        })
    }

    /// Pretty-printed document, two-space indentation
    pub fn to_pretty_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.document).map_err(|e| UpdateError::Io {
            op: IoOperation::WriteManifest,
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
    }

    /// Replace the file on disk through a temp file in the same directory,
    /// so readers see either the old or the new manifest
    pub fn save(&self) -> Result<()> {
        let json = self.to_pretty_string()?;
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp = NamedTempFile::new_in(dir)
            .map_err(UpdateError::io(IoOperation::WriteManifest, &self.path))?;
        temp.write_all(json.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(UpdateError::io(IoOperation::WriteManifest, &self.path))?;
        temp.persist(&self.path)
            .map_err(|e| UpdateError::io(IoOperation::WriteManifest, &self.path)(e.error))?;

        Ok(())
    }
}

/// Load `manifest_path`, rename the entry for `old_basename` and persist.
pub fn rewrite(
    manifest_path: &Path,
    old_basename: &str,
    new_basename: &str,
    mode: MatchMode,
) -> Result<ManifestEdit> {
    let mut manifest = Manifest::load(manifest_path)?;
    let edit = manifest.rename_entry(old_basename, new_basename, mode)?;
    manifest.save()?;

    tracing::debug!(
        "Rewrote entry {} in {}: {} -> {}",
        edit.entry_index,
        manifest_path.display(),
        edit.old_filename,
        edit.new_filename
    );

    Ok(edit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, value: &Value) -> PathBuf {
        let path = dir.join("Contents.json");
        fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
        path
    }

    fn catalog_manifest() -> Value {
        json!({
            "images": [
                { "idiom": "universal", "filename": "logo.jpg", "scale": "1x" },
                { "idiom": "universal", "filename": "logo@2x.jpg", "scale": "2x" },
                { "idiom": "universal", "scale": "3x" }
            ],
            "info": { "version": 1, "author": "xcode" }
        })
    }

    #[test]
    fn test_rewrite_renames_only_matching_entry() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_manifest(temp_dir.path(), &catalog_manifest());

        let edit = rewrite(&path, "logo.jpg", "logo.png", MatchMode::Exact).unwrap();
        assert_eq!(edit.entry_index, 0);
        assert_eq!(edit.old_filename, "logo.jpg");
        assert_eq!(edit.new_filename, "logo.png");

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let mut expected = catalog_manifest();
        expected["images"][0]["filename"] = json!("logo.png");
        assert_eq!(written, expected);
    }

    #[test]
    fn test_exact_mode_skips_prefix_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_manifest(
            temp_dir.path(),
            &json!({ "images": [
                { "filename": "xlogo.jpg" },
                { "filename": "logo.jpg" }
            ]}),
        );

        let edit = rewrite(&path, "logo.jpg", "logo.png", MatchMode::Exact).unwrap();
        assert_eq!(edit.entry_index, 1);
    }

    #[test]
    fn test_substring_mode_takes_first_containing_entry() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_manifest(
            temp_dir.path(),
            &json!({ "images": [
                { "filename": "xlogo.jpg" },
                { "filename": "logo.jpg" }
            ]}),
        );

        let edit = rewrite(&path, "logo.jpg", "logo.png", MatchMode::Substring).unwrap();
        assert_eq!(edit.entry_index, 0);
        assert_eq!(edit.old_filename, "xlogo.jpg");

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.filenames().unwrap(), vec!["logo.png", "logo.jpg"]);
    }

    #[test]
    fn test_key_order_is_preserved() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Contents.json");
        fs::write(
            &path,
            r#"{"info":{"version":1},"images":[{"scale":"1x","filename":"a.jpg","idiom":"universal"}]}"#,
        )
        .unwrap();

        rewrite(&path, "a.jpg", "a.png", MatchMode::Exact).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let info = text.find("\"info\"").unwrap();
        let images = text.find("\"images\"").unwrap();
        let scale = text.find("\"scale\"").unwrap();
        let idiom = text.find("\"idiom\"").unwrap();
        assert!(info < images);
        assert!(scale < idiom);
        assert!(text.contains("  \"info\": {"));
    }

    #[test]
    fn test_missing_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let err = rewrite(
            &temp_dir.path().join("Contents.json"),
            "a.jpg",
            "a.png",
            MatchMode::Exact,
        )
        .unwrap_err();
        assert!(matches!(err, UpdateError::ManifestNotFound(_)));
    }

    #[test]
    fn test_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Contents.json");
        fs::write(&path, "{ not json").unwrap();

        let err = rewrite(&path, "a.jpg", "a.png", MatchMode::Exact).unwrap_err();
        assert!(matches!(err, UpdateError::ManifestParse { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_images_must_be_an_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_manifest(temp_dir.path(), &json!({ "images": "nope" }));
        assert!(matches!(
            Manifest::load(&path).unwrap_err(),
            UpdateError::ManifestShape { .. }
        ));

        let path = write_manifest(temp_dir.path(), &json!({ "info": {} }));
        assert!(matches!(
            Manifest::load(&path).unwrap_err(),
            UpdateError::ManifestShape { .. }
        ));
    }

    #[test]
    fn test_entry_not_found_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_manifest(temp_dir.path(), &catalog_manifest());
        let before = fs::read_to_string(&path).unwrap();

        let err = rewrite(&path, "icon.jpg", "icon.png", MatchMode::Exact).unwrap_err();
        assert!(matches!(err, UpdateError::ManifestEntryNotFound { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_manifest(temp_dir.path(), &catalog_manifest());

        rewrite(&path, "logo.jpg", "logo.png", MatchMode::Exact).unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("Contents.json")]);
    }
}
