//! File descriptors derived from scanned paths

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Path-derived view of one image file.
///
/// Every field is computed from `path`; nothing here touches the
/// filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub path: PathBuf,
    /// Extension including the separator (".png"), empty when absent
    pub extension: String,
    /// File name without extension, the matching key
    pub base_name: String,
    /// File name with extension, lossily decoded; the on-disk name is
    /// [`FileDescriptor::file_name`]
    pub basename: String,
    pub directory: PathBuf,
}

impl FileDescriptor {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let basename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let base_name = basename
            .strip_suffix(extension.as_str())
            .unwrap_or(&basename)
            .to_string();
        let directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self {
            path: path.to_path_buf(),
            extension,
            base_name,
            basename,
            directory,
        }
    }

    /// File name exactly as it appears on disk
    pub fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }

    /// Manifest sitting next to this file
    pub fn manifest_path(&self, manifest_name: &str) -> PathBuf {
        self.directory.join(manifest_name)
    }
}

/// Descriptors in scan order plus a path lookup
#[derive(Debug, Default, Clone)]
pub struct DescriptorIndex {
    descriptors: Vec<FileDescriptor>,
    by_path: HashMap<PathBuf, usize>,
}

impl DescriptorIndex {
    pub fn build<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut index = Self::default();
        for path in paths {
            index.push(FileDescriptor::from_path(path));
        }
        index
    }

    fn push(&mut self, descriptor: FileDescriptor) {
        // A path is scanned once, so the first position is the only one
        self.by_path
            .entry(descriptor.path.clone())
            .or_insert(self.descriptors.len());
        self.descriptors.push(descriptor);
    }

    pub fn get(&self, path: &Path) -> Option<&FileDescriptor> {
        self.by_path.get(path).map(|&i| &self.descriptors[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileDescriptor> {
        self.descriptors.iter()
    }

    pub fn as_slice(&self) -> &[FileDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<'a> IntoIterator for &'a DescriptorIndex {
    type Item = &'a FileDescriptor;
    type IntoIter = std::slice::Iter<'a, FileDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
