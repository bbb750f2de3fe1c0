//! Source-to-catalog reconciliation
//!
//! For every image under the source root, in scan order:
//!
//! 1. find the first catalog image with the same base name
//! 2. copy the source image next to it, under the source's own file name
//! 3. if the file names differ, point the folder's manifest at the new
//!    name and delete the old image
//!
//! A stale image is only deleted once its manifest entry has been
//! rewritten. Nothing is rolled back when a step fails.

use std::fs;
use std::path::Path;

use crate::config::{FailurePolicy, UpdateConfig};
use crate::descriptor::{DescriptorIndex, FileDescriptor};
use crate::error::{IoOperation, Result, UpdateError};
use crate::log::{TracingLog, UpdateLog};
use crate::manifest;
use crate::matcher::find_match;
use crate::report::{FileOutcome, UpdateReport};
use crate::scan::enumerate_images;
use crate::verify::verify_copy;

/// Per-invocation updater holding the configuration and a log sink
pub struct AssetUpdater<L = TracingLog> {
    config: UpdateConfig,
    log: L,
}

impl AssetUpdater<TracingLog> {
    pub fn new(config: UpdateConfig) -> Self {
        Self::with_log(config, TracingLog)
    }
}

impl Default for AssetUpdater<TracingLog> {
    fn default() -> Self {
        Self::new(UpdateConfig::default())
    }
}

impl<L: UpdateLog> AssetUpdater<L> {
    pub fn with_log(config: UpdateConfig, log: L) -> Self {
        Self { config, log }
    }

    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    fn check_roots(&self, source: &Path, destination: &Path) -> Result<()> {
        let empty = if source.as_os_str().is_empty() {
            Some("source")
        } else if destination.as_os_str().is_empty() {
            Some("destination")
        } else {
            None
        };

        match empty {
            Some(which) => {
                let err = UpdateError::InvalidInput(which);
                self.log.log(&err.to_string());
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Reconcile `destination` with the images found under `source`
    pub fn run(&self, source: &Path, destination: &Path) -> Result<UpdateReport> {
        self.check_roots(source, destination)?;

        let extensions = self.config.extensions.as_slice();
        self.log.log(&format!(
            "Searching image assets ({}) in {}",
            extensions
                .iter()
                .map(|e| e.trim_start_matches('.'))
                .collect::<Vec<_>>()
                .join(","),
            source.display()
        ));

        let sources = DescriptorIndex::build(enumerate_images(source, extensions));
        let destinations = DescriptorIndex::build(enumerate_images(destination, extensions));

        if sources.is_empty() {
            tracing::info!("No images found under {}", source.display());
        }

        tracing::info!(
            "Reconciling {} source images against {} catalog images ({} matching)",
            sources.len(),
            destinations.len(),
            self.config.match_mode
        );

        let mut report = UpdateReport::begin(source, destination);

        for source_file in &sources {
            let Some(dest_file) = find_match(
                &source_file.base_name,
                destinations.as_slice(),
                self.config.match_mode,
                extensions,
            )
            .and_then(|path| destinations.get(path)) else {
                tracing::debug!("No catalog image for {}", source_file.path.display());
                report.record(&source_file.path, None, FileOutcome::NotFound);
                continue;
            };

            match self.reconcile_pair(source_file, dest_file) {
                Ok(outcome) => {
                    report.record(&source_file.path, Some(dest_file.path.as_path()), outcome)
                }
                Err(e) => match self.config.failure_policy {
                    FailurePolicy::Abort => {
                        self.log.log(&format!("Update aborted: {}", e));
                        return Err(e);
                    }
                    FailurePolicy::Isolate => {
                        tracing::warn!("Failed to update {}: {}", source_file.path.display(), e);
                        self.log.log(&format!("Failed -> {}: {}", source_file.path.display(), e));
                        report.record(
                            &source_file.path,
                            Some(dest_file.path.as_path()),
                            FileOutcome::Failed {
                                reason: e.to_string(),
                            },
                        );
                    }
                },
            }
        }

        report.finish();

        for line in report.summary_lines() {
            self.log.log(&line);
        }

        tracing::info!(
            "Update complete: {} replaced, {} renamed, {} not found, {} failed",
            report.replaced_count(),
            report.renamed_count(),
            report.not_found.len(),
            report.failed().len()
        );

        Ok(report)
    }

    fn reconcile_pair(&self, source: &FileDescriptor, dest: &FileDescriptor) -> Result<FileOutcome> {
        self.log.log_separator();
        self.log.log(&format!("Copying -> {}", source.path.display()));

        let target = dest.directory.join(source.file_name());
        copy_file(&source.path, &target)?;
        if self.config.verify_copies {
            verify_copy(&source.path, &target)?;
        }

        if source.file_name() == dest.file_name() {
            self.log.log(&format!(
                "File extensions are equal -> No need for updating {}",
                self.config.manifest_name
            ));
            return Ok(FileOutcome::Replaced);
        }

        self.log.log(&format!(
            "File extensions are different. Updating {}",
            self.config.manifest_name
        ));

        let manifest_path = dest.manifest_path(&self.config.manifest_name);
        manifest::rewrite(
            &manifest_path,
            &dest.basename,
            &source.basename,
            self.config.match_mode,
        )?;

        fs::remove_file(&dest.path).map_err(UpdateError::io(IoOperation::Delete, &dest.path))?;
        self.log.log(&format!("Deleted outdated file -> {}", dest.path.display()));

        Ok(FileOutcome::Renamed {
            old_basename: dest.basename.clone(),
            new_basename: source.basename.clone(),
            manifest_path,
        })
    }
}

/// Byte-for-byte copy that overwrites `target`; copying a file onto itself
/// is a no-op rather than a truncation
fn copy_file(from: &Path, target: &Path) -> Result<()> {
    if let (Ok(a), Ok(b)) = (fs::canonicalize(from), fs::canonicalize(target)) {
        if a == b {
            tracing::debug!("{} is already in place", target.display());
            return Ok(());
        }
    }

    fs::copy(from, target).map_err(|source| UpdateError::Copy {
        from: from.to_path_buf(),
        to: target.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Run an update with default settings, logging through `tracing`.
///
/// Returns `false` when the roots were invalid or the run aborted.
pub fn update(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> bool {
    match AssetUpdater::<TracingLog>::default().run(source.as_ref(), destination.as_ref()) {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("{}", e);
            false
        }
    }
}
