//! Run summaries

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Source files without a destination, in discovery order
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NotFoundList(Vec<PathBuf>);

impl NotFoundList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<PathBuf>) {
        self.0.push(path.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    /// Header plus one line per path; empty when nothing is missing
    pub fn render_lines(&self) -> Vec<String> {
        if self.0.is_empty() {
            return Vec::new();
        }

        let mut lines = Vec::with_capacity(self.0.len() + 1);
        lines.push(format!("The following {} files were not found:", self.0.len()));
        lines.extend(self.0.iter().map(|p| format!("▸ {}", p.display())));
        lines
    }

    pub fn render(&self) -> Option<String> {
        let lines = self.render_lines();
        (!lines.is_empty()).then(|| lines.join("\n"))
    }
}

/// What happened to one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Same file name on both sides; copied over in place
    Replaced,
    /// Extension changed; manifest rewritten and old file deleted
    Renamed {
        old_basename: String,
        new_basename: String,
        manifest_path: PathBuf,
    },
    NotFound,
    /// Only recorded when failures are isolated
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub source: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub files: Vec<FileRecord>,
    pub not_found: NotFoundList,
}

impl UpdateReport {
    pub(crate) fn begin(source_root: &Path, destination_root: &Path) -> Self {
        let now = Utc::now();
        Self {
            source_root: source_root.to_path_buf(),
            destination_root: destination_root.to_path_buf(),
            started_at: now,
            finished_at: now,
            files: Vec::new(),
            not_found: NotFoundList::new(),
        }
    }

    pub(crate) fn record(
        &mut self,
        source: &Path,
        destination: Option<&Path>,
        outcome: FileOutcome,
    ) {
        if outcome == FileOutcome::NotFound {
            self.not_found.push(source);
        }
        self.files.push(FileRecord {
            source: source.to_path_buf(),
            destination: destination.map(Path::to_path_buf),
            outcome,
        });
    }

    pub(crate) fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }

    pub fn replaced_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Replaced))
    }

    pub fn renamed_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Renamed { .. }))
    }

    pub fn failed(&self) -> Vec<&FileRecord> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Failed { .. }))
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.count(|o| matches!(o, FileOutcome::Failed { .. })) > 0
    }

    /// Lines handed to the logger once the pass is over
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = self.not_found.render_lines();

        let failed = self.failed();
        if !failed.is_empty() {
            lines.push(format!("The following {} files failed:", failed.len()));
            for record in failed {
                if let FileOutcome::Failed { reason } = &record.outcome {
                    lines.push(format!("▸ {} ({})", record.source.display(), reason));
                }
            }
        }

        lines
    }
}
