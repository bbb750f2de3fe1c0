//! Update configuration

use serde::{Deserialize, Serialize};

/// Default manifest file name inside each asset folder
pub const DEFAULT_MANIFEST_NAME: &str = "Contents.json";

/// Image extensions picked up by the scanner (case-sensitive)
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".jpg", ".png"];

/// How a source base name is compared against destination files and
/// manifest entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Destination file name must equal `base_name + ext`; manifest
    /// `filename` must equal the old basename
    #[default]
    Exact,
    /// Destination path only has to contain `base_name + ext`; manifest
    /// `filename` only has to contain the old basename
    Substring,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::Substring => write!(f, "substring"),
        }
    }
}

/// What to do when one file fails mid-run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the whole run on the first error
    #[default]
    Abort,
    /// Record the failure and continue with the next source file
    Isolate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateConfig {
    pub match_mode: MatchMode,
    pub failure_policy: FailurePolicy,
    /// Compare SHA-256 of source and copy after every copy
    pub verify_copies: bool,
    pub manifest_name: String,
    /// Accepted extensions, separator included (".png")
    pub extensions: Vec<String>,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            failure_policy: FailurePolicy::default(),
            verify_copies: false,
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl UpdateConfig {
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_verify_copies(mut self, verify: bool) -> Self {
        self.verify_copies = verify;
        self
    }

    pub fn with_manifest_name(mut self, name: impl Into<String>) -> Self {
        self.manifest_name = name.into();
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
}
