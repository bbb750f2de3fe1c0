//! Refresh an image catalog from a folder of newly exported images.
//!
//! Images are paired by base name, so `logo.png` replaces `logo.jpg`. When
//! the extension changes, the `Contents.json` manifest next to the old image
//! is rewritten and the old image deleted.
//!
//! ```no_run
//! use assetsync_core::{AssetUpdater, MatchMode, UpdateConfig};
//! use std::path::Path;
//!
//! let config = UpdateConfig::default().with_match_mode(MatchMode::Exact);
//! let report = AssetUpdater::new(config)
//!     .run(Path::new("exports"), Path::new("App/Assets.xcassets"))?;
//! println!("{} renamed", report.renamed_count());
//! # Ok::<(), assetsync_core::UpdateError>(())
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod log;
pub mod manifest;
pub mod matcher;
pub mod report;
pub mod scan;
pub mod updater;
pub mod verify;

pub use config::{
    FailurePolicy, MatchMode, UpdateConfig, DEFAULT_EXTENSIONS, DEFAULT_MANIFEST_NAME,
};
pub use descriptor::{DescriptorIndex, FileDescriptor};
pub use error::{IoOperation, UpdateError};
pub use log::{MemoryLog, TracingLog, UpdateLog};
pub use manifest::{Manifest, ManifestEdit};
pub use report::{FileOutcome, FileRecord, NotFoundList, UpdateReport};
pub use scan::enumerate_images;
pub use updater::{update, AssetUpdater};
