//! Pairing source base names with destination files

use std::path::Path;

use crate::config::MatchMode;
use crate::descriptor::FileDescriptor;

/// Does `candidate` carry `base_name` under one of the accepted extensions?
pub fn matches<S: AsRef<str>>(
    candidate: &FileDescriptor,
    base_name: &str,
    mode: MatchMode,
    extensions: &[S],
) -> bool {
    extensions.iter().any(|ext| {
        let wanted = format!("{}{}", base_name, ext.as_ref());
        match mode {
            MatchMode::Exact => candidate.basename == wanted,
            MatchMode::Substring => candidate.path.to_string_lossy().contains(&wanted),
        }
    })
}

/// Path of the first destination, in scan order, matching `base_name`.
///
/// Several destinations may qualify; only the first is ever returned, so
/// the result depends on scan order.
pub fn find_match<'a, S: AsRef<str>>(
    base_name: &str,
    destinations: &'a [FileDescriptor],
    mode: MatchMode,
    extensions: &[S],
) -> Option<&'a Path> {
    destinations
        .iter()
        .find(|candidate| matches(candidate, base_name, mode, extensions))
        .map(|candidate| candidate.path.as_path())
}
