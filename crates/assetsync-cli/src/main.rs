use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use assetsync_core::{AssetUpdater, FailurePolicy, MatchMode, UpdateConfig, DEFAULT_MANIFEST_NAME};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
	name = "assetsync",
	version,
	about = "Replace images in an asset catalog with freshly exported ones"
)]
struct Cli {
	/// Folder containing the new images (.jpg, .png)
	source: PathBuf,
	/// Asset catalog to update, e.g. App/Assets.xcassets
	destination: PathBuf,
	/// How source names are compared with catalog files
	#[arg(long, value_enum, default_value_t = MatchArg::Exact)]
	match_mode: MatchArg,
	/// Keep going after a file fails instead of aborting the run
	#[arg(long)]
	keep_going: bool,
	/// Check every copy against its source with SHA-256
	#[arg(long)]
	verify: bool,
	/// Manifest file name inside each asset folder
	#[arg(long, default_value = DEFAULT_MANIFEST_NAME)]
	manifest_name: String,
	/// Write the run report as JSON to this path
	#[arg(long)]
	json: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum MatchArg {
	/// File names must be equal apart from the extension
	Exact,
	/// Any catalog path containing the name matches
	Substring,
}

impl From<MatchArg> for MatchMode {
	fn from(arg: MatchArg) -> Self {
		match arg {
			MatchArg::Exact => MatchMode::Exact,
			MatchArg::Substring => MatchMode::Substring,
		}
	}
}

impl Cli {
	fn config(&self) -> UpdateConfig {
		let policy = if self.keep_going {
			FailurePolicy::Isolate
		} else {
			FailurePolicy::Abort
		};

		UpdateConfig::default()
			.with_match_mode(self.match_mode.into())
			.with_failure_policy(policy)
			.with_verify_copies(self.verify)
			.with_manifest_name(self.manifest_name.clone())
	}
}

fn main() -> Result<()> {
	// Initialize tracing
	tracing_subscriber::fmt().with_target(false).init();

	let cli = Cli::parse();
	let updater = AssetUpdater::new(cli.config());
	let config = updater.config();
	tracing::info!(
		"Updating {} from {} ({} matching, {} manifests)",
		cli.destination.display(),
		cli.source.display(),
		config.match_mode,
		config.manifest_name
	);

	let report = updater
		.run(&cli.source, &cli.destination)
		.with_context(|| format!("Updating {} failed", cli.destination.display()))?;

	if let Some(path) = &cli.json {
		let json = serde_json::to_string_pretty(&report)?;
		std::fs::write(path, json)
			.with_context(|| format!("Failed to write report to {}", path.display()))?;
		tracing::info!("Report written to {}", path.display());
	}

	if report.has_failures() {
		bail!("{} files could not be updated", report.failed().len());
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let cli = Cli::parse_from(["assetsync", "exports", "Assets.xcassets"]);
		let config = cli.config();

		assert_eq!(cli.source, PathBuf::from("exports"));
		assert_eq!(config, UpdateConfig::default());
		assert_eq!(AssetUpdater::new(config.clone()).config(), &config);
		assert!(cli.json.is_none());
	}

	#[test]
	fn test_flags_map_onto_config() {
		let cli = Cli::parse_from([
			"assetsync",
			"exports",
			"Assets.xcassets",
			"--match-mode",
			"substring",
			"--keep-going",
			"--verify",
			"--manifest-name",
			"Manifest.json",
			"--json",
			"report.json",
		]);
		let config = cli.config();

		assert_eq!(config.match_mode, MatchMode::Substring);
		assert_eq!(config.failure_policy, FailurePolicy::Isolate);
		assert!(config.verify_copies);
		assert_eq!(config.manifest_name, "Manifest.json");
		assert_eq!(cli.json, Some(PathBuf::from("report.json")));
	}

	#[test]
	fn test_both_roots_are_required() {
		assert!(Cli::try_parse_from(["assetsync", "exports"]).is_err());
	}
}
