pub mod collection;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use brief_config::Config;
use brief_service::DigestService;

#[derive(Debug, Parser)]
#[command(
	version = brief_cli::VERSION,
	rename_all = "kebab",
	styles = brief_cli::styles(),
)]
pub struct Args {
	/// Directory holding one subdirectory per collection.
	#[arg(long, value_name = "DIR")]
	pub base_dir: PathBuf,
	/// Process only this collection under the base directory.
	#[arg(long, value_name = "NAME")]
	pub collection: Option<String>,
	/// Overrides `embedding.static_model.model_dir`.
	#[arg(long, value_name = "DIR")]
	pub model_dir: Option<PathBuf>,
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
	/// Overrides `service.log_level`.
	#[arg(long, value_name = "FILTER")]
	pub log_level: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
	pub succeeded: usize,
	pub total: usize,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = resolve_config(&args)?;

	init_tracing(&config);

	let report = run_batch(config, &args.base_dir, args.collection.as_deref()).await?;

	tracing::info!(
		succeeded = report.succeeded,
		total = report.total,
		"Completed processing {} out of {} collections.",
		report.succeeded,
		report.total
	);

	Ok(())
}

/// Loads the config file when given, else defaults, then applies flag overrides.
pub fn resolve_config(args: &Args) -> color_eyre::Result<Config> {
	let mut config = match &args.config {
		Some(path) => brief_config::load(path)?,
		None => Config::default(),
	};

	if let Some(model_dir) = &args.model_dir {
		config.embedding.static_model.model_dir = model_dir.clone();
	}
	if let Some(log_level) = &args.log_level {
		config.service.log_level = log_level.clone();
	}

	brief_config::validate(&config)?;

	Ok(config)
}

/// Processes every selected collection in name order. Collection failures are logged and counted.
pub async fn run_batch(
	config: Config,
	base_dir: &Path,
	collection: Option<&str>,
) -> color_eyre::Result<BatchReport> {
	let collections = collection::discover(base_dir, collection)?;

	if collections.is_empty() {
		tracing::warn!(base_dir = %base_dir.display(), "No collections found.");

		return Ok(BatchReport::default());
	}

	let source = brief_source::build_source(&config);
	let max_workers = config.source.max_workers;
	let embedding = brief_service::build_embedding_provider(&config.embedding).await;
	let service = DigestService::new(config, embedding);
	let mut report = BatchReport { succeeded: 0, total: collections.len() };

	for dir in &collections {
		tracing::info!(collection = %dir.display(), "Processing collection.");

		match collection::process_collection(dir, &service, source.clone(), max_workers).await {
			Ok(output_path) => {
				tracing::info!(path = %output_path.display(), "Output saved.");

				report.succeeded += 1;
			},
			Err(err) => {
				tracing::error!(
					collection = %dir.display(),
					error = %err,
					"Failed to process collection."
				);
			},
		}
	}

	Ok(report)
}

fn init_tracing(config: &Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
