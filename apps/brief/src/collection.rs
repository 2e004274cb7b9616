//! Collection directories: discovery, input loading, and output writing.

use std::{
	fs,
	path::{Path, PathBuf},
	sync::Arc,
	time::Instant,
};

use color_eyre::eyre::{self, WrapErr};

use brief_cli::{DOCUMENTS_DIR_NAME, INPUT_FILE_NAME, OUTPUT_FILE_NAME};
use brief_service::{CollectionInput, DigestOutput, DigestService, Metadata};
use brief_source::PageBlockSource;

/// Collection directories to process, sorted by name.
///
/// A named collection that does not exist yields an empty list.
pub fn discover(base_dir: &Path, name: Option<&str>) -> color_eyre::Result<Vec<PathBuf>> {
	if let Some(name) = name {
		let dir = base_dir.join(name);

		if !dir.is_dir() {
			tracing::warn!(
				collection = name,
				base_dir = %base_dir.display(),
				"Collection not found."
			);

			return Ok(Vec::new());
		}

		return Ok(vec![dir]);
	}

	let mut collections = Vec::new();

	for entry in fs::read_dir(base_dir)
		.wrap_err_with(|| format!("Failed to read base directory {}.", base_dir.display()))?
	{
		let path = entry?.path();

		if path.is_dir() && path.join(INPUT_FILE_NAME).is_file() {
			collections.push(path);
		}
	}

	collections.sort();

	Ok(collections)
}

/// Runs one collection end to end and returns the path of the written output file.
pub async fn process_collection(
	dir: &Path,
	service: &DigestService,
	source: Arc<dyn PageBlockSource>,
	max_workers: Option<usize>,
) -> color_eyre::Result<PathBuf> {
	let started = Instant::now();
	let input = read_input(dir)?;
	let documents_dir = dir.join(DOCUMENTS_DIR_NAME);

	if !documents_dir.is_dir() {
		return Err(eyre::eyre!("Documents directory {} is missing.", documents_dir.display()));
	}

	let paths: Vec<PathBuf> =
		input.documents.iter().map(|doc| documents_dir.join(&doc.filename)).collect();
	let workers = brief_source::worker_count(max_workers, paths.len());
	let output = match brief_source::load_documents(source, &paths, workers).await {
		Ok(documents) => service.process_documents(&input, &documents).await,
		Err(err) => {
			tracing::error!(error = %err, "Document loading failed. Emitting degraded output.");

			DigestOutput::degraded(Metadata::new(&input), err.to_string())
		},
	};
	let output_path = dir.join(OUTPUT_FILE_NAME);

	write_output(&output_path, &output)?;

	tracing::info!(
		collection = %dir.display(),
		documents = paths.len(),
		degraded = output.error.is_some(),
		elapsed_ms = started.elapsed().as_millis() as u64,
		"Collection processed."
	);

	Ok(output_path)
}

pub fn read_input(dir: &Path) -> color_eyre::Result<CollectionInput> {
	let path = dir.join(INPUT_FILE_NAME);

	if !path.is_file() {
		return Err(eyre::eyre!("Input file {} is missing.", path.display()));
	}

	let raw = fs::read_to_string(&path)
		.wrap_err_with(|| format!("Failed to read input file {}.", path.display()))?;

	Ok(CollectionInput::from_json(&raw)?)
}

pub fn write_output(path: &Path, output: &DigestOutput) -> color_eyre::Result<()> {
	let json = serde_json::to_string_pretty(output)?;

	fs::write(path, json)
		.wrap_err_with(|| format!("Failed to write output file {}.", path.display()))?;

	Ok(())
}
