//! Page block sources: turn document paths into pages of positioned text fragments.

pub mod fixture;
pub mod layout;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod resilient;

mod error;

pub use error::{Error, Result};
pub use fixture::{FixtureSource, FixtureTheme};
#[cfg(feature = "pdf")]
pub use pdf::PdfiumSource;
pub use resilient::ResilientSource;

use std::{
	path::{Path, PathBuf},
	sync::Arc,
};

use tokio::sync::Semaphore;

use brief_domain::ParsedDocument;

pub trait PageBlockSource: Send + Sync {
	fn load(&self, path: &Path) -> Result<ParsedDocument>;
}

/// Selects the configured source. A `pdf` source that cannot bind pdfium serves fixtures.
pub fn build_source(cfg: &brief_config::Config) -> Arc<dyn PageBlockSource> {
	match cfg.source.kind.as_str() {
		"fixture" => Arc::new(FixtureSource),
		_ => pdf_source(cfg),
	}
}

#[cfg(feature = "pdf")]
fn pdf_source(cfg: &brief_config::Config) -> Arc<dyn PageBlockSource> {
	match PdfiumSource::new(cfg.source.pdfium_library_dir.as_deref(), cfg.segmenter.header_font_size)
	{
		Ok(source) => Arc::new(ResilientSource::new(source)),
		Err(err) => {
			tracing::warn!(error = %err, "Failed to bind pdfium. Using fixture documents.");

			Arc::new(FixtureSource)
		},
	}
}

#[cfg(not(feature = "pdf"))]
fn pdf_source(_: &brief_config::Config) -> Arc<dyn PageBlockSource> {
	tracing::warn!("Built without PDF support. Using fixture documents.");

	Arc::new(FixtureSource)
}

/// Number of parse workers: the configured bound or available parallelism, capped by `documents`.
pub fn worker_count(max_workers: Option<usize>, documents: usize) -> usize {
	let bound = max_workers.unwrap_or_else(|| {
		std::thread::available_parallelism().map(|count| count.get()).unwrap_or(1)
	});

	bound.min(documents).max(1)
}

/// Loads every path on the blocking pool, at most `max_workers` at a time, in input order.
pub async fn load_documents(
	source: Arc<dyn PageBlockSource>,
	paths: &[PathBuf],
	max_workers: usize,
) -> Result<Vec<ParsedDocument>> {
	let permits = Arc::new(Semaphore::new(max_workers.max(1)));
	let mut handles = Vec::with_capacity(paths.len());

	for path in paths {
		let permit = Arc::clone(&permits)
			.acquire_owned()
			.await
			.map_err(|err| Error::Join { message: err.to_string() })?;
		let source = Arc::clone(&source);
		let path = path.clone();

		handles.push(tokio::task::spawn_blocking(move || {
			let _permit = permit;

			source.load(&path)
		}));
	}

	let mut documents = Vec::with_capacity(handles.len());

	for handle in handles {
		let document = handle.await.map_err(|err| Error::Join { message: err.to_string() })??;

		documents.push(document);
	}

	Ok(documents)
}

fn document_name(path: &Path) -> String {
	path.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_else(|| path.display().to_string())
}
