//! Persona-driven ranking of document sections into a fixed-size digest.

pub mod excerpt;
pub mod input;
pub mod output;
pub mod providers;
pub mod ranking;

mod error;

pub use error::{Error, Result};
pub use input::{CollectionInput, DocumentRef, JobToBeDone, Persona};
pub use output::{DIGEST_SIZE, DigestOutput, ExtractedSection, Metadata, RefinedSubsection};
pub use providers::build_embedding_provider;

use std::{future::Future, pin::Pin, sync::Arc, time::Instant};

use brief_config::Config;
use brief_domain::{ParsedDocument, persona};
use brief_segment::SegmenterConfig;

use crate::ranking::HybridScorer;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	/// Returns one vector per input text, in input order.
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

pub struct DigestService {
	pub cfg: Config,
	pub embedding: Option<Arc<dyn EmbeddingProvider>>,
}
impl DigestService {
	pub fn new(cfg: Config, embedding: Option<Arc<dyn EmbeddingProvider>>) -> Self {
		Self { cfg, embedding }
	}

	/// Runs the whole pipeline. Failures produce a degraded output carrying the error message.
	pub async fn process_documents(
		&self,
		input: &CollectionInput,
		documents: &[ParsedDocument],
	) -> DigestOutput {
		match self.digest(input, documents).await {
			Ok(output) => output,
			Err(err) => {
				tracing::error!(error = %err, "Pipeline failed. Emitting degraded output.");

				DigestOutput::degraded(Metadata::new(input), err.to_string())
			},
		}
	}

	pub async fn digest(
		&self,
		input: &CollectionInput,
		documents: &[ParsedDocument],
	) -> Result<DigestOutput> {
		let started = Instant::now();
		let segmenter_cfg = SegmenterConfig {
			header_font_size: self.cfg.segmenter.header_font_size,
			min_section_chars: self.cfg.segmenter.min_section_chars,
		};
		let sections = brief_segment::segment_documents(documents, &segmenter_cfg);
		let query = persona::compose_query(input.role(), input.task());
		let ranking_cfg = &self.cfg.ranking;
		let scorer = HybridScorer {
			embedding: self.embedding.as_deref(),
			lexical_weight: ranking_cfg.lexical_weight,
			semantic_weight: ranking_cfg.semantic_weight,
			timeout_ms: self.cfg.embedding.timeout_ms,
		};
		let ranked = ranking::rank_sections(&scorer, &query, &sections, ranking_cfg).await?;
		let relevant =
			ranked.iter().filter(|item| item.score > ranking_cfg.relevance_threshold).count();

		if relevant == 0 {
			tracing::debug!(
				threshold = ranking_cfg.relevance_threshold,
				"No section passed the relevance threshold. Using the top of the full ranking."
			);
		}

		let selected = &ranked[..ranked.len().min(DIGEST_SIZE)];
		let excerpts = excerpt::select_excerpts(
			&scorer,
			&query,
			&ranked,
			DIGEST_SIZE,
			&ranking_cfg.subsection,
		)
		.await;
		let output = output::assemble(Metadata::new(input), selected, excerpts);

		tracing::info!(
			documents = documents.len(),
			sections = sections.len(),
			relevant,
			elapsed_ms = started.elapsed().as_millis() as u64,
			"Digest assembled."
		);

		Ok(output)
	}
}
