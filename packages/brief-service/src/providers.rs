//! Adapters from the configured embedding backends to [`EmbeddingProvider`].

use std::sync::Arc;

use brief_providers::StaticEmbedder;

use crate::{BoxFuture, EmbeddingProvider, Error, Result};

/// Runs a local static model on the blocking pool.
pub struct StaticProvider {
	embedder: Arc<StaticEmbedder>,
}
impl StaticProvider {
	pub fn new(embedder: StaticEmbedder) -> Self {
		Self { embedder: Arc::new(embedder) }
	}
}
impl EmbeddingProvider for StaticProvider {
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		let embedder = Arc::clone(&self.embedder);
		let texts = texts.to_vec();

		Box::pin(async move {
			tokio::task::spawn_blocking(move || embedder.embed(&texts))
				.await
				.map_err(|err| Error::Provider { message: err.to_string() })?
				.map_err(Error::from)
		})
	}
}

pub struct HttpProvider {
	cfg: brief_config::HttpEmbedding,
	timeout_ms: u64,
}
impl HttpProvider {
	pub fn new(cfg: brief_config::HttpEmbedding, timeout_ms: u64) -> Self {
		Self { cfg, timeout_ms }
	}
}
impl EmbeddingProvider for HttpProvider {
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move {
			brief_providers::embedding::embed(&self.cfg, self.timeout_ms, texts)
				.await
				.map_err(Error::from)
		})
	}
}

/// Builds the configured provider. `None` disables the semantic channel.
///
/// A static model that fails to load is logged and disables the channel instead of failing.
pub async fn build_embedding_provider(
	cfg: &brief_config::Embedding,
) -> Option<Arc<dyn EmbeddingProvider>> {
	match cfg.provider.as_str() {
		"off" => {
			tracing::info!("Semantic scoring disabled.");

			None
		},
		"http" => Some(Arc::new(HttpProvider::new(cfg.http.clone(), cfg.timeout_ms))),
		_ => {
			let model_cfg = cfg.static_model.clone();
			let loaded = tokio::task::spawn_blocking(move || StaticEmbedder::load(&model_cfg))
				.await
				.map_err(|err| Error::Provider { message: err.to_string() })
				.and_then(|result| result.map_err(Error::from));

			match loaded {
				Ok(embedder) => {
					tracing::info!(
						model = %cfg.static_model.model_name,
						dimensions = embedder.dimensions(),
						"Loaded static embedding model."
					);

					Some(Arc::new(StaticProvider::new(embedder)))
				},
				Err(err) => {
					tracing::warn!(
						error = %err,
						"Failed to load embedding model. Continuing with lexical scoring only."
					);

					None
				},
			}
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn off_disables_the_semantic_channel() {
		let mut cfg = brief_config::Embedding::default();

		cfg.provider = "off".to_string();

		assert!(build_embedding_provider(&cfg).await.is_none());
	}

	#[tokio::test]
	async fn http_provider_is_built_without_contacting_the_endpoint() {
		let mut cfg = brief_config::Embedding::default();

		cfg.provider = "http".to_string();
		cfg.http.api_base = "http://127.0.0.1:9".to_string();

		assert!(build_embedding_provider(&cfg).await.is_some());
	}
}
