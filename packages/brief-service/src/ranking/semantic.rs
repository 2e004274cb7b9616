use std::time::Duration;

use crate::{EmbeddingProvider, Error, Result};

pub fn cosine_similarity(lhs: &[f32], rhs: &[f32]) -> Option<f32> {
	if lhs.is_empty() || lhs.len() != rhs.len() {
		return None;
	}

	let mut dot = 0.0_f32;
	let mut lhs_norm = 0.0_f32;
	let mut rhs_norm = 0.0_f32;

	for (l, r) in lhs.iter().zip(rhs.iter()) {
		dot += l * r;
		lhs_norm += l * l;
		rhs_norm += r * r;
	}

	if lhs_norm <= f32::EPSILON || rhs_norm <= f32::EPSILON {
		return None;
	}

	Some((dot / (lhs_norm.sqrt() * rhs_norm.sqrt())).clamp(-1.0, 1.0))
}

/// Embeds the query and every text in one call and returns their cosine similarities.
pub async fn semantic_scores(
	provider: &dyn EmbeddingProvider,
	timeout_ms: u64,
	query: &str,
	texts: &[String],
) -> Result<Vec<f32>> {
	let mut inputs = Vec::with_capacity(texts.len() + 1);

	inputs.push(query.to_string());
	inputs.extend(texts.iter().cloned());

	let vectors = tokio::time::timeout(Duration::from_millis(timeout_ms), provider.embed(&inputs))
		.await
		.map_err(|_| Error::Timeout { millis: timeout_ms })??;

	if vectors.len() != inputs.len() {
		return Err(Error::Provider {
			message: format!(
				"Embedding provider returned {} vectors for {} inputs.",
				vectors.len(),
				inputs.len()
			),
		});
	}

	let Some((query_vector, item_vectors)) = vectors.split_first() else {
		return Ok(Vec::new());
	};

	Ok(item_vectors
		.iter()
		.map(|vector| cosine_similarity(query_vector, vector).unwrap_or(0.0))
		.collect())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cosine_handles_degenerate_vectors() {
		assert_eq!(cosine_similarity(&[], &[]), None);
		assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), None);
		assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), None);
	}

	#[test]
	fn cosine_of_parallel_and_orthogonal_vectors() {
		let parallel = cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]).expect("Cosine must exist.");
		let orthogonal = cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]).expect("Cosine must exist.");

		assert!((parallel - 1.0).abs() < 1e-6);
		assert_eq!(orthogonal, 0.0);
	}
}
