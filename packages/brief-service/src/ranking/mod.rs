//! Hybrid lexical and semantic scoring of sections and subsections.

pub mod diversity;
pub mod lexical;
pub mod semantic;

use std::cmp::Ordering;

use brief_config::Ranking;
use brief_domain::{Section, keywords, text};

use crate::{EmbeddingProvider, Error, Result};

#[derive(Clone, Copy, Debug)]
pub struct ScoredSection<'a> {
	pub section: &'a Section,
	pub score: f32,
}

/// Descending order with NaN last.
pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

pub struct HybridScorer<'a> {
	pub embedding: Option<&'a dyn EmbeddingProvider>,
	pub lexical_weight: f32,
	pub semantic_weight: f32,
	pub timeout_ms: u64,
}
impl HybridScorer<'_> {
	/// Weighted sum of both channels for every text, in input order.
	///
	/// A failing channel contributes zero for this pass and is logged.
	pub async fn score(&self, query: &str, texts: &[String]) -> Vec<f32> {
		if texts.is_empty() {
			return Vec::new();
		}

		let lexical = lexical::tfidf_scores(query, texts).unwrap_or_else(|err| {
			tracing::warn!(error = %err, items = texts.len(), "Lexical scoring failed. Using zero scores.");

			vec![0.0; texts.len()]
		});
		let semantic = match self.embedding {
			Some(provider) =>
				match semantic::semantic_scores(provider, self.timeout_ms, query, texts).await {
					Ok(scores) => scores,
					Err(err) => {
						tracing::warn!(
							error = %err,
							items = texts.len(),
							"Semantic scoring failed. Using zero scores."
						);

						vec![0.0; texts.len()]
					},
				},
			None => vec![0.0; texts.len()],
		};

		lexical
			.iter()
			.zip(semantic.iter())
			.map(|(lexical, semantic)| self.lexical_weight * lexical + self.semantic_weight * semantic)
			.collect()
	}
}

/// Text a section is scored on: its title followed by the leading part of its content.
pub fn section_text(section: &Section, lead_chars: usize) -> String {
	format!("{}. {}", section.title, text::take_chars(&section.content, lead_chars))
}

/// Scores, keyword-adjusts, sorts, and diversity-reranks every section.
pub async fn rank_sections<'a>(
	scorer: &HybridScorer<'_>,
	query: &str,
	sections: &'a [Section],
	cfg: &Ranking,
) -> Result<Vec<ScoredSection<'a>>> {
	let texts: Vec<String> =
		sections.iter().map(|section| section_text(section, cfg.lead_chars)).collect();
	let base = scorer.score(query, &texts).await;
	let mut scored = Vec::with_capacity(sections.len());

	for (section, base) in sections.iter().zip(base) {
		let score =
			base + keywords::section_adjustment(&section.title, &section.content, cfg.lead_chars);

		if !score.is_finite() {
			return Err(Error::Scoring {
				message: format!(
					"Section '{}' in {} scored a non-finite value.",
					section.title, section.document
				),
			});
		}

		scored.push(ScoredSection { section, score });
	}

	scored.sort_by(|a, b| cmp_f32_desc(a.score, b.score));

	Ok(diversity::apply_diversity(scored, &cfg.diversity))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn nan_sorts_last() {
		let mut values = vec![0.2, f32::NAN, 0.9, -0.1];

		values.sort_by(|a, b| cmp_f32_desc(*a, *b));

		assert_eq!(values[..3], [0.9, 0.2, -0.1]);
		assert!(values[3].is_nan());
	}

	#[test]
	fn section_text_uses_title_and_lead() {
		let section = Section {
			document: "guide.pdf".to_string(),
			title: "Nightlife".to_string(),
			page_number: 3,
			content: "Bars open late in the old town.".to_string(),
			subsections: Vec::new(),
		};

		assert_eq!(section_text(&section, 4), "Nightlife. Bars");
	}
}
