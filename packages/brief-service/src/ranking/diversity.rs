use std::collections::BTreeMap;

use brief_config::RankingDiversity;

use crate::ranking::{ScoredSection, cmp_f32_desc};

/// Penalty for the `occurrence`-th (1-based) section drawn from one document.
pub fn diversity_penalty(occurrence: usize, cfg: &RankingDiversity) -> f32 {
	if occurrence > cfg.free_per_document {
		cfg.penalty_step * (occurrence - cfg.free_per_document) as f32
	} else {
		0.0
	}
}

/// Penalizes repeat documents in one pass over the score-sorted list, then re-sorts stably.
pub fn apply_diversity<'a>(
	sorted: Vec<ScoredSection<'a>>,
	cfg: &RankingDiversity,
) -> Vec<ScoredSection<'a>> {
	let (_, mut adjusted) = sorted.into_iter().fold(
		(BTreeMap::<&'a str, usize>::new(), Vec::new()),
		|(mut occurrences, mut adjusted), item| {
			let seen = occurrences.entry(item.section.document.as_str()).or_insert(0);

			*seen += 1;

			let penalty = diversity_penalty(*seen, cfg);

			adjusted.push(ScoredSection { section: item.section, score: item.score - penalty });

			(occurrences, adjusted)
		},
	);

	adjusted.sort_by(|a, b| cmp_f32_desc(a.score, b.score));

	adjusted
}

#[cfg(test)]
mod tests {
	use brief_domain::Section;

	use super::*;

	fn section(document: &str, title: &str) -> Section {
		Section {
			document: document.to_string(),
			title: title.to_string(),
			page_number: 1,
			content: String::new(),
			subsections: Vec::new(),
		}
	}

	#[test]
	fn penalty_starts_after_free_allowance() {
		let cfg = RankingDiversity::default();

		assert_eq!(diversity_penalty(1, &cfg), 0.0);
		assert_eq!(diversity_penalty(2, &cfg), 0.0);
		assert!((diversity_penalty(3, &cfg) - 0.10).abs() < 1e-6);
		assert!((diversity_penalty(5, &cfg) - 0.30).abs() < 1e-6);
	}

	#[test]
	fn equal_scores_keep_prior_order() {
		let sections = [section("a.pdf", "First"), section("b.pdf", "Second"), section("c.pdf", "Third")];
		let scored = sections
			.iter()
			.map(|section| ScoredSection { section, score: 0.4 })
			.collect::<Vec<_>>();
		let adjusted = apply_diversity(scored, &RankingDiversity::default());
		let titles: Vec<&str> = adjusted.iter().map(|item| item.section.title.as_str()).collect();

		assert_eq!(titles, vec!["First", "Second", "Third"]);
	}
}
