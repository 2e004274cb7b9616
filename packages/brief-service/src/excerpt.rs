//! Picks one excerpt per selected section.
//!
//! Excerpts come from the best-scoring subsection when any ranked section has a qualifying one,
//! else from each section's raw content. Short or missing excerpts fall back to the content head and
//! finally to a placeholder naming the section.

use std::sync::OnceLock;

use regex::Regex;

use brief_config::RankingSubsection;
use brief_domain::{Section, keywords, text};

use crate::ranking::{HybridScorer, ScoredSection, cmp_f32_desc};

const BULLET: char = '•';
const LONG_CONTENT_CHARS: usize = 300;
const PARAGRAPH_WINDOW_CHARS: usize = 500;
const SENTENCE_WINDOW: (usize, usize) = (100, 300);
const HEAD_CHARS: usize = 250;
const MIN_EXCERPT_CHARS: usize = 50;
const FALLBACK_HEAD_CHARS: usize = 200;

fn sentence_end() -> Option<&'static Regex> {
	static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

	PATTERN.get_or_init(|| Regex::new(r"[.!?]\s+").ok()).as_ref()
}

/// The best qualifying subsection of `section`, if any.
pub async fn best_subsection(
	scorer: &HybridScorer<'_>,
	query: &str,
	section: &Section,
	cfg: &RankingSubsection,
) -> Option<String> {
	if section.subsections.is_empty() {
		return None;
	}

	let texts: Vec<String> = section.subsections.iter().map(|sub| sub.text.clone()).collect();
	let scores = scorer.score(query, &texts).await;
	let mut boosted: Vec<(&str, f32)> = texts
		.iter()
		.zip(scores)
		.map(|(text, score)| {
			let trimmed = text.trim();
			let boost = if keywords::has_action_marker(trimmed) { cfg.action_boost } else { 0.0 };

			(trimmed, score + boost)
		})
		.collect();

	boosted.sort_by(|a, b| cmp_f32_desc(a.1, b.1));

	boosted
		.into_iter()
		.take(cfg.candidates)
		.map(|(text, _)| text)
		.find(|text| text::char_len(text) > cfg.min_chars && !text.starts_with(BULLET))
		.map(str::to_string)
}

/// Excerpt cut directly from section content.
pub fn content_excerpt(content: &str) -> String {
	if text::char_len(content) <= LONG_CONTENT_CHARS {
		return content.trim().to_string();
	}

	if let Some(idx) = content.find("\n\n")
		&& idx > 0
		&& text::char_len(&content[..idx]) < PARAGRAPH_WINDOW_CHARS
	{
		return content[..idx].trim().to_string();
	}

	let (start, end) = SENTENCE_WINDOW;
	let window = text::take_chars(text::skip_chars(content, start), end - start);

	if let Some(found) = sentence_end().and_then(|pattern| pattern.find(window)) {
		let cut = start + text::char_len(&window[..found.end()]);

		return text::take_chars(content, cut).trim().to_string();
	}

	text::take_chars(content, HEAD_CHARS).trim().to_string()
}

/// Final text for a section given its candidate excerpt.
pub fn finalize_excerpt(section: &Section, candidate: Option<&str>) -> String {
	if let Some(candidate) = candidate
		&& text::char_len(candidate) >= MIN_EXCERPT_CHARS
	{
		return candidate.to_string();
	}

	let content = section.content.as_str();

	if content.trim().is_empty() {
		return format!("Important information related to {}", section.title);
	}
	if text::char_len(content) > FALLBACK_HEAD_CHARS {
		return format!("{}...", text::take_chars(content, FALLBACK_HEAD_CHARS));
	}

	content.to_string()
}

/// One excerpt for each of the first `count` ranked sections, index-aligned.
///
/// Content-derived excerpts replace subsection excerpts only when no ranked section, selected
/// or not, has a qualifying subsection.
pub async fn select_excerpts(
	scorer: &HybridScorer<'_>,
	query: &str,
	ranked: &[ScoredSection<'_>],
	count: usize,
	cfg: &RankingSubsection,
) -> Vec<String> {
	let selected = &ranked[..count.min(ranked.len())];
	let mut candidates = Vec::with_capacity(selected.len());

	for item in selected {
		candidates.push(best_subsection(scorer, query, item.section, cfg).await);
	}

	let mut any_qualifying = candidates.iter().any(Option::is_some);

	for item in &ranked[selected.len()..] {
		if any_qualifying {
			break;
		}

		any_qualifying = best_subsection(scorer, query, item.section, cfg).await.is_some();
	}

	if !selected.is_empty() && !any_qualifying {
		tracing::debug!(
			sections = ranked.len(),
			"No qualifying subsections. Cutting excerpts from section content."
		);

		candidates =
			selected.iter().map(|item| Some(content_excerpt(&item.section.content))).collect();
	}

	selected
		.iter()
		.zip(candidates)
		.map(|(item, candidate)| finalize_excerpt(item.section, candidate.as_deref()))
		.collect()
}
