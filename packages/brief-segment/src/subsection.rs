//! Splits a section body into excerpt-sized subsections.
//!
//! Tiers run in order: a recipe-style cue short-circuits everything, otherwise the body is split
//! on blank lines, then on single lines with grouping, then on sentences, and the result is
//! stitched back together where a paragraph stops mid-thought.

use std::sync::OnceLock;

use regex::Regex;

use brief_domain::{Subsection, text};

const CUE_PREFIXES: [&str; 2] = ["ingredients", "instructions"];
const CUE_SPAN: usize = 6;
const SHORT_UPPER_LINE: usize = 50;
const SENTENCE_SPLIT_MIN_CHARS: usize = 300;
const INCOMPLETE_MAX_CHARS: usize = 100;
const MIN_PARAGRAPH_CHARS: usize = 30;
const MIN_LEAD_IN_CHARS: usize = 10;

pub fn split_subsections(title: &str, content: &str, page_number: u32) -> Vec<Subsection> {
	if let Some(cue) = domain_cue_block(content) {
		return vec![Subsection::new(title, 1, cue, page_number)];
	}

	let mut paragraphs = split_paragraphs(content);

	if paragraphs.len() <= 1 && text::char_len(content) > SENTENCE_SPLIT_MIN_CHARS {
		paragraphs = split_sentence_chunks(content);
	}

	let merged = merge_incomplete(&paragraphs);

	if merged.is_empty() {
		let trimmed = content.trim();

		if trimmed.is_empty() {
			return Vec::new();
		}

		return vec![Subsection::new(title, 1, trimmed.to_string(), page_number)];
	}

	merged
		.into_iter()
		.enumerate()
		.map(|(idx, para)| Subsection::new(title, idx + 1, para, page_number))
		.collect()
}

/// The first line starting with an ingredients/instructions cue plus the five lines after it.
pub fn domain_cue_block(content: &str) -> Option<String> {
	let lines: Vec<&str> =
		content.split('\n').map(str::trim).filter(|line| !line.is_empty()).collect();
	let start = lines.iter().position(|line| {
		let lower = line.to_lowercase();

		CUE_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
	})?;
	let end = (start + CUE_SPAN).min(lines.len());

	Some(lines[start..end].join("\n"))
}

/// Blank-line paragraphs, or grouped single lines when there are not at least two.
pub fn split_paragraphs(content: &str) -> Vec<String> {
	let paragraphs: Vec<String> = content
		.split("\n\n")
		.filter(|para| !para.trim().is_empty())
		.map(str::to_string)
		.collect();

	if paragraphs.len() > 1 {
		return paragraphs;
	}

	group_lines(content)
}

fn group_lines(content: &str) -> Vec<String> {
	let mut grouped = Vec::new();
	let mut current = String::new();

	for line in content.split('\n').filter(|line| !line.trim().is_empty()) {
		let trimmed = line.trim();
		let is_boundary = text::is_list_item(trimmed)
			|| (text::is_upper(line) && text::char_len(line) < SHORT_UPPER_LINE);

		if is_boundary {
			if !current.is_empty() {
				grouped.push(std::mem::take(&mut current));
			}

			grouped.push(trimmed.to_string());

			continue;
		}
		if !current.is_empty() {
			current.push(' ');
		}

		current.push_str(trimmed);
	}

	if !current.is_empty() {
		grouped.push(current);
	}

	grouped
}

fn sentence_boundary() -> Option<&'static Regex> {
	static BOUNDARY: OnceLock<Option<Regex>> = OnceLock::new();

	BOUNDARY.get_or_init(|| Regex::new(r"[.!?]\s+[A-Z]").ok()).as_ref()
}

/// Groups sentences into chunks of `clamp(count / 3, 2, 5)`.
pub fn split_sentence_chunks(content: &str) -> Vec<String> {
	let Some(boundary) = sentence_boundary() else {
		tracing::warn!("Sentence boundary pattern unavailable. Falling back to period splitting.");

		return split_on_periods(content);
	};
	let sentences = split_sentences(content, boundary);
	let chunk_size = (sentences.len() / 3).clamp(2, 5);

	sentences
		.chunks(chunk_size)
		.map(|chunk| chunk.join(" ").trim().to_string())
		.filter(|chunk| !chunk.is_empty())
		.collect()
}

fn split_sentences<'a>(content: &'a str, boundary: &Regex) -> Vec<&'a str> {
	let mut sentences = Vec::new();
	let mut start = 0;

	for found in boundary.find_iter(content) {
		// The punctuation stays with the sentence; the capital opens the next one.
		let end = found.start() + 1;
		let next_start = found.end() - found.as_str().chars().last().map(char::len_utf8).unwrap_or(0);

		sentences.push(&content[start..end]);

		start = next_start;
	}

	sentences.push(&content[start..]);

	sentences
}

fn split_on_periods(content: &str) -> Vec<String> {
	let pieces: Vec<&str> = content.split(". ").collect();

	pieces
		.chunks(3)
		.filter_map(|chunk| {
			let mut joined = chunk.join(". ");

			if joined.trim().is_empty() {
				return None;
			}
			if !joined.ends_with('.') {
				joined.push('.');
			}

			Some(joined.trim().to_string())
		})
		.collect()
}

/// Joins a short paragraph that stops mid-thought with its successor, then drops fragments.
pub fn merge_incomplete(paragraphs: &[String]) -> Vec<String> {
	let mut merged = Vec::new();
	let mut idx = 0;

	while idx < paragraphs.len() {
		let mut para = paragraphs[idx].trim().to_string();

		if para.is_empty() {
			idx += 1;

			continue;
		}

		let is_complete = para.ends_with(['.', '!', '?', ':', ';']);
		let is_short = text::char_len(&para) < INCOMPLETE_MAX_CHARS;

		idx += 1;

		if !is_complete && is_short && idx < paragraphs.len() {
			let next = paragraphs[idx].trim();

			if !next.is_empty() && !text::is_list_item(next) && !text::is_upper(next) {
				para.push(' ');
				para.push_str(next);

				idx += 1;
			}
		}

		let len = text::char_len(&para);

		if len > MIN_PARAGRAPH_CHARS || (para.ends_with(':') && len > MIN_LEAD_IN_CHARS) {
			merged.push(para);
		}
	}

	merged
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cue_block_takes_six_lines() {
		let content = "Intro line\nIngredients:\n1 cup rice\n2 cups water\nsalt\n\npepper\noil\nbasil";
		let block = domain_cue_block(content).expect("Expected cue block.");

		assert_eq!(block, "Ingredients:\n1 cup rice\n2 cups water\nsalt\npepper\noil");
	}

	#[test]
	fn cue_block_truncates_at_end() {
		let block = domain_cue_block("instructions: stir\nserve").expect("Expected cue block.");

		assert_eq!(block, "instructions: stir\nserve");
		assert!(domain_cue_block("No cue here\nAt all").is_none());
	}

	#[test]
	fn blank_line_paragraphs_are_kept() {
		let paragraphs = split_paragraphs("First paragraph.\n\nSecond paragraph.\n\n  \n\nThird.");

		assert_eq!(paragraphs, vec!["First paragraph.", "Second paragraph.", "Third."]);
	}

	#[test]
	fn single_lines_group_between_boundaries() {
		let paragraphs = split_paragraphs(
			"TOP PICKS\nThe old town is compact\nand walkable.\n• Free museum Sundays\n2. Night market\nTrailing words",
		);

		assert_eq!(
			paragraphs,
			vec![
				"TOP PICKS",
				"The old town is compact and walkable.",
				"• Free museum Sundays",
				"2. Night market",
				"Trailing words",
			]
		);
	}

	#[test]
	fn sentence_chunks_use_clamped_size() {
		let content = "One a. Two b. Three c! Four d? Five e. Six f. Seven g.";
		let chunks = split_sentence_chunks(content);

		// Seven sentences, chunk size clamp(7 / 3, 2, 5) = 2.
		assert_eq!(chunks, vec!["One a. Two b.", "Three c! Four d?", "Five e. Six f.", "Seven g."]);
	}

	#[test]
	fn sentence_split_requires_capital() {
		let boundary = sentence_boundary().expect("Pattern must compile.");
		let sentences = split_sentences("Cost is 3.5 euros. then more. Next one", boundary);

		assert_eq!(sentences, vec!["Cost is 3.5 euros. then more.", "Next one"]);
	}

	#[test]
	fn period_fallback_groups_by_three() {
		let chunks = split_on_periods("a one. b two. c three. d four");

		assert_eq!(chunks, vec!["a one. b two. c three.", "d four."]);
	}

	#[test]
	fn incomplete_paragraphs_merge_forward() {
		let paragraphs = vec![
			"Getting around the city is easy".to_string(),
			"with a day pass for all buses and trams.".to_string(),
			"Short".to_string(),
			"• Bullet stays separate and is long enough.".to_string(),
			"Packing list:".to_string(),
		];
		let merged = merge_incomplete(&paragraphs);

		assert_eq!(
			merged,
			vec![
				"Getting around the city is easy with a day pass for all buses and trams.",
				"• Bullet stays separate and is long enough.",
				"Packing list:",
			]
		);
	}

	#[test]
	fn upper_case_successor_blocks_merge() {
		let paragraphs =
			vec!["A heading without stop".to_string(), "NEXT HEADER IN CAPS".to_string()];

		assert!(merge_incomplete(&paragraphs).is_empty());
	}

	#[test]
	fn tiny_content_becomes_single_subsection() {
		let subs = split_subsections("Tips", "  Go early.  ", 4);

		assert_eq!(subs.len(), 1);
		assert_eq!(subs[0].id, "Tips_sub_1");
		assert_eq!(subs[0].text, "Go early.");
		assert_eq!(subs[0].page_number, 4);
		assert!(split_subsections("Tips", "   ", 4).is_empty());
	}

	#[test]
	fn ids_follow_position() {
		let content = "The first paragraph is long enough to keep.\n\nThe second paragraph is also long enough.";
		let subs = split_subsections("Guide", content, 2);
		let ids: Vec<&str> = subs.iter().map(|sub| sub.id.as_str()).collect();

		assert_eq!(ids, vec!["Guide_sub_1", "Guide_sub_2"]);
	}
}
