//! Header classifiers.
//!
//! Each classifier is a plain function so it can be exercised against a single fragment. The
//! first table decides whether a fragment opens a section; the second picks a synthetic title on
//! pages where nothing qualified.

use std::sync::OnceLock;

use regex::Regex;

use brief_domain::{TextFragment, text};

/// `(trimmed text, font size, large-type threshold) -> is header`.
pub type HeaderClassifier = fn(&str, f32, f32) -> bool;

pub const HEADER_CLASSIFIERS: [(&str, HeaderClassifier); 5] = [
	("numbered", is_numbered_heading),
	("large_upper", is_large_upper),
	("large_title_case", is_large_title_case),
	("large_colon", is_large_colon),
	("stylized_upper", is_stylized_upper),
];

/// Index of the chosen fragment on a header-less page.
pub type TitlePicker = fn(&[TextFragment]) -> Option<usize>;

pub const FORCED_TITLE_PICKERS: [(&str, TitlePicker); 3] = [
	("domain_cue", pick_domain_cue),
	("short_top", pick_short_top),
	("largest_font", pick_largest_font),
];

pub fn is_header(fragment: &TextFragment, threshold: f32) -> bool {
	let trimmed = fragment.text.trim();

	if trimmed.is_empty() {
		return false;
	}

	HEADER_CLASSIFIERS
		.iter()
		.any(|(_, classify)| classify(trimmed, fragment.font_size, threshold))
}

pub fn forced_title_index(fragments: &[TextFragment]) -> Option<usize> {
	FORCED_TITLE_PICKERS.iter().find_map(|(_, pick)| pick(fragments))
}

/// `1. Title`, `2.1. Title`, `1.2.3 Title`, or `IV. Title`.
///
/// A two-level number without a trailing dot reads as a decimal (`1.5 Million Visitors`) and is
/// not a heading.
pub fn is_numbered_heading(text: &str, _font_size: f32, _threshold: f32) -> bool {
	static NUMBERED: OnceLock<Option<Regex>> = OnceLock::new();

	NUMBERED
		.get_or_init(|| {
			Regex::new(r"^(?:(?:\d+\.)+|\d+(?:\.\d+){2,}\s|[IVX]+\.)\s*[A-Z]").ok()
		})
		.as_ref()
		.map(|re| re.is_match(text))
		.unwrap_or(false)
}

pub fn is_large_upper(text: &str, font_size: f32, threshold: f32) -> bool {
	font_size > threshold
		&& text::word_count(text) < 12
		&& text::is_upper(text)
		&& !text.ends_with('.')
}

pub fn is_large_title_case(text: &str, font_size: f32, threshold: f32) -> bool {
	font_size > threshold && text::word_count(text) < 10 && text::is_title(text)
}

pub fn is_large_colon(text: &str, font_size: f32, threshold: f32) -> bool {
	font_size > threshold && text.ends_with(':')
}

/// Mostly capitals with almost no lower-case letters, at any size.
pub fn is_stylized_upper(text: &str, _font_size: f32, _threshold: f32) -> bool {
	if text::char_len(text) >= 100 {
		return false;
	}

	let (upper, lower) = text::count_case(text);

	upper > lower && lower < 5
}

/// A 2–6 word fragment immediately followed by an ingredients or instructions line.
pub fn pick_domain_cue(fragments: &[TextFragment]) -> Option<usize> {
	fragments.windows(2).position(|pair| {
		let next = pair[1].text.to_lowercase();
		let words = text::word_count(&pair[0].text);

		(next.contains("ingredient") || next.contains("instruction")) && (2..=6).contains(&words)
	})
}

/// A 2–5 word fragment among the first three whose size is within 90% of the page maximum.
pub fn pick_short_top(fragments: &[TextFragment]) -> Option<usize> {
	let largest = fragments.get(pick_largest_font(fragments)?)?.font_size;

	fragments.iter().take(3).position(|fragment| {
		let words = text::word_count(&fragment.text);

		(2..=5).contains(&words) && fragment.font_size >= largest * 0.9
	})
}

/// First fragment with the maximum font size.
pub fn pick_largest_font(fragments: &[TextFragment]) -> Option<usize> {
	let mut best: Option<(usize, f32)> = None;

	for (idx, fragment) in fragments.iter().enumerate() {
		match best {
			Some((_, size)) if fragment.font_size <= size => {},
			_ => best = Some((idx, fragment.font_size)),
		}
	}

	best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
	use brief_domain::BoundingBox;

	use super::*;

	const THRESHOLD: f32 = 12.0;

	fn fragment(text: &str, font_size: f32) -> TextFragment {
		TextFragment {
			text: text.to_string(),
			font_size,
			page_number: 1,
			is_header_hint: font_size > THRESHOLD,
			bbox: BoundingBox::default(),
		}
	}

	#[test]
	fn numbered_headings_match_regardless_of_size() {
		assert!(is_numbered_heading("1. Getting Started", 9.0, THRESHOLD));
		assert!(is_numbered_heading("1.2.3 Section Title", 9.0, THRESHOLD));
		assert!(is_numbered_heading("IV. Results", 9.0, THRESHOLD));
		assert!(!is_numbered_heading("3.5 nights in total", 9.0, THRESHOLD));
		assert!(!is_numbered_heading("Budget. Tips", 9.0, THRESHOLD));
		assert!(is_numbered_heading("2.1. Budget Options", 9.0, THRESHOLD));
		assert!(!is_numbered_heading("1.5 Million Visitors", 9.0, THRESHOLD));
		assert!(!is_numbered_heading("2.25 Euros Per Ticket", 9.0, THRESHOLD));
	}

	#[test]
	fn large_type_rules_require_threshold() {
		assert!(is_large_upper("WHERE TO STAY", 14.0, THRESHOLD));
		assert!(!is_large_upper("WHERE TO STAY", 12.0, THRESHOLD));
		assert!(!is_large_upper("THE END.", 14.0, THRESHOLD));
		assert!(is_large_title_case("Budget Accommodation", 16.0, THRESHOLD));
		assert!(!is_large_title_case("Budget accommodation", 16.0, THRESHOLD));
		assert!(is_large_colon("Before you go:", 13.0, THRESHOLD));
		assert!(!is_large_colon("Before you go:", 11.0, THRESHOLD));
	}

	#[test]
	fn stylized_upper_ignores_font_size() {
		assert!(is_stylized_upper("NICE & MARSEILLE", 10.0, THRESHOLD));
		assert!(is_stylized_upper("TOP SPOTS: map", 10.0, THRESHOLD));
		assert!(!is_stylized_upper("Top Spots In Town", 10.0, THRESHOLD));
		assert!(!is_stylized_upper(&"A".repeat(100), 10.0, THRESHOLD));
	}

	#[test]
	fn blank_fragments_are_never_headers() {
		assert!(!is_header(&fragment("   ", 20.0), THRESHOLD));
		assert!(is_header(&fragment("  Local Cuisine Guide  ", 16.0), THRESHOLD));
	}

	#[test]
	fn largest_font_prefers_first_maximum() {
		let fragments = vec![fragment("a", 11.0), fragment("b", 14.0), fragment("c", 14.0)];

		assert_eq!(pick_largest_font(&fragments), Some(1));
		assert_eq!(pick_largest_font(&[]), None);
	}

	#[test]
	fn forced_title_priority() {
		let plain = vec![
			fragment("intro paragraph that runs very long", 11.0),
			fragment("a single", 10.5),
			fragment("x", 11.5),
		];

		// "a single" is short and within 90% of the 11.5 maximum.
		assert_eq!(forced_title_index(&plain), Some(1));

		let recipe = vec![
			fragment("some lengthy description of the page", 11.0),
			fragment("x", 11.0),
			fragment("Roasted Veggie Bowl", 10.0),
			fragment("Ingredients:", 10.0),
		];

		assert_eq!(forced_title_index(&recipe), Some(2));

		let only_largest = vec![fragment("word", 9.0), fragment("y", 15.0)];

		assert_eq!(forced_title_index(&only_largest), Some(1));
	}
}
