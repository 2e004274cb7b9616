//! Character-counted string helpers and case predicates.
//!
//! Lengths throughout the pipeline are measured in Unicode scalar values, never bytes.

use std::sync::OnceLock;

use regex::Regex;

pub const BULLET_PREFIXES: [char; 4] = ['•', '-', '*', '#'];

pub fn char_len(text: &str) -> usize {
	text.chars().count()
}

/// Returns the prefix of `text` holding at most `max_chars` characters.
pub fn take_chars(text: &str, max_chars: usize) -> &str {
	match text.char_indices().nth(max_chars) {
		Some((idx, _)) => &text[..idx],
		None => text,
	}
}

/// Returns `text` with the first `skip` characters removed.
pub fn skip_chars(text: &str, skip: usize) -> &str {
	match text.char_indices().nth(skip) {
		Some((idx, _)) => &text[idx..],
		None => "",
	}
}

pub fn word_count(text: &str) -> usize {
	text.split_whitespace().count()
}

/// True when `text` has at least one cased character and none of them are lower-case.
pub fn is_upper(text: &str) -> bool {
	let mut cased = false;

	for ch in text.chars() {
		if ch.is_lowercase() {
			return false;
		}
		if ch.is_uppercase() {
			cased = true;
		}
	}

	cased
}

/// True when every word starts with an upper-case letter followed only by lower-case letters.
///
/// Word boundaries are any uncased characters, so `"Top-Rated Spots"` is title case while
/// `"Top rated"` and `"NASA Report"` are not.
pub fn is_title(text: &str) -> bool {
	let mut cased = false;
	let mut previous_cased = false;

	for ch in text.chars() {
		if ch.is_uppercase() {
			if previous_cased {
				return false;
			}

			previous_cased = true;
			cased = true;
		} else if ch.is_lowercase() {
			if !previous_cased {
				return false;
			}

			previous_cased = true;
			cased = true;
		} else {
			previous_cased = false;
		}
	}

	cased
}

pub fn count_case(text: &str) -> (usize, usize) {
	text.chars().fold((0, 0), |(upper, lower), ch| {
		if ch.is_uppercase() {
			(upper + 1, lower)
		} else if ch.is_lowercase() {
			(upper, lower + 1)
		} else {
			(upper, lower)
		}
	})
}

pub fn starts_with_bullet(text: &str) -> bool {
	text.starts_with(BULLET_PREFIXES)
}

/// Matches `"12. item"` style lines.
pub fn is_numbered_item(text: &str) -> bool {
	static NUMBERED: OnceLock<Option<Regex>> = OnceLock::new();

	NUMBERED
		.get_or_init(|| Regex::new(r"^\d+\.\s").ok())
		.as_ref()
		.map(|re| re.is_match(text))
		.unwrap_or(false)
}

/// Bullet or numbered line, after trimming.
pub fn is_list_item(text: &str) -> bool {
	let trimmed = text.trim();

	starts_with_bullet(trimmed) || is_numbered_item(trimmed)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn char_helpers_count_scalars() {
		assert_eq!(char_len("café"), 4);
		assert_eq!(take_chars("café au lait", 4), "café");
		assert_eq!(take_chars("abc", 10), "abc");
		assert_eq!(skip_chars("café au lait", 5), "au lait");
		assert_eq!(skip_chars("abc", 10), "");
	}

	#[test]
	fn upper_requires_a_cased_character() {
		assert!(is_upper("BUDGET TIPS 2024"));
		assert!(!is_upper("Budget Tips"));
		assert!(!is_upper("2024 - 12"));
	}

	#[test]
	fn title_case_follows_word_boundaries() {
		assert!(is_title("Budget Accommodation"));
		assert!(is_title("Top-Rated Spots"));
		assert!(is_title("Chapter 3 Overview"));
		assert!(!is_title("Budget accommodation"));
		assert!(!is_title("NASA Report"));
		assert!(!is_title("123"));
	}

	#[test]
	fn list_items_cover_bullets_and_numbers() {
		assert!(is_list_item("• Pack light"));
		assert!(is_list_item("  - Pack light"));
		assert!(is_list_item("3. Book early"));
		assert!(!is_list_item("3.5 nights"));
		assert!(!is_list_item("Pack light"));
	}

	#[test]
	fn case_counts_ignore_uncased() {
		assert_eq!(count_case("AbC 12!"), (2, 1));
	}
}
