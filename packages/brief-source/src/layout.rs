//! Rebuilds text blocks from positioned glyphs.
//!
//! Glyphs are grouped into lines by baseline proximity, then lines into blocks by vertical gap
//! and font size change. Coordinates are PDF points with the origin at the bottom-left.

use std::cmp::Ordering;

use brief_domain::{BoundingBox, TextFragment};
use unicode_normalization::UnicodeNormalization;

const LINE_TOLERANCE: f32 = 0.4;
const SPACE_GAP: f32 = 0.3;
const BLOCK_GAP: f32 = 1.4;
const FONT_SIZE_JUMP: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedChar {
	pub ch: char,
	pub left: f32,
	pub bottom: f32,
	pub right: f32,
	pub top: f32,
	pub font_size: f32,
}
impl PositionedChar {
	fn height(&self) -> f32 {
		(self.top - self.bottom).abs().max(self.font_size)
	}

	fn width(&self) -> f32 {
		(self.right - self.left).abs()
	}
}

#[derive(Debug)]
struct Line {
	text: String,
	bottom: f32,
	font_size: f32,
	bbox: BoundingBox,
}

/// Converts one page's glyphs into fragments in reading order.
pub fn page_fragments(
	chars: &[PositionedChar],
	page_number: u32,
	page_height: f32,
	header_font_size: f32,
) -> Vec<TextFragment> {
	let lines = reconstruct_lines(chars, page_height);
	let mut fragments = Vec::new();
	let mut block: Vec<Line> = Vec::new();

	for line in lines {
		if let Some(previous) = block.last()
			&& starts_new_block(previous, &line)
		{
			fragments.extend(finish_block(&block, page_number, header_font_size));
			block.clear();
		}

		block.push(line);
	}

	fragments.extend(finish_block(&block, page_number, header_font_size));

	fragments
}

fn reconstruct_lines(chars: &[PositionedChar], page_height: f32) -> Vec<Line> {
	let mut sorted: Vec<PositionedChar> =
		chars.iter().filter(|positioned| !positioned.ch.is_control()).copied().collect();

	sorted.sort_by(|a, b| {
		b.bottom
			.partial_cmp(&a.bottom)
			.unwrap_or(Ordering::Equal)
			.then(a.left.partial_cmp(&b.left).unwrap_or(Ordering::Equal))
	});

	let mut lines = Vec::new();
	let mut current: Vec<PositionedChar> = Vec::new();

	for positioned in sorted {
		if let Some(first) = current.first()
			&& (positioned.bottom - first.bottom).abs() >= first.height() * LINE_TOLERANCE
		{
			lines.extend(build_line(&current, page_height));
			current.clear();
		}

		current.push(positioned);
	}

	lines.extend(build_line(&current, page_height));

	lines
}

fn build_line(chars: &[PositionedChar], page_height: f32) -> Option<Line> {
	let first = chars.first()?;
	let visible: Vec<&PositionedChar> = chars.iter().filter(|c| !c.ch.is_whitespace()).collect();
	let avg_width = if visible.is_empty() {
		0.0
	} else {
		visible.iter().map(|c| c.width()).sum::<f32>() / visible.len() as f32
	};
	let mut text = String::new();
	let mut previous: Option<&PositionedChar> = None;

	for positioned in chars {
		if let Some(prev) = previous
			&& positioned.left - prev.right > avg_width * SPACE_GAP
			&& !text.ends_with(char::is_whitespace)
			&& !positioned.ch.is_whitespace()
		{
			text.push(' ');
		}

		text.push(positioned.ch);

		previous = Some(positioned);
	}

	let text = text.trim().to_string();

	if text.is_empty() {
		return None;
	}

	let font_size = chars.iter().map(|c| c.font_size).fold(0.0_f32, f32::max);
	let bbox = chars
		.iter()
		.map(|c| to_top_down(c, page_height))
		.reduce(|acc, bbox| acc.union(&bbox))
		.unwrap_or_default();

	Some(Line { text, bottom: first.bottom, font_size, bbox })
}

fn to_top_down(positioned: &PositionedChar, page_height: f32) -> BoundingBox {
	BoundingBox::new(
		positioned.left,
		page_height - positioned.top,
		positioned.right,
		page_height - positioned.bottom,
	)
}

fn starts_new_block(previous: &Line, line: &Line) -> bool {
	let gap = previous.bottom - line.bottom;

	gap > BLOCK_GAP * previous.font_size.max(line.font_size)
		|| (previous.font_size - line.font_size).abs() > FONT_SIZE_JUMP
}

fn finish_block(block: &[Line], page_number: u32, header_font_size: f32) -> Option<TextFragment> {
	let first = block.first()?;
	let joined = block.iter().map(|line| line.text.as_str()).collect::<Vec<_>>().join("\n");
	let text = joined.nfkc().collect::<String>().trim().to_string();

	if text.is_empty() {
		return None;
	}

	let font_size = block.iter().map(|line| line.font_size).fold(0.0_f32, f32::max);
	let bbox = block.iter().skip(1).fold(first.bbox, |acc, line| acc.union(&line.bbox));

	Some(TextFragment {
		text,
		font_size,
		page_number,
		is_header_hint: font_size > header_font_size,
		bbox,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	const PAGE_HEIGHT: f32 = 792.0;

	fn word(text: &str, left: f32, bottom: f32, font_size: f32) -> Vec<PositionedChar> {
		let width = font_size * 0.5;

		text.chars()
			.enumerate()
			.map(|(idx, ch)| {
				let x = left + width * idx as f32;

				PositionedChar {
					ch,
					left: x,
					bottom,
					right: x + width,
					top: bottom + font_size,
					font_size,
				}
			})
			.collect()
	}

	#[test]
	fn words_on_one_baseline_form_a_line() {
		let mut chars = word("Budget", 50.0, 700.0, 11.0);

		chars.extend(word("Tips", 50.0 + 6.0 * 5.5 + 4.0, 700.0, 11.0));

		let fragments = page_fragments(&chars, 1, PAGE_HEIGHT, 12.0);

		assert_eq!(fragments.len(), 1);
		assert_eq!(fragments[0].text, "Budget Tips");
		assert!(!fragments[0].is_header_hint);
		assert_eq!(fragments[0].bbox.y0, PAGE_HEIGHT - 711.0);
	}

	#[test]
	fn font_change_and_gaps_split_blocks() {
		let mut chars = word("Overview", 50.0, 700.0, 18.0);

		chars.extend(word("first", 50.0, 680.0, 11.0));
		chars.extend(word("second", 50.0, 667.0, 11.0));
		chars.extend(word("later", 50.0, 600.0, 11.0));

		let fragments = page_fragments(&chars, 2, PAGE_HEIGHT, 12.0);
		let texts: Vec<&str> = fragments.iter().map(|fragment| fragment.text.as_str()).collect();

		assert_eq!(texts, vec!["Overview", "first\nsecond", "later"]);
		assert!(fragments[0].is_header_hint);
		assert_eq!(fragments[0].font_size, 18.0);
		assert!(fragments.iter().all(|fragment| fragment.page_number == 2));
	}

	#[test]
	fn ligatures_are_normalized() {
		let chars = word("\u{FB01}ne", 50.0, 700.0, 11.0);
		let fragments = page_fragments(&chars, 1, PAGE_HEIGHT, 12.0);

		assert_eq!(fragments[0].text, "fine");
	}

	#[test]
	fn whitespace_only_pages_yield_nothing() {
		let chars = word("   ", 50.0, 700.0, 11.0);

		assert!(page_fragments(&chars, 1, PAGE_HEIGHT, 12.0).is_empty());
		assert!(page_fragments(&[], 1, PAGE_HEIGHT, 12.0).is_empty());
	}
}
