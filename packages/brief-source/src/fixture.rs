//! Deterministic themed documents used when a real document cannot be parsed.

use std::path::Path;

use brief_domain::{BoundingBox, Page, ParsedDocument, TextFragment};

use crate::{PageBlockSource, Result};

const PAGE_COUNT: u32 = 5;
const BODY_FRAGMENTS_PER_PAGE: usize = 2;
const TITLE_FONT_SIZE: f32 = 16.0;
const BODY_FONT_SIZE: f32 = 11.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureTheme {
	Travel,
	Forms,
	Recipe,
}
impl FixtureTheme {
	/// Picks a theme from keywords in the document's file stem.
	pub fn for_document(document_name: &str) -> Self {
		let stem = Path::new(document_name)
			.file_stem()
			.map(|stem| stem.to_string_lossy().replace('_', " ").to_lowercase())
			.unwrap_or_default();

		if stem.contains("acrobat") {
			Self::Forms
		} else if ["recipe", "food", "vegetarian"].iter().any(|keyword| stem.contains(keyword)) {
			Self::Recipe
		} else {
			Self::Travel
		}
	}

	pub fn titles(self) -> [&'static str; 5] {
		match self {
			Self::Travel => [
				"Top Destinations",
				"Cultural Highlights",
				"Budget Accommodation",
				"Local Cuisine Guide",
				"Transportation Tips",
			],
			Self::Forms => [
				"Creating Fillable Forms",
				"Advanced Form Fields",
				"Adding Digital Signatures",
				"Distributing Forms",
				"Collecting Responses",
			],
			Self::Recipe => [
				"Vegetarian Appetizers",
				"Hearty Main Courses",
				"Delicious Side Dishes",
				"Buffet Presentation",
				"Menu Planning Guide",
			],
		}
	}
}

/// Serves a themed mock document for any path without touching the file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixtureSource;
impl FixtureSource {
	pub fn document(document_name: &str) -> ParsedDocument {
		let titles = FixtureTheme::for_document(document_name).titles();
		let pages = (1..=PAGE_COUNT)
			.map(|page_number| {
				let title = titles[(page_number as usize - 1) % titles.len()];

				fixture_page(page_number, title)
			})
			.collect();

		ParsedDocument { document_name: document_name.to_string(), pages }
	}
}
impl PageBlockSource for FixtureSource {
	fn load(&self, path: &Path) -> Result<ParsedDocument> {
		Ok(Self::document(&crate::document_name(path)))
	}
}

fn fixture_page(page_number: u32, title: &str) -> Page {
	let mut fragments = Vec::with_capacity(1 + BODY_FRAGMENTS_PER_PAGE);

	fragments.push(TextFragment {
		text: title.to_string(),
		font_size: TITLE_FONT_SIZE,
		page_number,
		is_header_hint: true,
		bbox: BoundingBox::new(50.0, 50.0, 500.0, 70.0),
	});

	for idx in 0..BODY_FRAGMENTS_PER_PAGE {
		let offset = 50.0 * idx as f32;

		fragments.push(TextFragment {
			text: format!(
				"This is detailed sample content for the section on '{title}'. It simulates a paragraph discussing relevant points."
			),
			font_size: BODY_FONT_SIZE,
			page_number,
			is_header_hint: false,
			bbox: BoundingBox::new(50.0, 100.0 + offset, 500.0, 140.0 + offset),
		});
	}

	Page { page_number, fragments }
}
