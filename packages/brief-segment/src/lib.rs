//! Layout-driven segmentation of parsed documents into titled sections and excerpts.

pub mod header;
pub mod section;
pub mod subsection;

pub use section::merge_short_sections;
pub use subsection::split_subsections;

use brief_domain::{ParsedDocument, Section};

#[derive(Clone, Debug)]
pub struct SegmenterConfig {
	/// Fragments strictly larger than this count as large type.
	pub header_font_size: f32,
	pub min_section_chars: usize,
}
impl Default for SegmenterConfig {
	fn default() -> Self {
		Self { header_font_size: 12.0, min_section_chars: 80 }
	}
}

/// Segments one document, falling back to one section per page when no header is found.
pub fn segment_document(doc: &ParsedDocument, cfg: &SegmenterConfig) -> Vec<Section> {
	let mut sections = section::identify_sections(doc, cfg);

	if sections.is_empty() {
		tracing::debug!(
			document = %doc.document_name,
			pages = doc.pages.len(),
			"No headers found. Using one section per page."
		);

		sections = section::page_sections(doc);
	}

	merge_short_sections(sections, cfg.min_section_chars)
}

/// Segments every document in order and concatenates the results.
pub fn segment_documents(docs: &[ParsedDocument], cfg: &SegmenterConfig) -> Vec<Section> {
	docs.iter().flat_map(|doc| segment_document(doc, cfg)).collect()
}
