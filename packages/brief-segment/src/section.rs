use brief_domain::{Page, ParsedDocument, Section};

use crate::{SegmenterConfig, header, subsection};

struct OpenSection {
	title: String,
	page_number: u32,
	parts: Vec<String>,
}
impl OpenSection {
	fn new(title: &str, page_number: u32) -> Self {
		Self { title: title.trim().to_string(), page_number, parts: Vec::new() }
	}

	fn finish(self, document: &str) -> Section {
		let content = self.parts.join("\n");
		let subsections = subsection::split_subsections(&self.title, &content, self.page_number);

		Section {
			document: document.to_string(),
			title: self.title,
			page_number: self.page_number,
			content,
			subsections,
		}
	}
}

/// Walks every page's fragments and emits header-delimited sections.
pub fn identify_sections(doc: &ParsedDocument, cfg: &SegmenterConfig) -> Vec<Section> {
	let mut closed: Vec<OpenSection> = Vec::new();
	let mut open: Option<OpenSection> = None;

	for page in &doc.pages {
		let has_header =
			page.fragments.iter().any(|fragment| header::is_header(fragment, cfg.header_font_size));

		if has_header {
			for fragment in &page.fragments {
				if header::is_header(fragment, cfg.header_font_size) {
					close(&mut closed, open.take());

					open = Some(OpenSection::new(&fragment.text, page.page_number));
				} else if let Some(current) = open.as_mut() {
					current.parts.push(fragment.text.clone());
				}
			}

			continue;
		}

		let Some(title_idx) = header::forced_title_index(&page.fragments) else { continue };

		close(&mut closed, open.take());

		let mut forced = OpenSection::new(&page.fragments[title_idx].text, page.page_number);

		forced.parts = page
			.fragments
			.iter()
			.enumerate()
			.filter(|(idx, _)| *idx != title_idx)
			.map(|(_, fragment)| fragment.text.clone())
			.collect();
		open = Some(forced);
	}

	close(&mut closed, open.take());

	closed.into_iter().map(|section| section.finish(&doc.document_name)).collect()
}

fn close(closed: &mut Vec<OpenSection>, section: Option<OpenSection>) {
	if let Some(section) = section
		&& !section.parts.is_empty()
	{
		closed.push(section);
	}
}

/// One `Page <n>` section per page that carries any text.
pub fn page_sections(doc: &ParsedDocument) -> Vec<Section> {
	doc.pages.iter().filter_map(|page| page_section(&doc.document_name, page)).collect()
}

fn page_section(document: &str, page: &Page) -> Option<Section> {
	let content = page
		.fragments
		.iter()
		.map(|fragment| fragment.text.as_str())
		.filter(|text| !text.trim().is_empty())
		.collect::<Vec<_>>()
		.join("\n");

	if content.trim().is_empty() {
		return None;
	}

	let title = format!("Page {}", page.page_number);
	let subsections = subsection::split_subsections(&title, &content, page.page_number);

	Some(Section {
		document: document.to_string(),
		title,
		page_number: page.page_number,
		content,
		subsections,
	})
}

/// Folds every section shorter than `min_chars` into the section kept before it.
///
/// The first section is never merged backward. Running the pass on its own output is a no-op.
pub fn merge_short_sections(sections: Vec<Section>, min_chars: usize) -> Vec<Section> {
	let mut merged: Vec<Section> = Vec::with_capacity(sections.len());

	for section in sections {
		let is_short = brief_domain::text::char_len(&section.content) < min_chars;

		match merged.last_mut() {
			Some(previous) if is_short => {
				tracing::debug!(
					document = %section.document,
					title = %section.title,
					into = %previous.title,
					"Merging short section into its predecessor."
				);

				previous.content.push('\n');
				previous.content.push_str(&section.content);
				previous.subsections = subsection::split_subsections(
					&previous.title,
					&previous.content,
					previous.page_number,
				);
			},
			_ => merged.push(section),
		}
	}

	merged
}
