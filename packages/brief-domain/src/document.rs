/// Axis-aligned rectangle in page space: left, top, right, bottom.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
	pub x0: f32,
	pub y0: f32,
	pub x1: f32,
	pub y1: f32,
}
impl BoundingBox {
	pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
		Self { x0, y0, x1, y1 }
	}

	pub fn union(&self, other: &Self) -> Self {
		Self {
			x0: self.x0.min(other.x0),
			y0: self.y0.min(other.y0),
			x1: self.x1.max(other.x1),
			y1: self.y1.max(other.y1),
		}
	}
}

/// A positioned run of text as produced by a page block source.
#[derive(Clone, Debug, PartialEq)]
pub struct TextFragment {
	pub text: String,
	pub font_size: f32,
	pub page_number: u32,
	pub is_header_hint: bool,
	pub bbox: BoundingBox,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
	pub page_number: u32,
	pub fragments: Vec<TextFragment>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedDocument {
	pub document_name: String,
	pub pages: Vec<Page>,
}
impl ParsedDocument {
	pub fn fragment_count(&self) -> usize {
		self.pages.iter().map(|page| page.fragments.len()).sum()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
	pub document: String,
	pub title: String,
	pub page_number: u32,
	pub content: String,
	pub subsections: Vec<Subsection>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Subsection {
	pub id: String,
	pub text: String,
	pub page_number: u32,
}
impl Subsection {
	/// Builds the subsection at 1-based `position` under `section_title`.
	pub fn new(section_title: &str, position: usize, text: String, page_number: u32) -> Self {
		Self { id: format!("{section_title}_sub_{position}"), text, page_number }
	}
}
