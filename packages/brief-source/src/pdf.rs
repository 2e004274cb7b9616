//! PDF fragment extraction backed by the pdfium library.

use std::{
	path::{Path, PathBuf},
	sync::Mutex,
};

use brief_domain::{Page, ParsedDocument};
use pdfium_render::prelude::*;

use crate::{
	Error, PageBlockSource, Result,
	layout::{self, PositionedChar},
};

/// Binds pdfium per document. At most one binding is alive at a time across all workers.
pub struct PdfiumSource {
	library_dir: Option<PathBuf>,
	header_font_size: f32,
	binding: Mutex<()>,
}
impl PdfiumSource {
	/// Checks that pdfium binds from `library_dir`, or from the system library when `None`.
	pub fn new(library_dir: Option<&Path>, header_font_size: f32) -> Result<Self> {
		let source = Self {
			library_dir: library_dir.map(Path::to_path_buf),
			header_font_size,
			binding: Mutex::new(()),
		};

		drop(source.bind()?);

		Ok(source)
	}

	fn bind(&self) -> Result<Pdfium> {
		let bindings = match &self.library_dir {
			Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
			None => Pdfium::bind_to_system_library(),
		}
		.map_err(pdf_error)?;

		Ok(Pdfium::new(bindings))
	}
}
impl PageBlockSource for PdfiumSource {
	fn load(&self, path: &Path) -> Result<ParsedDocument> {
		let _guard = self
			.binding
			.lock()
			.map_err(|_| Error::Pdf { message: "Pdfium binding lock is poisoned.".to_string() })?;
		let pdfium = self.bind()?;
		let document = pdfium.load_pdf_from_file(path, None).map_err(pdf_error)?;
		let mut pages = Vec::new();

		for (idx, page) in document.pages().iter().enumerate() {
			let page_number = idx as u32 + 1;
			let chars = page_chars(&page)?;
			let fragments = layout::page_fragments(
				&chars,
				page_number,
				page.height().value,
				self.header_font_size,
			);

			pages.push(Page { page_number, fragments });
		}

		let parsed = ParsedDocument { document_name: crate::document_name(path), pages };

		tracing::debug!(
			document = %parsed.document_name,
			pages = parsed.pages.len(),
			fragments = parsed.fragment_count(),
			"Parsed PDF document."
		);

		Ok(parsed)
	}
}

#[allow(deprecated)]
fn page_chars(page: &PdfPage<'_>) -> Result<Vec<PositionedChar>> {
	let text = page.text().map_err(pdf_error)?;
	let mut chars = Vec::new();

	for ch in text.chars().iter() {
		let (Some(unicode), Ok(rect)) = (ch.unicode_char(), ch.tight_bounds()) else { continue };

		chars.push(PositionedChar {
			ch: unicode,
			left: rect.left.value,
			bottom: rect.bottom.value,
			right: rect.right.value,
			top: rect.top.value,
			font_size: ch.scaled_font_size().value,
		});
	}

	Ok(chars)
}

fn pdf_error(err: PdfiumError) -> Error {
	Error::Pdf { message: err.to_string() }
}
