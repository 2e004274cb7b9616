use std::path::Path;

use brief_domain::ParsedDocument;

use crate::{PageBlockSource, Result, fixture::FixtureSource};

/// Wraps a primary source and substitutes the fixture document for missing or unreadable files.
///
/// `load` on this source never fails.
pub struct ResilientSource<S> {
	primary: S,
}
impl<S> ResilientSource<S>
where
	S: PageBlockSource,
{
	pub fn new(primary: S) -> Self {
		Self { primary }
	}
}
impl<S> PageBlockSource for ResilientSource<S>
where
	S: PageBlockSource,
{
	fn load(&self, path: &Path) -> Result<ParsedDocument> {
		let name = crate::document_name(path);

		if !path.is_file() {
			tracing::warn!(path = %path.display(), "Document not found. Using fixture document.");

			return Ok(FixtureSource::document(&name));
		}

		match self.primary.load(path) {
			Ok(doc) => Ok(doc),
			Err(err) => {
				tracing::warn!(
					document = %name,
					error = %err,
					"Failed to parse document. Using fixture document."
				);

				Ok(FixtureSource::document(&name))
			},
		}
	}
}
