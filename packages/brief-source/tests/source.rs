use std::{
	path::{Path, PathBuf},
	sync::Arc,
};

use brief_domain::{Page, ParsedDocument};
use brief_source::{
	Error, FixtureSource, PageBlockSource, ResilientSource, Result, load_documents, worker_count,
};

struct FailingSource;
impl PageBlockSource for FailingSource {
	fn load(&self, _: &Path) -> Result<ParsedDocument> {
		Err(Error::Pdf { message: "corrupt cross-reference table".to_string() })
	}
}

struct NamedSource;
impl PageBlockSource for NamedSource {
	fn load(&self, path: &Path) -> Result<ParsedDocument> {
		Ok(ParsedDocument {
			document_name: path.display().to_string(),
			pages: vec![Page { page_number: 1, fragments: Vec::new() }],
		})
	}
}

#[test]
fn fixture_document_has_five_themed_pages() {
	let doc = FixtureSource
		.load(Path::new("collection/PDFs/Learn Acrobat - Fill and Sign.pdf"))
		.expect("Fixture load must succeed.");

	assert_eq!(doc.document_name, "Learn Acrobat - Fill and Sign.pdf");
	assert_eq!(doc.pages.len(), 5);
	assert_eq!(doc.fragment_count(), 15);

	let first = &doc.pages[0];

	assert_eq!(first.page_number, 1);
	assert_eq!(first.fragments[0].text, "Creating Fillable Forms");
	assert_eq!(first.fragments[0].font_size, 16.0);
	assert!(first.fragments[0].is_header_hint);
	assert_eq!(
		first.fragments[1].text,
		"This is detailed sample content for the section on 'Creating Fillable Forms'. It simulates a paragraph discussing relevant points."
	);
	assert_eq!(first.fragments[2].bbox.y0, 150.0);
	assert!(doc.pages[4].fragments.iter().all(|fragment| fragment.page_number == 5));
}

#[test]
fn resilient_source_replaces_missing_files() {
	let source = ResilientSource::new(NamedSource);
	let doc = source
		.load(Path::new("/definitely/not/here/Vegetarian_Recipes.pdf"))
		.expect("Resilient load must succeed.");

	assert_eq!(doc, FixtureSource::document("Vegetarian_Recipes.pdf"));
}

#[test]
fn resilient_source_replaces_parse_failures() {
	let path = std::env::temp_dir().join(format!("brief_source_{}.pdf", std::process::id()));

	std::fs::write(&path, b"not a pdf").expect("Failed to write temp document.");

	let doc = ResilientSource::new(FailingSource).load(&path).expect("Resilient load must succeed.");
	let expected = FixtureSource::document(
		&path.file_name().expect("Temp path has a file name.").to_string_lossy(),
	);

	std::fs::remove_file(&path).expect("Failed to remove temp document.");

	assert_eq!(doc, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn documents_load_in_input_order() {
	let paths: Vec<PathBuf> = (0..7).map(|idx| PathBuf::from(format!("doc_{idx}.pdf"))).collect();

	for max_workers in [1, 3] {
		let docs = load_documents(Arc::new(NamedSource), &paths, max_workers)
			.await
			.expect("Loading must succeed.");
		let names: Vec<&str> = docs.iter().map(|doc| doc.document_name.as_str()).collect();
		let expected: Vec<String> = paths.iter().map(|path| path.display().to_string()).collect();

		assert_eq!(names, expected);
	}
}

#[tokio::test]
async fn load_errors_propagate_from_plain_sources() {
	let result =
		load_documents(Arc::new(FailingSource), &[PathBuf::from("broken.pdf")], 2).await;

	assert!(matches!(result, Err(Error::Pdf { .. })));
}

#[test]
fn worker_count_is_bounded_by_documents() {
	assert_eq!(worker_count(Some(8), 3), 3);
	assert_eq!(worker_count(Some(2), 10), 2);
	assert_eq!(worker_count(Some(4), 0), 1);
	assert!(worker_count(None, 64) >= 1);
}
