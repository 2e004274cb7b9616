//! Test doubles for the digest pipeline: deterministic embedding providers and layout builders.

use std::{
	future,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};

use brief_domain::{BoundingBox, Page, ParsedDocument, Section, TextFragment};
use brief_service::{BoxFuture, EmbeddingProvider, Error, Result};

/// Returns the same vector for every text.
pub struct ConstantEmbedding {
	pub vector: Vec<f32>,
}
impl EmbeddingProvider for ConstantEmbedding {
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		let vectors = vec![self.vector.clone(); texts.len()];

		Box::pin(async move { Ok(vectors) })
	}
}

/// Hashes lower-cased words into `dim` buckets, so texts sharing words point the same way.
pub struct BagOfWordsEmbedding {
	pub dim: usize,
	pub calls: Arc<AtomicUsize>,
}
impl BagOfWordsEmbedding {
	pub fn new(dim: usize) -> Self {
		Self { dim: dim.max(1), calls: Arc::new(AtomicUsize::new(0)) }
	}

	pub fn count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	fn vector(&self, text: &str) -> Vec<f32> {
		let mut vector = vec![0.0; self.dim];

		for word in text.split(|ch: char| !ch.is_alphanumeric()).filter(|word| !word.is_empty()) {
			vector[fnv1a(&word.to_lowercase()) as usize % self.dim] += 1.0;
		}

		vector
	}
}
impl EmbeddingProvider for BagOfWordsEmbedding {
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		let vectors = texts.iter().map(|text| self.vector(text)).collect();

		Box::pin(async move { Ok(vectors) })
	}
}

pub struct FailingEmbedding;
impl EmbeddingProvider for FailingEmbedding {
	fn embed<'a>(&'a self, _: &'a [String]) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move {
			Err(Error::Provider { message: "Stub embedding provider is unavailable.".to_string() })
		})
	}
}

/// Never resolves; exercises the embedding timeout.
pub struct PendingEmbedding;
impl EmbeddingProvider for PendingEmbedding {
	fn embed<'a>(&'a self, _: &'a [String]) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(future::pending())
	}
}

fn fnv1a(text: &str) -> u64 {
	text.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
		(hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
	})
}

pub fn fragment(text: &str, font_size: f32, page_number: u32) -> TextFragment {
	TextFragment {
		text: text.to_string(),
		font_size,
		page_number,
		is_header_hint: font_size > 12.0,
		bbox: BoundingBox::default(),
	}
}

/// A page built from `(text, font_size)` pairs.
pub fn page(page_number: u32, fragments: &[(&str, f32)]) -> Page {
	Page {
		page_number,
		fragments: fragments
			.iter()
			.map(|(text, font_size)| fragment(text, *font_size, page_number))
			.collect(),
	}
}

pub fn document(name: &str, pages: Vec<Page>) -> ParsedDocument {
	ParsedDocument { document_name: name.to_string(), pages }
}

/// A section whose subsections are derived from `content` the way the segmenter does it.
pub fn section(document: &str, title: &str, page_number: u32, content: &str) -> Section {
	Section {
		document: document.to_string(),
		title: title.to_string(),
		page_number,
		content: content.to_string(),
		subsections: brief_segment::split_subsections(title, content, page_number),
	}
}
