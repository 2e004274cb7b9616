//! TF-IDF similarity over unigrams and bigrams, rebuilt from scratch for every scoring pass.

use std::{
	collections::{BTreeMap, BTreeSet},
	sync::OnceLock,
};

use regex::Regex;

use crate::{Error, Result};

type SparseVector = BTreeMap<String, f32>;

fn token_pattern() -> Option<&'static Regex> {
	static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

	PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").ok()).as_ref()
}

/// Lower-cased tokens of two or more word characters with stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
	let Some(pattern) = token_pattern() else { return Vec::new() };
	let lowered = text.to_lowercase();

	pattern
		.find_iter(&lowered)
		.map(|m| m.as_str())
		.filter(|token| !brief_domain::stopwords::is_stop_word(token))
		.map(str::to_string)
		.collect()
}

/// Unigram and adjacent-pair bigram counts.
fn term_counts(text: &str) -> BTreeMap<String, f32> {
	let tokens = tokenize(text);
	let mut counts = BTreeMap::new();

	for token in &tokens {
		*counts.entry(token.clone()).or_insert(0.0) += 1.0;
	}
	for pair in tokens.windows(2) {
		*counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0.0) += 1.0;
	}

	counts
}

/// Similarity of `query` to every text, in input order.
///
/// The corpus is the query plus all texts. Fails when no document contributes a single term.
pub fn tfidf_scores(query: &str, texts: &[String]) -> Result<Vec<f32>> {
	let counts: Vec<BTreeMap<String, f32>> = std::iter::once(query)
		.chain(texts.iter().map(String::as_str))
		.map(term_counts)
		.collect();
	let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();

	for doc in &counts {
		let terms: BTreeSet<&str> = doc.keys().map(String::as_str).collect();

		for term in terms {
			*document_frequency.entry(term).or_insert(0) += 1;
		}
	}

	if document_frequency.is_empty() {
		return Err(Error::Scoring {
			message: "Empty vocabulary; every document contains only stop words.".to_string(),
		});
	}

	let n = counts.len() as f32;
	let idf: BTreeMap<&str, f32> = document_frequency
		.iter()
		.map(|(term, df)| (*term, ((1.0 + n) / (1.0 + *df as f32)).ln() + 1.0))
		.collect();
	let vectors: Vec<SparseVector> = counts.iter().map(|doc| weigh(doc, &idf)).collect();
	let Some((query_vector, item_vectors)) = vectors.split_first() else {
		return Ok(Vec::new());
	};

	Ok(item_vectors.iter().map(|item| dot(query_vector, item)).collect())
}

fn weigh(counts: &BTreeMap<String, f32>, idf: &BTreeMap<&str, f32>) -> SparseVector {
	let mut vector: SparseVector = counts
		.iter()
		.map(|(term, count)| (term.clone(), count * idf.get(term.as_str()).copied().unwrap_or(0.0)))
		.collect();
	let norm = vector.values().map(|value| value * value).sum::<f32>().sqrt();

	if norm > f32::EPSILON {
		for value in vector.values_mut() {
			*value /= norm;
		}
	}

	vector
}

fn dot(lhs: &SparseVector, rhs: &SparseVector) -> f32 {
	lhs.iter().filter_map(|(term, value)| rhs.get(term).map(|other| value * other)).sum()
}
