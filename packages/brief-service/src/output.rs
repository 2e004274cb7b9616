use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{input::CollectionInput, ranking::ScoredSection};

/// Number of sections and excerpts in every successful digest.
pub const DIGEST_SIZE: usize = 5;

const UNKNOWN_DOCUMENT: &str = "Unknown.pdf";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DigestOutput {
	pub metadata: Metadata,
	pub extracted_sections: Vec<ExtractedSection>,
	pub subsection_analysis: Vec<RefinedSubsection>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}
impl DigestOutput {
	/// Output for a run whose pipeline failed: metadata only, plus the error message.
	pub fn degraded(metadata: Metadata, error: String) -> Self {
		Self {
			metadata,
			extracted_sections: Vec::new(),
			subsection_analysis: Vec::new(),
			error: Some(error),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Metadata {
	pub input_documents: Vec<String>,
	pub persona: String,
	pub job_to_be_done: String,
	pub processing_timestamp: String,
}
impl Metadata {
	pub fn new(input: &CollectionInput) -> Self {
		Self {
			input_documents: input.filenames(),
			persona: input.role().to_string(),
			job_to_be_done: input.task().to_string(),
			processing_timestamp: timestamp_now(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ExtractedSection {
	pub document: String,
	pub section_title: String,
	pub importance_rank: usize,
	pub page_number: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RefinedSubsection {
	pub document: String,
	pub refined_text: String,
	pub page_number: u32,
}

/// RFC 3339 UTC timestamp of the current instant.
pub fn timestamp_now() -> String {
	let now = OffsetDateTime::now_utc();

	now.format(&Rfc3339).unwrap_or_else(|_| now.unix_timestamp().to_string())
}

/// Projects the selected sections and their excerpts, padding both lists to [`DIGEST_SIZE`].
///
/// `excerpts` is index-aligned with `selected`.
pub fn assemble(
	metadata: Metadata,
	selected: &[ScoredSection<'_>],
	excerpts: Vec<String>,
) -> DigestOutput {
	let mut extracted_sections = Vec::with_capacity(DIGEST_SIZE);
	let mut subsection_analysis = Vec::with_capacity(DIGEST_SIZE);

	for (idx, (item, refined_text)) in selected.iter().zip(excerpts).take(DIGEST_SIZE).enumerate() {
		extracted_sections.push(ExtractedSection {
			document: item.section.document.clone(),
			section_title: item.section.title.clone(),
			importance_rank: idx + 1,
			page_number: item.section.page_number,
		});
		subsection_analysis.push(RefinedSubsection {
			document: item.section.document.clone(),
			refined_text,
			page_number: item.section.page_number,
		});
	}

	let filler_document =
		metadata.input_documents.first().map(String::as_str).unwrap_or(UNKNOWN_DOCUMENT).to_string();

	for rank in extracted_sections.len() + 1..=DIGEST_SIZE {
		let section_title = format!("Additional Section {rank}");

		subsection_analysis.push(RefinedSubsection {
			document: filler_document.clone(),
			refined_text: format!("Additional relevant information for {section_title}"),
			page_number: 1,
		});
		extracted_sections.push(ExtractedSection {
			document: filler_document.clone(),
			section_title,
			importance_rank: rank,
			page_number: 1,
		});
	}

	DigestOutput { metadata, extracted_sections, subsection_analysis, error: None }
}
