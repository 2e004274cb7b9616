use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Contents of a collection's input file. Unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct CollectionInput {
	#[serde(default)]
	pub documents: Vec<DocumentRef>,
	#[serde(default)]
	pub persona: Persona,
	#[serde(default)]
	pub job_to_be_done: JobToBeDone,
}
impl CollectionInput {
	pub fn from_json(raw: &str) -> Result<Self> {
		serde_json::from_str(raw).map_err(|err| Error::InvalidInput { message: err.to_string() })
	}

	pub fn role(&self) -> &str {
		&self.persona.role
	}

	pub fn task(&self) -> &str {
		&self.job_to_be_done.task
	}

	pub fn filenames(&self) -> Vec<String> {
		self.documents.iter().map(|doc| doc.filename.clone()).collect()
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DocumentRef {
	pub filename: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Persona {
	#[serde(default)]
	pub role: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct JobToBeDone {
	#[serde(default)]
	pub task: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_input_with_extra_fields() {
		let input = CollectionInput::from_json(
			r#"{
				"challenge_info": { "challenge_id": "round_1b_002" },
				"documents": [
					{ "filename": "South of France - Cities.pdf", "title": "Cities" },
					{ "filename": "South of France - Cuisine.pdf" }
				],
				"persona": { "role": "Travel Planner" },
				"job_to_be_done": { "task": "Plan a trip of 4 days for a group of 10 college friends." }
			}"#,
		)
		.expect("Input must parse.");

		assert_eq!(input.role(), "Travel Planner");
		assert_eq!(input.filenames()[1], "South of France - Cuisine.pdf");
		assert_eq!(input.documents[0].title.as_deref(), Some("Cities"));
	}

	#[test]
	fn missing_sections_default_to_empty() {
		let input = CollectionInput::from_json("{}").expect("Input must parse.");

		assert!(input.documents.is_empty());
		assert_eq!(input.role(), "");
		assert_eq!(input.task(), "");
	}

	#[test]
	fn malformed_input_is_invalid() {
		assert!(matches!(
			CollectionInput::from_json(r#"{"documents": [{"title": "no filename"}]}"#),
			Err(Error::InvalidInput { .. })
		));
	}
}
