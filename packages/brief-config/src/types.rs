use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub service: Service,
	pub source: Source,
	pub segmenter: Segmenter,
	pub embedding: Embedding,
	pub ranking: Ranking,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Service {
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: "info".to_string() }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Source {
	/// One of "pdf" or "fixture".
	pub kind: String,
	/// Directory holding the pdfium shared library. The system library is used when unset.
	pub pdfium_library_dir: Option<PathBuf>,
	/// Upper bound on documents parsed concurrently. Defaults to available parallelism.
	pub max_workers: Option<usize>,
}
impl Default for Source {
	fn default() -> Self {
		Self { kind: "pdf".to_string(), pdfium_library_dir: None, max_workers: None }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Segmenter {
	/// Fragments strictly above this size count as large type for header detection.
	pub header_font_size: f32,
	/// Sections with fewer content characters are folded into their predecessor.
	pub min_section_chars: usize,
}
impl Default for Segmenter {
	fn default() -> Self {
		Self { header_font_size: 12.0, min_section_chars: 80 }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Embedding {
	/// One of "static", "http", or "off".
	pub provider: String,
	pub timeout_ms: u64,
	pub static_model: StaticModel,
	pub http: HttpEmbedding,
}
impl Default for Embedding {
	fn default() -> Self {
		Self {
			provider: "static".to_string(),
			timeout_ms: 30_000,
			static_model: StaticModel::default(),
			http: HttpEmbedding::default(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StaticModel {
	pub model_dir: PathBuf,
	pub model_name: String,
	/// Hub repository used when `model_dir/model_name` does not exist.
	pub default_repo: String,
}
impl Default for StaticModel {
	fn default() -> Self {
		Self {
			model_dir: PathBuf::from("models"),
			model_name: "potion-base-8M".to_string(),
			default_repo: "minishlab/potion-base-8M".to_string(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HttpEmbedding {
	pub api_base: String,
	pub path: String,
	pub api_key: Option<String>,
	pub model: String,
	pub dimensions: Option<u32>,
	pub default_headers: Map<String, Value>,
}
impl Default for HttpEmbedding {
	fn default() -> Self {
		Self {
			api_base: String::new(),
			path: "/v1/embeddings".to_string(),
			api_key: None,
			model: String::new(),
			dimensions: None,
			default_headers: Map::new(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Ranking {
	pub lexical_weight: f32,
	pub semantic_weight: f32,
	/// Adjusted scores strictly above this value count as relevant.
	pub relevance_threshold: f32,
	/// Number of leading content characters used for scoring text and keyword tests.
	pub lead_chars: usize,
	pub diversity: RankingDiversity,
	pub subsection: RankingSubsection,
}
impl Default for Ranking {
	fn default() -> Self {
		Self {
			lexical_weight: 0.7,
			semantic_weight: 0.3,
			relevance_threshold: 0.5,
			lead_chars: 500,
			diversity: RankingDiversity::default(),
			subsection: RankingSubsection::default(),
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RankingDiversity {
	/// Sections per document that are never penalized.
	pub free_per_document: usize,
	/// Penalty added for each occurrence beyond the free allowance.
	pub penalty_step: f32,
}
impl Default for RankingDiversity {
	fn default() -> Self {
		Self { free_per_document: 2, penalty_step: 0.10 }
	}
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RankingSubsection {
	pub action_boost: f32,
	pub candidates: usize,
	/// Excerpts must be strictly longer than this many characters.
	pub min_chars: usize,
}
impl Default for RankingSubsection {
	fn default() -> Self {
		Self { action_boost: 0.10, candidates: 3, min_chars: 100 }
	}
}
