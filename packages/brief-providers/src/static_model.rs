//! Static token-embedding model: one learned vector per vocabulary entry.
//!
//! A text embedding is the mean of its token rows, L2-normalized. The model directory holds a
//! `tokenizer.json` and a `model.safetensors` with a 2-D F32 `embeddings` tensor.

use std::{
	fs,
	path::{Path, PathBuf},
};

use hf_hub::api::sync::ApiBuilder;
use safetensors::{Dtype, SafeTensors};
use tokenizers::Tokenizer;

use crate::{Error, Result};

const TOKENIZER_FILE: &str = "tokenizer.json";
const WEIGHTS_FILE: &str = "model.safetensors";
const EMBEDDINGS_TENSOR: &str = "embeddings";

pub struct StaticEmbedder {
	tokenizer: Tokenizer,
	table: EmbeddingTable,
}
impl StaticEmbedder {
	/// Loads from `model_dir/model_name` when present, else downloads `default_repo`.
	pub fn load(cfg: &brief_config::StaticModel) -> Result<Self> {
		let local_dir = cfg.model_dir.join(&cfg.model_name);

		if local_dir.is_dir() {
			tracing::info!(path = %local_dir.display(), "Loading embedding model from disk.");

			return Self::from_files(&local_dir.join(TOKENIZER_FILE), &local_dir.join(WEIGHTS_FILE));
		}

		tracing::info!(
			path = %local_dir.display(),
			repo = %cfg.default_repo,
			"Model directory not found. Fetching default embedding model."
		);

		let (tokenizer_path, weights_path) = fetch_from_hub(&cfg.default_repo)?;

		Self::from_files(&tokenizer_path, &weights_path)
	}

	pub fn from_files(tokenizer_path: &Path, weights_path: &Path) -> Result<Self> {
		let tokenizer = Tokenizer::from_file(tokenizer_path)
			.map_err(|err| Error::Tokenizer { message: err.to_string() })?;
		let buffer = fs::read(weights_path)?;
		let table = EmbeddingTable::from_safetensors(&buffer)?;

		Ok(Self { tokenizer, table })
	}

	pub fn dimensions(&self) -> usize {
		self.table.dim
	}

	pub fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
		texts
			.iter()
			.map(|text| {
				let encoding = self
					.tokenizer
					.encode(text.as_str(), false)
					.map_err(|err| Error::Tokenizer { message: err.to_string() })?;

				Ok(self.table.mean_pool(encoding.get_ids()))
			})
			.collect()
	}
}

fn fetch_from_hub(repo: &str) -> Result<(PathBuf, PathBuf)> {
	let api = ApiBuilder::new().build().map_err(|err| Error::HfHub { message: err.to_string() })?;
	let model = api.model(repo.to_string());
	let tokenizer_path =
		model.get(TOKENIZER_FILE).map_err(|err| Error::HfHub { message: err.to_string() })?;
	let weights_path =
		model.get(WEIGHTS_FILE).map_err(|err| Error::HfHub { message: err.to_string() })?;

	Ok((tokenizer_path, weights_path))
}

/// Row-major `[vocab, dim]` matrix.
#[derive(Debug)]
pub struct EmbeddingTable {
	values: Vec<f32>,
	vocab: usize,
	dim: usize,
}
impl EmbeddingTable {
	pub fn new(values: Vec<f32>, dim: usize) -> Result<Self> {
		if dim == 0 || values.len() % dim != 0 {
			return Err(Error::InvalidModel {
				message: format!(
					"Embedding table of {} values cannot be split into rows of {dim}.",
					values.len()
				),
			});
		}

		Ok(Self { vocab: values.len() / dim, values, dim })
	}

	pub fn from_safetensors(buffer: &[u8]) -> Result<Self> {
		let tensors = SafeTensors::deserialize(buffer)?;
		let view = tensors.tensor(EMBEDDINGS_TENSOR)?;

		if view.dtype() != Dtype::F32 {
			return Err(Error::InvalidModel {
				message: format!("Tensor {EMBEDDINGS_TENSOR} must be F32, found {:?}.", view.dtype()),
			});
		}

		let [_, dim] = view.shape() else {
			return Err(Error::InvalidModel {
				message: format!("Tensor {EMBEDDINGS_TENSOR} must be two-dimensional."),
			});
		};
		let values = view
			.data()
			.chunks_exact(4)
			.map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
			.collect();

		Self::new(values, *dim)
	}

	/// Mean of the rows for `ids`, L2-normalized. Out-of-range ids are skipped.
	pub fn mean_pool(&self, ids: &[u32]) -> Vec<f32> {
		let mut pooled = vec![0.0_f32; self.dim];
		let mut count = 0_usize;

		for &id in ids {
			let row = id as usize;

			if row >= self.vocab {
				continue;
			}

			let start = row * self.dim;

			for (acc, value) in pooled.iter_mut().zip(&self.values[start..start + self.dim]) {
				*acc += value;
			}

			count += 1;
		}

		if count == 0 {
			return pooled;
		}

		let norm = pooled.iter().map(|value| value * value).sum::<f32>().sqrt();

		if norm > f32::EPSILON {
			for value in &mut pooled {
				*value /= norm;
			}
		}

		pooled
	}
}
