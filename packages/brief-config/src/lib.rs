mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Embedding, HttpEmbedding, Ranking, RankingDiversity, RankingSubsection, Segmenter,
	Service, Source, StaticModel,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if !matches!(cfg.source.kind.as_str(), "pdf" | "fixture") {
		return Err(Error::Validation {
			message: "source.kind must be one of pdf or fixture.".to_string(),
		});
	}

	if let Some(max) = cfg.source.max_workers
		&& max == 0
	{
		return Err(Error::Validation {
			message: "source.max_workers must be greater than zero.".to_string(),
		});
	}

	if !cfg.segmenter.header_font_size.is_finite() || cfg.segmenter.header_font_size <= 0.0 {
		return Err(Error::Validation {
			message: "segmenter.header_font_size must be a finite number greater than zero."
				.to_string(),
		});
	}
	if !matches!(cfg.embedding.provider.as_str(), "static" | "http" | "off") {
		return Err(Error::Validation {
			message: "embedding.provider must be one of static, http, or off.".to_string(),
		});
	}
	if cfg.embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.embedding.provider == "static" && cfg.embedding.static_model.model_name.trim().is_empty()
	{
		return Err(Error::Validation {
			message: "embedding.static_model.model_name must be non-empty.".to_string(),
		});
	}
	if cfg.embedding.provider == "http" {
		for (label, value) in [
			("embedding.http.api_base", &cfg.embedding.http.api_base),
			("embedding.http.model", &cfg.embedding.http.model),
		] {
			if value.trim().is_empty() {
				return Err(Error::Validation {
					message: format!("{label} must be non-empty when embedding.provider is http."),
				});
			}
		}
	}

	for (label, weight) in [
		("ranking.lexical_weight", cfg.ranking.lexical_weight),
		("ranking.semantic_weight", cfg.ranking.semantic_weight),
		("ranking.diversity.penalty_step", cfg.ranking.diversity.penalty_step),
		("ranking.subsection.action_boost", cfg.ranking.subsection.action_boost),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if weight < 0.0 {
			return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
		}
	}

	if cfg.ranking.lexical_weight + cfg.ranking.semantic_weight <= 0.0 {
		return Err(Error::Validation {
			message: "ranking.lexical_weight and ranking.semantic_weight must not both be zero."
				.to_string(),
		});
	}
	if !cfg.ranking.relevance_threshold.is_finite() {
		return Err(Error::Validation {
			message: "ranking.relevance_threshold must be a finite number.".to_string(),
		});
	}
	if cfg.ranking.lead_chars == 0 {
		return Err(Error::Validation {
			message: "ranking.lead_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.ranking.subsection.candidates == 0 {
		return Err(Error::Validation {
			message: "ranking.subsection.candidates must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.embedding.http.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.embedding.http.api_key = None;
	}
	if cfg
		.source
		.pdfium_library_dir
		.as_deref()
		.and_then(|dir| dir.to_str())
		.map(|dir| dir.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.source.pdfium_library_dir = None;
	}

	cfg.source.kind = cfg.source.kind.trim().to_ascii_lowercase();
	cfg.embedding.provider = cfg.embedding.provider.trim().to_ascii_lowercase();
}
