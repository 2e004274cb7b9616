pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid input: {message}")]
	InvalidInput { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Scoring error: {message}")]
	Scoring { message: String },
	#[error("Embedding call timed out after {millis} ms.")]
	Timeout { millis: u64 },
}
impl From<brief_providers::Error> for Error {
	fn from(err: brief_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}
