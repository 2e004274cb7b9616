pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("PDF error: {message}")]
	Pdf { message: String },
	#[error(transparent)]
	Io(#[from] std::io::Error),
	#[error("Parse task failed: {message}")]
	Join { message: String },
}
