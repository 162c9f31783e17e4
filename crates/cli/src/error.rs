use pw_extract::{ExtractError, FailureKind};
use thiserror::Error;

use crate::output::ErrorCode;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Extract(#[from] ExtractError),

	#[error("failed to fetch {url}: {source}")]
	Fetch {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("{url} returned HTTP {status}")]
	HttpStatus { url: String, status: u16 },

	#[error("failed to build HTTP client: {0}")]
	Client(#[source] reqwest::Error),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("invalid input: {0}")]
	InvalidInput(String),
}

impl CliError {
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Extract(err) => match err.kind() {
				FailureKind::InsufficientContent => ErrorCode::InsufficientContent,
				FailureKind::ParseError => ErrorCode::ParseError,
			},
			CliError::Fetch { .. } | CliError::HttpStatus { .. } => ErrorCode::NavigationFailed,
			CliError::Io(_) => ErrorCode::IoError,
			CliError::InvalidInput(_) => ErrorCode::InvalidInput,
			CliError::Client(_) | CliError::Json(_) => ErrorCode::InternalError,
		}
	}
}
