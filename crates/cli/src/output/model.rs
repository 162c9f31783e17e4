use pw_extract::{ExtractionMethod, ExtractionResult, PageMetadata};
use serde::Serialize;

/// The result envelope printed in JSON mode.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duration_ms: Option<u64>,
}

/// Error information for failed commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
}

/// Standardized error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	InsufficientContent,
	ParseError,
	NavigationFailed,
	IoError,
	InvalidInput,
	InternalError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorCode::InsufficientContent => write!(f, "INSUFFICIENT_CONTENT"),
			ErrorCode::ParseError => write!(f, "PARSE_ERROR"),
			ErrorCode::NavigationFailed => write!(f, "NAVIGATION_FAILED"),
			ErrorCode::IoError => write!(f, "IO_ERROR"),
			ErrorCode::InvalidInput => write!(f, "INVALID_INPUT"),
			ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
		}
	}
}

/// Payload of a successful `read`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadData {
	/// URL the page was served from, after redirects.
	pub url: String,
	pub title: String,
	pub method: ExtractionMethod,
	pub length: usize,
	pub markdown: String,
	pub metadata: PageMetadata,
}

impl ReadData {
	pub fn new(url: impl Into<String>, result: ExtractionResult) -> Self {
		Self {
			url: url.into(),
			title: result.title,
			method: result.method,
			length: result.length,
			markdown: result.markdown,
			metadata: result.metadata,
		}
	}
}

/// Payload of `clean`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanData {
	pub text: String,
	pub length: usize,
}
