//! Error types for readable extraction.

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Why an extraction produced no result.
#[derive(Debug, Error)]
pub enum ExtractError {
	/// Neither path found enough text. Callers may retry once the page has
	/// finished rendering.
	#[error("insufficient content: extracted {length} characters, need at least {threshold}")]
	InsufficientContent { length: usize, threshold: usize },

	#[error("parse error: {0}")]
	Parse(#[from] ParseError),
}

/// The document could not be turned into a usable DOM.
#[derive(Debug, Error)]
pub enum ParseError {
	#[error("invalid base URL {url:?}: {source}")]
	InvalidBaseUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	#[error("document has {found} elements, limit is {limit}")]
	TooManyElements { found: usize, limit: usize },
}

/// Stable tag for an [`ExtractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
	InsufficientContent,
	ParseError,
}

impl std::fmt::Display for FailureKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			FailureKind::InsufficientContent => write!(f, "insufficient-content"),
			FailureKind::ParseError => write!(f, "parse-error"),
		}
	}
}

impl ExtractError {
	pub fn kind(&self) -> FailureKind {
		match self {
			ExtractError::InsufficientContent { .. } => FailureKind::InsufficientContent,
			ExtractError::Parse(_) => FailureKind::ParseError,
		}
	}

	/// Only thin content is worth retrying; parse errors are final.
	pub fn is_recoverable(&self) -> bool {
		matches!(self, ExtractError::InsufficientContent { .. })
	}

	/// Measured content length, when the failure carries one.
	pub fn measured_length(&self) -> Option<usize> {
		match self {
			ExtractError::InsufficientContent { length, .. } => Some(*length),
			ExtractError::Parse(_) => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn insufficient_content_is_recoverable() {
		let err = ExtractError::InsufficientContent { length: 2, threshold: 100 };
		assert!(err.is_recoverable());
		assert_eq!(err.kind(), FailureKind::InsufficientContent);
		assert_eq!(err.measured_length(), Some(2));
		assert_eq!(err.to_string(), "insufficient content: extracted 2 characters, need at least 100");
	}

	#[test]
	fn parse_errors_are_fatal() {
		let err = ExtractError::from(ParseError::TooManyElements { found: 10, limit: 5 });
		assert!(!err.is_recoverable());
		assert_eq!(err.kind().to_string(), "parse-error");
		assert_eq!(err.measured_length(), None);
	}

	#[test]
	fn failure_kind_serializes_kebab_case() {
		assert_eq!(serde_json::to_string(&FailureKind::InsufficientContent).unwrap(), "\"insufficient-content\"");
	}
}
