//! Public types consumed and returned by readable extraction.

use serde::{Deserialize, Serialize};

/// Minimum number of characters a successful extraction must contain.
pub const MIN_CONTENT_LENGTH: usize = 100;

/// Characters the readability pass must gather before its result is trusted.
pub const DEFAULT_CHAR_THRESHOLD: usize = 500;

/// Title used when neither extraction path can derive one.
pub const UNTITLED: &str = "Untitled";

/// A rendered page handed over by whatever loaded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
	/// URL after redirects; base for relative links and images.
	pub final_url: String,
	/// Serialized DOM of the rendered page.
	pub html: String,
}

impl PageDocument {
	pub fn new(final_url: impl Into<String>, html: impl Into<String>) -> Self {
		Self {
			final_url: final_url.into(),
			html: html.into(),
		}
	}
}

/// Which extraction path produced the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
	/// Readability scoring followed by Markdown conversion.
	Readability,
	/// Chrome stripping and plain-text extraction of a content root.
	Fallback,
}

impl std::fmt::Display for ExtractionMethod {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ExtractionMethod::Readability => write!(f, "readability"),
			ExtractionMethod::Fallback => write!(f, "fallback"),
		}
	}
}

/// Metadata extracted from the source page.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub author: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub published: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub site: Option<String>,
}

/// Result of a successful extraction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
	/// Never empty; `"Untitled"` when nothing better is available.
	pub title: String,
	/// Cleaned Markdown (readability path) or plain text (fallback path).
	pub markdown: String,
	pub method: ExtractionMethod,
	/// Length of `markdown` in characters.
	pub length: usize,
	pub metadata: PageMetadata,
}

/// Tunables for [`crate::ContentExtractor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
	/// Quality gate applied to whichever path produced the content.
	pub min_content_length: usize,
	/// Confidence threshold of the readability pass.
	pub char_threshold: usize,
	/// Refuse documents with more elements than this.
	pub max_elements: Option<usize>,
}

impl Default for ExtractOptions {
	fn default() -> Self {
		Self {
			min_content_length: MIN_CONTENT_LENGTH,
			char_threshold: DEFAULT_CHAR_THRESHOLD,
			max_elements: None,
		}
	}
}
