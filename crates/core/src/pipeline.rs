//! Orchestration of the readability and fallback paths.

use scraper::Html;
use tracing::debug;
use url::Url;

use crate::cleaner::fallback_text;
use crate::error::{ExtractError, ParseError, Result};
use crate::metadata::{article_title, document_title, extract_metadata};
use crate::readability::grab_article;
use crate::render_markdown::render_markdown;
use crate::text::clean_text;
use crate::types::{ExtractOptions, ExtractionMethod, ExtractionResult, PageDocument, UNTITLED};

/// Turns rendered pages into a title and a clean Markdown body.
///
/// A readability pass runs first; when it is not confident the extractor
/// strips page chrome and takes the plain text of the main content root.
/// Whichever path produced the content, it must reach
/// [`ExtractOptions::min_content_length`] characters.
#[derive(Debug, Clone, Default)]
pub struct ContentExtractor {
	options: ExtractOptions,
}

impl ContentExtractor {
	pub fn new(options: ExtractOptions) -> Self {
		Self { options }
	}

	pub fn options(&self) -> &ExtractOptions {
		&self.options
	}

	pub fn extract(&self, page: &PageDocument) -> Result<ExtractionResult> {
		let base = Url::parse(&page.final_url).map_err(|source| ParseError::InvalidBaseUrl {
			url: page.final_url.clone(),
			source,
		})?;

		let mut document = Html::parse_document(&page.html);
		if let Some(limit) = self.options.max_elements {
			let found = document.root_element().descendants().filter(|node| node.value().is_element()).count();
			if found > limit {
				return Err(ParseError::TooManyElements { found, limit }.into());
			}
		}

		let metadata = extract_metadata(&document, Some(&base));

		let primary = grab_article(&page.html, base.as_str(), &self.options).map(|article| {
			debug!(target = "pw.extract", url = %page.final_url, text_length = article.text_length, "readability article accepted");
			let markdown = clean_text(&render_markdown(&[article.content.root_element()], Some(&base)));
			(article_title(&document).or(article.title), markdown)
		});

		let (title, markdown, method) = match primary {
			Some((title, markdown)) => (title.or_else(|| document_title(&document)), markdown, ExtractionMethod::Readability),
			None => {
				debug!(target = "pw.extract", url = %page.final_url, "readability not confident, using fallback");
				let markdown = fallback_text(&mut document);
				(document_title(&document), markdown, ExtractionMethod::Fallback)
			}
		};
		let title = title.unwrap_or_else(|| UNTITLED.to_string());

		let length = markdown.chars().count();
		let threshold = self.options.min_content_length;
		if length < threshold {
			debug!(target = "pw.extract", url = %page.final_url, %method, length, threshold, "content below quality gate");
			return Err(ExtractError::InsufficientContent { length, threshold });
		}

		debug!(target = "pw.extract", url = %page.final_url, %method, length, "extraction finished");
		Ok(ExtractionResult {
			title,
			markdown,
			method,
			length,
			metadata,
		})
	}
}

/// Extract with [`ExtractOptions::default`].
pub fn extract(page: &PageDocument) -> Result<ExtractionResult> {
	ContentExtractor::default().extract(page)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::FailureKind;

	fn filler(len: usize) -> String {
		"lorem ipsum ".repeat(len / 12 + 1).chars().take(len).collect()
	}

	#[test]
	fn extractor_is_shareable_across_threads() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<ContentExtractor>();
	}

	#[test]
	fn short_fallback_content_is_rejected() {
		let page = PageDocument::new("https://x.test/", "<body>Hi</body>");
		let err = extract(&page).unwrap_err();
		assert_eq!(err.kind(), FailureKind::InsufficientContent);
		assert_eq!(err.measured_length(), Some(2));
	}

	#[test]
	fn min_content_length_is_configurable() {
		let page = PageDocument::new("https://x.test/", "<body><p>Hi there</p></body>");
		let extractor = ContentExtractor::new(ExtractOptions {
			min_content_length: 5,
			..ExtractOptions::default()
		});
		let result = extractor.extract(&page).unwrap();
		assert_eq!(result.markdown, "Hi there");
		assert_eq!(result.title, UNTITLED);
		assert_eq!(result.method, ExtractionMethod::Fallback);
	}

	#[test]
	fn lowering_char_threshold_enables_readability() {
		let html = format!("<html><head><title>Short Read</title></head><body><article><p>{}, with commas, and more.</p></article></body></html>", filler(150));
		let page = PageDocument::new("https://x.test/a", html);

		let fallback = extract(&page).unwrap();
		assert_eq!(fallback.method, ExtractionMethod::Fallback);

		let extractor = ContentExtractor::new(ExtractOptions {
			char_threshold: 100,
			..ExtractOptions::default()
		});
		let primary = extractor.extract(&page).unwrap();
		assert_eq!(primary.method, ExtractionMethod::Readability);
		assert_eq!(primary.title, "Short Read");
	}

	#[test]
	fn form_wrapped_pages_still_use_readability() {
		let paragraphs: String = (0..4).map(|i| format!("<p>Paragraph {i}: {}, with commas, and more.</p>", filler(200))).collect();
		let html = format!("<html><body><form id='aspnetForm' method='post'><div class='post'>{paragraphs}</div></form></body></html>");
		let result = extract(&PageDocument::new("https://x.test/webforms", html)).unwrap();
		assert_eq!(result.method, ExtractionMethod::Readability);
		assert!(result.markdown.contains("Paragraph 3"));
	}

	#[test]
	fn element_limit_is_a_parse_error() {
		let page = PageDocument::new("https://x.test/", "<body><p>a</p><p>b</p><p>c</p></body>");
		let extractor = ContentExtractor::new(ExtractOptions {
			max_elements: Some(3),
			..ExtractOptions::default()
		});
		let err = extractor.extract(&page).unwrap_err();
		assert!(matches!(err, ExtractError::Parse(ParseError::TooManyElements { limit: 3, .. })));
		assert!(!err.is_recoverable());
	}
}
