//! Readability pass built on `dom_smoothie`.
//!
//! The library scores candidate containers, strips unlikely nodes and
//! retries with relaxed flags when the first attempt comes up short. Its
//! article is only trusted once the visible text reaches `char_threshold`
//! characters.

use dom_smoothie::{Config, Readability};
use scraper::Html;
use tracing::debug;

use crate::dom::text_length;
use crate::types::ExtractOptions;

/// Cleaned article markup returned by the readability pass.
#[derive(Debug)]
pub(crate) struct Article {
	/// Title the library derived, if any.
	pub(crate) title: Option<String>,
	pub(crate) content: Html,
	pub(crate) text_length: usize,
}

/// Run the readability pass. `None` means it was not confident.
pub(crate) fn grab_article(html: &str, url: &str, options: &ExtractOptions) -> Option<Article> {
	let config = Config {
		char_threshold: options.char_threshold,
		max_elements_to_parse: options.max_elements.unwrap_or(0),
		keep_classes: true,
		..Config::default()
	};

	let mut readability = match Readability::new(html, Some(url), Some(config)) {
		Ok(readability) => readability,
		Err(err) => {
			debug!(target = "pw.extract", %url, error = %err, "readability could not load document");
			return None;
		}
	};
	let article = match readability.parse() {
		Ok(article) => article,
		Err(err) => {
			debug!(target = "pw.extract", %url, error = %err, "readability found no article");
			return None;
		}
	};

	let content = Html::parse_fragment(&article.content);
	let text_length = text_length(&content.root_element());
	debug!(target = "pw.extract", %url, text_length, char_threshold = options.char_threshold, "readability candidate");
	if text_length < options.char_threshold {
		return None;
	}

	let title = Some(article.title.trim().to_string()).filter(|title| !title.is_empty());
	Some(Article { title, content, text_length })
}

#[cfg(test)]
mod tests {
	use super::*;

	fn long_paragraph(topic: &str) -> String {
		format!(
			"<p>The {topic} section explains, in some detail, how the system behaves under load, why it was built this way, and what trade-offs were accepted along the way.</p>"
		)
	}

	fn article_html(paragraphs: usize) -> String {
		let body: String = (0..paragraphs).map(|i| long_paragraph(&format!("topic {i}"))).collect();
		format!(
			"<html><body><div class='post-body'>{body}</div><div class='comments'><p>Great post, thanks for sharing, really enjoyed reading it, will come back for more!</p></div></body></html>"
		)
	}

	fn options(char_threshold: usize) -> ExtractOptions {
		ExtractOptions {
			char_threshold,
			..ExtractOptions::default()
		}
	}

	fn text(article: &Article) -> String {
		article.content.root_element().text().collect()
	}

	#[test]
	fn finds_the_article_body() {
		let article = grab_article(&article_html(5), "https://x.test/post", &options(500)).expect("article should be found");
		assert!(article.text_length >= 500);
		assert!(text(&article).contains("topic 0"));
		assert!(text(&article).contains("topic 4"));
	}

	#[test]
	fn strips_comment_sections() {
		let article = grab_article(&article_html(5), "https://x.test/post", &options(500)).expect("article should be found");
		assert!(!text(&article).contains("Great post"));
	}

	#[test]
	fn returns_none_below_threshold() {
		assert!(grab_article(&article_html(1), "https://x.test/post", &options(500)).is_none());
	}

	#[test]
	fn returns_none_for_empty_pages() {
		assert!(grab_article("<html><body><span>tiny</span></body></html>", "https://x.test/", &options(500)).is_none());
	}
}
