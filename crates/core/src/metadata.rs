//! Page metadata and title derivation.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::text::collapse_whitespace;
use crate::types::PageMetadata;

static META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("meta").expect("META_SELECTOR should parse"));
static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").expect("TITLE_SELECTOR should parse"));
static H1_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("H1_SELECTOR should parse"));

/// Separators between an article title and the site name.
const TITLE_SEPARATORS: &[&str] = &[" | ", " - ", " – ", " — ", " :: ", " / ", " » "];

/// Shortest title, in words, that survives separator stripping.
const MIN_TITLE_WORDS: usize = 3;

pub(crate) fn extract_metadata(document: &Html, base: Option<&Url>) -> PageMetadata {
	let site = meta_content(document, &["og:site_name", "twitter:site", "application-name"]).or_else(|| base.and_then(site_from_url));
	let image = meta_content(document, &["og:image", "twitter:image"]).map(|src| match base.and_then(|base| base.join(&src).ok()) {
		Some(url) => url.to_string(),
		None => src,
	});

	PageMetadata {
		author: meta_content(document, &["author", "article:author", "twitter:creator"]),
		published: meta_content(document, &["article:published_time", "datePublished", "date"]),
		description: meta_content(document, &["og:description", "description", "twitter:description"]),
		image,
		site,
	}
}

/// First non-empty `content` among `<meta>` tags named by `keys`, in key order.
fn meta_content(document: &Html, keys: &[&str]) -> Option<String> {
	let metas: Vec<ElementRef<'_>> = document.root_element().select(&META_SELECTOR).collect();
	keys.iter().find_map(|key| {
		metas.iter().find_map(|meta| {
			let value = meta.value();
			let named = ["property", "name", "itemprop"]
				.iter()
				.filter_map(|attr| value.attr(attr))
				.any(|name| name.trim().eq_ignore_ascii_case(key));
			if !named {
				return None;
			}
			value.attr("content").map(collapse_whitespace).filter(|content| !content.is_empty())
		})
	})
}

/// Trimmed `<title>` text, if present and non-empty.
pub(crate) fn document_title(document: &Html) -> Option<String> {
	let title = document.root_element().select(&TITLE_SELECTOR).next()?;
	let text = collapse_whitespace(&title.text().collect::<String>());
	(!text.is_empty()).then_some(text)
}

/// Best title for an article: social tags, then the cleaned `<title>`, then a lone `<h1>`.
pub(crate) fn article_title(document: &Html) -> Option<String> {
	meta_content(document, &["og:title", "twitter:title"])
		.or_else(|| document_title(document).map(|title| strip_site_suffix(&title)))
		.or_else(|| sole_heading(document))
}

fn sole_heading(document: &Html) -> Option<String> {
	let mut headings = document.root_element().select(&H1_SELECTOR);
	let first = headings.next()?;
	if headings.next().is_some() {
		return None;
	}
	let text = collapse_whitespace(&first.text().collect::<String>());
	(!text.is_empty()).then_some(text)
}

/// Drop a trailing site name such as `"Story | Example News"`.
///
/// The title is kept whole when the remainder would be too short to stand
/// on its own.
pub(crate) fn strip_site_suffix(title: &str) -> String {
	let cut = TITLE_SEPARATORS.iter().filter_map(|sep| title.rfind(sep)).max();
	let Some(cut) = cut else {
		return title.to_string();
	};

	let head = title[..cut].trim();
	if head.split_whitespace().count() < MIN_TITLE_WORDS {
		return title.to_string();
	}
	head.to_string()
}

/// Host of `url` without a leading `www.`.
pub(crate) fn site_from_url(url: &Url) -> Option<String> {
	let host = url.host_str()?;
	Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}
