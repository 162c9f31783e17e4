//! Small DOM queries shared by the extraction stages.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

use crate::config::{clutter, maybe_regex, unlikely_regex};
use crate::text::push_inline_text;

static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").expect("BODY_SELECTOR should parse"));

/// Elements whose text never counts as content.
pub(crate) const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Page chrome that never belongs in an article body.
pub(crate) const CHROME_TAGS: &[&str] = &["nav", "header", "footer", "aside"];

/// Class/id tokens never treated as unlikely on these tags.
const ALWAYS_LIKELY_TAGS: &[&str] = &["html", "body", "a", "article", "main"];

/// Tags rendered as their own block.
pub(crate) const BLOCK_TAGS: &[&str] = &[
	"address",
	"article",
	"aside",
	"blockquote",
	"center",
	"dd",
	"details",
	"dialog",
	"div",
	"dl",
	"dt",
	"fieldset",
	"figcaption",
	"figure",
	"footer",
	"form",
	"h1",
	"h2",
	"h3",
	"h4",
	"h5",
	"h6",
	"header",
	"hr",
	"li",
	"main",
	"nav",
	"ol",
	"p",
	"pre",
	"section",
	"summary",
	"table",
	"tbody",
	"td",
	"tfoot",
	"th",
	"thead",
	"tr",
	"ul",
];

pub(crate) fn tag_name<'a>(element: &ElementRef<'a>) -> &'a str {
	element.value().name()
}

pub(crate) fn is_block(element: &ElementRef<'_>) -> bool {
	BLOCK_TAGS.contains(&tag_name(element))
}

/// `<body>` when the parser produced one, the root element otherwise.
///
/// Searches from the root element so nodes detached from the tree are
/// never returned.
pub(crate) fn body(document: &Html) -> ElementRef<'_> {
	let root = document.root_element();
	root.select(&BODY_SELECTOR).next().unwrap_or(root)
}

pub(crate) fn heading_level(name: &str) -> Option<usize> {
	match name {
		"h1" => Some(1),
		"h2" => Some(2),
		"h3" => Some(3),
		"h4" => Some(4),
		"h5" => Some(5),
		"h6" => Some(6),
		_ => None,
	}
}

/// True for elements the browser would not display.
pub(crate) fn is_hidden(element: &ElementRef<'_>) -> bool {
	let value = element.value();
	if value.attr("hidden").is_some() {
		return true;
	}
	if value.attr("aria-hidden").is_some_and(|v| v.trim().eq_ignore_ascii_case("true")) {
		return true;
	}
	value.attr("style").is_some_and(|style| {
		let style: String = style.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_ascii_lowercase();
		style.contains("display:none") || style.contains("visibility:hidden")
	})
}

/// Class and id joined, for pattern matching.
pub(crate) fn class_and_id(element: &ElementRef<'_>) -> String {
	let value = element.value();
	let class = value.attr("class").unwrap_or_default();
	let id = value.attr("id").unwrap_or_default();
	format!("{class} {id}")
}

/// Displayed text of `element` with HTML whitespace collapsing applied.
pub(crate) fn visible_text(element: &ElementRef<'_>) -> String {
	let mut out = String::new();
	collect_visible(element, &mut out);
	out.trim_end().to_string()
}

fn collect_visible(element: &ElementRef<'_>, out: &mut String) {
	for child in element.children() {
		match child.value() {
			Node::Text(text) => push_inline_text(out, text),
			Node::Element(_) => {
				if let Some(child) = ElementRef::wrap(child) {
					if !NON_CONTENT_TAGS.contains(&tag_name(&child)) && !is_hidden(&child) {
						collect_visible(&child, out);
					}
				}
			}
			_ => {}
		}
	}
}

pub(crate) fn text_length(element: &ElementRef<'_>) -> usize {
	visible_text(element).chars().count()
}

/// First non-empty text the browser would display inside `element`.
pub(crate) fn first_visible_text<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
	for child in element.children() {
		match child.value() {
			Node::Text(text) if !text.is_empty() => return Some(&**text),
			Node::Element(_) => {
				if let Some(child) = ElementRef::wrap(child) {
					if NON_CONTENT_TAGS.contains(&tag_name(&child)) || is_hidden(&child) {
						continue;
					}
					if let Some(text) = first_visible_text(&child) {
						return Some(text);
					}
				}
			}
			_ => {}
		}
	}
	None
}

/// Navigation, comment, sidebar and similar containers, by role or class/id.
pub(crate) fn is_unlikely(element: &ElementRef<'_>) -> bool {
	if ALWAYS_LIKELY_TAGS.contains(&tag_name(element)) {
		return false;
	}

	if let Some(role) = element.value().attr("role") {
		if clutter().pruning.unlikely_roles.iter().any(|r| r.eq_ignore_ascii_case(role.trim())) {
			return true;
		}
	}

	let match_string = class_and_id(element);
	if match_string.trim().is_empty() {
		return false;
	}
	unlikely_regex().is_some_and(|re| re.is_match(&match_string)) && !maybe_regex().is_some_and(|re| re.is_match(&match_string))
}
