//! Plain-text rendering for the fallback path.

use scraper::{ElementRef, Node};

use crate::dom::{NON_CONTENT_TAGS, is_block, is_hidden, tag_name};
use crate::text::{block_break, line_break, push_inline_text};

/// Tags that end a line without opening a paragraph.
const LINE_TAGS: &[&str] = &["br", "li", "tr", "dt", "dd"];

/// Visible text of `root` with breaks at block boundaries.
pub(crate) fn element_text(root: &ElementRef<'_>) -> String {
	let mut out = String::new();
	write_children(root, &mut out);
	out
}

fn write_children(element: &ElementRef<'_>, out: &mut String) {
	for child in element.children() {
		match child.value() {
			Node::Text(text) => push_inline_text(out, text),
			Node::Element(_) => {
				if let Some(child) = ElementRef::wrap(child) {
					write_element(&child, out);
				}
			}
			_ => {}
		}
	}
}

fn write_element(element: &ElementRef<'_>, out: &mut String) {
	let tag = tag_name(element);
	if NON_CONTENT_TAGS.contains(&tag) || is_hidden(element) {
		return;
	}

	if tag == "pre" {
		let code: String = element.text().collect();
		block_break(out);
		out.push_str(code.trim_end());
		block_break(out);
	} else if LINE_TAGS.contains(&tag) {
		line_break(out);
		write_children(element, out);
		line_break(out);
	} else if matches!(tag, "td" | "th") {
		push_inline_text(out, " ");
		write_children(element, out);
		push_inline_text(out, " ");
	} else if is_block(element) {
		block_break(out);
		write_children(element, out);
		block_break(out);
	} else {
		write_children(element, out);
	}
}

#[cfg(test)]
mod tests {
	use scraper::Html;

	use super::*;
	use crate::text::clean_text;

	fn text(html: &str) -> String {
		let document = Html::parse_fragment(html);
		clean_text(&element_text(&document.root_element()))
	}

	#[test]
	fn breaks_lines_at_block_boundaries() {
		assert_eq!(text("<h1>Title</h1><p>Hello <strong>World</strong>!</p><div>Next</div>"), "Title\n\nHello World!\n\nNext");
	}

	#[test]
	fn list_items_and_rows_end_lines() {
		assert_eq!(text("<ul><li>one</li><li>two</li></ul>"), "one\ntwo");
		assert_eq!(text("<table><tr><td>a</td><td>b</td></tr><tr><td>c</td></tr></table>"), "a b\nc");
	}

	#[test]
	fn skips_scripts_and_hidden_elements() {
		assert_eq!(text("<p>Shown<script>x()</script><span hidden>no</span></p>"), "Shown");
	}
}
