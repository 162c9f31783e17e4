//! DOM-to-Markdown rendering for the readability path.
//!
//! Output is GitHub-flavoured Markdown: ATX headings, fenced code, pipe
//! tables, strikethrough and task lists. Links and images are resolved
//! against the page URL when one is available.

use scraper::{ElementRef, Node};
use url::Url;

use crate::dom::{CHROME_TAGS, NON_CONTENT_TAGS, first_visible_text, heading_level, is_block, is_hidden, is_unlikely, tag_name};
use crate::text::{block_break, collapse_whitespace, line_break, push_inline_text};

/// Tags dropped along with everything inside them.
const SKIPPED_TAGS: &[&str] = &[
	"head", "title", "meta", "link", "base", "button", "input", "select", "option", "textarea", "iframe", "svg", "canvas", "object", "embed",
];

/// Render `nodes` in document order. The caller applies text cleaning.
pub(crate) fn render_markdown(nodes: &[ElementRef<'_>], base: Option<&Url>) -> String {
	let mut renderer = MarkdownRenderer::new(base);
	let mut out = String::new();
	for node in nodes {
		renderer.element(node, &mut out);
	}
	out
}

struct MarkdownRenderer<'u> {
	base: Option<&'u Url>,
	list_item_depth: usize,
}

impl<'u> MarkdownRenderer<'u> {
	fn new(base: Option<&'u Url>) -> Self {
		Self { base, list_item_depth: 0 }
	}

	fn children(&mut self, element: &ElementRef<'_>, out: &mut String) {
		for child in element.children() {
			match child.value() {
				Node::Text(text) => push_inline_text(out, text),
				Node::Element(_) => {
					if let Some(child) = ElementRef::wrap(child) {
						self.element(&child, out);
					}
				}
				_ => {}
			}
		}
	}

	fn element(&mut self, element: &ElementRef<'_>, out: &mut String) {
		let tag = tag_name(element);
		if NON_CONTENT_TAGS.contains(&tag) || SKIPPED_TAGS.contains(&tag) || CHROME_TAGS.contains(&tag) {
			return;
		}
		if is_hidden(element) || is_unlikely(element) {
			return;
		}

		if let Some(level) = heading_level(tag) {
			self.heading(element, level, out);
			return;
		}

		match tag {
			"br" => line_break(out),
			"hr" => {
				block_break(out);
				out.push_str("---");
				block_break(out);
			}
			"pre" => code_block(element, out),
			"code" | "kbd" | "samp" => inline_code(element, out),
			"strong" | "b" => self.span(element, out, |text| format!("**{text}**")),
			"em" | "i" => self.span(element, out, |text| format!("*{text}*")),
			"del" | "s" | "strike" => self.span(element, out, |text| format!("~~{text}~~")),
			"a" => self.link(element, out),
			"img" => self.image(element, out),
			"ul" => self.list(element, false, out),
			"ol" => self.list(element, true, out),
			"blockquote" => self.blockquote(element, out),
			"table" => self.table(element, out),
			_ if is_block(element) => {
				block_break(out);
				self.children(element, out);
				block_break(out);
			}
			_ => self.children(element, out),
		}
	}

	fn heading(&mut self, element: &ElementRef<'_>, level: usize, out: &mut String) {
		let mut inner = String::new();
		self.children(element, &mut inner);
		let text = collapse_whitespace(&inner);
		if text.is_empty() {
			return;
		}
		block_break(out);
		out.push_str(&"#".repeat(level));
		out.push(' ');
		out.push_str(&text);
		block_break(out);
	}

	/// Inline wrapper that keeps the whitespace around its content outside
	/// the Markdown markers.
	fn span(&mut self, element: &ElementRef<'_>, out: &mut String, wrap: impl FnOnce(&str) -> String) {
		let mut inner = String::new();
		self.children(element, &mut inner);
		let text = inner.trim();
		if text.is_empty() {
			return;
		}
		if first_visible_text(element).is_some_and(|t| t.starts_with(char::is_whitespace)) {
			push_inline_text(out, " ");
		}
		out.push_str(&wrap(text));
		if inner.ends_with(char::is_whitespace) {
			out.push(' ');
		}
	}

	/// Links wrapping block content (card-style teasers) render the content
	/// unlinked.
	fn link(&mut self, element: &ElementRef<'_>, out: &mut String) {
		let href = element.value().attr("href").and_then(|href| self.resolve(href));
		match href {
			Some(href) if !has_block_content(element) => self.span(element, out, |text| format!("[{text}]({href})")),
			_ => self.children(element, out),
		}
	}

	fn image(&mut self, element: &ElementRef<'_>, out: &mut String) {
		let value = element.value();
		let Some(src) = value.attr("src").or_else(|| value.attr("data-src")).and_then(|src| self.resolve(src)) else {
			return;
		};
		let alt = collapse_whitespace(value.attr("alt").unwrap_or_default());
		if !out.is_empty() && !out.ends_with(char::is_whitespace) && !out.ends_with(|c: char| c == '(' || c == '[') {
			out.push(' ');
		}
		out.push_str(&format!("![{alt}]({src})"));
	}

	fn list(&mut self, element: &ElementRef<'_>, ordered: bool, out: &mut String) {
		if self.list_item_depth > 0 && !out.trim().is_empty() {
			line_break(out);
		} else {
			block_break(out);
		}

		let start = element.value().attr("start").and_then(|s| s.trim().parse::<usize>().ok()).unwrap_or(1);
		let items = element.children().filter_map(ElementRef::wrap).filter(|child| tag_name(child) == "li");
		for (index, item) in items.enumerate() {
			let marker = if ordered { format!("{}. ", start + index) } else { "- ".to_string() };
			let task = task_marker(&item);

			self.list_item_depth += 1;
			let mut inner = String::new();
			self.children(&item, &mut inner);
			self.list_item_depth -= 1;

			let content = inner.trim();
			if content.is_empty() && task.is_none() {
				continue;
			}

			let indent = " ".repeat(marker.len());
			for (line_index, line) in content.lines().enumerate() {
				if line_index == 0 {
					out.push_str(&marker);
					out.push_str(task.unwrap_or_default());
					out.push_str(line);
				} else if !line.is_empty() {
					out.push('\n');
					out.push_str(&indent);
					out.push_str(line);
				} else {
					out.push('\n');
				}
			}
			if content.is_empty() {
				out.push_str(&marker);
				out.push_str(task.unwrap_or_default().trim_end());
			}
			line_break(out);
		}

		block_break(out);
	}

	fn blockquote(&mut self, element: &ElementRef<'_>, out: &mut String) {
		let mut inner = String::new();
		self.children(element, &mut inner);
		let content = inner.trim();
		if content.is_empty() {
			return;
		}

		block_break(out);
		let quoted: Vec<String> = content
			.lines()
			.map(|line| if line.trim().is_empty() { ">".to_string() } else { format!("> {line}") })
			.collect();
		out.push_str(&quoted.join("\n"));
		block_break(out);
	}

	fn table(&mut self, element: &ElementRef<'_>, out: &mut String) {
		let mut rows: Vec<Vec<String>> = Vec::new();
		for row in table_rows(element) {
			let cells: Vec<String> = row
				.children()
				.filter_map(ElementRef::wrap)
				.filter(|cell| matches!(tag_name(cell), "th" | "td"))
				.map(|cell| {
					let mut inner = String::new();
					self.children(&cell, &mut inner);
					collapse_whitespace(&inner).replace('|', "\\|")
				})
				.collect();
			if !cells.is_empty() {
				rows.push(cells);
			}
		}

		let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
		if columns == 0 {
			return;
		}

		block_break(out);
		for (index, row) in rows.iter().enumerate() {
			let mut cells = row.clone();
			cells.resize(columns, String::new());
			out.push_str(&format!("| {} |", cells.join(" | ")));
			line_break(out);
			if index == 0 {
				out.push_str(&format!("|{}", " --- |".repeat(columns)));
				line_break(out);
			}
		}
		block_break(out);
	}

	/// Absolute form of `raw`, or `raw` itself when it cannot be joined.
	fn resolve(&self, raw: &str) -> Option<String> {
		let raw = raw.trim();
		if raw.is_empty() || raw.to_ascii_lowercase().starts_with("javascript:") {
			return None;
		}
		Some(match self.base.and_then(|base| base.join(raw).ok()) {
			Some(url) => url.to_string(),
			None => raw.to_string(),
		})
	}
}

/// `tr` elements belonging to `table`, skipping nested tables.
fn table_rows<'a>(table: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
	let mut rows = Vec::new();
	for child in table.children().filter_map(ElementRef::wrap) {
		match tag_name(&child) {
			"tr" => rows.push(child),
			"thead" | "tbody" | "tfoot" => rows.extend(child.children().filter_map(ElementRef::wrap).filter(|row| tag_name(row) == "tr")),
			_ => {}
		}
	}
	rows
}

fn has_block_content(element: &ElementRef<'_>) -> bool {
	element.descendants().skip(1).filter_map(ElementRef::wrap).any(|child| is_block(&child))
}

/// `[x] ` or `[ ] ` when the item opens with a checkbox.
fn task_marker(item: &ElementRef<'_>) -> Option<&'static str> {
	let checkbox = item
		.descendants()
		.filter_map(ElementRef::wrap)
		.take_while(|el| !matches!(tag_name(el), "ul" | "ol"))
		.find(|el| tag_name(el) == "input" && el.value().attr("type").is_some_and(|t| t.eq_ignore_ascii_case("checkbox")))?;
	Some(if checkbox.value().attr("checked").is_some() { "[x] " } else { "[ ] " })
}

fn code_block(element: &ElementRef<'_>, out: &mut String) {
	let code: String = element.text().collect();
	let code = code.trim_end();
	let fence = "`".repeat((longest_backtick_run(code) + 1).max(3));
	let language = code_language(element).unwrap_or_default();

	block_break(out);
	out.push_str(&format!("{fence}{language}\n{code}\n{fence}"));
	block_break(out);
}

fn inline_code(element: &ElementRef<'_>, out: &mut String) {
	let code: String = element.text().collect();
	let code = collapse_whitespace(&code);
	if code.is_empty() {
		return;
	}
	let ticks = "`".repeat(longest_backtick_run(&code) + 1);
	let pad = if code.starts_with('`') || code.ends_with('`') { " " } else { "" };
	out.push_str(&format!("{ticks}{pad}{code}{pad}{ticks}"));
}

fn code_language<'a>(pre: &ElementRef<'a>) -> Option<&'a str> {
	std::iter::once(*pre)
		.chain(pre.children().filter_map(ElementRef::wrap).filter(|child| tag_name(child) == "code"))
		.filter_map(|el| el.value().attr("class"))
		.flat_map(str::split_whitespace)
		.find_map(|class| class.strip_prefix("language-").or_else(|| class.strip_prefix("lang-")))
		.filter(|language| !language.is_empty())
}

fn longest_backtick_run(text: &str) -> usize {
	let mut longest = 0;
	let mut current = 0;
	for c in text.chars() {
		if c == '`' {
			current += 1;
			longest = longest.max(current);
		} else {
			current = 0;
		}
	}
	longest
}

#[cfg(test)]
mod tests {
	use scraper::Html;

	use super::*;
	use crate::text::clean_text;

	fn md(html: &str) -> String {
		let document = Html::parse_fragment(html);
		let base = Url::parse("https://example.com/docs/page").unwrap();
		clean_text(&render_markdown(&[document.root_element()], Some(&base)))
	}

	#[test]
	fn renders_atx_headings_and_paragraphs() {
		assert_eq!(md("<h2>Section</h2><p>Body   text</p>"), "## Section\n\nBody text");
	}

	#[test]
	fn renders_fenced_code_with_language() {
		let html = "<pre><code class=\"language-rust\">fn main() {\n    println!(\"hi\");\n}\n</code></pre>";
		assert_eq!(md(html), "```rust\nfn main() {\n    println!(\"hi\");\n}\n```");
	}

	#[test]
	fn code_fence_outgrows_backticks_in_content() {
		let html = "<pre>use ``` here</pre>";
		assert_eq!(md(html), "````\nuse ``` here\n````");
	}

	#[test]
	fn renders_inline_formatting() {
		let html = "<p>Use <code>cargo</code> with <strong>care</strong>, <em>please</em> and <del>never</del> panic.</p>";
		assert_eq!(md(html), "Use `cargo` with **care**, *please* and ~~never~~ panic.");
	}

	#[test]
	fn keeps_spacing_outside_markers() {
		assert_eq!(md("<p>Hello<b> world </b>again</p>"), "Hello **world** again");
	}

	#[test]
	fn resolves_links_and_images_against_base() {
		let html = "<p><a href=\"/guide\">Guide</a> and <a href=\"javascript:void(0)\">noop</a> <img src=\"img/a.png\" alt=\"Alt\"></p>";
		assert_eq!(md(html), "[Guide](https://example.com/guide) and noop ![Alt](https://example.com/docs/img/a.png)");
	}

	#[test]
	fn renders_nested_and_ordered_lists() {
		let html = "<ul><li>One</li><li>Two<ul><li>Nested</li></ul></li></ul><ol start=\"3\"><li>Three</li></ol>";
		assert_eq!(md(html), "- One\n- Two\n  - Nested\n\n3. Three");
	}

	#[test]
	fn renders_task_lists() {
		let html = "<ul><li><input type=\"checkbox\" checked> Done</li><li><input type=\"checkbox\"> Todo</li></ul>";
		assert_eq!(md(html), "- [x] Done\n- [ ] Todo");
	}

	#[test]
	fn renders_pipe_tables() {
		let html = "<table><thead><tr><th>Name</th><th>Value</th></tr></thead><tbody><tr><td>a|b</td><td>1</td></tr><tr><td>c</td></tr></tbody></table>";
		assert_eq!(md(html), "| Name | Value |\n| --- | --- |\n| a\\|b | 1 |\n| c | |");
	}

	#[test]
	fn renders_blockquotes() {
		assert_eq!(md("<blockquote><p>Quoted</p><p>Twice</p></blockquote>"), "> Quoted\n>\n> Twice");
	}

	#[test]
	fn skips_scripts_forms_controls_and_hidden_nodes() {
		let html = "<p>Keep<script>drop()</script><button>Click</button><span style=\"display:none\">gone</span></p>";
		assert_eq!(md(html), "Keep");
	}

	#[test]
	fn skips_chrome_and_unlikely_containers() {
		let html = "<div><header>Site</header><nav>Menu</nav><p>Body</p><aside>Related</aside><div class=\"comments\">Spam</div><div role=\"navigation\">Jump</div><footer>Legal</footer></div>";
		assert_eq!(md(html), "Body");
	}

	#[test]
	fn leading_space_ignores_scripts_in_spans() {
		assert_eq!(md("<p>Hello<b><script> x()</script>world</b></p>"), "Hello**world**");
		assert_eq!(md("<p>Hello<b><span hidden>x</span> world</b></p>"), "Hello **world**");
	}

	#[test]
	fn links_around_blocks_keep_markdown_structure() {
		let html = "<a href=\"/post\"><h2>Heading</h2><p>Teaser</p></a><p><a href=\"/inline\">inline</a></p>";
		assert_eq!(md(html), "## Heading\n\nTeaser\n\n[inline](https://example.com/inline)");
	}

	#[test]
	fn quoted_code_keeps_its_whitespace() {
		let html = "<blockquote><p>See</p><pre>a  ()\n\n\n\nb</pre></blockquote>";
		assert_eq!(md(html), "> See\n>\n> ```\n> a  ()\n>\n>\n>\n> b\n> ```");
	}

	#[test]
	fn renders_rules_and_line_breaks() {
		assert_eq!(md("<p>one<br>two</p><hr><p>three</p>"), "one\ntwo\n\n---\n\nthree");
	}
}
