//! Shared text cleanup helpers.

use std::sync::LazyLock;

use regex_lite::Regex;

static EMPTY_PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\([ \t\r]*\))+").expect("EMPTY_PARENS regex should compile"));
static INLINE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\r]+").expect("INLINE_SPACE regex should compile"));
static MULTI_NEWLINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("MULTI_NEWLINE regex should compile"));
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN regex should compile"));

const INLINE_WS: &[char] = &[' ', '\t'];

/// Normalize extracted Markdown or plain text.
///
/// Removes empty `()` tokens, collapses runs of inline whitespace to a single
/// space, and limits blank lines to one between paragraphs. Leading
/// indentation is kept so nested lists survive, and fenced code blocks,
/// quoted ones included, pass through untouched. Applying it twice gives the
/// same result as once.
pub fn clean_text(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	let mut prose = String::new();
	let mut fence: Option<(char, usize)> = None;

	for line in input.lines() {
		if let Some((marker, len)) = fence {
			out.push_str(line);
			out.push('\n');
			if is_closing_fence(unquote(line), marker, len) {
				fence = None;
			}
			continue;
		}

		let line = strip_empty_parens(line);
		if let Some(open) = opening_fence(unquote(&line)) {
			append_prose(&mut out, &prose);
			prose.clear();
			out.push_str(line.trim_end());
			out.push('\n');
			fence = Some(open);
		} else {
			prose.push_str(&line);
			prose.push('\n');
		}
	}
	append_prose(&mut out, &prose);

	out.trim().to_string()
}

/// Remove empty `()` tokens until none are left, so `( ( ) )` goes too.
fn strip_empty_parens(line: &str) -> String {
	let mut text = line.to_string();
	loop {
		let next = EMPTY_PARENS.replace_all(&text, "");
		if next.len() == text.len() {
			return text;
		}
		text = next.into_owned();
	}
}

/// `line` without indentation and blockquote markers.
fn unquote(line: &str) -> &str {
	let mut rest = line.trim_start();
	while let Some(inner) = rest.strip_prefix('>') {
		rest = inner.trim_start();
	}
	rest
}

/// Blank lines after a closing fence count toward the one-blank-line limit.
fn append_prose(out: &mut String, prose: &str) {
	let cleaned = clean_prose(prose);
	if out.ends_with('\n') {
		let stripped = cleaned.trim_start_matches('\n');
		if stripped.len() < cleaned.len() {
			out.push('\n');
		}
		out.push_str(stripped);
	} else {
		out.push_str(&cleaned);
	}
}

fn clean_prose(prose: &str) -> String {
	if prose.is_empty() {
		return String::new();
	}

	let mut lines = Vec::new();
	for line in prose.split('\n') {
		let body = line.trim_start_matches(INLINE_WS);
		let indent = &line[..line.len() - body.len()];
		let body = INLINE_SPACE.replace_all(body, " ");
		let body = body.trim_end();
		if body.is_empty() {
			lines.push(String::new());
		} else {
			lines.push(format!("{indent}{body}"));
		}
	}

	MULTI_NEWLINE.replace_all(&lines.join("\n"), "\n\n").into_owned()
}

fn opening_fence(line: &str) -> Option<(char, usize)> {
	let marker = line.chars().next().filter(|c| *c == '`' || *c == '~')?;
	let len = line.chars().take_while(|c| *c == marker).count();
	(len >= 3).then_some((marker, len))
}

fn is_closing_fence(line: &str, marker: char, len: usize) -> bool {
	let line = line.trim_end();
	line.chars().count() >= len && line.chars().all(|c| c == marker)
}

/// Collapse every whitespace run, newlines included, to one space.
pub(crate) fn collapse_whitespace(s: &str) -> String {
	WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

/// Append an HTML text node, applying HTML whitespace collapsing.
pub(crate) fn push_inline_text(out: &mut String, text: &str) {
	let collapsed = WHITESPACE_RUN.replace_all(text, " ");
	let at_boundary = out.is_empty() || out.ends_with('\n') || out.ends_with(' ');
	let piece: &str = if at_boundary { collapsed.trim_start() } else { &collapsed };
	out.push_str(piece);
}

/// End the current block with exactly one blank line.
pub(crate) fn block_break(out: &mut String) {
	trim_trailing_spaces(out);
	if out.is_empty() {
		return;
	}
	let newlines = out.len() - out.trim_end_matches('\n').len();
	for _ in newlines..2 {
		out.push('\n');
	}
}

/// End the current line without adding a blank line.
pub(crate) fn line_break(out: &mut String) {
	trim_trailing_spaces(out);
	if !out.is_empty() && !out.ends_with('\n') {
		out.push('\n');
	}
}

fn trim_trailing_spaces(out: &mut String) {
	let len = out.trim_end_matches(INLINE_WS).len();
	out.truncate(len);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collapses_excess_blank_lines() {
		assert_eq!(clean_text("a\n\n\n\nb"), "a\n\nb");
	}

	#[test]
	fn removes_empty_parentheses() {
		assert_eq!(clean_text("foo(  )bar"), "foobar");
		assert_eq!(clean_text("see ()() here"), "see here");
	}

	#[test]
	fn removes_parentheses_emptied_by_removal() {
		assert_eq!(clean_text("x( ( ) )y"), "xy");
	}

	#[test]
	fn collapses_inline_whitespace_but_keeps_indentation() {
		assert_eq!(clean_text("one  \t two   \n  - nested   item  "), "one two\n  - nested item");
	}

	#[test]
	fn leaves_fenced_code_untouched() {
		let input = "Intro   text\n\n```rust\nfn main()  {\n\n\n\n    call();\n}\n```\n\n\n\nAfter";
		let cleaned = clean_text(input);
		assert!(cleaned.contains("fn main()  {\n\n\n\n    call();"));
		assert!(cleaned.starts_with("Intro text\n\n```rust\n"));
		assert!(cleaned.ends_with("```\n\nAfter"));
	}

	#[test]
	fn longer_fence_is_not_closed_by_shorter_run() {
		let input = "````\n```\ninner  ()\n```\n````\ntail  ()";
		assert_eq!(clean_text(input), "````\n```\ninner  ()\n```\n````\ntail");
	}

	#[test]
	fn fence_markers_are_read_after_paren_removal() {
		assert_eq!(clean_text("()```\n```\nfoo  ()\n```"), "```\n```\nfoo\n```");
	}

	#[test]
	fn quoted_fences_are_left_alone() {
		let input = "> Quote   text\n>\n> ```\n> code   ()\n>\n> ```\n> tail  ()";
		assert_eq!(clean_text(input), "> Quote text\n>\n> ```\n> code   ()\n>\n> ```\n> tail");
	}

	#[test]
	fn cleaning_is_idempotent() {
		let samples = [
			"a\n\n\n\nb",
			"foo(  )bar",
			"  lead  \n\n\n  ( )  \n\n\n\ntrail   ",
			"x( ( ) )y\r\n\r\n\r\nz",
			"# Title\n\n\n- a\n  - b   c\n\n```\ncode   ()\n```\n\n\n\n~~~\nunterminated  ()",
			"()```\n```\nfoo  ()\n```",
			"> ```\n> keep   ()\n> ```\n>   after   ()",
			"( )~~~\n(\n)",
			"",
		];
		for sample in samples {
			let once = clean_text(sample);
			assert_eq!(clean_text(&once), once, "not idempotent for {sample:?}");
		}
	}

	#[test]
	fn inline_text_collapses_html_whitespace() {
		let mut out = String::new();
		push_inline_text(&mut out, "\n   Hello \n\t world ");
		push_inline_text(&mut out, "  again");
		assert_eq!(out, "Hello world again");
	}

	#[test]
	fn block_break_produces_single_blank_line() {
		let mut out = "para   ".to_string();
		block_break(&mut out);
		block_break(&mut out);
		assert_eq!(out, "para\n\n");

		let mut empty = String::new();
		block_break(&mut empty);
		assert!(empty.is_empty());
	}

	#[test]
	fn line_break_adds_one_newline() {
		let mut out = "row".to_string();
		line_break(&mut out);
		line_break(&mut out);
		assert_eq!(out, "row\n");
	}
}
