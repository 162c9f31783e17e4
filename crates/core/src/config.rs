//! Pattern configuration loaded from `clutter.json`.

use std::sync::LazyLock;

use regex_lite::Regex;
use scraper::Selector;
use serde::Deserialize;
use tracing::warn;

static CLUTTER: LazyLock<ClutterPatterns> = LazyLock::new(|| {
	let json = include_str!("../clutter.json");
	serde_json::from_str(json).expect("Failed to parse clutter.json")
});

static CHROME_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| parse_selectors(&CLUTTER.fallback.remove_selectors));
static ROOT_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| parse_selectors(&CLUTTER.fallback.root_selectors));

static UNLIKELY_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| pattern_regex(&CLUTTER.pruning.unlikely_candidates));
static MAYBE_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| pattern_regex(&CLUTTER.pruning.maybe_candidates));

pub(crate) fn clutter() -> &'static ClutterPatterns {
	&CLUTTER
}

/// Selectors for page chrome stripped before fallback extraction.
pub(crate) fn chrome_selectors() -> &'static [Selector] {
	&CHROME_SELECTORS
}

/// Main-content root selectors, in priority order.
pub(crate) fn root_selectors() -> &'static [Selector] {
	&ROOT_SELECTORS
}

pub(crate) fn unlikely_regex() -> Option<&'static Regex> {
	UNLIKELY_REGEX.as_ref()
}

pub(crate) fn maybe_regex() -> Option<&'static Regex> {
	MAYBE_REGEX.as_ref()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClutterPatterns {
	pub(crate) fallback: FallbackPatterns,
	pub(crate) pruning: PruningPatterns,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FallbackPatterns {
	pub(crate) remove_selectors: Vec<String>,
	pub(crate) root_selectors: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PruningPatterns {
	pub(crate) unlikely_candidates: Vec<String>,
	pub(crate) maybe_candidates: Vec<String>,
	pub(crate) unlikely_roles: Vec<String>,
}

fn parse_selectors(raw: &[String]) -> Vec<Selector> {
	raw.iter()
		.filter_map(|css| match Selector::parse(css) {
			Ok(selector) => Some(selector),
			Err(err) => {
				warn!(target = "pw.extract", selector = %css, error = %err, "ignoring invalid selector in clutter.json");
				None
			}
		})
		.collect()
}

fn pattern_regex(patterns: &[String]) -> Option<Regex> {
	if patterns.is_empty() {
		return None;
	}

	let alternation = patterns.iter().map(|s| regex_lite::escape(s)).collect::<Vec<_>>().join("|");
	Regex::new(&format!("(?i){alternation}")).ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clutter_patterns_load() {
		assert!(!clutter().fallback.remove_selectors.is_empty());
		assert!(!clutter().fallback.root_selectors.is_empty());
		assert!(!clutter().pruning.unlikely_candidates.is_empty());
		assert!(!clutter().pruning.unlikely_roles.is_empty());
	}

	#[test]
	fn every_configured_selector_parses() {
		assert_eq!(chrome_selectors().len(), clutter().fallback.remove_selectors.len());
		assert_eq!(root_selectors().len(), clutter().fallback.root_selectors.len());
	}

	#[test]
	fn unlikely_regexes_match_case_insensitively() {
		assert!(unlikely_regex().is_some_and(|re| re.is_match("Site-Sidebar")));
		assert!(maybe_regex().is_some_and(|re| re.is_match("main-column")));
		assert!(!unlikely_regex().is_some_and(|re| re.is_match("story")));
	}

	#[test]
	fn empty_pattern_list_has_no_regex() {
		assert!(pattern_regex(&[]).is_none());
	}
}
