//! Chrome removal and plain-text extraction for the fallback path.

use scraper::Html;
use tracing::debug;

use crate::config::chrome_selectors;
use crate::render_text::element_text;
use crate::selector::select_main_root;
use crate::text::clean_text;

/// Detach scripts, navigation, headers, footers and similar page chrome.
///
/// Returns the number of elements removed.
pub(crate) fn remove_chrome(document: &mut Html) -> usize {
	let root = document.root_element();
	let ids: Vec<_> = chrome_selectors().iter().flat_map(|selector| root.select(selector).map(|el| el.id())).collect();

	for id in &ids {
		if let Some(mut node) = document.tree.get_mut(*id) {
			node.detach();
		}
	}
	ids.len()
}

/// Cleaned plain text of the main content root once chrome is gone.
pub(crate) fn fallback_text(document: &mut Html) -> String {
	let removed = remove_chrome(document);
	let root = select_main_root(document);
	let text = clean_text(&element_text(&root));
	debug!(target = "pw.extract", removed, length = text.chars().count(), "fallback text extracted");
	text
}
