//! Main-content root selection for the fallback path.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::config::root_selectors;
use crate::dom::{body, tag_name};

/// First element matching the configured root selectors, in priority order.
///
/// Falls back to `<body>` and then to the document root.
pub(crate) fn select_main_root(document: &Html) -> ElementRef<'_> {
	let root = document.root_element();
	match root_selectors().iter().find_map(|selector| root.select(selector).next()) {
		Some(element) => {
			debug!(target = "pw.extract", tag = tag_name(&element), "fallback root selected");
			element
		}
		None => {
			let body = body(document);
			debug!(target = "pw.extract", tag = tag_name(&body), "fallback root defaulted");
			body
		}
	}
}
