//! Readable content extraction from rendered HTML pages.
//!
//! [`ContentExtractor`] turns a [`PageDocument`] (rendered HTML plus the
//! URL it was served from) into a title and a Markdown body. A readability
//! pass (`dom_smoothie`) picks the article when it is confident; the
//! fallback strips page chrome and keeps the plain text of the main content
//! root. Either way, results shorter than
//! [`ExtractOptions::min_content_length`] are rejected with
//! [`ExtractError::InsufficientContent`], which callers may retry once the
//! page has settled.
//!
//! ```ignore
//! let page = pw_extract::PageDocument::new("https://example.com/post", html);
//! let result = pw_extract::extract(&page)?;
//! println!("# {}\n\n{}", result.title, result.markdown);
//! ```

mod cleaner;
mod config;
mod dom;
mod error;
mod metadata;
mod pipeline;
mod readability;
mod render_markdown;
mod render_text;
mod selector;
mod text;
mod types;

pub use error::{ExtractError, FailureKind, ParseError, Result};
pub use pipeline::{ContentExtractor, extract};
pub use text::clean_text;
pub use types::{DEFAULT_CHAR_THRESHOLD, ExtractOptions, ExtractionMethod, ExtractionResult, MIN_CONTENT_LENGTH, PageDocument, PageMetadata, UNTITLED};
