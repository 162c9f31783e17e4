//! Command-line front end for `pw-extract`.
//!
//! Loads a page over HTTP or from a local file, runs the content extractor
//! and prints the title and Markdown body.

pub mod cli;
pub mod commands;
pub mod error;
pub mod loader;
pub mod logging;
pub mod output;
