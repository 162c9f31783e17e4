//! Page loaders that hand rendered HTML to the extractor.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use pw_extract::PageDocument;
use reqwest::redirect::Policy;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};
use url::Url;

use crate::error::{CliError, Result};

pub const DEFAULT_USER_AGENT: &str = concat!("pw-extract/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Connection settings for [`HttpLoader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
	pub timeout: Duration,
	pub user_agent: String,
	pub max_redirects: usize,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			timeout: DEFAULT_TIMEOUT,
			user_agent: DEFAULT_USER_AGENT.to_string(),
			max_redirects: DEFAULT_MAX_REDIRECTS,
		}
	}
}

/// Source of a page. Each call loads it afresh, so a retry sees the latest state.
#[async_trait]
pub trait PageLoader: Send + Sync {
	async fn load(&self) -> Result<PageDocument>;
}

/// Fetches a page over HTTP(S), following redirects.
#[derive(Debug)]
pub struct HttpLoader {
	client: reqwest::Client,
	url: Url,
}

impl HttpLoader {
	pub fn new(url: &str, config: &LoaderConfig) -> Result<Self> {
		let url = Url::parse(url).map_err(|err| CliError::InvalidInput(format!("invalid URL {url:?}: {err}")))?;
		if !matches!(url.scheme(), "http" | "https") {
			return Err(CliError::InvalidInput(format!("unsupported URL scheme {:?}", url.scheme())));
		}

		let client = reqwest::Client::builder()
			.timeout(config.timeout)
			.user_agent(config.user_agent.as_str())
			.redirect(Policy::limited(config.max_redirects))
			.build()
			.map_err(CliError::Client)?;

		Ok(Self { client, url })
	}
}

#[async_trait]
impl PageLoader for HttpLoader {
	async fn load(&self) -> Result<PageDocument> {
		info!(target = "pw", url = %self.url, "fetching page");
		let fetch_error = |source| CliError::Fetch {
			url: self.url.to_string(),
			source,
		};

		let response = self.client.get(self.url.clone()).send().await.map_err(fetch_error)?;
		let status = response.status();
		if !status.is_success() {
			return Err(CliError::HttpStatus {
				url: self.url.to_string(),
				status: status.as_u16(),
			});
		}

		let final_url = response.url().to_string();
		let html = response.text().await.map_err(fetch_error)?;
		debug!(target = "pw", %final_url, bytes = html.len(), "page fetched");
		Ok(PageDocument::new(final_url, html))
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HtmlSource {
	Stdin,
	File(PathBuf),
}

/// Reads HTML from a file, or from stdin when the path is `-`.
#[derive(Debug, Clone)]
pub struct FileLoader {
	source: HtmlSource,
	base_url: String,
}

impl FileLoader {
	pub fn new(path: &Path, base_url: impl Into<String>) -> Self {
		let source = if path == Path::new("-") { HtmlSource::Stdin } else { HtmlSource::File(path.to_path_buf()) };
		Self {
			source,
			base_url: base_url.into(),
		}
	}
}

#[async_trait]
impl PageLoader for FileLoader {
	async fn load(&self) -> Result<PageDocument> {
		let html = match &self.source {
			HtmlSource::File(path) => {
				debug!(target = "pw", path = %path.display(), "reading HTML file");
				tokio::fs::read_to_string(path).await?
			}
			HtmlSource::Stdin => {
				debug!(target = "pw", "reading HTML from stdin");
				let mut html = String::new();
				tokio::io::stdin().read_to_string(&mut html).await?;
				html
			}
		};
		Ok(PageDocument::new(self.base_url.clone(), html))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dash_means_stdin() {
		assert_eq!(FileLoader::new(Path::new("-"), "about:blank").source, HtmlSource::Stdin);
		assert_eq!(
			FileLoader::new(Path::new("page.html"), "about:blank").source,
			HtmlSource::File(PathBuf::from("page.html"))
		);
	}

	#[tokio::test]
	async fn file_loader_uses_base_url() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("page.html");
		std::fs::write(&path, "<p>hello</p>").unwrap();

		let page = FileLoader::new(&path, "https://example.com/page").load().await.unwrap();
		assert_eq!(page.final_url, "https://example.com/page");
		assert_eq!(page.html, "<p>hello</p>");
	}

	#[tokio::test]
	async fn missing_file_is_io_error() {
		let err = FileLoader::new(Path::new("/nonexistent/page.html"), "about:blank").load().await.unwrap_err();
		assert!(matches!(err, CliError::Io(_)));
	}

	#[test]
	fn http_loader_rejects_non_http_urls() {
		let config = LoaderConfig::default();
		assert!(matches!(HttpLoader::new("ftp://example.com", &config), Err(CliError::InvalidInput(_))));
		assert!(matches!(HttpLoader::new("not a url", &config), Err(CliError::InvalidInput(_))));
		assert!(HttpLoader::new("https://example.com", &config).is_ok());
	}
}
