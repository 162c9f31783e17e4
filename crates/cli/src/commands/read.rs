use std::time::{Duration, Instant};

use pw_extract::{ContentExtractor, ExtractionResult, PageDocument};
use tracing::{info, warn};

use crate::cli::ReadArgs;
use crate::error::{CliError, Result};
use crate::loader::{FileLoader, HttpLoader, PageLoader};
use crate::output::{OutputFormat, ReadData, ResultBuilder, print_result};

/// How often, and how patiently, to reload a page whose content is too thin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	pub retries: u32,
	pub delay: Duration,
}

pub async fn execute(args: &ReadArgs, format: OutputFormat) -> Result<()> {
	let builder = ResultBuilder::new("read").started_at(Instant::now());

	let loader: Box<dyn PageLoader> = match (&args.html, &args.url) {
		(Some(path), _) => Box::new(FileLoader::new(path, args.base_url.clone())),
		(None, Some(url)) => Box::new(HttpLoader::new(url, &args.loader_config())?),
		(None, None) => return Err(CliError::InvalidInput("either a URL or --html is required".into())),
	};
	let extractor = ContentExtractor::new(args.extract_options());
	let policy = RetryPolicy {
		retries: args.retries,
		delay: args.retry_delay(),
	};

	let (page, result) = extract_with_retry(loader.as_ref(), &extractor, policy).await?;
	info!(target = "pw", url = %page.final_url, method = %result.method, length = result.length, "page extracted");

	match format {
		OutputFormat::Text => {
			println!("URL: {}", page.final_url);
			println!("Title: {}", result.title);
			println!();
			println!("{}", result.markdown);
		}
		OutputFormat::Json => print_result(&builder.data(ReadData::new(page.final_url, result)).build())?,
	}
	Ok(())
}

/// Load and extract, reloading while the content is too thin.
///
/// Only insufficient content is retried; loader failures and parse errors
/// are returned immediately.
pub async fn extract_with_retry(loader: &dyn PageLoader, extractor: &ContentExtractor, policy: RetryPolicy) -> Result<(PageDocument, ExtractionResult)> {
	let mut attempt = 0;
	loop {
		let page = loader.load().await?;
		match extractor.extract(&page) {
			Ok(result) => return Ok((page, result)),
			Err(err) if err.is_recoverable() && attempt < policy.retries => {
				attempt += 1;
				warn!(
					target = "pw",
					url = %page.final_url,
					attempt,
					retries = policy.retries,
					error = %err,
					"content not ready, retrying"
				);
				tokio::time::sleep(policy.delay).await;
			}
			Err(err) => return Err(err.into()),
		}
	}
}
