use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use pw_extract::{DEFAULT_CHAR_THRESHOLD, ExtractOptions, MIN_CONTENT_LENGTH};

use crate::loader::{DEFAULT_MAX_REDIRECTS, DEFAULT_USER_AGENT, LoaderConfig};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "pw-extract")]
#[command(about = "Extract readable Markdown from web pages")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Load a page and print its title and readable Markdown
	Read(ReadArgs),

	/// Normalize whitespace and empty parentheses in text read from stdin
	Clean,
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Read(_) => "read",
			Commands::Clean => "clean",
		}
	}
}

#[derive(Args, Debug, Clone)]
pub struct ReadArgs {
	/// Page URL to fetch
	#[arg(required_unless_present = "html", conflicts_with = "html")]
	pub url: Option<String>,

	/// Read HTML from a file instead of fetching it (`-` for stdin)
	#[arg(long, value_name = "FILE")]
	pub html: Option<PathBuf>,

	/// URL the HTML was served from, used to resolve relative links
	#[arg(long, value_name = "URL", default_value = "about:blank")]
	pub base_url: String,

	/// Request timeout (ms)
	#[arg(long, default_value_t = 30_000)]
	pub timeout_ms: u64,

	/// User-Agent header sent when fetching
	#[arg(long, default_value = DEFAULT_USER_AGENT)]
	pub user_agent: String,

	/// Minimum characters of content required for success
	#[arg(long, default_value_t = MIN_CONTENT_LENGTH)]
	pub min_length: usize,

	/// Characters the readability pass must gather before it is trusted
	#[arg(long, default_value_t = DEFAULT_CHAR_THRESHOLD)]
	pub char_threshold: usize,

	/// Reject documents with more elements than this
	#[arg(long)]
	pub max_elements: Option<usize>,

	/// Extra attempts when the page has too little content
	#[arg(long, default_value_t = 0)]
	pub retries: u32,

	/// Wait between attempts (ms)
	#[arg(long, default_value_t = 1000)]
	pub retry_delay_ms: u64,
}

impl ReadArgs {
	pub fn extract_options(&self) -> ExtractOptions {
		ExtractOptions {
			min_content_length: self.min_length,
			char_threshold: self.char_threshold,
			max_elements: self.max_elements,
		}
	}

	pub fn loader_config(&self) -> LoaderConfig {
		LoaderConfig {
			timeout: Duration::from_millis(self.timeout_ms),
			user_agent: self.user_agent.clone(),
			max_redirects: DEFAULT_MAX_REDIRECTS,
		}
	}

	pub fn retry_delay(&self) -> Duration {
		Duration::from_millis(self.retry_delay_ms)
	}
}
