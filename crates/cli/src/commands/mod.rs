mod clean;
mod read;

pub use read::{RetryPolicy, extract_with_retry};

use crate::cli::Commands;
use crate::error::Result;
use crate::output::OutputFormat;

pub async fn dispatch(command: Commands, format: OutputFormat) -> Result<()> {
	match command {
		Commands::Read(args) => read::execute(&args, format).await,
		Commands::Clean => clean::execute(format).await,
	}
}
