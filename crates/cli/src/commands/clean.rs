use pw_extract::clean_text;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::error::Result;
use crate::output::{CleanData, OutputFormat, ResultBuilder, print_result};

pub async fn execute(format: OutputFormat) -> Result<()> {
	let builder = ResultBuilder::new("clean");

	let mut input = String::new();
	tokio::io::stdin().read_to_string(&mut input).await?;
	let text = clean_text(&input);
	debug!(target = "pw", input = input.len(), output = text.len(), "cleaned stdin");

	match format {
		OutputFormat::Text => println!("{text}"),
		OutputFormat::Json => {
			let length = text.chars().count();
			print_result(&builder.data(CleanData { text, length }).build())?;
		}
	}
	Ok(())
}
