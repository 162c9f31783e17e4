use std::time::Instant;

use serde::Serialize;

use crate::error::CliError;
use crate::output::format::OutputFormat;
use crate::output::model::{CommandError, CommandResult, ErrorCode};

/// Builder for constructing command results.
pub struct ResultBuilder<T: Serialize> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			data: None,
			error: None,
			start_time: Instant::now(),
		}
	}

	/// Measure the duration from an earlier instant.
	pub fn started_at(mut self, start_time: Instant) -> Self {
		self.start_time = start_time;
		self
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, code: ErrorCode, message: impl Into<String>) -> Self {
		self.error = Some(CommandError {
			code,
			message: message.into(),
		});
		self
	}

	pub fn build(self) -> CommandResult<T> {
		CommandResult {
			ok: self.error.is_none() && self.data.is_some(),
			command: self.command,
			data: self.data,
			error: self.error,
			duration_ms: Some(self.start_time.elapsed().as_millis() as u64),
		}
	}
}

/// Print a JSON envelope to stdout.
pub fn print_result<T: Serialize>(result: &CommandResult<T>) -> Result<(), CliError> {
	println!("{}", serde_json::to_string_pretty(result)?);
	Ok(())
}

/// Report a failed command: a JSON envelope on stdout in JSON mode,
/// `Error [CODE]: message` on stderr otherwise.
pub fn print_error(command: &str, err: &CliError, format: OutputFormat) {
	let code = err.code();
	match format {
		OutputFormat::Json => {
			let result: CommandResult<()> = ResultBuilder::new(command).error(code, err.to_string()).build();
			match serde_json::to_string_pretty(&result) {
				Ok(json) => println!("{json}"),
				Err(_) => eprintln!("Error [{code}]: {err}"),
			}
		}
		OutputFormat::Text => eprintln!("Error [{code}]: {err}"),
	}
}
