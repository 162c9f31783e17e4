use clap::Parser;
use pw_extract_cli::cli::Cli;
use pw_extract_cli::{commands, logging, output};
use tracing::debug;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let command = cli.command.name();
	if let Err(err) = commands::dispatch(cli.command, cli.format).await {
		debug!(target = "pw", command, error = %err, "command failed");
		output::print_error(command, &err, cli.format);
		std::process::exit(1);
	}
}
