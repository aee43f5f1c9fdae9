//! Labels CLI

use std::process;

use clap::Parser;

#[expect(
    clippy::print_stdout,
    reason = "commands write their results to stdout"
)]
mod cli;
mod observability;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if let Err(error) = cli.run().await {
        #[expect(clippy::print_stderr, reason = "errors are reported to the terminal")]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
