use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod compile;
mod config;
mod error;
mod fee;
mod rpc;
mod submit;
mod tx_builder;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	match &cli.command {
		Command::Compile {
			input,
			output,
			args,
		} => commands::compile::run(&cli, input, output, args).await,
		Command::Tx { command } => commands::tx::run(&cli, command).await,
		Command::Fee { command } => commands::fee::run(&cli, command).await,
	}
}
