use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::fee::CoinType;

#[derive(Parser)]
#[command(
	name = "btm-contract",
	about = "Compile Equity contracts and build/submit transactions through a Bytom node.",
	version
)]
pub struct Cli {
	/// Override the node URL from config.
	#[arg(long, global = true)]
	pub node_url: Option<String>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
	/// Compile a contract source file on the node.
	Compile {
		/// Contract source file.
		#[arg(short = 'i', long)]
		input: PathBuf,

		/// Where to write the compiled program document.
		#[arg(short = 'o', long)]
		output: PathBuf,

		/// Instantiation argument, `type:value` with type one of
		/// bool, int, str.  Repeatable; order matches the contract's
		/// parameter list.  Omit entirely for an uninstantiated template.
		#[arg(long = "arg")]
		args: Vec<String>,
	},

	/// Build and submit transactions.
	Tx {
		#[command(subcommand)]
		command: TxCommand,
	},

	/// Inspect and retune the node's fee rate.
	Fee {
		#[command(subcommand)]
		command: FeeCommand,
	},
}

#[derive(Subcommand)]
pub enum TxCommand {
	/// Build a transaction from a build-spec document.
	Build {
		/// Build-spec JSON file.
		#[arg(short = 'i', long)]
		input: PathBuf,

		/// Where to write the transaction document.
		#[arg(short = 'o', long)]
		output: PathBuf,

		/// Coin type the fee quote applies to.
		#[arg(long, value_enum, default_value_t = CoinType::Regtest)]
		coin: CoinType,

		/// Fee per byte to use instead of asking the node.
		#[arg(long)]
		fee: Option<i64>,
	},

	/// Broadcast a built transaction.
	Submit {
		/// Transaction document JSON file.
		#[arg(short = 'i', long)]
		input: PathBuf,
	},
}

#[derive(Subcommand)]
pub enum FeeCommand {
	/// Show the node's current fee rate.
	Get {
		#[arg(long, value_enum, default_value_t = CoinType::Regtest)]
		coin: CoinType,
	},

	/// Set the node's fee rate (per byte).
	Set {
		fee: i64,

		#[arg(long, value_enum, default_value_t = CoinType::Regtest)]
		coin: CoinType,
	},
}
