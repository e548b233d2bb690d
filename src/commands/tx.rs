use anyhow::Result;

use crate::cli::{Cli, TxCommand};
use crate::commands::{read_document, resolve_rpc, write_document};
use crate::config::Config;
use crate::fee::{self, FeeStore};
use crate::submit::submit;
use crate::tx_builder::{build, BuildSpec, TransactionDescriptor};

pub async fn run(cli: &Cli, cmd: &TxCommand) -> Result<()> {
	let config = Config::load()?;
	let rpc = resolve_rpc(cli, &config);

	match cmd {
		TxCommand::Build {
			input,
			output,
			coin,
			fee,
		} => {
			let spec = BuildSpec::from_value(read_document(input)?)?;

			// Seed the store from --fee, or from the node's current
			// rate so the build prices against live fee policy.
			let fees = FeeStore::with_default(config.fees.default_fee_per_byte);
			match fee {
				Some(rate) => fees.set_fee(*coin, *rate)?,
				None => {
					let current = fee::fetch_fee(&rpc, *coin).await?;
					fees.set_fee(*coin, current as i64)?;
				}
			}

			let tx = build(&rpc, &fees, &spec, *coin).await?;
			write_document(output, &tx)?;
			Ok(())
		}

		TxCommand::Submit { input } => {
			let tx = TransactionDescriptor::from_value(read_document(input)?)?;
			let receipt = submit(&rpc, &config.duplicate_matcher(), &tx).await?;
			println!("Transaction broadcast.");
			println!("TX: {}", receipt.transaction_id);
			Ok(())
		}
	}
}
