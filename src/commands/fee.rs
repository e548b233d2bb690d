use anyhow::Result;

use crate::cli::{Cli, FeeCommand};
use crate::commands::resolve_rpc;
use crate::config::Config;
use crate::fee::{self, FeeStore};

pub async fn run(cli: &Cli, cmd: &FeeCommand) -> Result<()> {
	let config = Config::load()?;
	let rpc = resolve_rpc(cli, &config);

	match cmd {
		FeeCommand::Get { coin } => {
			let current = fee::fetch_fee(&rpc, *coin).await?;
			println!("Current fee for {}: {current} (per byte)", coin.as_str());
			Ok(())
		}

		FeeCommand::Set { fee, coin } => {
			// Validate locally first; a negative fee never reaches
			// the network.
			let store = FeeStore::with_default(config.fees.default_fee_per_byte);
			store.set_fee(*coin, *fee)?;

			fee::push_fee(&rpc, *coin, *fee as u64).await?;
			println!("Fee for {} set to {fee} (per byte)", coin.as_str());
			Ok(())
		}
	}
}
