use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::Cli;
use crate::commands::{resolve_rpc, write_document};
use crate::compile::{compile, ContractArg};
use crate::config::Config;

pub async fn run(cli: &Cli, input: &Path, output: &Path, raw_args: &[String]) -> Result<()> {
	let config = Config::load()?;
	let rpc = resolve_rpc(cli, &config);

	let source = std::fs::read_to_string(input)?;
	let args = raw_args
		.iter()
		.map(|raw| parse_arg(raw))
		.collect::<Result<Vec<_>>>()?;
	let args = if args.is_empty() { None } else { Some(args.as_slice()) };

	let compiled = compile(&rpc, &source, args).await?;
	write_document(output, &compiled)?;
	Ok(())
}

/// Parse a `type:value` instantiation argument from the command line.
fn parse_arg(raw: &str) -> Result<ContractArg> {
	let Some((kind, value)) = raw.split_once(':') else {
		bail!("argument must be type:value, got {raw:?}");
	};
	match kind {
		"bool" => Ok(ContractArg::Boolean(value.parse()?)),
		"int" => Ok(ContractArg::Integer(value.parse()?)),
		"str" => Ok(ContractArg::String(value.to_owned())),
		other => bail!("unknown argument type {other:?}, expected bool, int, or str"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_each_argument_type() {
		assert_eq!(parse_arg("bool:true").unwrap(), ContractArg::Boolean(true));
		assert_eq!(parse_arg("int:1000").unwrap(), ContractArg::Integer(1000));
		assert_eq!(
			parse_arg("str:00634e3bc1d42352").unwrap(),
			ContractArg::String("00634e3bc1d42352".into())
		);
	}

	#[test]
	fn value_may_itself_contain_colons() {
		assert_eq!(
			parse_arg("str:a:b:c").unwrap(),
			ContractArg::String("a:b:c".into())
		);
	}

	#[test]
	fn rejects_malformed_arguments() {
		assert!(parse_arg("true").is_err());
		assert!(parse_arg("float:1.5").is_err());
		assert!(parse_arg("int:ten").is_err());
	}
}
