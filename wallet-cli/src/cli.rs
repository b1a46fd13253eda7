//! Command-line arguments for `wallet-cli`, defined with `clap` derive.

use clap::{Parser, Subcommand, ValueEnum};

use btc_wallet::script::Network;

/// Generate wallet keys and build legacy transactions.
#[derive(Parser, Debug)]
#[command(name = "wallet-cli", about = "Single-signature wallet tool", version)]
pub struct WalletCli {
    /// Log output format. Logs go to stderr.
    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty, global = true)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a private key and its address.
    Generate(GenerateArgs),
    /// Build the reference one-input spend and print its unsigned form.
    Demo(DemoArgs),
    /// Decode a signed transaction given as hex.
    Decode(DecodeArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Network whose address version byte is used: mainnet or testnet.
    #[arg(long, env = "WALLET_NETWORK", default_value = "mainnet")]
    pub network: Network,

    /// Print a JSON object instead of plain lines.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Also sign with a freshly generated key and print the signed form.
    #[arg(long)]
    pub sign: bool,

    /// Hash the preimage twice before signing.
    #[arg(long, requires = "sign")]
    pub double_sha: bool,
}

#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Signed transaction bytes as hex.
    pub hex: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        WalletCli::command().debug_assert();
    }

    #[test]
    fn parses_generate_flags() {
        let cli = WalletCli::try_parse_from(["wallet-cli", "generate", "--network", "testnet", "--json"])
            .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.network, Network::Testnet);
                assert!(args.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn double_sha_requires_sign() {
        assert!(WalletCli::try_parse_from(["wallet-cli", "demo", "--double-sha"]).is_err());
        assert!(WalletCli::try_parse_from(["wallet-cli", "demo", "--sign", "--double-sha"]).is_ok());
    }

    #[test]
    fn log_format_is_global() {
        let cli = WalletCli::try_parse_from(["wallet-cli", "decode", "00", "--log-format", "json"])
            .unwrap();
        assert_eq!(cli.log_format, LogFormatArg::Json);
    }
}
