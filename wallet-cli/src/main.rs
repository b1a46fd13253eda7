//! # wallet-cli
//!
//! Driver for the wallet library. Subcommands:
//!
//! - `generate` prints a new private key and its address
//! - `demo` builds (and optionally signs) the reference spend
//! - `decode` parses a signed transaction back into its fields

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use btc_wallet::primitives::ec::PrivateKey;
use btc_wallet::script::Script;
use btc_wallet::transaction::serializer::{decode_signed, unsigned_hex, DecodedTransaction};
use btc_wallet::transaction::{
    build, sign_with_config, AvailableOutput, PreimageDigest, SignerConfig, Transaction,
};

use cli::{Commands, DecodeArgs, DemoArgs, GenerateArgs, WalletCli};

/// Destination of the reference spend.
const DEMO_DESTINATION: &str = "1BitcoinEaterAddressDontSendf59kuE";
const DEMO_AMOUNT: u64 = 1;
const DEMO_AVAILABLE: u64 = 100_000_000;

fn main() -> Result<()> {
    let cli = WalletCli::parse();
    logging::init_logging(logging::DEFAULT_FILTER, cli.log_format);

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Demo(args) => run_demo(args),
        Commands::Decode(args) => run_decode(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let wallet = btc_wallet::generate_for(args.network).context("failed to generate wallet")?;
    tracing::info!(network = %wallet.network, address = %wallet.address, "wallet generated");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&wallet)?);
    } else {
        println!("address:     {}", wallet.address);
        println!("private key: {}", wallet.private_key_hex);
    }
    Ok(())
}

fn demo_transaction() -> Result<Transaction> {
    let previous_tx_hash = "00".repeat(32);
    build(
        DEMO_DESTINATION,
        &previous_tx_hash,
        DEMO_AMOUNT,
        &AvailableOutput::new(DEMO_AVAILABLE),
    )
    .context("failed to build demo transaction")
}

fn run_demo(args: DemoArgs) -> Result<()> {
    let tx = demo_transaction()?;
    tracing::info!(
        inputs = tx.input_count(),
        outputs = tx.output_count(),
        lock_time = tx.lock_time(),
        "demo transaction built"
    );

    println!("unsigned: {}", unsigned_hex(&tx)?);

    if !args.sign {
        return Ok(());
    }

    let key = PrivateKey::generate().context("failed to generate signing key")?;
    let config = SignerConfig {
        digest: if args.double_sha {
            PreimageDigest::Double
        } else {
            PreimageDigest::Single
        },
        ..Default::default()
    };
    let signed = sign_with_config(&tx, &key, &config).context("failed to sign demo transaction")?;
    tracing::info!(txid = %signed.txid_hex(), bytes = signed.bytes.len(), "demo transaction signed");

    println!("signing key: {}", key.to_hex());
    println!("signed:   {}", signed.to_hex());
    println!("txid:     {}", signed.txid_hex());
    Ok(())
}

#[derive(Serialize)]
struct InputView {
    previous_tx_hash: String,
    previous_output_index: u32,
    unlocking_script: String,
    sequence: u32,
}

#[derive(Serialize)]
struct OutputView {
    value: u64,
    locking_script: String,
}

#[derive(Serialize)]
struct TransactionView {
    version: u32,
    inputs: Vec<InputView>,
    outputs: Vec<OutputView>,
    lock_time: Option<u32>,
}

/// Asm listing of a script, or `hex:<bytes>` if it does not parse.
fn render_script(script: &Script) -> String {
    match script.chunks() {
        Ok(_) => script.to_asm(),
        Err(e) => {
            tracing::warn!(error = %e, "script does not parse, showing hex");
            format!("hex:{}", script.to_hex())
        }
    }
}

impl From<DecodedTransaction> for TransactionView {
    fn from(tx: DecodedTransaction) -> Self {
        TransactionView {
            version: tx.version,
            inputs: tx
                .inputs
                .into_iter()
                .map(|i| InputView {
                    previous_tx_hash: hex::encode(i.previous_tx_hash),
                    previous_output_index: i.previous_output_index,
                    unlocking_script: render_script(&i.unlocking_script),
                    sequence: i.sequence,
                })
                .collect(),
            outputs: tx
                .outputs
                .into_iter()
                .map(|o| OutputView {
                    value: o.value,
                    locking_script: render_script(&o.locking_script),
                })
                .collect(),
            lock_time: tx.lock_time,
        }
    }
}

fn run_decode(args: DecodeArgs) -> Result<()> {
    let bytes = hex::decode(args.hex.trim()).context("input is not valid hex")?;
    tracing::debug!(len = bytes.len(), "decoding signed transaction");

    let decoded = decode_signed(&bytes).context("failed to decode signed transaction")?;
    let view = TransactionView::from(decoded);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_transaction_matches_reference_shape() {
        let tx = demo_transaction().unwrap();
        assert_eq!(tx.input_count(), 1);
        assert_eq!(tx.outputs()[0].value, DEMO_AVAILABLE);
        assert_eq!(
            unsigned_hex(&tx).unwrap(),
            format!("0100000001{}00000000ffffffff0100e1f50500000000", "00".repeat(32))
        );
    }

    #[test]
    fn decoded_view_renders_asm() {
        let key = PrivateKey::from_hex(&format!("{}01", "00".repeat(31))).unwrap();
        let tx = demo_transaction().unwrap();
        let signed = sign_with_config(&tx, &key, &SignerConfig::default()).unwrap();
        let view = TransactionView::from(decode_signed(&signed.bytes).unwrap());
        assert_eq!(view.outputs[0].locking_script.split(' ').next(), Some("OP_DUP"));
        assert!(view.inputs[0].unlocking_script.ends_with(&key.pub_key().to_hex()));
    }

    #[test]
    fn unparsable_script_falls_back_to_hex() {
        // 0x05 announces five bytes but only one follows.
        let truncated = Script::from_bytes(&[0x05, 0xaa]);
        assert_eq!(render_script(&truncated), "hex:05aa");
        assert_eq!(render_script(&Script::new()), "");
        assert_eq!(render_script(&Script::from_hex("76a9").unwrap()), "OP_DUP OP_HASH160");
    }
}
