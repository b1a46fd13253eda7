//! Single-input transaction builder.
//!
//! Validates a proposed spend against one already-known prior output and
//! produces a one-input transaction paying the destination. Coin selection and
//! fees are left to the caller.

use crate::config::{BuilderConfig, OutputPolicy};
use crate::input::{TxIn, PREVIOUS_TX_HASH_LEN};
use crate::output::TxOut;
use crate::transaction::Transaction;
use crate::TransactionError;

/// The prior output being spent, as known to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AvailableOutput {
    pub value: u64,
}

impl AvailableOutput {
    pub fn new(value: u64) -> Self {
        AvailableOutput { value }
    }
}

/// Build a transaction with the default configuration.
///
/// See [`build_with_config`].
pub fn build(
    destination_address: &str,
    previous_tx_hash_hex: &str,
    amount_to_spend: u64,
    available: &AvailableOutput,
) -> Result<Transaction, TransactionError> {
    build_with_config(
        destination_address,
        previous_tx_hash_hex,
        amount_to_spend,
        available,
        &BuilderConfig::default(),
    )
}

/// Build a one-input transaction spending `available`.
///
/// # Arguments
/// * `destination_address` - Address receiving the payment. Resolved when signing.
/// * `previous_tx_hash_hex` - Hex of the 32-byte previous transaction hash, carried as given.
/// * `amount_to_spend` - Requested amount; must not exceed `available.value`.
/// * `available` - The prior output being spent.
/// * `config` - Output policy, referenced index and sequence.
///
/// # Returns
/// The transaction, `InsufficientFunds` if the request exceeds the available
/// value, or `MalformedField` if the hash is not valid hex of exactly 32 bytes.
pub fn build_with_config(
    destination_address: &str,
    previous_tx_hash_hex: &str,
    amount_to_spend: u64,
    available: &AvailableOutput,
    config: &BuilderConfig,
) -> Result<Transaction, TransactionError> {
    if amount_to_spend > available.value {
        return Err(TransactionError::InsufficientFunds {
            requested: amount_to_spend,
            available: available.value,
        });
    }

    let previous_tx_hash = decode_previous_tx_hash(previous_tx_hash_hex)?;

    let mut tx = Transaction::initialize();
    tx.add_input(
        TxIn::new(previous_tx_hash, config.previous_output_index).with_sequence(config.sequence),
    );

    match &config.output_policy {
        OutputPolicy::ForwardAvailable => {
            tx.add_output(TxOut::to_address(available.value, destination_address));
        }
        OutputPolicy::SpendExact { change_address } => {
            tx.add_output(TxOut::to_address(amount_to_spend, destination_address));
            let change = available.value - amount_to_spend;
            match change_address {
                Some(addr) if change > 0 => {
                    tx.add_output(TxOut::to_address(change, addr.as_str()));
                }
                _ => {}
            }
        }
    }

    Ok(tx)
}

fn decode_previous_tx_hash(hex_str: &str) -> Result<Vec<u8>, TransactionError> {
    let bytes = hex::decode(hex_str)
        .map_err(|e| TransactionError::malformed("previous transaction hash", e.to_string()))?;
    if bytes.len() != PREVIOUS_TX_HASH_LEN {
        return Err(TransactionError::malformed(
            "previous transaction hash",
            format!("expected {} bytes, got {}", PREVIOUS_TX_HASH_LEN, bytes.len()),
        ));
    }
    Ok(bytes)
}
