//! Core transaction type.
//!
//! A transaction is created once with [`Transaction::initialize`], grown only
//! by appending inputs and outputs, then serialized. There is no removal;
//! counts on the wire are always the current list lengths.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::input::TxIn;
use crate::output::TxOut;

/// The only transaction version this wallet writes.
pub const TX_VERSION: u32 = 1;

/// A legacy value-transfer transaction.
///
/// # Wire format
///
/// | Field        | Size                      |
/// |--------------|---------------------------|
/// | version      | 4 bytes (LE)              |
/// | input count  | VarInt                    |
/// | inputs       | variable (per input)      |
/// | output count | VarInt                    |
/// | outputs      | variable (per output)     |
/// | lock_time    | 4 bytes (LE), optional    |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    version: u32,
    inputs: Vec<TxIn>,
    outputs: Vec<TxOut>,
    lock_time: u32,
}

impl Transaction {
    /// Create an empty transaction, capturing the current unix time (seconds)
    /// as its lock time.
    ///
    /// The lock time is only written when the serializer is asked to emit it.
    pub fn initialize() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u32::try_from(d.as_secs()).unwrap_or(u32::MAX))
            .unwrap_or(0);
        Self::with_lock_time(now)
    }

    /// Create an empty transaction with an explicit lock time.
    pub fn with_lock_time(lock_time: u32) -> Self {
        Transaction {
            version: TX_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time,
        }
    }

    pub fn add_input(&mut self, input: TxIn) {
        self.inputs.push(input);
    }

    pub fn add_output(&mut self, output: TxOut) {
        self.outputs.push(output);
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn inputs(&self) -> &[TxIn] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TxOut] {
        &self.outputs
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn lock_time(&self) -> u32 {
        self.lock_time
    }

    /// Sum of all output values, or `None` on overflow.
    pub fn total_output_value(&self) -> Option<u64> {
        self.outputs
            .iter()
            .try_fold(0u64, |acc, o| acc.checked_add(o.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_is_empty_version_one() {
        let tx = Transaction::initialize();
        assert_eq!(tx.version(), 1);
        assert_eq!(tx.input_count(), 0);
        assert_eq!(tx.output_count(), 0);
        assert!(tx.lock_time() > 0);
    }

    #[test]
    fn test_counts_follow_appends() {
        let mut tx = Transaction::with_lock_time(0);
        tx.add_input(TxIn::new(vec![0u8; 32], 0));
        tx.add_input(TxIn::new(vec![1u8; 32], 1));
        tx.add_output(TxOut::to_address(5, "1BitcoinEaterAddressDontSendf59kuE"));
        assert_eq!(tx.input_count(), 2);
        assert_eq!(tx.inputs().len(), 2);
        assert_eq!(tx.output_count(), 1);
        assert_eq!(tx.inputs()[1].previous_output_index, 1);
        assert_eq!(tx.total_output_value(), Some(5));
    }

    #[test]
    fn test_total_output_value_overflow() {
        let mut tx = Transaction::with_lock_time(0);
        tx.add_output(TxOut::to_address(u64::MAX, "a"));
        tx.add_output(TxOut::to_address(1, "b"));
        assert_eq!(tx.total_output_value(), None);
    }
}
