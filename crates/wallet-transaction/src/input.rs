//! Transaction input referencing a previous output.

use wallet_primitives::util::WireWriter;
use wallet_script::Script;

use crate::config::DEFAULT_SEQUENCE;
use crate::TransactionError;

/// Required width of the previous transaction hash.
pub const PREVIOUS_TX_HASH_LEN: usize = 32;

/// A single input.
///
/// The previous transaction hash is kept as supplied and only checked for
/// width when the input is serialized, so a malformed input can exist but
/// never reaches the wire.
///
/// # Wire format
///
/// | Field                 | Size          | Form     |
/// |-----------------------|---------------|----------|
/// | previous_tx_hash      | 32 bytes      | both     |
/// | previous_output_index | 4 bytes (LE)  | both     |
/// | script length         | VarInt        | signed   |
/// | unlocking script      | variable      | signed   |
/// | sequence              | 4 bytes (LE)  | both     |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxIn {
    /// Carried byte-for-byte; no endianness transform is applied.
    pub previous_tx_hash: Vec<u8>,
    pub previous_output_index: u32,
    /// Defaults to `0xFFFFFFFF` (final).
    pub sequence: u32,
}

impl TxIn {
    /// Create an input with a final sequence number.
    pub fn new(previous_tx_hash: Vec<u8>, previous_output_index: u32) -> Self {
        TxIn {
            previous_tx_hash,
            previous_output_index,
            sequence: DEFAULT_SEQUENCE,
        }
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    fn checked_hash(&self) -> Result<&[u8], TransactionError> {
        if self.previous_tx_hash.len() != PREVIOUS_TX_HASH_LEN {
            return Err(TransactionError::malformed(
                "previous transaction hash",
                format!(
                    "expected {} bytes, got {}",
                    PREVIOUS_TX_HASH_LEN,
                    self.previous_tx_hash.len()
                ),
            ));
        }
        Ok(&self.previous_tx_hash)
    }

    /// Write the preimage form: hash, index, sequence. No script bytes.
    pub(crate) fn write_unsigned(&self, writer: &mut WireWriter) -> Result<(), TransactionError> {
        writer.write_bytes(self.checked_hash()?);
        writer.write_u32_le(self.previous_output_index);
        writer.write_u32_le(self.sequence);
        Ok(())
    }

    /// Write the signed form with `unlocking_script` between index and sequence.
    pub(crate) fn write_signed(
        &self,
        writer: &mut WireWriter,
        unlocking_script: &Script,
    ) -> Result<(), TransactionError> {
        writer.write_bytes(self.checked_hash()?);
        writer.write_u32_le(self.previous_output_index);
        writer.write_var_bytes(unlocking_script.to_bytes());
        writer.write_u32_le(self.sequence);
        Ok(())
    }
}
