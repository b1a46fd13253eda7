//! Deterministic wire renderings of a transaction.
//!
//! The unsigned form is the signature preimage: inputs carry no scripts and
//! outputs carry only their value. The signed form embeds one unlocking
//! script per input and one locking script per output. Both fail closed: an
//! error is returned before any bytes escape.

use wallet_primitives::util::{VarInt, WireReader, WireWriter};
use wallet_primitives::PrimitivesError;
use wallet_script::Script;

use crate::config::SerializerConfig;
use crate::input::PREVIOUS_TX_HASH_LEN;
use crate::transaction::Transaction;
use crate::TransactionError;

/// Render the unsigned form with the default configuration.
pub fn serialize_unsigned(tx: &Transaction) -> Result<Vec<u8>, TransactionError> {
    serialize_unsigned_with(tx, &SerializerConfig::default())
}

/// Render the unsigned form.
///
/// version, input count, per input (hash, index, sequence), output count,
/// per output (value), then the lock time if `config.emit_lock_time`.
pub fn serialize_unsigned_with(
    tx: &Transaction,
    config: &SerializerConfig,
) -> Result<Vec<u8>, TransactionError> {
    let mut writer = WireWriter::with_capacity(unsigned_len(tx));
    writer.write_u32_le(tx.version());

    writer.write_varint(VarInt::from(tx.input_count()));
    for input in tx.inputs() {
        input.write_unsigned(&mut writer)?;
    }

    writer.write_varint(VarInt::from(tx.output_count()));
    for output in tx.outputs() {
        output.write_unsigned(&mut writer);
    }

    if config.emit_lock_time {
        writer.write_u32_le(tx.lock_time());
    }
    Ok(writer.into_bytes())
}

/// Render the signed form with the default configuration.
pub fn serialize_signed(
    tx: &Transaction,
    unlocking_scripts: &[Script],
    locking_scripts: &[Script],
) -> Result<Vec<u8>, TransactionError> {
    serialize_signed_with(
        tx,
        unlocking_scripts,
        locking_scripts,
        &SerializerConfig::default(),
    )
}

/// Render the signed form.
///
/// # Arguments
/// * `unlocking_scripts` - One per input, in input order.
/// * `locking_scripts` - One per output, in output order.
///
/// # Returns
/// The bytes, or `MalformedField` if a script list does not match its list
/// length or an input hash is not 32 bytes.
pub fn serialize_signed_with(
    tx: &Transaction,
    unlocking_scripts: &[Script],
    locking_scripts: &[Script],
    config: &SerializerConfig,
) -> Result<Vec<u8>, TransactionError> {
    if unlocking_scripts.len() != tx.input_count() {
        return Err(TransactionError::malformed(
            "unlocking scripts",
            format!(
                "{} scripts for {} inputs",
                unlocking_scripts.len(),
                tx.input_count()
            ),
        ));
    }
    if locking_scripts.len() != tx.output_count() {
        return Err(TransactionError::malformed(
            "locking scripts",
            format!(
                "{} scripts for {} outputs",
                locking_scripts.len(),
                tx.output_count()
            ),
        ));
    }

    let mut writer = WireWriter::new();
    writer.write_u32_le(tx.version());

    writer.write_varint(VarInt::from(tx.input_count()));
    for (input, script) in tx.inputs().iter().zip(unlocking_scripts) {
        input.write_signed(&mut writer, script)?;
    }

    writer.write_varint(VarInt::from(tx.output_count()));
    for (output, script) in tx.outputs().iter().zip(locking_scripts) {
        output.write_signed(&mut writer, script);
    }

    if config.emit_lock_time {
        writer.write_u32_le(tx.lock_time());
    }
    Ok(writer.into_bytes())
}

/// Unsigned form as lowercase hex.
pub fn unsigned_hex(tx: &Transaction) -> Result<String, TransactionError> {
    serialize_unsigned(tx).map(hex::encode)
}

/// Signed form as lowercase hex.
pub fn signed_hex(
    tx: &Transaction,
    unlocking_scripts: &[Script],
    locking_scripts: &[Script],
) -> Result<String, TransactionError> {
    serialize_signed(tx, unlocking_scripts, locking_scripts).map(hex::encode)
}

/// Exact length of the unsigned form without a lock-time trailer.
///
/// 4 + varint(inputs) + 40 per input + varint(outputs) + 8 per output.
pub fn unsigned_len(tx: &Transaction) -> usize {
    4 + VarInt::from(tx.input_count()).length()
        + tx.input_count() * (PREVIOUS_TX_HASH_LEN + 4 + 4)
        + VarInt::from(tx.output_count()).length()
        + tx.output_count() * 8
}

/// An input read back from a signed buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedInput {
    pub previous_tx_hash: [u8; 32],
    pub previous_output_index: u32,
    pub unlocking_script: Script,
    pub sequence: u32,
}

/// An output read back from a signed buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedOutput {
    pub value: u64,
    pub locking_script: Script,
}

/// The fields of a signed buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedTransaction {
    pub version: u32,
    pub inputs: Vec<DecodedInput>,
    pub outputs: Vec<DecodedOutput>,
    /// Present only if the buffer carried a lock-time trailer.
    pub lock_time: Option<u32>,
}

/// Parse a signed-form buffer back into its fields.
///
/// Counts are read with 0xfd, 0xfe and 0xff as discriminators, so a buffer
/// whose count or script length is 253..=255 (written as one bare byte) is
/// likely to be rejected. After the outputs, either nothing or exactly a
/// 4-byte lock time may remain.
pub fn decode_signed(bytes: &[u8]) -> Result<DecodedTransaction, TransactionError> {
    let mut reader = WireReader::new(bytes);

    let version = reader.read_u32_le().map_err(|e| decode_err("version", e))?;

    let input_count = read_count(&mut reader, "input count")?;
    let mut inputs = Vec::with_capacity(input_count.min(reader.remaining() / 41));
    for _ in 0..input_count {
        let hash = reader
            .read_bytes(PREVIOUS_TX_HASH_LEN)
            .map_err(|e| decode_err("previous transaction hash", e))?;
        let mut previous_tx_hash = [0u8; 32];
        previous_tx_hash.copy_from_slice(hash);

        let previous_output_index = reader
            .read_u32_le()
            .map_err(|e| decode_err("previous output index", e))?;
        let unlocking_script = read_script(&mut reader, "unlocking script")?;
        let sequence = reader.read_u32_le().map_err(|e| decode_err("sequence", e))?;

        inputs.push(DecodedInput {
            previous_tx_hash,
            previous_output_index,
            unlocking_script,
            sequence,
        });
    }

    let output_count = read_count(&mut reader, "output count")?;
    let mut outputs = Vec::with_capacity(output_count.min(reader.remaining() / 9));
    for _ in 0..output_count {
        let value = reader.read_u64_le().map_err(|e| decode_err("value", e))?;
        let locking_script = read_script(&mut reader, "locking script")?;
        outputs.push(DecodedOutput {
            value,
            locking_script,
        });
    }

    let lock_time = match reader.remaining() {
        0 => None,
        4 => Some(reader.read_u32_le().map_err(|e| decode_err("lock time", e))?),
        n => {
            return Err(TransactionError::Decode(format!(
                "{} unexpected trailing bytes",
                n
            )))
        }
    };

    Ok(DecodedTransaction {
        version,
        inputs,
        outputs,
        lock_time,
    })
}

fn read_count(reader: &mut WireReader, what: &str) -> Result<usize, TransactionError> {
    let n = reader.read_varint().map_err(|e| decode_err(what, e))?.value();
    usize::try_from(n).map_err(|_| TransactionError::Decode(format!("{} {} too large", what, n)))
}

fn read_script(reader: &mut WireReader, what: &str) -> Result<Script, TransactionError> {
    let len = read_count(reader, what)?;
    let bytes = reader.read_bytes(len).map_err(|e| decode_err(what, e))?;
    Ok(Script::from_bytes(bytes))
}

fn decode_err(what: &str, e: PrimitivesError) -> TransactionError {
    TransactionError::Decode(format!("reading {}: {}", what, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TxIn;
    use crate::output::TxOut;

    fn one_in_one_out() -> Transaction {
        let mut tx = Transaction::with_lock_time(0x5f5e_1000);
        tx.add_input(TxIn::new(vec![0u8; 32], 0));
        tx.add_output(TxOut::to_script(
            100_000_000,
            Script::from_hex("76a914759d6677091e973b9e9d99f19c68fbf43e3f05f988ac").unwrap(),
        ));
        tx
    }

    #[test]
    fn test_unsigned_layout() {
        let tx = one_in_one_out();
        let hex_str = unsigned_hex(&tx).unwrap();
        let expected = format!(
            "01000000{}{}{}{}{}{}",
            "01",
            "00".repeat(32),
            "00000000",
            "ffffffff",
            "01",
            "00e1f50500000000"
        );
        assert_eq!(hex_str, expected);
        assert_eq!(hex_str.len() / 2, unsigned_len(&tx));
    }

    #[test]
    fn test_lock_time_trailer() {
        let tx = one_in_one_out();
        let config = SerializerConfig {
            emit_lock_time: true,
        };
        let bytes = serialize_unsigned_with(&tx, &config).unwrap();
        assert_eq!(bytes.len(), unsigned_len(&tx) + 4);
        assert_eq!(hex::encode(&bytes[bytes.len() - 4..]), "00105e5f");
    }

    #[test]
    fn test_signed_layout() {
        let tx = one_in_one_out();
        let unlock = Script::from_hex("0201020103").unwrap();
        let lock = match &tx.outputs()[0].destination {
            crate::output::Destination::Script(s) => s.clone(),
            _ => unreachable!(),
        };
        let bytes = serialize_signed(&tx, &[unlock], &[lock.clone()]).unwrap();

        let expected = format!(
            "01000000{}{}{}{}{}{}{}{}{}",
            "01",
            "00".repeat(32),
            "00000000",
            "050201020103",
            "ffffffff",
            "01",
            "00e1f50500000000",
            "19",
            lock.to_hex()
        );
        assert_eq!(hex::encode(&bytes), expected);
    }

    #[test]
    fn test_signed_script_count_mismatch() {
        let tx = one_in_one_out();
        let err = serialize_signed(&tx, &[], &[Script::new()]).unwrap_err();
        assert!(matches!(err, TransactionError::MalformedField { .. }));
        let err = serialize_signed(&tx, &[Script::new()], &[]).unwrap_err();
        assert!(matches!(err, TransactionError::MalformedField { .. }));
    }

    #[test]
    fn test_bad_hash_width_fails_both_forms() {
        let mut tx = Transaction::with_lock_time(0);
        tx.add_input(TxIn::new(vec![0u8; 20], 0));
        tx.add_output(TxOut::to_script(1, Script::new()));
        assert!(matches!(
            serialize_unsigned(&tx),
            Err(TransactionError::MalformedField { .. })
        ));
        assert!(matches!(
            serialize_signed(&tx, &[Script::new()], &[Script::new()]),
            Err(TransactionError::MalformedField { .. })
        ));
    }

    #[test]
    fn test_decode_signed_roundtrip() {
        let tx = one_in_one_out();
        let unlock = Script::from_hex("0201020103").unwrap();
        let lock = Script::from_hex("76a914759d6677091e973b9e9d99f19c68fbf43e3f05f988ac").unwrap();
        let bytes = serialize_signed(&tx, &[unlock.clone()], &[lock.clone()]).unwrap();

        let decoded = decode_signed(&bytes).unwrap();
        assert_eq!(decoded.version, 1);
        assert_eq!(decoded.inputs.len(), 1);
        assert_eq!(decoded.inputs[0].previous_tx_hash, [0u8; 32]);
        assert_eq!(decoded.inputs[0].unlocking_script, unlock);
        assert_eq!(decoded.inputs[0].sequence, 0xffff_ffff);
        assert_eq!(decoded.outputs[0].value, 100_000_000);
        assert_eq!(decoded.outputs[0].locking_script, lock);
        assert_eq!(decoded.lock_time, None);

        let with_lock = serialize_signed_with(
            &tx,
            &[unlock],
            &[lock],
            &SerializerConfig {
                emit_lock_time: true,
            },
        )
        .unwrap();
        assert_eq!(decode_signed(&with_lock).unwrap().lock_time, Some(0x5f5e_1000));
    }

    #[test]
    fn test_decode_signed_rejects_truncation_and_trailing() {
        let tx = one_in_one_out();
        let bytes = serialize_signed(&tx, &[Script::new()], &[Script::new()]).unwrap();
        assert!(decode_signed(&bytes[..bytes.len() - 1]).is_err());

        let mut extra = bytes.clone();
        extra.push(0x00);
        assert!(matches!(
            decode_signed(&extra),
            Err(TransactionError::Decode(_))
        ));
        assert!(decode_signed(&[]).is_err());
    }
}
