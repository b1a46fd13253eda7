//! Script chunk parsing and push-data framing.
//!
//! A script chunk is either an opcode or a data push with its associated bytes.
//! Unlocking scripts are built as a sequence of length-prefixed pushes, so the
//! framing here is what puts the signature and public key on the wire.

use crate::opcodes::*;
use crate::ScriptError;

/// A single parsed element of a script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes (1-75 bytes), this is the length.
    pub op: u8,
    /// The data payload, if this chunk is a push operation.
    pub data: Option<Vec<u8>>,
}

impl ScriptChunk {
    /// Render the chunk for an ASM listing: pushes as hex, opcodes by name.
    pub fn to_asm_string(&self) -> String {
        match &self.data {
            Some(data) => hex::encode(data),
            None => opcode_to_string(self.op),
        }
    }
}

/// Decode raw script bytes into a vector of `ScriptChunk` values.
///
/// Handles OP_DATA_1..OP_DATA_75 (direct push) and OP_PUSHDATA1/2/4
/// (extended push). Every other byte is a bare opcode.
///
/// # Returns
/// The parsed chunks, or `ScriptError::DataTooSmall` if a push is truncated.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let op = bytes[pos];
        pos += 1;

        let length = match op {
            OP_DATA_1..=OP_DATA_75 => op as usize,
            OP_PUSHDATA1 => read_length(bytes, &mut pos, 1)?,
            OP_PUSHDATA2 => read_length(bytes, &mut pos, 2)?,
            OP_PUSHDATA4 => read_length(bytes, &mut pos, 4)?,
            _ => {
                chunks.push(ScriptChunk { op, data: None });
                continue;
            }
        };

        if bytes.len() < pos + length {
            return Err(ScriptError::DataTooSmall);
        }
        chunks.push(ScriptChunk {
            op,
            data: Some(bytes[pos..pos + length].to_vec()),
        });
        pos += length;
    }

    Ok(chunks)
}

/// Read a `width`-byte little-endian push length.
fn read_length(bytes: &[u8], pos: &mut usize, width: usize) -> Result<usize, ScriptError> {
    if bytes.len() < *pos + width {
        return Err(ScriptError::DataTooSmall);
    }
    let mut buf = [0u8; 4];
    buf[..width].copy_from_slice(&bytes[*pos..*pos + width]);
    *pos += width;
    Ok(u32::from_le_bytes(buf) as usize)
}

/// Compute the push prefix for a data payload of the given length.
///
/// Chooses the minimal form: the length itself for up to 75 bytes, then
/// OP_PUSHDATA1, OP_PUSHDATA2 and OP_PUSHDATA4 with a little-endian length.
///
/// # Returns
/// The prefix bytes, or `ScriptError::DataTooBig` above 4 GiB.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= OP_DATA_75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xFF {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xFFFF {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len as u64 <= 0xFFFF_FFFF {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_script_simple() {
        let bytes = hex::decode("05000102030401ff02abcd").unwrap();
        let parts = decode_script(&bytes).unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].data.as_deref(), Some(&[0xff][..]));
    }

    #[test]
    fn test_decode_and_reframe_roundtrip() {
        let script_hex = "05000102030401ff02abcd";
        let bytes = hex::decode(script_hex).unwrap();
        let parts = decode_script(&bytes).unwrap();

        let mut script = crate::Script::new();
        for data in parts.iter().filter_map(|p| p.data.as_deref()) {
            script.append_push_data(data).unwrap();
        }
        assert_eq!(script.to_hex(), script_hex);
    }

    #[test]
    fn test_decode_script_empty() {
        assert!(decode_script(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_decode_p2pkh_template() {
        let bytes =
            hex::decode("76a91400ac6144c4db7b5790f343cf0477a65fb8a02eb788ac").unwrap();
        let parts = decode_script(&bytes).unwrap();
        let ops: Vec<u8> = parts.iter().map(|c| c.op).collect();
        assert_eq!(
            ops,
            vec![OP_DUP, OP_HASH160, OP_DATA_20, OP_EQUALVERIFY, OP_CHECKSIG]
        );
        assert_eq!(parts[2].data.as_ref().map(Vec::len), Some(20));
    }

    #[test]
    fn test_decode_script_truncated_direct_push() {
        // 0x05 says "push 5 bytes" but only 3 bytes follow
        let bytes = hex::decode("05000000").unwrap();
        assert!(matches!(decode_script(&bytes), Err(ScriptError::DataTooSmall)));
    }

    #[test]
    fn test_decode_script_pushdata1() {
        let data = b"testing";
        let mut script_bytes = vec![OP_PUSHDATA1, data.len() as u8];
        script_bytes.extend_from_slice(data);
        let parts = decode_script(&script_bytes).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].op, OP_PUSHDATA1);
        assert_eq!(parts[0].data.as_deref(), Some(&data[..]));

        // claims 5 bytes but only 3 follow
        assert!(decode_script(&hex::decode("4c05000000").unwrap()).is_err());
    }

    #[test]
    fn test_decode_script_pushdata_missing_length() {
        assert!(decode_script(&[OP_PUSHDATA1]).is_err());
        assert!(decode_script(&[OP_PUSHDATA2, 0x01]).is_err());
        assert!(decode_script(&[OP_PUSHDATA4, 0x01, 0x00]).is_err());
    }

    #[test]
    fn test_push_data_prefix_boundaries() {
        assert_eq!(push_data_prefix(0).unwrap(), vec![0u8]);
        assert_eq!(push_data_prefix(33).unwrap(), vec![OP_DATA_33]);
        assert_eq!(push_data_prefix(71).unwrap(), vec![71u8]);
        assert_eq!(push_data_prefix(75).unwrap(), vec![75u8]);
        assert_eq!(push_data_prefix(76).unwrap(), vec![OP_PUSHDATA1, 76]);
        assert_eq!(push_data_prefix(255).unwrap(), vec![OP_PUSHDATA1, 255]);
        assert_eq!(push_data_prefix(256).unwrap(), vec![OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(push_data_prefix(65535).unwrap(), vec![OP_PUSHDATA2, 0xff, 0xff]);
        assert_eq!(
            push_data_prefix(65536).unwrap(),
            vec![OP_PUSHDATA4, 0x00, 0x00, 0x01, 0x00]
        );
    }

    #[test]
    fn test_chunk_to_asm_string() {
        let push = ScriptChunk {
            op: OP_DATA_20,
            data: Some(vec![0xab; 20]),
        };
        assert_eq!(push.to_asm_string(), "ab".repeat(20));

        let op = ScriptChunk {
            op: OP_DUP,
            data: None,
        };
        assert_eq!(op.to_asm_string(), "OP_DUP");
    }
}
