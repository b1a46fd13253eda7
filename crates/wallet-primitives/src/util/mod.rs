//! Binary framing for the transaction wire format.
//!
//! Provides the `VarInt` length prefix and the `WireWriter` / `WireReader`
//! pair used by the transaction serializer. All multi-byte integers are
//! little-endian.

use crate::PrimitivesError;

// ---------------------------------------------------------------------------
// VarInt
// ---------------------------------------------------------------------------

/// Discriminator introducing a 2-byte little-endian value.
pub const VARINT_U16: u8 = 0xfd;
/// Discriminator introducing a 4-byte little-endian value.
pub const VARINT_U32: u8 = 0xfe;
/// Discriminator introducing an 8-byte little-endian value.
pub const VARINT_U64: u8 = 0xff;

/// Largest value written as a single bare byte.
///
/// This wallet writes every value up to and including 255 as one byte. The
/// usual compact-size convention stops at 252 so that 0xfd..=0xff are only
/// ever discriminators; counts of 253, 254 and 255 therefore collide with
/// the discriminators here and cannot be read back unambiguously.
pub const VARINT_SINGLE_BYTE_MAX: u64 = 0xff;

/// A variable-length integer used for counts and script lengths.
///
/// Encodes to 1, 3, 5, or 9 bytes depending on the magnitude of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Return the wire-format byte length of this VarInt.
    ///
    /// # Returns
    /// 1, 3, 5, or 9 depending on the value.
    pub fn length(&self) -> usize {
        if self.0 <= VARINT_SINGLE_BYTE_MAX {
            1
        } else if self.0 <= u16::MAX as u64 {
            3
        } else if self.0 <= u32::MAX as u64 {
            5
        } else {
            9
        }
    }

    /// Encode the VarInt into a new byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.length()];
        self.put_bytes(&mut buf);
        buf
    }

    /// Write the VarInt into a destination buffer.
    ///
    /// The buffer must be at least `self.length()` bytes long.
    ///
    /// # Returns
    /// The number of bytes written.
    pub fn put_bytes(&self, dst: &mut [u8]) -> usize {
        let v = self.0;
        if v <= VARINT_SINGLE_BYTE_MAX {
            dst[0] = v as u8;
            1
        } else if v <= u16::MAX as u64 {
            dst[0] = VARINT_U16;
            dst[1..3].copy_from_slice(&(v as u16).to_le_bytes());
            3
        } else if v <= u32::MAX as u64 {
            dst[0] = VARINT_U32;
            dst[1..5].copy_from_slice(&(v as u32).to_le_bytes());
            5
        } else {
            dst[0] = VARINT_U64;
            dst[1..9].copy_from_slice(&v.to_le_bytes());
            9
        }
    }

    /// Return the underlying u64 value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VarInt {
    fn from(v: u64) -> Self {
        VarInt(v)
    }
}

impl From<usize> for VarInt {
    fn from(v: usize) -> Self {
        VarInt(v as u64)
    }
}

/// Encode a count as its VarInt wire form.
pub fn encode_varint(count: u64) -> Vec<u8> {
    VarInt(count).to_bytes()
}

// ---------------------------------------------------------------------------
// WireWriter
// ---------------------------------------------------------------------------

/// A buffer-based writer for transaction wire data.
///
/// Wraps a `Vec<u8>` and appends fixed-size integers and VarInt values in
/// little-endian order.
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        WireWriter { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        WireWriter { buf: Vec::with_capacity(capacity) }
    }

    /// Append raw bytes to the buffer.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    /// Append a little-endian u32 (4 bytes) to the buffer.
    pub fn write_u32_le(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a little-endian u64 (8 bytes) to the buffer.
    pub fn write_u64_le(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_le_bytes());
    }

    /// Append a VarInt to the buffer.
    pub fn write_varint(&mut self, varint: VarInt) {
        let start = self.buf.len();
        self.buf.resize(start + varint.length(), 0);
        varint.put_bytes(&mut self.buf[start..]);
    }

    /// Append a VarInt length prefix followed by the bytes it describes.
    pub fn write_var_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(VarInt::from(bytes.len()));
        self.write_bytes(bytes);
    }

    /// Consume the writer and return the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for WireWriter {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// WireReader
// ---------------------------------------------------------------------------

/// A cursor-based reader over wire data produced by `WireWriter`.
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        WireReader { data, pos: 0 }
    }

    /// Read `n` bytes and advance the position.
    ///
    /// # Returns
    /// A byte slice of length `n`, or `UnexpectedEof` if insufficient data remains.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], PrimitivesError> {
        if n > self.remaining() {
            return Err(PrimitivesError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, PrimitivesError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, PrimitivesError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, PrimitivesError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64_le(&mut self) -> Result<u64, PrimitivesError> {
        let bytes = self.read_bytes(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(arr))
    }

    /// Read a VarInt and advance the position accordingly.
    ///
    /// A leading 0xfd/0xfe/0xff is always treated as a discriminator. A value
    /// behind a discriminator that `VarInt::put_bytes` would have written in
    /// a shorter form is rejected, which catches most misreads of the bare
    /// single-byte counts 253..=255.
    pub fn read_varint(&mut self) -> Result<VarInt, PrimitivesError> {
        let first = self.read_u8()?;
        let (value, min) = match first {
            VARINT_U64 => (self.read_u64_le()?, u32::MAX as u64 + 1),
            VARINT_U32 => (self.read_u32_le()? as u64, u16::MAX as u64 + 1),
            VARINT_U16 => (self.read_u16_le()? as u64, VARINT_SINGLE_BYTE_MAX + 1),
            b => return Ok(VarInt(b as u64)),
        };
        if value < min {
            return Err(PrimitivesError::AmbiguousVarInt(format!(
                "value {} behind discriminator 0x{:02x}",
                value, first
            )));
        }
        Ok(VarInt(value))
    }

    /// Return the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}
