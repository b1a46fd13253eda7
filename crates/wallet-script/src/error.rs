/// Error types for script and address operations.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Invalid address string (bad Base58 character).
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Decoded address is not 25 bytes.
    #[error("invalid address length for '{0}'")]
    InvalidAddressLength(String),

    /// Address version byte is not a known pay-to-address prefix.
    #[error("address not supported {0}")]
    UnsupportedAddress(String),

    /// Address belongs to a different network than the one expected.
    #[error("address {address} is for {found}, expected {expected}")]
    NetworkMismatch {
        address: String,
        expected: String,
        found: String,
    },

    /// Base58Check checksum does not match.
    #[error("checksum failed")]
    EncodingChecksumFailed,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Not enough data in script to complete a push operation.
    #[error("not enough data")]
    DataTooSmall,

    /// Push data exceeds the largest framable size.
    #[error("data too big")]
    DataTooBig,

    #[error("primitives error: {0}")]
    Primitives(#[from] wallet_primitives::PrimitivesError),
}
