/// wallet-primitives - Cryptographic primitives, hashing, and wire utilities.
///
/// This crate provides the foundational building blocks for the wallet:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Base58 and Base58Check encoding/decoding
/// - Variable-length integer framing and little-endian wire writer/reader
/// - Elliptic curve cryptography (secp256k1 keys, ECDSA signatures, keypairs)

pub mod hash;
pub mod util;
pub mod base58;
pub mod ec;

mod error;
pub use error::PrimitivesError;
