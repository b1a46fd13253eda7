//! secp256k1 private key.
//!
//! Wraps a k256 signing key and adds fallible OS-entropy generation,
//! hex and WIF serialization, and digest signing.

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::base58;
use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// Mainnet WIF prefix byte.
pub const MAINNET_WIF_PREFIX: u8 = 0x80;

/// Testnet WIF prefix byte.
pub const TESTNET_WIF_PREFIX: u8 = 0xef;

/// Compression flag byte appended to WIF for compressed public keys.
const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256k1 private key.
///
/// The scalar is held by a k256 `SigningKey`, which zeroizes itself on drop.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new private key from operating-system entropy.
    ///
    /// 32 bytes are drawn from `OsRng` and interpreted as a big-endian scalar.
    /// A failing entropy source or a draw outside `[1, n-1]` is reported as
    /// `PrimitivesError::KeyGeneration`; no fallback source is tried.
    pub fn generate() -> Result<Self, PrimitivesError> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate from a caller-supplied random source, drawing exactly once.
    pub(crate) fn generate_with<R: RngCore + ?Sized>(rng: &mut R) -> Result<Self, PrimitivesError> {
        let mut seed = [0u8; PRIVATE_KEY_BYTES_LEN];
        let drawn = rng
            .try_fill_bytes(&mut seed)
            .map_err(|e| PrimitivesError::KeyGeneration(format!("entropy source failed: {}", e)));

        let result = drawn.and_then(|()| {
            SigningKey::from_bytes(k256::FieldBytes::from_slice(&seed)).map_err(|e| {
                PrimitivesError::KeyGeneration(format!("scalar out of range: {}", e))
            })
        });
        seed.zeroize();

        Ok(PrivateKey { inner: result? })
    }

    /// Create a private key from a raw 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid scalar on secp256k1,
    /// or an error if the length is wrong or the scalar is zero or out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_BYTES_LEN,
                got: bytes.len(),
            });
        }
        let inner = SigningKey::from_bytes(k256::FieldBytes::from_slice(bytes))
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner })
    }

    /// Create a private key from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let mut bytes = hex::decode(hex_str)?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Decode a compressed-key WIF string (either network prefix).
    ///
    /// # Returns
    /// The key, or an error for a bad checksum, unknown prefix, or a payload
    /// that is not `prefix || 32-byte key || 0x01`.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        let mut payload = base58::check_decode(wif)?;
        let result = match payload.as_slice() {
            [prefix, key @ .., COMPRESS_MAGIC]
                if key.len() == PRIVATE_KEY_BYTES_LEN
                    && (*prefix == MAINNET_WIF_PREFIX || *prefix == TESTNET_WIF_PREFIX) =>
            {
                Self::from_bytes(key)
            }
            _ => Err(PrimitivesError::InvalidPrivateKey(
                "malformed WIF payload".to_string(),
            )),
        };
        payload.zeroize();
        result
    }

    /// Serialize the scalar as 32 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the scalar as 64 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        let mut bytes = self.to_bytes();
        let out = hex::encode(bytes);
        bytes.zeroize();
        out
    }

    /// Encode as a mainnet compressed-key WIF string.
    pub fn to_wif(&self) -> String {
        self.to_wif_prefix(MAINNET_WIF_PREFIX)
    }

    /// Encode as a compressed-key WIF string with the given prefix byte.
    ///
    /// # Arguments
    /// * `prefix` - Network prefix, `0x80` for mainnet or `0xef` for testnet.
    pub fn to_wif_prefix(&self, prefix: u8) -> String {
        let mut payload = Vec::with_capacity(PRIVATE_KEY_BYTES_LEN + 2);
        payload.push(prefix);
        payload.extend_from_slice(&self.inner.to_bytes());
        payload.push(COMPRESS_MAGIC);
        let out = base58::check_encode(&payload);
        payload.zeroize();
        out
    }

    /// Derive the matching public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Sign a 32-byte digest. See [`Signature::sign`].
    pub fn sign(&self, digest: &[u8]) -> Result<Signature, PrimitivesError> {
        Signature::sign(digest, self)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner.to_bytes() == other.inner.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("pub_key", &self.pub_key().to_hex())
            .finish_non_exhaustive()
    }
}
