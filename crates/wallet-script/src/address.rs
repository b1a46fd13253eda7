/// Pay-to-public-key-hash address handling.
///
/// An address is a projection of a public key: Hash160 of the compressed key,
/// prefixed with a network version byte and Base58Check encoded. Decoding an
/// address yields the locking script that pays to it.

use std::fmt;
use std::str::FromStr;

use wallet_primitives::base58;
use wallet_primitives::hash::hash160;
use wallet_primitives::ec::PublicKey;
use wallet_primitives::PrimitivesError;

use crate::opcodes::*;
use crate::{Script, ScriptError};

/// Mainnet P2PKH address version byte.
const MAINNET_P2PKH: u8 = 0x00;
/// Testnet P2PKH address version byte.
const TESTNET_P2PKH: u8 = 0x6f;

/// Decoded address length: version byte, 20-byte hash, 4-byte checksum.
const ADDRESS_DECODED_LEN: usize = 25;

/// Network selector for address version bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Version byte 0x00; addresses start with '1'.
    #[default]
    Mainnet,
    /// Version byte 0x6f; addresses start with 'm' or 'n'.
    Testnet,
}

impl Network {
    pub fn version_byte(self) -> u8 {
        match self {
            Network::Mainnet => MAINNET_P2PKH,
            Network::Testnet => TESTNET_P2PKH,
        }
    }

    fn from_version_byte(b: u8) -> Option<Self> {
        match b {
            MAINNET_P2PKH => Some(Network::Mainnet),
            TESTNET_P2PKH => Some(Network::Testnet),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(ScriptError::UnsupportedAddress(format!("unknown network '{}'", other))),
        }
    }
}

/// A pay-to-public-key-hash address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Address {
    /// The Base58Check address string.
    pub address_string: String,
    /// The 20-byte RIPEMD-160(SHA-256(pubkey)) hash.
    pub public_key_hash: [u8; 20],
    pub network: Network,
}

impl Address {
    /// Parse a Base58Check-encoded address string.
    ///
    /// Validates the alphabet, the 25-byte length, the checksum and the
    /// version byte, in that order.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let decoded = base58::decode(addr)
            .map_err(|_| ScriptError::InvalidAddress(format!("bad char for '{}'", addr)))?;

        if decoded.len() != ADDRESS_DECODED_LEN {
            return Err(ScriptError::InvalidAddressLength(addr.to_string()));
        }

        let payload = base58::check_decode(addr).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => ScriptError::EncodingChecksumFailed,
            other => ScriptError::Primitives(other),
        })?;

        let network = Network::from_version_byte(payload[0])
            .ok_or_else(|| ScriptError::UnsupportedAddress(addr.to_string()))?;

        let mut pkh = [0u8; 20];
        pkh.copy_from_slice(&payload[1..21]);

        Ok(Address {
            address_string: addr.to_string(),
            public_key_hash: pkh,
            network,
        })
    }

    /// Create an address from a 20-byte public key hash.
    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        let mut versioned = Vec::with_capacity(21);
        versioned.push(network.version_byte());
        versioned.extend_from_slice(hash);

        Address {
            address_string: base58::check_encode(&versioned),
            public_key_hash: *hash,
            network,
        }
    }

    /// Create an address from a public key, hashing its compressed form.
    pub fn from_public_key(pub_key: &PublicKey, network: Network) -> Self {
        Self::from_public_key_hash(&pub_key.hash160(), network)
    }

    /// The standard locking script paying to this address:
    /// OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG.
    pub fn lock_script(&self) -> Script {
        let mut bytes = Vec::with_capacity(25);
        bytes.extend_from_slice(&[OP_DUP, OP_HASH160, OP_DATA_20]);
        bytes.extend_from_slice(&self.public_key_hash);
        bytes.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
        Script::from(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address_string)
    }
}

/// Derive the mainnet address of a compressed public key.
///
/// sha256, then ripemd160, then the 0x00 version byte, then the 4-byte
/// sha256d checksum, then Base58. There is no failure path for a 33-byte
/// input; whether the bytes are a valid curve point is not checked here.
pub fn derive_address(public_key_compressed: &[u8; 33]) -> String {
    derive_address_for(public_key_compressed, Network::Mainnet)
}

/// As [`derive_address`], with an explicit network version byte.
pub fn derive_address_for(public_key_compressed: &[u8; 33], network: Network) -> String {
    Address::from_public_key_hash(&hash160(public_key_compressed), network).address_string
}

/// Resolve an address to the locking script that pays to it.
///
/// # Returns
/// The 25-byte P2PKH locking script, or an error if the address is malformed
/// or was encoded for a network other than `network`.
pub fn decode_address(addr: &str, network: Network) -> Result<Script, ScriptError> {
    let address = Address::from_string(addr)?;
    if address.network != network {
        return Err(ScriptError::NetworkMismatch {
            address: addr.to_string(),
            expected: network.to_string(),
            found: address.network.to_string(),
        });
    }
    Ok(address.lock_script())
}
