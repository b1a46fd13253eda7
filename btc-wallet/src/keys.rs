//! Key derivation.
//!
//! Produces a fresh private key and the address that pays to it. Nothing is
//! stored; the caller owns the result.

use serde::Serialize;

use wallet_primitives::ec::KeyPair;
use wallet_script::address::derive_address_for;
use wallet_script::Network;

use crate::WalletError;

/// A freshly generated wallet identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedWallet {
    /// Base58Check address of the compressed public key.
    pub address: String,
    /// The 32-byte private scalar as lowercase hex.
    pub private_key_hex: String,
    /// Network whose version byte prefixes `address`.
    pub network: Network,
}

/// Generate a mainnet wallet.
///
/// # Returns
/// The address and private key hex, or `WalletError::Primitives` wrapping
/// `KeyGeneration` if the random source fails. There is no retry; call again.
pub fn generate() -> Result<GeneratedWallet, WalletError> {
    generate_for(Network::Mainnet)
}

/// Generate a wallet whose address carries `network`'s version byte.
pub fn generate_for(network: Network) -> Result<GeneratedWallet, WalletError> {
    let keypair = KeyPair::generate()?;
    let address = derive_address_for(&keypair.public_key().to_compressed(), network);

    Ok(GeneratedWallet {
        address,
        private_key_hex: keypair.private_key().to_hex(),
        network,
    })
}
