//! Pay-to-public-key-hash script template.
//!
//! Locking: `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`.
//! Unlocking: `<signature> <public key>`, each as a length-prefixed push.

use wallet_primitives::ec::{PublicKey, Signature};
use wallet_script::{decode_address, Address, Network, Script};

use crate::TransactionError;

/// Locking script paying to `address`.
pub fn lock(address: &Address) -> Script {
    address.lock_script()
}

/// Locking script paying to an address string, checked against `network`.
///
/// # Returns
/// The script, or `TransactionError::ScriptBuild` if the address is malformed
/// or for another network.
pub fn lock_to(address: &str, network: Network) -> Result<Script, TransactionError> {
    Ok(decode_address(address, network)?)
}

/// Unlocking script: push the DER signature, then push the compressed key.
///
/// No sighash type byte follows the signature.
pub fn unlock(signature: &Signature, public_key: &PublicKey) -> Result<Script, TransactionError> {
    let mut script = Script::new();
    script.append_push_data(&signature.to_der())?;
    script.append_push_data(&public_key.to_compressed())?;
    Ok(script)
}
