//! Transaction signer.
//!
//! One signature covers the whole unsigned form and is placed in every
//! input's unlocking script. Nothing is returned unless every step succeeds.

use wallet_primitives::ec::{PrivateKey, PublicKey, Signature};
use wallet_primitives::hash::{sha256, sha256d};
use wallet_script::Script;

use crate::config::{PreimageDigest, SignerConfig};
use crate::serializer::{serialize_signed_with, serialize_unsigned_with};
use crate::template::p2pkh;
use crate::transaction::Transaction;
use crate::TransactionError;

/// The result of signing: wire bytes plus what was used to produce them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    /// The signed form.
    pub bytes: Vec<u8>,
    /// DER-encoded signature over the preimage digest.
    pub signature: Vec<u8>,
    /// SHA-256d of `bytes`, in internal byte order.
    pub txid: [u8; 32],
}

impl SignedTransaction {
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Transaction id in display order (byte-reversed).
    pub fn txid_hex(&self) -> String {
        let mut id = self.txid;
        id.reverse();
        hex::encode(id)
    }
}

/// Hash the unsigned form into the 32-byte digest that gets signed.
pub fn signature_digest(unsigned: &[u8], digest: PreimageDigest) -> [u8; 32] {
    match digest {
        PreimageDigest::Single => sha256(unsigned),
        PreimageDigest::Double => sha256d(unsigned),
    }
}

/// Sign with the default configuration and return only the signed bytes.
pub fn sign(tx: &Transaction, private_key: &PrivateKey) -> Result<Vec<u8>, TransactionError> {
    sign_with_config(tx, private_key, &SignerConfig::default()).map(|s| s.bytes)
}

/// Sign a transaction.
///
/// 1. Render the unsigned form and hash it per `config.digest`.
/// 2. Sign the digest and DER-encode the signature.
/// 3. Build `<sig> <pubkey>` as the unlocking script of every input.
/// 4. Resolve each output destination to its locking script.
/// 5. Render the signed form.
///
/// # Returns
/// The signed transaction, or the first error from serialization
/// (`MalformedField`), the curve (`Signing`) or script assembly (`ScriptBuild`).
pub fn sign_with_config(
    tx: &Transaction,
    private_key: &PrivateKey,
    config: &SignerConfig,
) -> Result<SignedTransaction, TransactionError> {
    let unsigned = serialize_unsigned_with(tx, &config.serializer)?;
    let digest = signature_digest(&unsigned, config.digest);

    let signature = private_key
        .sign(&digest)
        .map_err(|e| TransactionError::Signing(e.to_string()))?;

    let unlocking = p2pkh::unlock(&signature, &private_key.pub_key())?;
    let unlocking_scripts = vec![unlocking; tx.input_count()];

    let locking_scripts = tx
        .outputs()
        .iter()
        .map(|output| output.locking_script(config.network))
        .collect::<Result<Vec<Script>, _>>()?;

    let bytes = serialize_signed_with(tx, &unlocking_scripts, &locking_scripts, &config.serializer)?;
    let txid = sha256d(&bytes);

    Ok(SignedTransaction {
        bytes,
        signature: signature.to_der(),
        txid,
    })
}

/// Check a DER signature against the preimage digest of `tx`.
///
/// # Returns
/// `Ok(true)` if it verifies under `public_key`, `Ok(false)` if not, or an
/// error if the transaction cannot be serialized or the DER is malformed.
pub fn verify(
    tx: &Transaction,
    signature_der: &[u8],
    public_key: &PublicKey,
    config: &SignerConfig,
) -> Result<bool, TransactionError> {
    let unsigned = serialize_unsigned_with(tx, &config.serializer)?;
    let digest = signature_digest(&unsigned, config.digest);
    let signature = Signature::from_der(signature_der)?;
    Ok(public_key.verify(&digest, &signature))
}
