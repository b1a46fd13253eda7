use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// A private key together with its derived public key.
///
/// The public key is always `private_key.pub_key()`; the pair is only built
/// through [`KeyPair::generate`] or [`KeyPair::from_private_key`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generate a fresh key pair from operating-system entropy.
    pub fn generate() -> Result<Self, PrimitivesError> {
        Ok(Self::from_private_key(PrivateKey::generate()?))
    }

    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.pub_key();
        KeyPair {
            private_key,
            public_key,
        }
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}
