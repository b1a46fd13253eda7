//! Transaction output: a value and where it is paid.

use wallet_primitives::util::WireWriter;
use wallet_script::{decode_address, Network, Script};

use crate::TransactionError;

/// Where an output pays to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// An address, resolved to its locking script only when signing.
    Address(String),
    /// Raw locking-script bytes, used as given.
    Script(Script),
}

/// A single output.
///
/// # Wire format
///
/// | Field          | Size          | Form   |
/// |----------------|---------------|--------|
/// | value          | 8 bytes (LE)  | both   |
/// | script length  | VarInt        | signed |
/// | locking script | variable      | signed |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOut {
    /// Amount in the ledger's smallest unit.
    pub value: u64,
    pub destination: Destination,
}

impl TxOut {
    pub fn to_address(value: u64, address: impl Into<String>) -> Self {
        TxOut {
            value,
            destination: Destination::Address(address.into()),
        }
    }

    pub fn to_script(value: u64, script: Script) -> Self {
        TxOut {
            value,
            destination: Destination::Script(script),
        }
    }

    /// Resolve the destination to locking-script bytes.
    ///
    /// # Returns
    /// The script, or `TransactionError::ScriptBuild` if the address is
    /// malformed or belongs to a network other than `network`.
    pub fn locking_script(&self, network: Network) -> Result<Script, TransactionError> {
        match &self.destination {
            Destination::Address(addr) => Ok(decode_address(addr, network)?),
            Destination::Script(script) => Ok(script.clone()),
        }
    }

    pub(crate) fn write_unsigned(&self, writer: &mut WireWriter) {
        writer.write_u64_le(self.value);
    }

    pub(crate) fn write_signed(&self, writer: &mut WireWriter, locking_script: &Script) {
        writer.write_u64_le(self.value);
        writer.write_var_bytes(locking_script.to_bytes());
    }
}
