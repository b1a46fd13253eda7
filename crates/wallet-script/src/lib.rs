/// wallet-script - Script framing and pay-to-address handling.
///
/// Provides the `Script` byte container, opcode constants, push-data framing,
/// and the address codec that turns public keys into Base58Check addresses
/// and addresses back into locking scripts.

pub mod address;
pub mod chunk;
pub mod opcodes;
pub mod script;

mod error;
pub use address::{decode_address, derive_address, Address, Network};
pub use chunk::ScriptChunk;
pub use error::ScriptError;
pub use script::Script;
