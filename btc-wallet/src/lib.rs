#![deny(missing_docs)]

//! btc-wallet - Single-signature wallet.
//!
//! Generates a keypair and its address, and re-exports the primitives, script
//! and transaction crates so a caller can build and sign a spend from one
//! dependency.

mod error;
pub mod keys;

pub use error::WalletError;
pub use keys::{generate, generate_for, GeneratedWallet};

pub use wallet_primitives as primitives;
pub use wallet_script as script;
pub use wallet_transaction as transaction;
