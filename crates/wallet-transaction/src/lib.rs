/// wallet-transaction - Legacy transaction building, serialization and signing.
///
/// Provides the `Transaction` model with its inputs and outputs, a
/// single-input builder, the unsigned and signed wire renderings, and the
/// signer that joins them.

pub mod builder;
pub mod config;
pub mod input;
pub mod output;
pub mod serializer;
pub mod signer;
pub mod template;
pub mod transaction;

mod error;
pub use builder::{build, build_with_config, AvailableOutput};
pub use config::{BuilderConfig, OutputPolicy, PreimageDigest, SerializerConfig, SignerConfig};
pub use error::TransactionError;
pub use input::TxIn;
pub use output::{Destination, TxOut};
pub use signer::{sign, sign_with_config, SignedTransaction};
pub use transaction::Transaction;
