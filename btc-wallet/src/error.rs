/// Error type spanning every crate in the wallet.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// Key handling, hashing or encoding failed.
    #[error("primitives error: {0}")]
    Primitives(#[from] wallet_primitives::PrimitivesError),
    /// An address or script could not be built or decoded.
    #[error("script error: {0}")]
    Script(#[from] wallet_script::ScriptError),
    /// Building, serializing or signing a transaction failed.
    #[error("transaction error: {0}")]
    Transaction(#[from] wallet_transaction::TransactionError),
}
