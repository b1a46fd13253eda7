/// Error types for building, serializing and signing transactions.
///
/// Every variant aborts the whole operation; no partial buffer accompanies an
/// error.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The requested amount exceeds the value of the referenced output.
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: u64, available: u64 },

    /// A fixed-width field does not have its required width, or could not be
    /// decoded into it.
    #[error("malformed {field}: {reason}")]
    MalformedField { field: &'static str, reason: String },

    /// Resolving an address or assembling a script failed.
    #[error("script build failed: {0}")]
    ScriptBuild(#[from] wallet_script::ScriptError),

    /// The curve signature operation failed.
    #[error("signing failed: {0}")]
    Signing(String),

    /// A serialized buffer could not be read back.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("primitives error: {0}")]
    Primitives(#[from] wallet_primitives::PrimitivesError),
}

impl TransactionError {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        TransactionError::MalformedField {
            field,
            reason: reason.into(),
        }
    }
}
