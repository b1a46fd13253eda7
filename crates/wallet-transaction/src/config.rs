//! Builder, serializer and signer options.
//!
//! Every option defaults to the wallet's established wire behavior; the
//! alternatives exist for callers that need the conventional forms instead.

use wallet_script::Network;

/// Final sequence number: all bits set, no relative lock-time.
pub const DEFAULT_SEQUENCE: u32 = 0xFFFF_FFFF;

/// How the builder sizes the single payment output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputPolicy {
    /// The output carries the full value of the available output, whatever
    /// amount was requested. No change output is produced.
    #[default]
    ForwardAvailable,
    /// The output carries exactly the requested amount. If a change address is
    /// given and the remainder is non-zero, a second output returns it.
    SpendExact { change_address: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuilderConfig {
    pub output_policy: OutputPolicy,
    /// Index of the referenced output in the previous transaction.
    pub previous_output_index: u32,
    pub sequence: u32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            output_policy: OutputPolicy::ForwardAvailable,
            previous_output_index: 0,
            sequence: DEFAULT_SEQUENCE,
        }
    }
}

impl BuilderConfig {
    /// Spend exactly the requested amount, returning any remainder to
    /// `change_address`.
    pub fn spend_exact(change_address: Option<String>) -> Self {
        BuilderConfig {
            output_policy: OutputPolicy::SpendExact { change_address },
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SerializerConfig {
    /// Append the 4-byte little-endian lock time to both forms.
    pub emit_lock_time: bool,
}

/// Hash applied to the unsigned form before signing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreimageDigest {
    /// One round of SHA-256.
    #[default]
    Single,
    /// SHA-256 applied twice.
    Double,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignerConfig {
    pub digest: PreimageDigest,
    /// Network expected for every destination address.
    pub network: Network,
    pub serializer: SerializerConfig,
}
