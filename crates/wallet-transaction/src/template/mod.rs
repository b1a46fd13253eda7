//! Script templates used when signing.
//!
//! Only the single-signature pay-to-public-key-hash pair is built.

pub mod p2pkh;
