//! PocxVanity Crypto Primitives
//!
//! Hashing, address encoding, HD key derivation and the descriptor checksum.

pub mod descriptor;
pub mod encoding;
pub mod hash;
pub mod hd;

pub use self::descriptor::{add_checksum, descriptor_checksum, verify_checksum};
pub use self::hd::{AccountKey, DerivedKey, HdError};

// Re-export dependencies for use by other crates
pub use bip32::Prefix;
pub use hex;
pub use zeroize::Zeroizing;
