//! Key derivation provider trait and types

use std::fmt;

use pocxvanity_crypto::{hd, HdError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::network::Network;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Entropy source failed: {0}")]
    Entropy(String),
    #[error("Key derivation failed: {0}")]
    Derivation(String),
    #[error("Invalid mnemonic: {0}")]
    Mnemonic(String),
}

impl From<HdError> for ProviderError {
    fn from(err: HdError) -> Self {
        match err {
            HdError::Entropy(msg) => ProviderError::Entropy(msg),
            HdError::Mnemonic(msg) => ProviderError::Mnemonic(msg),
            other => ProviderError::Derivation(other.to_string()),
        }
    }
}

/// A freshly generated wallet secret: the mnemonic phrase and its seed.
///
/// Both buffers are wiped on drop and `Debug` never prints them.
pub struct Candidate {
    mnemonic: Zeroizing<String>,
    seed: Zeroizing<Vec<u8>>,
}

impl Candidate {
    /// Wrap an already derived phrase and seed
    pub fn new(mnemonic: impl Into<String>, seed: impl Into<Vec<u8>>) -> Self {
        Self {
            mnemonic: Zeroizing::new(mnemonic.into()),
            seed: Zeroizing::new(seed.into()),
        }
    }

    /// Restore from a BIP-39 phrase (empty passphrase)
    pub fn from_phrase(phrase: &str) -> Result<Self, ProviderError> {
        let seed = hd::mnemonic_to_seed(phrase)?;
        Ok(Self::new(phrase, seed.to_vec()))
    }

    #[inline]
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    #[inline]
    pub fn seed(&self) -> &[u8] {
        &self.seed
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("mnemonic", &"[REDACTED]")
            .field("seed", &"[REDACTED]")
            .finish()
    }
}

/// Keys and address of a wallet's primary receiving slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedAddress {
    /// The address string
    pub address: String,
    /// Private key in Wallet Import Format
    pub private_key_wif: String,
    /// Compressed public key in hex
    pub public_key_hex: String,
    /// Derivation path the key was taken from
    pub derivation_path: String,
    /// Network the address belongs to
    pub network: Network,
}

/// Source of candidates and their projected addresses.
///
/// Implementations must be thread-safe and keep no shared mutable state
/// between calls; the search engine calls them from many workers at once.
pub trait KeyDerivationProvider: Send + Sync {
    /// Generate one fresh, independent candidate from a secure entropy source
    fn generate_seed(&self) -> Result<Candidate, ProviderError>;

    /// Project a candidate to its primary receiving address on `network`.
    ///
    /// Must be a pure function of its inputs.
    fn derive_address(
        &self,
        candidate: &Candidate,
        network: Network,
    ) -> Result<String, ProviderError>;
}
