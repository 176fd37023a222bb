//! BIP-39 mnemonics and BIP-32 key derivation

use bip32::{DerivationPath, Prefix, XPrv};
use bip39::Mnemonic;
use k256::{elliptic_curve::sec1::ToEncodedPoint, PublicKey};
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;
use zeroize::{Zeroize, Zeroizing};

use crate::hash::hash160;

#[derive(Error, Debug)]
pub enum HdError {
    #[error("Entropy source failed: {0}")]
    Entropy(String),
    #[error("Invalid mnemonic: {0}")]
    Mnemonic(String),
    #[error("Invalid derivation path '{0}': {1}")]
    InvalidPath(String, String),
    #[error("Key derivation failed: {0}")]
    Derivation(String),
}

/// Entropy for a 12-word mnemonic
pub const ENTROPY_BYTES: usize = 16;

/// A private key with its compressed public key
pub struct DerivedKey {
    pub private_key: Zeroizing<[u8; 32]>,
    pub public_key: [u8; 33],
}

/// Account-level extended key for descriptor export
pub struct AccountKey {
    /// Serialized extended private key (`xprv...` / `tprv...`)
    pub xprv: Zeroizing<String>,
    /// First four bytes of HASH160 of the master public key
    pub master_fingerprint: [u8; 4],
}

/// Generate a fresh 12-word mnemonic from the OS entropy source.
///
/// A failing entropy source is reported, never retried.
pub fn generate_mnemonic() -> Result<Zeroizing<String>, HdError> {
    let mut entropy = [0u8; ENTROPY_BYTES];
    OsRng
        .try_fill_bytes(&mut entropy)
        .map_err(|e| HdError::Entropy(e.to_string()))?;

    let phrase = mnemonic_from_entropy(&entropy);
    entropy.zeroize();
    phrase
}

/// Build the mnemonic phrase for raw entropy (16..=32 bytes, multiple of 4)
pub fn mnemonic_from_entropy(entropy: &[u8]) -> Result<Zeroizing<String>, HdError> {
    let mnemonic =
        Mnemonic::from_entropy(entropy).map_err(|e| HdError::Mnemonic(e.to_string()))?;
    Ok(Zeroizing::new(mnemonic.to_string()))
}

/// PBKDF2 seed of a mnemonic with an empty passphrase
pub fn mnemonic_to_seed(phrase: &str) -> Result<Zeroizing<[u8; 64]>, HdError> {
    let mnemonic = Mnemonic::parse(phrase).map_err(|e| HdError::Mnemonic(e.to_string()))?;
    Ok(Zeroizing::new(mnemonic.to_seed("")))
}

fn parse_path(path: &str) -> Result<DerivationPath, HdError> {
    path.parse::<DerivationPath>()
        .map_err(|e| HdError::InvalidPath(path.to_string(), e.to_string()))
}

fn compressed_public_key(xprv: &XPrv) -> [u8; 33] {
    let public_key = PublicKey::from(xprv.private_key().verifying_key());
    let point = public_key.to_encoded_point(true);
    let mut result = [0u8; 33];
    result.copy_from_slice(point.as_bytes());
    result
}

/// Derive the key at `path` (e.g. `m/84'/0'/0'/0/0`) from a seed
pub fn derive_key(seed: &[u8], path: &str) -> Result<DerivedKey, HdError> {
    let path = parse_path(path)?;
    let xprv =
        XPrv::derive_from_path(seed, &path).map_err(|e| HdError::Derivation(e.to_string()))?;

    let private_key: [u8; 32] = xprv.private_key().to_bytes().into();

    Ok(DerivedKey {
        private_key: Zeroizing::new(private_key),
        public_key: compressed_public_key(&xprv),
    })
}

/// Derive and serialize the extended private key at an account path
pub fn account_key(seed: &[u8], account_path: &str, prefix: Prefix) -> Result<AccountKey, HdError> {
    let master = XPrv::new(seed).map_err(|e| HdError::Derivation(e.to_string()))?;
    let fingerprint = hash160(&compressed_public_key(&master));

    let path = parse_path(account_path)?;
    let account =
        XPrv::derive_from_path(seed, &path).map_err(|e| HdError::Derivation(e.to_string()))?;

    let mut master_fingerprint = [0u8; 4];
    master_fingerprint.copy_from_slice(&fingerprint[..4]);

    Ok(AccountKey {
        xprv: account.to_string(prefix),
        master_fingerprint,
    })
}
