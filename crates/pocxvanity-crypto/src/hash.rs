//! Digests used by Base58Check, key fingerprints and witness programs

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA-256 applied twice, as in Base58Check
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(data)).into()
}

/// RIPEMD-160(SHA-256(data)): P2WPKH witness program and BIP-32 key identifier
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_sha256_empty() {
        assert_eq!(
            hex::encode(double_sha256(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
    }

    #[test]
    fn test_hash160_of_bip84_pubkey() {
        // First receive key of the "abandon ... about" wallet
        let pubkey =
            hex::decode("0330d54fd0dd420a6e5f8d3624f5f3482cae350f79d5f0753bf5beef9c2d91af3c").unwrap();
        assert_eq!(
            hex::encode(hash160(&pubkey)),
            "c0cebcd6c3d3ca8c75dc5ec62ebe55330ef910e2"
        );
    }
}
