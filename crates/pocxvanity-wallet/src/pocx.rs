//! PoCX native SegWit wallet adapter

use pocxvanity_crypto::{
    encoding::{segwit_v0_encode, wif_encode},
    hash::hash160,
    hd, hex,
};

use crate::network::Network;
use crate::traits::{Candidate, GeneratedAddress, KeyDerivationProvider, ProviderError};

/// BIP-39 / BIP-84 key derivation for PoCX P2WPKH addresses
#[derive(Debug, Clone, Copy, Default)]
pub struct PocxProvider;

impl KeyDerivationProvider for PocxProvider {
    fn generate_seed(&self) -> Result<Candidate, ProviderError> {
        let phrase = hd::generate_mnemonic()?;
        Candidate::from_phrase(&phrase)
    }

    fn derive_address(
        &self,
        candidate: &Candidate,
        network: Network,
    ) -> Result<String, ProviderError> {
        let key = hd::derive_key(candidate.seed(), &network.receive_path())?;
        encode_address(&key.public_key, network)
    }
}

impl PocxProvider {
    /// Full key material of the primary address, for display and export
    pub fn generate_from_candidate(
        &self,
        candidate: &Candidate,
        network: Network,
    ) -> Result<GeneratedAddress, ProviderError> {
        let derivation_path = network.receive_path();
        let key = hd::derive_key(candidate.seed(), &derivation_path)?;

        Ok(GeneratedAddress {
            address: encode_address(&key.public_key, network)?,
            private_key_wif: wif_encode(&key.private_key, network.wif_version()),
            public_key_hex: hex::encode(key.public_key),
            derivation_path,
            network,
        })
    }
}

/// P2WPKH: bech32(hrp, 0, HASH160(compressed_pubkey))
fn encode_address(public_key: &[u8; 33], network: Network) -> Result<String, ProviderError> {
    let program = hash160(public_key);
    segwit_v0_encode(network.hrp(), &program).map_err(|e| ProviderError::Derivation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_known_vector_mainnet() {
        let candidate = Candidate::from_phrase(ABANDON).unwrap();
        let addr = PocxProvider.generate_from_candidate(&candidate, Network::Main).unwrap();

        assert_eq!(addr.address, "pocx1qcr8te4kr609gcawutmrza0j4xv80jy8z59eq3a");
        assert_eq!(addr.private_key_wif, "KyZpNDKnfs94vbrwhJneDi77V6jF64PWPF8x5cdJb8ifgg2DUc9d");
        assert_eq!(
            addr.public_key_hex,
            "0330d54fd0dd420a6e5f8d3624f5f3482cae350f79d5f0753bf5beef9c2d91af3c"
        );
        assert_eq!(addr.derivation_path, "m/84'/0'/0'/0/0");
    }

    #[test]
    fn test_derive_address_matches_full_derivation() {
        let candidate = Candidate::from_phrase(ABANDON).unwrap();
        let address = PocxProvider.derive_address(&candidate, Network::Main).unwrap();
        let full = PocxProvider.generate_from_candidate(&candidate, Network::Main).unwrap();
        assert_eq!(address, full.address);
    }

    #[test]
    fn test_derive_address_is_deterministic() {
        let candidate = PocxProvider.generate_seed().unwrap();
        for network in [Network::Main, Network::Test] {
            let a = PocxProvider.derive_address(&candidate, network).unwrap();
            let b = PocxProvider.derive_address(&candidate, network).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_testnet_address() {
        let candidate = Candidate::from_phrase(ABANDON).unwrap();
        let addr = PocxProvider.generate_from_candidate(&candidate, Network::Test).unwrap();

        assert!(addr.address.starts_with("tpocx1q"));
        assert_eq!(addr.derivation_path, "m/84'/1'/0'/0/0");
        assert!(addr.private_key_wif.starts_with('c'));

        // Different coin type, different key
        let main = PocxProvider.derive_address(&candidate, Network::Main).unwrap();
        assert_ne!(&addr.address["tpocx1q".len()..], &main["pocx1q".len()..]);
    }

    #[test]
    fn test_generated_candidates_are_independent() {
        let a = PocxProvider.generate_seed().unwrap();
        let b = PocxProvider.generate_seed().unwrap();
        assert_ne!(a.mnemonic(), b.mnemonic());
        assert_eq!(a.mnemonic().split_whitespace().count(), 12);
        assert_eq!(a.seed().len(), 64);
    }
}
