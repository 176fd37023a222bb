//! Address and key encoding: Base58Check, WIF, segwit Bech32

use bech32::{segwit, Hrp};
use thiserror::Error;

use crate::hash::double_sha256;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Bech32 encoding failed: {0}")]
    Bech32Error(String),
}

/// Base58Check encode (Bitcoin-style with 4-byte checksum)
pub fn base58check_encode(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + 4);
    data.push(version);
    data.extend_from_slice(payload);

    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[..4]);

    bs58::encode(data).into_string()
}

/// Encode a private key in Wallet Import Format (compressed public key flag set)
pub fn wif_encode(private_key: &[u8; 32], version: u8) -> String {
    let mut payload = Vec::with_capacity(33);
    payload.extend_from_slice(private_key);
    payload.push(0x01);
    base58check_encode(version, &payload)
}

/// Bech32 encode a segwit v0 witness program (P2WPKH when the program is 20 bytes)
pub fn segwit_v0_encode(hrp: &str, program: &[u8]) -> Result<String, EncodingError> {
    let hrp = Hrp::parse(hrp).map_err(|e| EncodingError::Bech32Error(e.to_string()))?;

    segwit::encode_v0(hrp, program).map_err(|e| EncodingError::Bech32Error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58check_leading_zero_version() {
        // Version 0x00 renders as a leading '1'
        let encoded = base58check_encode(0x00, &[0u8; 20]);
        assert_eq!(encoded, "1111111111111111111114oLvT2");
    }

    #[test]
    fn test_wif_encode() {
        let privkey = hex::decode("0000000000000000000000000000000000000000000000000000000000000001").unwrap();
        let mut pk = [0u8; 32];
        pk.copy_from_slice(&privkey);

        assert_eq!(
            wif_encode(&pk, 0x80),
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
        );

        assert_eq!(
            wif_encode(&pk, 0xef),
            "cMahea7zqjxrtgAbB7LSGbcQUr1uX1ojuat9jZodMN87JcbXMTcA"
        );
    }

    #[test]
    fn test_segwit_v0_encode_known_program() {
        // BIP-84 first receive program, re-encoded under the pocx prefixes
        let program = hex::decode("c0cebcd6c3d3ca8c75dc5ec62ebe55330ef910e2").unwrap();

        assert_eq!(
            segwit_v0_encode("bc", &program).unwrap(),
            "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu"
        );
        assert_eq!(
            segwit_v0_encode("pocx", &program).unwrap(),
            "pocx1qcr8te4kr609gcawutmrza0j4xv80jy8z59eq3a"
        );
        assert_eq!(
            segwit_v0_encode("tpocx", &program).unwrap(),
            "tpocx1qcr8te4kr609gcawutmrza0j4xv80jy8zv7tlm8"
        );
    }

    #[test]
    fn test_segwit_encode_rejects_bad_hrp() {
        assert!(segwit_v0_encode("", &[0u8; 20]).is_err());
    }
}
