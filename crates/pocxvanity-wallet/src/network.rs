//! PoCX network parameters

use std::fmt;

use pocxvanity_crypto::Prefix;
use serde::{Deserialize, Serialize};

/// Account used for the wallet's primary address
pub const ACCOUNT: u32 = 0;
/// External (receive) chain index
pub const RECEIVE_CHAIN: u32 = 0;
/// Address index of the primary address
pub const ADDRESS_INDEX: u32 = 0;

/// Network an address is projected for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Main,
    Test,
}

impl Network {
    /// Bech32 human-readable part
    pub fn hrp(self) -> &'static str {
        match self {
            Network::Main => "pocx",
            Network::Test => "tpocx",
        }
    }

    /// Constant start of every P2WPKH address: hrp, separator and the
    /// witness version 0 symbol
    pub fn address_prefix(self) -> &'static str {
        match self {
            Network::Main => "pocx1q",
            Network::Test => "tpocx1q",
        }
    }

    /// BIP-44 coin type (hardened in paths)
    pub fn coin_type(self) -> u32 {
        match self {
            Network::Main => 0,
            Network::Test => 1,
        }
    }

    /// WIF version byte
    pub fn wif_version(self) -> u8 {
        match self {
            Network::Main => 0x80,
            Network::Test => 0xef,
        }
    }

    /// Extended private key serialization prefix
    pub fn xprv_prefix(self) -> Prefix {
        match self {
            Network::Main => Prefix::XPRV,
            Network::Test => Prefix::TPRV,
        }
    }

    /// BIP-84 account path, `m/84'/coin'/0'`
    pub fn account_path(self) -> String {
        format!("m/84'/{}'/{}'", self.coin_type(), ACCOUNT)
    }

    /// Path of the primary receiving address
    pub fn receive_path(self) -> String {
        format!("{}/{}/{}", self.account_path(), RECEIVE_CHAIN, ADDRESS_INDEX)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Main => write!(f, "mainnet"),
            Network::Test => write!(f, "testnet"),
        }
    }
}
