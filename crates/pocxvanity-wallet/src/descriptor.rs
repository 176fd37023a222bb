//! Importable output descriptors for a found wallet

use pocxvanity_crypto::{add_checksum, encoding::wif_encode, hd, hex};
use serde::{Deserialize, Serialize};

use crate::network::{Network, ACCOUNT, RECEIVE_CHAIN};
use crate::traits::{Candidate, ProviderError};

/// Internal (change) chain index
const CHANGE_CHAIN: u32 = 1;

/// Checksummed descriptors, ready for `importdescriptors`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletDescriptors {
    /// Ranged receive chain, `wpkh([fp/84h/c'h/0h]xprv/0/*)#...`
    pub receive: String,
    /// Ranged change chain, `.../1/*`
    pub change: String,
    /// Single key of the primary address, `wpkh(WIF)#...`
    pub primary: String,
}

impl WalletDescriptors {
    pub fn from_candidate(candidate: &Candidate, network: Network) -> Result<Self, ProviderError> {
        let account =
            hd::account_key(candidate.seed(), &network.account_path(), network.xprv_prefix())?;
        let origin = format!(
            "[{}/84h/{}h/{}h]{}",
            hex::encode(account.master_fingerprint),
            network.coin_type(),
            ACCOUNT,
            account.xprv.as_str()
        );

        let primary_key = hd::derive_key(candidate.seed(), &network.receive_path())?;
        let wif = wif_encode(&primary_key.private_key, network.wif_version());

        Ok(Self {
            receive: add_checksum(&format!("wpkh({}/{}/*)", origin, RECEIVE_CHAIN)),
            change: add_checksum(&format!("wpkh({}/{}/*)", origin, CHANGE_CHAIN)),
            primary: add_checksum(&format!("wpkh({})", wif)),
        })
    }
}
