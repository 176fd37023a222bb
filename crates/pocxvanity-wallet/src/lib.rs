//! PocxVanity Wallet Adapter
//!
//! Candidate generation, address projection and descriptor export for PoCX
//! native SegWit wallets, behind the `KeyDerivationProvider` trait the search
//! engine consumes.

pub mod descriptor;
pub mod network;
pub mod pocx;
pub mod traits;

pub use descriptor::WalletDescriptors;
pub use network::Network;
pub use pocx::PocxProvider;
pub use traits::{Candidate, GeneratedAddress, KeyDerivationProvider, ProviderError};
