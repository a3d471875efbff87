//! # WalletD Cardano
//!
//! Cardano (ADA) address and value codec for the WalletD SDK.
//!
//! ## Features
//!
//! - Bech32 address decoding and encoding with a configurable word limit
//! - Payment / staking credential extraction and stake key derivation
//! - Folding block explorer `(unit, quantity)` lists into coin + multi-asset values
//! - Canonical CBOR for values and unspent outputs, exact at any magnitude
//!
//! ## Example
//!
//! ```rust
//! use walletd_cardano::{cbor, stake_key_from_address, QuantityPair, Value};
//!
//! let address = "addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3x";
//! let stake = stake_key_from_address(address).unwrap();
//! assert!(stake.starts_with("stake1"));
//!
//! let value = Value::from_pairs(&[QuantityPair::new("lovelace", "1000000").unwrap()]);
//! assert_eq!(cbor::encode_value_hex(&value).unwrap(), "1a000f4240");
//! ```
//!
//! ## Address Types
//!
//! Cardano supports several address types:
//! - **Base**: Payment + staking key (can receive staking rewards)
//! - **Enterprise**: Payment key only (no staking rewards)
//! - **Pointer**: Payment + stake pool pointer
//! - **Reward**: Staking rewards address
//!
//! Credential extraction assumes the base address layout: one header byte, a
//! 28-byte payment credential, then a 28-byte staking credential.
//!
//! ## Note on UTXO Model
//!
//! Cardano uses a UTXO (Unspent Transaction Output) model. Explorer records are
//! kept as text ([`UtxoRecord`]) and only turned into bytes on demand by
//! [`cbor::encode_utxos`], which reports rather than aborts on bad records.

pub mod address;
pub mod bech32;
pub mod cbor;
pub mod config;
pub mod error;
pub mod utxo;
pub mod value;
pub mod wallet;

pub use address::{credentials, network_prefix, stake_key_from_address, CardanoAddress, Credentials, NetworkTag};
pub use cbor::{CanonicalEncoder, EncodeReport, EncodedUtxo, SkippedUtxo};
pub use config::{
    AddressType, NetworkConfig,
    ADDRESS_WORD_LIMIT, LOVELACE_PER_ADA, LOVELACE_UNIT,
    MAINNET_NETWORK_ID, TESTNET_NETWORK_ID,
};
pub use error::{CardanoError, Result};
pub use utxo::{AddressAmount, Amount, UtxoRecord};
pub use value::{
    fold_to_balance, split_coin_from_assets, AssetName, AssetUnit, CoinSplit, MultiAsset,
    PolicyId, Quantity, QuantityPair, Value,
};
pub use wallet::CardanoWallet;

#[cfg(test)]
mod tests {
    use super::*;

    const MAINNET_BASE: &str = "addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3x";

    #[test]
    fn test_network_ids() {
        assert_eq!(NetworkTag::Testnet.network_id(), TESTNET_NETWORK_ID);
        assert_eq!(NetworkTag::Mainnet.network_id(), MAINNET_NETWORK_ID);
    }

    #[test]
    fn test_address_to_balance_pipeline() {
        let creds = credentials(MAINNET_BASE).unwrap();
        assert_eq!(network_prefix(MAINNET_BASE).unwrap(), "e1");
        assert_eq!(creds.staking_key_hash.len(), 56);

        let pairs = [
            QuantityPair::new(LOVELACE_UNIT, "2000000").unwrap(),
            QuantityPair::lovelace(LOVELACE_PER_ADA),
        ];
        let balance = fold_to_balance([pairs.as_slice()]);
        assert_eq!(balance.coin, Quantity::from(3 * LOVELACE_PER_ADA));
    }

    #[test]
    fn test_create_address() {
        let pubkey = [1u8; 32];
        let addr = CardanoAddress::enterprise(&pubkey, MAINNET_NETWORK_ID).unwrap();
        assert_eq!(addr.address_type(), AddressType::Enterprise);
        assert!(CardanoAddress::validate(addr.to_bech32()));
        assert!(addr.stake_key().is_err());
    }
}
