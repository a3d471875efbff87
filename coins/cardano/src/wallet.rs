use crate::address::{CardanoAddress, NetworkTag};
use crate::cbor::{self, EncodeReport};
use crate::config::{format_ada, NetworkConfig};
use crate::error::Result;
use crate::utxo::{balance_from_explorer, utxo_balance, AddressAmount, UtxoRecord};
use crate::value::Value;

/// Read-only Cardano wallet: answers the address and balance queries a dApp
/// connector needs from an address and an already fetched UTXO set. Nothing
/// here signs or submits.
#[derive(Debug, Clone)]
pub struct CardanoWallet {
    address: CardanoAddress,
    config: NetworkConfig,
    utxos: Vec<UtxoRecord>,
}

impl CardanoWallet {
    /// Create a wallet around a change address. The network preset follows the
    /// address prefix; [`Self::network_id`] still follows the header tag.
    pub fn new(address: &str) -> Result<Self> {
        let address = CardanoAddress::parse(address)?;
        let config = NetworkConfig::for_address_prefix(address.hrp());
        Ok(Self {
            address,
            config,
            utxos: Vec::new(),
        })
    }

    /// Use a custom network configuration
    pub fn with_config(mut self, config: NetworkConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the UTXO set, e.g. after a fresh explorer query or hand-authored mocks
    pub fn set_utxos(&mut self, utxos: Vec<UtxoRecord>) {
        self.utxos = utxos;
    }

    pub fn utxos(&self) -> &[UtxoRecord] {
        &self.utxos
    }

    /// Get the CardanoAddress struct
    pub fn address_info(&self) -> &CardanoAddress {
        &self.address
    }

    /// Get network config
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn network_tag(&self) -> NetworkTag {
        self.address.network_tag()
    }

    /// `0` for testnet, `1` for mainnet
    pub fn network_id(&self) -> u8 {
        self.network_tag().network_id()
    }

    /// Bech32 change address
    pub fn change_address(&self) -> &str {
        self.address.to_bech32()
    }

    /// Raw change address bytes, hex encoded
    pub fn change_address_hex(&self) -> String {
        self.address.to_hex()
    }

    pub fn used_addresses(&self) -> Vec<String> {
        vec![self.change_address_hex()]
    }

    /// Stake keys for the wallet's address
    pub fn reward_addresses(&self) -> Result<Vec<String>> {
        let stake_key = self.address.stake_key()?;
        Ok(vec![stake_key.to_bech32().to_string()])
    }

    /// Fold explorer address records into a single balance
    pub fn balance(&self, entries: &[AddressAmount]) -> Value {
        balance_from_explorer(entries)
    }

    pub fn balance_cbor_hex(&self, entries: &[AddressAmount]) -> Result<String> {
        cbor::encode_value_hex(&self.balance(entries))
    }

    /// Balance of the wallet's own UTXO set
    pub fn total_balance(&self) -> Value {
        utxo_balance(&self.utxos)
    }

    /// Coin part of [`Self::total_balance`] formatted in ADA
    pub fn total_balance_ada(&self) -> String {
        format_ada(&self.total_balance().coin)
    }

    /// Encode the UTXO set. Records that fail to encode are listed in the
    /// report's `skipped` entries.
    pub fn utxos_cbor(&self) -> EncodeReport {
        cbor::encode_utxos(&self.utxos)
    }

    pub fn utxos_cbor_hex(&self) -> Vec<String> {
        self.utxos_cbor().to_hex_vec()
    }
}

// ============================================================================
// TESTS
// ============================================================================
