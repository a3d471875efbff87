use serde::{Deserialize, Serialize};

use crate::error::{CardanoError, Result};
use crate::value::Quantity;

/// Cardano network configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network_id: u8,
    pub name: String,
    pub currency_symbol: String,
    pub decimals: u8,
    pub api_endpoints: Vec<String>,
    pub explorer: String,
    pub address_prefix: String,
    pub stake_prefix: String,
}

/// Cardano network IDs
pub const MAINNET_NETWORK_ID: u8 = 1;
pub const TESTNET_NETWORK_ID: u8 = 0; // Preview/Preprod

/// Unit string the explorer uses for the native coin
pub const LOVELACE_UNIT: &str = "lovelace";

/// Lovelace is the smallest unit (1 ADA = 1,000,000 Lovelace)
pub const LOVELACE_PER_ADA: u64 = 1_000_000;

/// Decimal places between ADA and Lovelace
pub const ADA_DECIMALS: usize = 6;

/// A policy ID is a 28-byte script hash, 56 hex characters
pub const POLICY_ID_HEX_LEN: usize = 56;

/// Hex offset separating header + payment credential from the staking credential
pub const CREDENTIAL_HEX_OFFSET: usize = 58;

/// Word limit passed to the bech32 codec for every address and stake key.
/// Well above the 90 character default from BIP-173.
pub const ADDRESS_WORD_LIMIT: usize = 999;

/// Human readable prefix used for derived stake keys
pub const STAKE_HRP: &str = "stake";

/// Address types in Cardano, from the high nibble of the header byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressType {
    Base,       // Payment + staking key
    Pointer,    // Payment + stake pool pointer
    Enterprise, // Payment key only (no staking)
    Byron,      // Legacy Byron addresses
    Reward,     // Staking rewards address
    Unknown,
}

impl AddressType {
    pub fn from_header(header: u8) -> Self {
        match header >> 4 {
            0x0..=0x3 => AddressType::Base,
            0x4 | 0x5 => AddressType::Pointer,
            0x6 | 0x7 => AddressType::Enterprise,
            0x8 => AddressType::Byron,
            0xE | 0xF => AddressType::Reward,
            _ => AddressType::Unknown,
        }
    }
}

impl NetworkConfig {
    /// Cardano Mainnet configuration
    pub fn mainnet() -> Self {
        NetworkConfig {
            network_id: MAINNET_NETWORK_ID,
            name: "Cardano Mainnet".to_string(),
            currency_symbol: "ADA".to_string(),
            decimals: ADA_DECIMALS as u8,
            api_endpoints: vec![
                "https://cardano-mainnet.blockfrost.io/api/v0".to_string(),
                "https://api.koios.rest/api/v1".to_string(),
            ],
            explorer: "https://cardanoscan.io".to_string(),
            address_prefix: "addr".to_string(),
            stake_prefix: STAKE_HRP.to_string(),
        }
    }

    /// Cardano Preview Testnet configuration
    pub fn preview() -> Self {
        NetworkConfig {
            network_id: TESTNET_NETWORK_ID,
            name: "Cardano Preview".to_string(),
            currency_symbol: "tADA".to_string(),
            decimals: ADA_DECIMALS as u8,
            api_endpoints: vec![
                "https://cardano-preview.blockfrost.io/api/v0".to_string(),
            ],
            explorer: "https://preview.cardanoscan.io".to_string(),
            address_prefix: "addr_test".to_string(),
            stake_prefix: STAKE_HRP.to_string(),
        }
    }

    /// Cardano Preprod Testnet configuration
    pub fn preprod() -> Self {
        NetworkConfig {
            network_id: TESTNET_NETWORK_ID,
            name: "Cardano Preprod".to_string(),
            currency_symbol: "tADA".to_string(),
            decimals: ADA_DECIMALS as u8,
            api_endpoints: vec![
                "https://cardano-preprod.blockfrost.io/api/v0".to_string(),
            ],
            explorer: "https://preprod.cardanoscan.io".to_string(),
            address_prefix: "addr_test".to_string(),
            stake_prefix: STAKE_HRP.to_string(),
        }
    }

    /// Legacy testnet alias
    pub fn testnet() -> Self {
        Self::preview()
    }

    /// Preset for an address prefix: `addr` is mainnet, any other prefix preview
    pub fn for_address_prefix(hrp: &str) -> Self {
        let mainnet = Self::mainnet();
        if hrp == mainnet.address_prefix {
            mainnet
        } else {
            Self::preview()
        }
    }

    /// Load a custom network description
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check if mainnet
    pub fn is_mainnet(&self) -> bool {
        self.network_id == MAINNET_NETWORK_ID
    }
}

/// Render a lovelace quantity as ADA with all six decimals, e.g. `"1.500000"`
pub fn format_ada(lovelace: &Quantity) -> String {
    let digits = lovelace.to_string();
    let padded = format!("{:0>width$}", digits, width = ADA_DECIMALS + 1);
    let (whole, frac) = padded.split_at(padded.len() - ADA_DECIMALS);
    format!("{}.{}", whole, frac)
}

/// Parse an ADA amount such as `"12.5"` into lovelace without going through floats
pub fn parse_ada(ada: &str) -> Result<Quantity> {
    let (whole, frac) = match ada.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (ada, ""),
    };
    if frac.len() > ADA_DECIMALS {
        return Err(CardanoError::IntegerParse(format!(
            "{} has more than {} decimal places",
            ada, ADA_DECIMALS
        )));
    }
    if whole.is_empty() && frac.is_empty() {
        return Err(CardanoError::IntegerParse(ada.to_string()));
    }
    let whole = if whole.is_empty() { "0" } else { whole };
    let lovelace = format!("{}{:0<width$}", whole, frac, width = ADA_DECIMALS);
    lovelace
        .parse::<Quantity>()
        .map_err(|_| CardanoError::IntegerParse(ada.to_string()))
}
