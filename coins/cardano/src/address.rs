use std::fmt;
use std::str::FromStr;

use blake2::digest::consts::U28;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};

use crate::bech32;
use crate::config::{
    AddressType, ADDRESS_WORD_LIMIT, CREDENTIAL_HEX_OFFSET, MAINNET_NETWORK_ID, STAKE_HRP,
    TESTNET_NETWORK_ID,
};
use crate::error::{CardanoError, Result};

/// Network tag carried in the first byte of a stake key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkTag {
    Testnet,
    Mainnet,
}

impl NetworkTag {
    /// An `e0` header means testnet, any other header means mainnet.
    pub fn from_header(header: u8) -> Self {
        if format!("{:02x}", header) == "e0" {
            NetworkTag::Testnet
        } else {
            NetworkTag::Mainnet
        }
    }

    pub fn network_id(&self) -> u8 {
        match self {
            NetworkTag::Testnet => TESTNET_NETWORK_ID,
            NetworkTag::Mainnet => MAINNET_NETWORK_ID,
        }
    }

    /// Two character hex prefix, `"e0"` or `"e1"`
    pub fn prefix(&self) -> &'static str {
        match self {
            NetworkTag::Testnet => "e0",
            NetworkTag::Mainnet => "e1",
        }
    }

    /// Header byte of a key-hash stake address on this network
    pub fn stake_header(&self) -> u8 {
        match self {
            NetworkTag::Testnet => 0xe0,
            NetworkTag::Mainnet => 0xe1,
        }
    }
}

/// Hex slices of a decoded address payload. The payment part keeps the header
/// byte in front of the payment credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub payment_key_hash: String,
    pub staking_key_hash: String,
}

/// Cardano address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardanoAddress {
    hrp: String,
    bytes: Vec<u8>,
    bech32: String,
}

impl CardanoAddress {
    /// Decode and validate a bech32 address
    pub fn parse(address: &str) -> Result<Self> {
        let decoded = bech32::decode(address, ADDRESS_WORD_LIMIT)?;
        if decoded.data.is_empty() {
            return Err(CardanoError::MalformedAddress(format!(
                "'{}' has an empty payload",
                address
            )));
        }
        Ok(Self {
            hrp: decoded.hrp,
            bytes: decoded.data,
            bech32: address.to_lowercase(),
        })
    }

    /// Build an address from a raw payload
    pub fn from_bytes(hrp: &str, bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(CardanoError::MalformedAddress("empty payload".to_string()));
        }
        let bech32 = bech32::encode(hrp, &bytes, ADDRESS_WORD_LIMIT)?;
        Ok(Self {
            hrp: hrp.to_lowercase(),
            bytes,
            bech32,
        })
    }

    /// Create a new enterprise address (no staking)
    pub fn enterprise(payment_pubkey: &[u8], network_id: u8) -> Result<Self> {
        let payment_key_hash = Self::hash_key(payment_pubkey);

        // Enterprise address header: 0110 | network_id (4 bits)
        let header = 0x60 | (network_id & 0x0F);

        let mut data = Vec::with_capacity(29);
        data.push(header);
        data.extend_from_slice(&payment_key_hash);

        Self::from_bytes(Self::hrp_for(network_id), data)
    }

    /// Create a new base address (payment + staking)
    pub fn base(payment_pubkey: &[u8], staking_pubkey: &[u8], network_id: u8) -> Result<Self> {
        Self::from_key_hashes(
            &Self::hash_key(payment_pubkey),
            &Self::hash_key(staking_pubkey),
            network_id,
        )
    }

    /// Create a base address from already hashed credentials
    pub fn from_key_hashes(
        payment_hash: &[u8; 28],
        staking_hash: &[u8; 28],
        network_id: u8,
    ) -> Result<Self> {
        // Base address header: 0000 | network_id (4 bits)
        let header = network_id & 0x0F;

        let mut data = Vec::with_capacity(57);
        data.push(header);
        data.extend_from_slice(payment_hash);
        data.extend_from_slice(staking_hash);

        Self::from_bytes(Self::hrp_for(network_id), data)
    }

    /// Hash a public key using Blake2b-224
    pub fn hash_key(pubkey: &[u8]) -> [u8; 28] {
        let mut hasher = Blake2b::<U28>::new();
        hasher.update(pubkey);
        let result = hasher.finalize();

        let mut hash = [0u8; 28];
        hash.copy_from_slice(&result);
        hash
    }

    fn hrp_for(network_id: u8) -> &'static str {
        if network_id == MAINNET_NETWORK_ID {
            "addr"
        } else {
            "addr_test"
        }
    }

    /// Get the bech32 encoded address
    pub fn to_bech32(&self) -> &str {
        &self.bech32
    }

    pub fn hrp(&self) -> &str {
        &self.hrp
    }

    /// Raw payload, header byte first
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn header(&self) -> u8 {
        self.bytes[0]
    }

    pub fn address_type(&self) -> AddressType {
        AddressType::from_header(self.header())
    }

    pub fn network_tag(&self) -> NetworkTag {
        NetworkTag::from_header(self.header())
    }

    /// `"e0"` or `"e1"`, see [`NetworkTag::from_header`]
    pub fn network_prefix(&self) -> &'static str {
        self.network_tag().prefix()
    }

    /// Split the payload hex at [`CREDENTIAL_HEX_OFFSET`]
    pub fn credentials(&self) -> Result<Credentials> {
        let hex = self.to_hex();
        if hex.len() < CREDENTIAL_HEX_OFFSET {
            return Err(CardanoError::MalformedAddress(format!(
                "payload of {} bytes cannot hold a payment credential",
                self.bytes.len()
            )));
        }
        let (payment, staking) = hex.split_at(CREDENTIAL_HEX_OFFSET);
        Ok(Credentials {
            payment_key_hash: payment.to_string(),
            staking_key_hash: staking.to_string(),
        })
    }

    /// Derive the stake key address that shares this address' staking credential.
    /// An address without a staking part (enterprise) is `MalformedAddress`
    /// rather than a header-only stake key, so such wallets report no reward address.
    pub fn stake_key(&self) -> Result<Self> {
        let network = self.network_tag();
        let credentials = self.credentials()?;
        if credentials.staking_key_hash.is_empty() {
            return Err(CardanoError::MalformedAddress(format!(
                "'{}' carries no staking credential",
                self.bech32
            )));
        }

        let mut data = vec![network.stake_header()];
        data.extend(hex::decode(&credentials.staking_key_hash)?);
        tracing::debug!(address = %self.bech32, network = ?network, "Deriving stake key");
        Self::from_bytes(STAKE_HRP, data)
    }

    /// Validate a Cardano payment address string
    pub fn validate(address: &str) -> bool {
        match Self::parse(address) {
            Ok(addr) => addr.hrp == "addr" || addr.hrp == "addr_test",
            Err(_) => false,
        }
    }
}

impl FromStr for CardanoAddress {
    type Err = CardanoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CardanoAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bech32)
    }
}

/// `"e0"` for testnet-tagged addresses, `"e1"` for everything else
pub fn network_prefix(address: &str) -> Result<&'static str> {
    Ok(CardanoAddress::parse(address)?.network_prefix())
}

pub fn credentials(address: &str) -> Result<Credentials> {
    CardanoAddress::parse(address)?.credentials()
}

/// Bech32 stake key for the staking credential of `address`
pub fn stake_key_from_address(address: &str) -> Result<String> {
    let stake_key = CardanoAddress::parse(address)?.stake_key()?;
    Ok(stake_key.to_bech32().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // CIP-19 test vectors
    const MAINNET_BASE: &str = "addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3x";
    const TESTNET_BASE: &str = "addr_test1qz2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgs68faae";
    const MAINNET_ENTERPRISE: &str = "addr1vx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzers66hrl8";
    const MAINNET_STAKE: &str = "stake1uyehkck0lajq8gr28t9uxnuvgcqrc6070x3k9r8048z8y5gh6ffgw";
    const PAYMENT_HASH: &str = "9493315cd92eb5d8c4304e67b7e16ae36d61d34502694657811a2c8e";
    const STAKING_HASH: &str = "337b62cfff6403a06a3acbc34f8c46003c69fe79a3628cefa9c47251";

    // Test key (32 bytes for Ed25519 public key)
    fn test_pubkey() -> [u8; 32] {
        let mut key = [0u8; 32];
        for (i, b) in key.iter_mut().enumerate() {
            *b = i as u8;
        }
        key
    }

    #[test]
    fn test_parse_base_address() {
        let addr = CardanoAddress::parse(MAINNET_BASE).unwrap();
        assert_eq!(addr.hrp(), "addr");
        assert_eq!(addr.as_bytes().len(), 57);
        assert_eq!(addr.header(), 0x01);
        assert_eq!(addr.address_type(), AddressType::Base);
        assert_eq!(addr.to_bech32(), MAINNET_BASE);
    }

    #[test]
    fn test_credentials() {
        let creds = credentials(MAINNET_BASE).unwrap();
        assert_eq!(creds.payment_key_hash, format!("01{}", PAYMENT_HASH));
        assert_eq!(creds.staking_key_hash, STAKING_HASH);
    }

    #[test]
    fn test_credentials_enterprise_has_empty_staking() {
        let creds = credentials(MAINNET_ENTERPRISE).unwrap();
        assert_eq!(creds.payment_key_hash, format!("61{}", PAYMENT_HASH));
        assert!(creds.staking_key_hash.is_empty());
    }

    #[test]
    fn test_credentials_short_payload() {
        let short = CardanoAddress::from_bytes("addr", vec![0x61; 10]).unwrap();
        assert!(matches!(
            short.credentials(),
            Err(CardanoError::MalformedAddress(_))
        ));
    }

    #[test]
    fn test_network_prefix_rule() {
        // base address headers are 0x00 / 0x01, neither equals "e0"
        assert_eq!(network_prefix(MAINNET_BASE).unwrap(), "e1");
        assert_eq!(network_prefix(TESTNET_BASE).unwrap(), "e1");

        let mut payload = vec![0xe0];
        payload.extend_from_slice(&[0x11; 56]);
        let tagged = CardanoAddress::from_bytes("addr_test", payload).unwrap();
        assert_eq!(network_prefix(tagged.to_bech32()).unwrap(), "e0");
        assert_eq!(tagged.network_tag().network_id(), TESTNET_NETWORK_ID);
    }

    #[test]
    fn test_stake_key_from_mainnet_base() {
        assert_eq!(stake_key_from_address(MAINNET_BASE).unwrap(), MAINNET_STAKE);
    }

    #[test]
    fn test_stake_key_from_e1_header() {
        let mut payload = vec![0xe1];
        payload.extend_from_slice(&[0x22; 56]);
        let addr = CardanoAddress::from_bytes("addr", payload).unwrap();
        assert_eq!(addr.network_tag(), NetworkTag::Mainnet);
        assert_eq!(addr.network_tag().network_id(), MAINNET_NETWORK_ID);

        let stake = addr.stake_key().unwrap();
        assert_eq!(stake.hrp(), "stake");
        assert!(stake.to_bech32().starts_with("stake1"));
        assert_eq!(stake.as_bytes()[0], 0xe1);
        assert_eq!(&stake.as_bytes()[1..], &[0x22; 28]);
    }

    #[test]
    fn test_stake_key_from_e0_header() {
        let mut payload = vec![0xe0];
        payload.extend_from_slice(&[0x33; 56]);
        let addr = CardanoAddress::from_bytes("addr_test", payload).unwrap();
        let stake = addr.stake_key().unwrap();
        assert_eq!(stake.as_bytes()[0], 0xe0);
        assert_eq!(stake.network_tag(), NetworkTag::Testnet);
    }

    #[test]
    fn test_stake_key_requires_staking_credential() {
        assert!(matches!(
            stake_key_from_address(MAINNET_ENTERPRISE),
            Err(CardanoError::MalformedAddress(_))
        ));
        assert!(matches!(
            stake_key_from_address(MAINNET_STAKE),
            Err(CardanoError::MalformedAddress(_))
        ));
    }

    #[test]
    fn test_corrupted_checksum_fails() {
        let corrupted = MAINNET_BASE.replace("e35a3x", "e35a3y");
        assert!(matches!(
            CardanoAddress::parse(&corrupted),
            Err(CardanoError::InvalidEncoding(_))
        ));
        assert!(stake_key_from_address(&corrupted).is_err());
    }

    #[test]
    fn test_parse_uppercase() {
        let addr = CardanoAddress::parse(&MAINNET_BASE.to_uppercase()).unwrap();
        assert_eq!(addr.to_bech32(), MAINNET_BASE);
    }

    #[test]
    fn test_hash_key() {
        let hash = CardanoAddress::hash_key(&test_pubkey());
        assert_eq!(hash.len(), 28);
        assert_ne!(hash, CardanoAddress::hash_key(&[0u8; 32]));
    }

    #[test]
    fn test_enterprise_address_mainnet() {
        let addr = CardanoAddress::enterprise(&test_pubkey(), MAINNET_NETWORK_ID).unwrap();
        assert!(addr.to_bech32().starts_with("addr1"));
        assert_eq!(addr.address_type(), AddressType::Enterprise);
        assert_eq!(addr.as_bytes().len(), 29);
    }

    #[test]
    fn test_enterprise_address_testnet() {
        let addr = CardanoAddress::enterprise(&test_pubkey(), TESTNET_NETWORK_ID).unwrap();
        assert!(addr.to_bech32().starts_with("addr_test1"));
        assert_eq!(addr.header(), 0x60);
    }

    #[test]
    fn test_base_address_roundtrip() {
        let payment_key = test_pubkey();
        let mut staking_key = test_pubkey();
        staking_key[0] = 0xFF;

        let addr = CardanoAddress::base(&payment_key, &staking_key, MAINNET_NETWORK_ID).unwrap();
        assert!(addr.to_bech32().starts_with("addr1"));
        assert_eq!(addr.address_type(), AddressType::Base);

        let parsed: CardanoAddress = addr.to_bech32().parse().unwrap();
        assert_eq!(parsed, addr);
        let creds = parsed.credentials().unwrap();
        assert_eq!(
            creds.staking_key_hash,
            hex::encode(CardanoAddress::hash_key(&staking_key))
        );
    }

    #[test]
    fn test_from_key_hashes_matches_cip19() {
        let mut payment = [0u8; 28];
        payment.copy_from_slice(&hex::decode(PAYMENT_HASH).unwrap());
        let mut staking = [0u8; 28];
        staking.copy_from_slice(&hex::decode(STAKING_HASH).unwrap());

        let addr = CardanoAddress::from_key_hashes(&payment, &staking, MAINNET_NETWORK_ID).unwrap();
        assert_eq!(addr.to_bech32(), MAINNET_BASE);
        let addr = CardanoAddress::from_key_hashes(&payment, &staking, TESTNET_NETWORK_ID).unwrap();
        assert_eq!(addr.to_bech32(), TESTNET_BASE);
    }

    #[test]
    fn test_validate() {
        assert!(CardanoAddress::validate(MAINNET_BASE));
        assert!(CardanoAddress::validate(TESTNET_BASE));
        assert!(!CardanoAddress::validate(MAINNET_STAKE));
        assert!(!CardanoAddress::validate("invalid"));
        assert!(!CardanoAddress::validate("btc1qxyz"));
        assert!(!CardanoAddress::validate("0x1234567890"));
    }
}
