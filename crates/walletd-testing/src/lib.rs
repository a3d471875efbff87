//! # WalletD Testing Infrastructure
//!
//! Testing utilities for the WalletD Cardano codec:
//! - Known-good and known-bad address strings
//! - Quantity edge cases around the float and 64-bit boundaries
//! - Property-based testing strategies for explorer amount lists
//!
//! Everything here is plain strings and bytes so the crate can be used as a
//! dev-dependency without depending on the crates it tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use walletd_testing::*;
//!
//! proptest! {
//!     #[test]
//!     fn test_fold_is_order_independent(list in amount_list(8)) {
//!         // ...
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proptest::prelude::*;

// ============================================================================
// Edge Case Addresses
// ============================================================================

/// Edge case addresses for testing
pub struct EdgeCaseAddresses;

impl EdgeCaseAddresses {
    /// CIP-19 mainnet base address (key hash payment, key hash stake), header 0x01
    pub const MAINNET_BASE: &'static str = "addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3x";

    /// CIP-19 testnet base address, header 0x00
    pub const TESTNET_BASE: &'static str = "addr_test1qz2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgs68faae";

    /// CIP-19 mainnet enterprise address, header 0x61
    pub const MAINNET_ENTERPRISE: &'static str = "addr1vx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzers66hrl8";

    /// CIP-19 mainnet stake address, header 0xe1
    pub const MAINNET_STAKE: &'static str = "stake1uyehkck0lajq8gr28t9uxnuvgcqrc6070x3k9r8048z8y5gh6ffgw";

    /// Payment key hash shared by the CIP-19 vectors
    pub const PAYMENT_KEY_HASH: &'static str = "9493315cd92eb5d8c4304e67b7e16ae36d61d34502694657811a2c8e";

    /// Stake key hash shared by the CIP-19 vectors
    pub const STAKE_KEY_HASH: &'static str = "337b62cfff6403a06a3acbc34f8c46003c69fe79a3628cefa9c47251";

    /// Valid bech32 strings
    pub fn valid() -> Vec<&'static str> {
        vec![
            Self::MAINNET_BASE,
            Self::TESTNET_BASE,
            Self::MAINNET_ENTERPRISE,
            Self::MAINNET_STAKE,
        ]
    }

    /// Strings that must never decode
    pub fn invalid() -> Vec<&'static str> {
        vec![
            "",
            "addr",
            "addr1",
            "not_an_address",
            "addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3y", // Bad checksum
            "addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3", // Truncated
            "Addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3x", // Mixed case
            "addr1bx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3x", // 'b' outside alphabet
            "addr1qx2fxv2umyhttkxyxp8x0dlpdt3k6cwng5pxj3jhsydzer3n0d3vllmyqwsx5wktcd8cc3sq835lu7drv2xwl2wywfgse35a3x ", // Trailing space
            "0x742d35Cc6634C0532925a3b844Bc9e7595f5fFb9",
        ]
    }
}

// ============================================================================
// Edge Case Amounts
// ============================================================================

/// Edge case quantities, as the decimal strings an explorer returns
pub struct EdgeCaseAmounts;

impl EdgeCaseAmounts {
    /// Zero amount
    pub const ZERO: &'static str = "0";

    /// One lovelace
    pub const MIN: &'static str = "1";

    /// 2^53 + 1, the first integer a double cannot represent
    pub const FLOAT_UNSAFE: &'static str = "9007199254740993";

    /// Maximum u64
    pub const MAX_U64: &'static str = "18446744073709551615";

    /// u64::MAX + 1
    pub const OVER_U64: &'static str = "18446744073709551616";

    /// Total ADA supply cap in lovelace
    pub const ADA_MAX_SUPPLY: &'static str = "45000000000000000";

    /// Quantities that test precision
    pub fn precision_test_amounts() -> Vec<&'static str> {
        vec![
            Self::ZERO,
            Self::MIN,
            "1000000",
            Self::ADA_MAX_SUPPLY,
            Self::FLOAT_UNSAFE,
            Self::MAX_U64,
            Self::OVER_U64,
            "340282366920938463463374607431768211456", // 2^128
        ]
    }

    /// Strings that are not base-10 integers
    pub fn invalid() -> Vec<&'static str> {
        vec!["", "-1", "+1", "1.5", "1e6", " 1", "1 ", "0x10", "1_000", "one"]
    }

    /// Pairs whose sum overflows u64 but must stay exact
    pub fn overflow_test_pairs() -> Vec<(&'static str, &'static str)> {
        vec![
            (Self::MAX_U64, Self::MIN),
            (Self::MAX_U64, Self::MAX_U64),
            (Self::FLOAT_UNSAFE, Self::FLOAT_UNSAFE),
        ]
    }
}

// ============================================================================
// Property-Based Testing Strategies
// ============================================================================

/// Unit string the explorer uses for the native coin
pub const LOVELACE: &str = "lovelace";

/// 56 lowercase hex characters
pub fn policy_id_hex() -> impl Strategy<Value = String> {
    prop::array::uniform28(any::<u8>()).prop_map(hex::encode)
}

/// Hex encoded asset names, possibly empty
pub fn asset_name_hex() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 0..=32).prop_map(hex::encode)
}

/// Non-negative decimal strings, well past u64 and into bignum territory
pub fn quantity_string() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => any::<u64>().prop_map(|n| n.to_string()),
        1 => "[1-9][0-9]{19,40}",
    ]
}

/// `(unit, quantity)` where unit is either `lovelace` or `policy ++ name`.
/// Policies and names are drawn from small pools so collisions, and therefore
/// accumulation, actually happen.
pub fn quantity_pair() -> impl Strategy<Value = (String, String)> {
    let policies = prop::sample::select(vec![
        "a".repeat(56),
        "b".repeat(56),
        "0".repeat(56),
    ]);
    let names = prop::sample::select(vec![
        String::new(),
        "74657374".to_string(),
        "01".to_string(),
    ]);
    let asset = (policies, names).prop_map(|(p, n)| format!("{}{}", p, n));
    let unit = prop_oneof![1 => Just(LOVELACE.to_string()), 2 => asset];
    (unit, quantity_string())
}

/// An explorer amount list of up to `max_len` entries
pub fn amount_list(max_len: usize) -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(quantity_pair(), 0..=max_len)
}

/// Base address payload: header byte followed by two 28-byte credentials
pub fn base_address_payload() -> impl Strategy<Value = Vec<u8>> {
    (
        prop_oneof![Just(0x00u8), Just(0x01u8), Just(0xe0u8), Just(0xe1u8), any::<u8>()],
        prop::collection::vec(any::<u8>(), 56),
    )
        .prop_map(|(header, creds)| {
            let mut payload = Vec::with_capacity(57);
            payload.push(header);
            payload.extend(creds);
            payload
        })
}

/// 32-byte transaction id, hex encoded
pub fn tx_hash_hex() -> impl Strategy<Value = String> {
    prop::array::uniform32(any::<u8>()).prop_map(hex::encode)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_case_addresses() {
        assert_eq!(EdgeCaseAddresses::valid().len(), 4);
        assert!(!EdgeCaseAddresses::invalid().is_empty());
        assert_eq!(EdgeCaseAddresses::PAYMENT_KEY_HASH.len(), 56);
        assert_eq!(EdgeCaseAddresses::STAKE_KEY_HASH.len(), 56);
    }

    #[test]
    fn test_edge_case_amounts() {
        let amounts = EdgeCaseAmounts::precision_test_amounts();
        assert!(amounts.iter().all(|a| a.bytes().all(|b| b.is_ascii_digit())));

        for (a, b) in EdgeCaseAmounts::overflow_test_pairs() {
            let a: u64 = a.parse().unwrap();
            let b: u64 = b.parse().unwrap();
            assert!(
                a.checked_add(b).is_none() || (a as f64 + b as f64) as u64 != a + b,
                "Expected overflow or precision loss for {} + {}",
                a,
                b
            );
        }
    }

    proptest! {
        #[test]
        fn test_policy_id_is_56_hex(policy in policy_id_hex()) {
            prop_assert_eq!(policy.len(), 56);
            prop_assert!(policy.bytes().all(|b| b.is_ascii_hexdigit()));
        }

        #[test]
        fn test_asset_name_is_whole_bytes(name in asset_name_hex()) {
            prop_assert!(name.len() <= 64);
            prop_assert_eq!(name.len() % 2, 0);
        }

        #[test]
        fn test_quantity_is_decimal(q in quantity_string()) {
            prop_assert!(!q.is_empty());
            prop_assert!(q.bytes().all(|b| b.is_ascii_digit()));
        }

        #[test]
        fn test_quantity_pair_unit_shape((unit, _q) in quantity_pair()) {
            prop_assert!(unit == LOVELACE || unit.len() >= 56);
        }

        #[test]
        fn test_base_payload_length(payload in base_address_payload()) {
            prop_assert_eq!(payload.len(), 57);
        }
    }
}
