//! Ledger value model.
//!
//! Block explorers report value as a flat list of `(unit, quantity)` pairs while
//! the ledger itself works with a coin amount plus a policy → asset name →
//! quantity map. This module holds both shapes and the folding between them.
//! Every quantity is an arbitrary precision unsigned integer; nothing here goes
//! through a float or a fixed-width integer.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::{LOVELACE_UNIT, POLICY_ID_HEX_LEN};
use crate::error::{CardanoError, Result};

/// Exact, non-negative ledger quantity
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(BigUint);

impl Quantity {
    pub fn zero() -> Self {
        Quantity(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `None` once the quantity no longer fits in 64 bits
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    /// Minimal big-endian magnitude
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl FromStr for Quantity {
    type Err = CardanoError;

    /// Accepts plain base-10 digits only: no sign, no separators, no whitespace.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardanoError::IntegerParse(s.to_string()));
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Quantity)
            .ok_or_else(|| CardanoError::IntegerParse(s.to_string()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Quantity(BigUint::from(value))
    }
}

impl From<BigUint> for Quantity {
    fn from(value: BigUint) -> Self {
        Quantity(value)
    }
}

impl AddAssign<&Quantity> for Quantity {
    fn add_assign(&mut self, rhs: &Quantity) {
        self.0 += &rhs.0;
    }
}

impl Add<&Quantity> for Quantity {
    type Output = Quantity;

    fn add(mut self, rhs: &Quantity) -> Quantity {
        self += rhs;
        self
    }
}

impl<'a> std::iter::Sum<&'a Quantity> for Quantity {
    fn sum<I: Iterator<Item = &'a Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), |acc, q| acc + q)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct QuantityVisitor;

        impl Visitor<'_> for QuantityVisitor {
            type Value = Quantity;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a base-10 integer string or a non-negative integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Quantity, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Quantity, E> {
                Ok(Quantity::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Quantity, E> {
                u64::try_from(v)
                    .map(Quantity::from)
                    .map_err(|_| E::custom(CardanoError::IntegerParse(v.to_string())))
            }
        }

        deserializer.deserialize_any(QuantityVisitor)
    }
}

fn is_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// 28-byte minting policy hash, held as 56 lowercase hex characters
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PolicyId(String);

impl PolicyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        // validated on construction
        hex::decode(&self.0).unwrap_or_default()
    }
}

impl FromStr for PolicyId {
    type Err = CardanoError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != POLICY_ID_HEX_LEN || !is_hex(s) {
            return Err(CardanoError::InvalidAssetUnit(format!(
                "policy id must be {} hex characters: '{}'",
                POLICY_ID_HEX_LEN, s
            )));
        }
        Ok(PolicyId(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for PolicyId {
    type Error = CardanoError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<PolicyId> for String {
    fn from(id: PolicyId) -> Self {
        id.0
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hex encoded asset name of any byte length, possibly empty
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetName(String);

impl AssetName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        hex::decode(&self.0).unwrap_or_default()
    }
}

impl FromStr for AssetName {
    type Err = CardanoError;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() % 2 != 0 || !is_hex(s) {
            return Err(CardanoError::InvalidAssetUnit(format!(
                "asset name must be whole hex encoded bytes: '{}'",
                s
            )));
        }
        Ok(AssetName(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for AssetName {
    type Error = CardanoError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<AssetName> for String {
    fn from(name: AssetName) -> Self {
        name.0
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Either the native coin or a `policy_id ++ asset_name` unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AssetUnit {
    Lovelace,
    Asset {
        policy_id: PolicyId,
        asset_name: AssetName,
    },
}

impl AssetUnit {
    pub fn is_lovelace(&self) -> bool {
        matches!(self, AssetUnit::Lovelace)
    }
}

impl FromStr for AssetUnit {
    type Err = CardanoError;

    fn from_str(unit: &str) -> Result<Self> {
        if unit == LOVELACE_UNIT {
            return Ok(AssetUnit::Lovelace);
        }
        if unit.len() < POLICY_ID_HEX_LEN || !unit.is_char_boundary(POLICY_ID_HEX_LEN) {
            return Err(CardanoError::InvalidAssetUnit(unit.to_string()));
        }
        let (policy, name) = unit.split_at(POLICY_ID_HEX_LEN);
        Ok(AssetUnit::Asset {
            policy_id: policy.parse()?,
            asset_name: name.parse()?,
        })
    }
}

impl TryFrom<String> for AssetUnit {
    type Error = CardanoError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<AssetUnit> for String {
    fn from(unit: AssetUnit) -> Self {
        unit.to_string()
    }
}

impl fmt::Display for AssetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetUnit::Lovelace => f.write_str(LOVELACE_UNIT),
            AssetUnit::Asset {
                policy_id,
                asset_name,
            } => write!(f, "{}{}", policy_id, asset_name),
        }
    }
}

/// One `{ unit, quantity }` entry of a block explorer amount list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityPair {
    pub unit: AssetUnit,
    pub quantity: Quantity,
}

impl QuantityPair {
    pub fn new(unit: &str, quantity: &str) -> Result<Self> {
        Ok(Self {
            unit: unit.parse()?,
            quantity: quantity.parse()?,
        })
    }

    pub fn lovelace(quantity: impl Into<Quantity>) -> Self {
        Self {
            unit: AssetUnit::Lovelace,
            quantity: quantity.into(),
        }
    }

    pub fn is_lovelace(&self) -> bool {
        self.unit.is_lovelace()
    }
}

/// Stable partition of an amount list into coin and non-coin entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinSplit {
    pub coin: Vec<QuantityPair>,
    pub assets: Vec<QuantityPair>,
}

pub fn split_coin_from_assets(quantities: &[QuantityPair]) -> CoinSplit {
    let (coin, assets): (Vec<_>, Vec<_>) =
        quantities.iter().cloned().partition(QuantityPair::is_lovelace);
    CoinSplit { coin, assets }
}

/// Asset name → quantity for a single policy, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assets {
    entries: Vec<(AssetName, Quantity)>,
    index: HashMap<AssetName, usize>,
}

impl Assets {
    pub fn get(&self, name: &AssetName) -> Option<&Quantity> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn add(&mut self, name: &AssetName, quantity: &Quantity) {
        match self.index.get(name) {
            Some(&i) => self.entries[i].1 += quantity,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name.clone(), quantity.clone()));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AssetName, &Quantity)> {
        self.entries.iter().map(|(n, q)| (n, q))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Policy → asset name → quantity. Iteration follows first-seen order of
/// policies and of names within each policy, which is also the map key order
/// the CBOR encoder writes. Lookups go through a position index so folding
/// stays linear in the number of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiAsset {
    policies: Vec<(PolicyId, Assets)>,
    index: HashMap<PolicyId, usize>,
}

impl MultiAsset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, policy_id: &PolicyId, name: &AssetName) -> Option<&Quantity> {
        self.policy(policy_id).and_then(|assets| assets.get(name))
    }

    pub fn policy(&self, policy_id: &PolicyId) -> Option<&Assets> {
        self.index.get(policy_id).map(|&i| &self.policies[i].1)
    }

    /// Add `quantity` to the running total, creating the policy and name entries
    /// on first use.
    pub fn add(&mut self, policy_id: &PolicyId, name: &AssetName, quantity: &Quantity) {
        tracing::trace!(policy = %policy_id, asset = %name, %quantity, "accumulating asset");
        let i = match self.index.get(policy_id) {
            Some(&i) => i,
            None => {
                self.index.insert(policy_id.clone(), self.policies.len());
                self.policies.push((policy_id.clone(), Assets::default()));
                self.policies.len() - 1
            }
        };
        self.policies[i].1.add(name, quantity);
    }

    pub fn merge(&mut self, other: &MultiAsset) {
        for (policy_id, assets) in other.iter() {
            for (name, quantity) in assets.iter() {
                self.add(policy_id, name, quantity);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PolicyId, &Assets)> {
        self.policies.iter().map(|(p, a)| (p, a))
    }

    /// Number of policies
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl Serialize for Assets {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, quantity) in self.iter() {
            map.serialize_entry(name, quantity)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Assets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct AssetsVisitor;

        impl<'de> Visitor<'de> for AssetsVisitor {
            type Value = Assets;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of hex asset names to quantities")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Assets, A::Error> {
                let mut assets = Assets::default();
                while let Some((name, quantity)) = access.next_entry::<AssetName, Quantity>()? {
                    assets.add(&name, &quantity);
                }
                Ok(assets)
            }
        }

        deserializer.deserialize_map(AssetsVisitor)
    }
}

impl Serialize for MultiAsset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (policy_id, assets) in self.iter() {
            map.serialize_entry(policy_id, assets)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for MultiAsset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MultiAssetVisitor;

        impl<'de> Visitor<'de> for MultiAssetVisitor {
            type Value = MultiAsset;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of policy ids to asset maps")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<MultiAsset, A::Error> {
                let mut multi_asset = MultiAsset::new();
                while let Some((policy_id, assets)) = access.next_entry::<PolicyId, Assets>()? {
                    for (name, quantity) in assets.iter() {
                        multi_asset.add(&policy_id, name, quantity);
                    }
                }
                Ok(multi_asset)
            }
        }

        deserializer.deserialize_map(MultiAssetVisitor)
    }
}

/// Coin plus multi-asset map, the ledger's own shape for value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    pub coin: Quantity,
    #[serde(default, skip_serializing_if = "MultiAsset::is_empty")]
    pub multi_assets: MultiAsset,
}

impl Value {
    pub fn coin_only(coin: impl Into<Quantity>) -> Self {
        Self {
            coin: coin.into(),
            multi_assets: MultiAsset::new(),
        }
    }

    /// Fold a single amount list
    pub fn from_pairs(pairs: &[QuantityPair]) -> Self {
        let mut value = Value::default();
        for pair in pairs {
            value.add_pair(pair);
        }
        value
    }

    pub fn add_pair(&mut self, pair: &QuantityPair) {
        match &pair.unit {
            AssetUnit::Lovelace => self.coin += &pair.quantity,
            AssetUnit::Asset {
                policy_id,
                asset_name,
            } => self.multi_assets.add(policy_id, asset_name, &pair.quantity),
        }
    }

    pub fn merge(&mut self, other: &Value) {
        self.coin += &other.coin;
        self.multi_assets.merge(&other.multi_assets);
    }

    pub fn has_assets(&self) -> bool {
        !self.multi_assets.is_empty()
    }

    /// Flatten back to explorer form: coin first, then assets in map order
    pub fn to_pairs(&self) -> Vec<QuantityPair> {
        let mut pairs = vec![QuantityPair::lovelace(self.coin.clone())];
        for (policy_id, assets) in self.multi_assets.iter() {
            for (name, quantity) in assets.iter() {
                pairs.push(QuantityPair {
                    unit: AssetUnit::Asset {
                        policy_id: policy_id.clone(),
                        asset_name: name.clone(),
                    },
                    quantity: quantity.clone(),
                });
            }
        }
        pairs
    }
}

/// Fold any number of amount lists into one balance. Coin totals and every
/// `(policy, asset name)` total accumulate across all entries.
pub fn fold_to_balance<'a, I>(entries: I) -> Value
where
    I: IntoIterator<Item = &'a [QuantityPair]>,
{
    let mut balance = Value::default();
    let mut folded = 0usize;
    for amount in entries {
        let CoinSplit { coin, assets } = split_coin_from_assets(amount);
        for pair in coin.iter().chain(assets.iter()) {
            balance.add_pair(pair);
        }
        folded += 1;
    }
    tracing::debug!(
        entries = folded,
        coin = %balance.coin,
        policies = balance.multi_assets.len(),
        "Folded balance"
    );
    balance
}
