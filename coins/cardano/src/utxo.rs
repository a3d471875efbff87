use serde::{Deserialize, Serialize};

use crate::error::{CardanoError, Result};
use crate::value::{fold_to_balance, QuantityPair, Value};

/// Value attached to an output, in either representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// Block explorer form: `[{ "unit": ..., "quantity": ... }]`
    Flat(Vec<QuantityPair>),
    /// `{ "coin": ..., "multi_assets": { policy: { name: quantity } } }`
    Structured(Value),
}

impl Amount {
    pub fn to_value(&self) -> Value {
        match self {
            Amount::Flat(pairs) => Value::from_pairs(pairs),
            Amount::Structured(value) => value.clone(),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Amount::Structured(_))
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Flat(Vec::new())
    }
}

/// Unspent output as returned by an explorer or written by hand. `address` and
/// `tx_hash` stay as plain text until the output is encoded, so a bad address or
/// hash only skips that record. `amount` is validated on load: one bad quantity
/// or unit fails the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoRecord {
    pub address: String,
    pub tx_hash: String,
    pub output_index: u32,
    #[serde(default)]
    pub amount: Amount,
}

impl UtxoRecord {
    pub fn new(address: &str, tx_hash: &str, output_index: u32, amount: Amount) -> Self {
        Self {
            address: address.to_string(),
            tx_hash: tx_hash.to_string(),
            output_index,
            amount,
        }
    }

    pub fn value(&self) -> Value {
        self.amount.to_value()
    }

    /// Same output with its amount folded into the structured form
    pub fn to_structured(&self) -> UtxoRecord {
        UtxoRecord {
            amount: Amount::Structured(self.value()),
            ..self.clone()
        }
    }

    /// The 32 raw bytes of the transaction id
    pub fn tx_hash_bytes(&self) -> Result<[u8; 32]> {
        let bytes = hex::decode(&self.tx_hash)
            .map_err(|e| CardanoError::InvalidTxHash(format!("{}: {}", self.tx_hash, e)))?;
        bytes.try_into().map_err(|b: Vec<u8>| {
            CardanoError::InvalidTxHash(format!("expected 32 bytes, got {}", b.len()))
        })
    }
}

/// Address balance record, the shape of an explorer `addresses/{address}` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressAmount {
    pub address: String,
    pub amount: Vec<QuantityPair>,
}

/// Fold every record on its own, keeping one balance per output
pub fn fold_utxo_amounts(records: &[UtxoRecord]) -> Vec<UtxoRecord> {
    records.iter().map(UtxoRecord::to_structured).collect()
}

/// Total of every output in the set
pub fn utxo_balance(records: &[UtxoRecord]) -> Value {
    let mut total = Value::default();
    for record in records {
        match &record.amount {
            Amount::Flat(pairs) => total.merge(&fold_to_balance([pairs.as_slice()])),
            Amount::Structured(value) => total.merge(value),
        }
    }
    total
}

/// Total across explorer address records
pub fn balance_from_explorer(entries: &[AddressAmount]) -> Value {
    fold_to_balance(entries.iter().map(|entry| entry.amount.as_slice()))
}

pub fn parse_utxos(json: &str) -> Result<Vec<UtxoRecord>> {
    Ok(serde_json::from_str(json)?)
}

pub fn parse_address_amounts(json: &str) -> Result<Vec<AddressAmount>> {
    Ok(serde_json::from_str(json)?)
}
