//! Canonical CBOR for ledger values and unspent outputs.
//!
//! Layouts:
//!
//! - value: `coin` as a bare integer when there are no native assets, otherwise
//!   `[coin, { policy_id: { asset_name: quantity } }]`
//! - output: `[[tx_hash, output_index], [address, value]]`
//!
//! Integers use the shortest major type 0 head up to `u64::MAX` and a tag 2
//! positive bignum past that. Map keys are written in the order the
//! [`MultiAsset`](crate::value::MultiAsset) yields them, so equal values always
//! produce identical bytes.

use std::collections::HashMap;

use minicbor::data::IanaTag;
use minicbor::Encoder;

use crate::address::CardanoAddress;
use crate::error::{CardanoError, Result};
use crate::utxo::UtxoRecord;
use crate::value::{Quantity, Value};

type VecEncoder<'b> = Encoder<&'b mut Vec<u8>>;

/// Encoded output and its position in the input set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedUtxo {
    pub index: usize,
    pub bytes: Vec<u8>,
}

impl EncodedUtxo {
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

/// Output that could not be encoded, and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUtxo {
    pub index: usize,
    pub reason: CardanoError,
}

/// Outcome of encoding a set of outputs. A bad record lands in `skipped`
/// instead of failing the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeReport {
    pub encoded: Vec<EncodedUtxo>,
    pub skipped: Vec<SkippedUtxo>,
}

impl EncodeReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Number of records the batch was given
    pub fn total(&self) -> usize {
        self.encoded.len() + self.skipped.len()
    }

    pub fn to_hex_vec(&self) -> Vec<String> {
        self.encoded.iter().map(EncodedUtxo::to_hex).collect()
    }
}

/// Encoder for a single pass. Owns a memo of hex strings already turned into
/// bytes, dropped with the encoder.
#[derive(Debug, Default)]
pub struct CanonicalEncoder {
    hex_cache: HashMap<String, Vec<u8>>,
}

impl CanonicalEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode_value(&mut self, value: &Value) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut enc = Encoder::new(&mut buf);
            self.write_value(&mut enc, value)?;
        }
        Ok(buf)
    }

    pub fn encode_utxo(&mut self, utxo: &UtxoRecord) -> Result<Vec<u8>> {
        let tx_hash = utxo.tx_hash_bytes()?;
        let address = CardanoAddress::parse(&utxo.address)?;
        let value = utxo.value();

        let mut buf = Vec::new();
        {
            let mut enc = Encoder::new(&mut buf);
            enc.array(2)?;
            enc.array(2)?.bytes(&tx_hash)?.u32(utxo.output_index)?;
            enc.array(2)?.bytes(address.as_bytes())?;
            self.write_value(&mut enc, &value)?;
        }
        Ok(buf)
    }

    pub fn encode_utxos(&mut self, utxos: &[UtxoRecord]) -> EncodeReport {
        let mut report = EncodeReport::default();
        for (index, utxo) in utxos.iter().enumerate() {
            match self.encode_utxo(utxo) {
                Ok(bytes) => report.encoded.push(EncodedUtxo { index, bytes }),
                Err(reason) => {
                    tracing::warn!(
                        index,
                        tx_hash = %utxo.tx_hash,
                        output_index = utxo.output_index,
                        error = %reason,
                        "Skipping unencodable UTXO"
                    );
                    report.skipped.push(SkippedUtxo { index, reason });
                }
            }
        }
        tracing::debug!(
            encoded = report.encoded.len(),
            skipped = report.skipped.len(),
            "Encoded UTXO set"
        );
        report
    }

    fn write_value(&mut self, enc: &mut VecEncoder<'_>, value: &Value) -> Result<()> {
        if value.multi_assets.is_empty() {
            return write_quantity(enc, &value.coin);
        }

        enc.array(2)?;
        write_quantity(enc, &value.coin)?;
        enc.map(value.multi_assets.len() as u64)?;
        for (policy_id, assets) in value.multi_assets.iter() {
            enc.bytes(self.hex_bytes(policy_id.as_str())?)?;
            enc.map(assets.len() as u64)?;
            for (name, quantity) in assets.iter() {
                enc.bytes(self.hex_bytes(name.as_str())?)?;
                write_quantity(enc, quantity)?;
            }
        }
        Ok(())
    }

    fn hex_bytes(&mut self, hex_str: &str) -> Result<&[u8]> {
        if !self.hex_cache.contains_key(hex_str) {
            let bytes = hex::decode(hex_str)?;
            self.hex_cache.insert(hex_str.to_string(), bytes);
        }
        Ok(&self.hex_cache[hex_str])
    }
}

fn write_quantity(enc: &mut VecEncoder<'_>, quantity: &Quantity) -> Result<()> {
    match quantity.to_u64() {
        Some(n) => {
            enc.u64(n)?;
        }
        None => {
            enc.tag(IanaTag::PosBignum)?.bytes(&quantity.to_bytes_be())?;
        }
    }
    Ok(())
}

pub fn encode_value(value: &Value) -> Result<Vec<u8>> {
    CanonicalEncoder::new().encode_value(value)
}

pub fn encode_value_hex(value: &Value) -> Result<String> {
    encode_value(value).map(hex::encode)
}

pub fn encode_utxo(utxo: &UtxoRecord) -> Result<Vec<u8>> {
    CanonicalEncoder::new().encode_utxo(utxo)
}

pub fn encode_utxos(utxos: &[UtxoRecord]) -> EncodeReport {
    CanonicalEncoder::new().encode_utxos(utxos)
}
