//! Bech32 codec for Cardano addresses and stake keys.
//!
//! Wraps the `bech32` crate with an explicit word limit. Cardano base addresses
//! run past the 90 character ceiling BIP-173 sets for segwit, so every caller in
//! this crate passes [`ADDRESS_WORD_LIMIT`](crate::config::ADDRESS_WORD_LIMIT).

use ::bech32::primitives::decode::CheckedHrpstring;
use ::bech32::{Bech32, Hrp};

use crate::error::{CardanoError, Result};

/// Number of checksum characters appended to every bech32 string
const CHECKSUM_WORDS: usize = 6;

/// Human readable prefix and raw payload of a bech32 string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub hrp: String,
    pub data: Vec<u8>,
}

impl Decoded {
    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }
}

/// Decode a bech32 string, failing on a bad checksum, a character outside the
/// alphabet or a data part longer than `word_limit` five-bit words.
pub fn decode(encoded: &str, word_limit: usize) -> Result<Decoded> {
    let separator = encoded
        .rfind('1')
        .ok_or_else(|| CardanoError::InvalidEncoding(format!("missing separator in '{}'", encoded)))?;
    let words = encoded.len() - separator - 1;
    if words > word_limit {
        return Err(CardanoError::PayloadTooLong {
            words,
            limit: word_limit,
        });
    }

    let checked = CheckedHrpstring::new::<Bech32>(encoded)
        .map_err(|e| CardanoError::InvalidEncoding(e.to_string()))?;

    let decoded = Decoded {
        hrp: checked.hrp().to_lowercase(),
        data: checked.byte_iter().collect(),
    };

    // Excess or non-zero padding bits are dropped by the byte conversion, so a
    // string carrying them would not survive a round trip.
    let canonical = encode(&decoded.hrp, &decoded.data, word_limit)?;
    if canonical != encoded.to_lowercase() {
        return Err(CardanoError::InvalidEncoding(format!(
            "non-canonical padding in '{}'",
            encoded
        )));
    }

    Ok(decoded)
}

/// Encode `data` under `hrp`. Output is always lowercase.
pub fn encode(hrp: &str, data: &[u8], word_limit: usize) -> Result<String> {
    let words = (data.len() * 8).div_ceil(5) + CHECKSUM_WORDS;
    if words > word_limit {
        return Err(CardanoError::PayloadTooLong {
            words,
            limit: word_limit,
        });
    }

    let hrp = Hrp::parse(hrp).map_err(|e| CardanoError::InvalidEncoding(e.to_string()))?;
    ::bech32::encode::<Bech32>(hrp, data).map_err(|e| CardanoError::InvalidEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ADDRESS_WORD_LIMIT;

    // BIP-173 test vector
    const BIP173_VALID: &str = "a12uel5l";

    #[test]
    fn test_decode_bip173_vector() {
        let decoded = decode(BIP173_VALID, ADDRESS_WORD_LIMIT).unwrap();
        assert_eq!(decoded.hrp, "a");
        assert!(decoded.data.is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let data: Vec<u8> = (0u8..57).collect();
        let encoded = encode("addr", &data, ADDRESS_WORD_LIMIT).unwrap();
        assert!(encoded.starts_with("addr1"));
        let decoded = decode(&encoded, ADDRESS_WORD_LIMIT).unwrap();
        assert_eq!(decoded.hrp, "addr");
        assert_eq!(decoded.data, data);
    }

    #[test]
    fn test_uppercase_input_decodes_to_lowercase_output() {
        let data = [0xe1u8; 29];
        let encoded = encode("stake", &data, ADDRESS_WORD_LIMIT).unwrap();
        let decoded = decode(&encoded.to_uppercase(), ADDRESS_WORD_LIMIT).unwrap();
        assert_eq!(decoded.hrp, "stake");
        assert_eq!(encode(&decoded.hrp, &decoded.data, ADDRESS_WORD_LIMIT).unwrap(), encoded);
    }

    #[test]
    fn test_mixed_case_rejected() {
        let encoded = encode("addr", &[1, 2, 3], ADDRESS_WORD_LIMIT).unwrap();
        let mut mixed = encoded.clone();
        mixed.replace_range(0..1, "A");
        assert!(matches!(
            decode(&mixed, ADDRESS_WORD_LIMIT),
            Err(CardanoError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_corrupted_checksum() {
        let encoded = encode("addr", &[7u8; 57], ADDRESS_WORD_LIMIT).unwrap();
        let last = encoded.chars().last().unwrap();
        let swapped = if last == 'q' { 'p' } else { 'q' };
        let corrupted = format!("{}{}", &encoded[..encoded.len() - 1], swapped);
        assert!(matches!(
            decode(&corrupted, ADDRESS_WORD_LIMIT),
            Err(CardanoError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_character_outside_alphabet() {
        // 'b' is not in the bech32 alphabet
        assert!(matches!(
            decode("addr1bbbbbbbbbb", ADDRESS_WORD_LIMIT),
            Err(CardanoError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_missing_separator() {
        assert!(matches!(
            decode("nonsense", ADDRESS_WORD_LIMIT),
            Err(CardanoError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_padding_must_be_canonical() {
        assert_eq!(decode("test1lu0zy72x", ADDRESS_WORD_LIMIT).unwrap().data, vec![0xff]);
        // Same byte with a non-zero padding bit
        assert!(matches!(
            decode("test1laj5sth5", ADDRESS_WORD_LIMIT),
            Err(CardanoError::InvalidEncoding(_))
        ));
        // Same byte with a spare all-zero word
        assert!(matches!(
            decode("test1luqafdkce", ADDRESS_WORD_LIMIT),
            Err(CardanoError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_decode_word_limit() {
        let encoded = encode("addr", &[7u8; 57], ADDRESS_WORD_LIMIT).unwrap();
        // 57 bytes -> 92 data words + 6 checksum words
        assert!(decode(&encoded, 98).is_ok());
        assert_eq!(
            decode(&encoded, 90),
            Err(CardanoError::PayloadTooLong { words: 98, limit: 90 })
        );
    }

    #[test]
    fn test_encode_word_limit() {
        assert_eq!(
            encode("addr", &[0u8; 57], 90),
            Err(CardanoError::PayloadTooLong { words: 98, limit: 90 })
        );
    }
}
