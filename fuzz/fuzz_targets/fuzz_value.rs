#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use walletd_cardano::{cbor, fold_to_balance, split_coin_from_assets, QuantityPair};

#[derive(Debug, Arbitrary)]
struct PairInput {
    unit: String,
    quantity: String,
    // Used when the raw strings are rejected, to keep folding busy
    fallback_policy: u8,
    fallback_parts: [u64; 2],
}

fuzz_target!(|inputs: Vec<PairInput>| {
    let pairs: Vec<QuantityPair> = inputs
        .iter()
        .map(|input| {
            QuantityPair::new(&input.unit, &input.quantity).unwrap_or_else(|_| {
                let unit = format!("{}{:02x}", hex::encode([input.fallback_policy; 28]), input.fallback_policy);
                let quantity = format!("{}{}", input.fallback_parts[0], input.fallback_parts[1]);
                QuantityPair::new(&unit, &quantity).expect("fallback pair is well formed")
            })
        })
        .collect();

    let split = split_coin_from_assets(&pairs);
    assert_eq!(split.coin.len() + split.assets.len(), pairs.len());

    // Folding in halves or all at once must agree
    let (left, right) = pairs.split_at(pairs.len() / 2);
    let whole = fold_to_balance([pairs.as_slice()]);
    let halves = fold_to_balance([left, right]);
    assert_eq!(whole, halves);

    // Encoding is deterministic
    let first = cbor::encode_value(&whole).expect("folded value must encode");
    let second = cbor::encode_value(&halves).expect("folded value must encode");
    assert_eq!(first, second);
});
