#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use walletd_cardano::{bech32, credentials, network_prefix, stake_key_from_address, CardanoAddress, ADDRESS_WORD_LIMIT};

#[derive(Debug, Arbitrary)]
struct AddressInput {
    text: String,
    header: u8,
    payload: Vec<u8>,
    testnet: bool,
}

fuzz_target!(|input: AddressInput| {
    // Arbitrary text must never panic
    let _ = network_prefix(&input.text);
    let _ = credentials(&input.text);
    let _ = stake_key_from_address(&input.text);

    // Anything that decodes must re-encode to its lowercase form
    if let Ok(decoded) = bech32::decode(&input.text, ADDRESS_WORD_LIMIT) {
        let encoded = bech32::encode(&decoded.hrp, &decoded.data, ADDRESS_WORD_LIMIT)
            .expect("decoded address must re-encode");
        assert_eq!(encoded, input.text.to_lowercase());
    }

    // Built addresses must always parse back
    let mut bytes = vec![input.header];
    bytes.extend(input.payload.iter().take(64));
    let hrp = if input.testnet { "addr_test" } else { "addr" };
    if let Ok(address) = CardanoAddress::from_bytes(hrp, bytes.clone()) {
        let parsed = CardanoAddress::parse(address.to_bech32()).expect("built address must parse");
        assert_eq!(parsed.as_bytes(), bytes.as_slice());
        if let Ok(stake) = parsed.stake_key() {
            assert!(stake.to_bech32().starts_with("stake1"));
            assert_eq!(stake.as_bytes().len(), bytes.len() - 28);
        }
    }
});
