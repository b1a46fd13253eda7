use proptest::prelude::*;

use wallet_primitives::base58;
use wallet_primitives::ec::private_key::PrivateKey;
use wallet_primitives::ec::signature::Signature;
use wallet_primitives::hash::sha256;
use wallet_primitives::util::{VarInt, WireReader};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn private_key_serialization_roundtrip(seed in prop::array::uniform32(any::<u8>())) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let pk2 = PrivateKey::from_hex(&pk.to_hex()).unwrap();
            prop_assert_eq!(&pk, &pk2);
            let pk3 = PrivateKey::from_wif(&pk.to_wif()).unwrap();
            prop_assert_eq!(&pk, &pk3);
        }
    }

    #[test]
    fn ecdsa_sign_verify_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let digest = sha256(&msg);
            let sig = pk.sign(&digest).unwrap();
            prop_assert!(pk.pub_key().verify(&digest, &sig));

            // Deterministic nonces: the same digest signs to the same bytes.
            let again = pk.sign(&digest).unwrap();
            prop_assert_eq!(sig.to_der(), again.to_der());

            let parsed = Signature::from_der(&sig.to_der()).unwrap();
            prop_assert!(pk.pub_key().verify(&digest, &parsed));
        }
    }

    #[test]
    fn der_length_is_bounded(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..64)
    ) {
        if let Ok(pk) = PrivateKey::from_bytes(&seed) {
            let der = pk.sign(&sha256(&msg)).unwrap().to_der();
            prop_assert!(der.len() >= 8 && der.len() <= 72);
            prop_assert_eq!(der[0], 0x30);
        }
    }

    #[test]
    fn varint_length_matches_encoding(n in any::<u64>()) {
        let v = VarInt(n);
        prop_assert_eq!(v.to_bytes().len(), v.length());
    }

    #[test]
    fn varint_reads_back_outside_collision_band(n in any::<u64>()) {
        prop_assume!(!(253..=255).contains(&n));
        let bytes = VarInt(n).to_bytes();
        let mut reader = WireReader::new(&bytes);
        prop_assert_eq!(reader.read_varint().unwrap().value(), n);
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn base58check_roundtrip(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let encoded = base58::check_encode(&data);
        prop_assert_eq!(base58::check_decode(&encoded).unwrap(), data);
    }
}
