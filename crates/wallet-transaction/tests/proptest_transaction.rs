use proptest::prelude::*;

use wallet_primitives::ec::PrivateKey;
use wallet_script::Script;
use wallet_transaction::serializer::{
    decode_signed, serialize_signed, serialize_unsigned, unsigned_len,
};
use wallet_transaction::signer::verify;
use wallet_transaction::{
    build, sign_with_config, AvailableOutput, SignerConfig, Transaction, TransactionError, TxIn,
    TxOut,
};

const BURN_ADDRESS: &str = "1BitcoinEaterAddressDontSendf59kuE";

/// Strategy for a transaction with raw-script outputs and 32-byte hashes.
fn arb_transaction() -> impl Strategy<Value = Transaction> {
    let arb_input = (
        prop::array::uniform32(any::<u8>()),
        any::<u32>(),
        any::<u32>(),
    )
        .prop_map(|(hash, idx, seq)| TxIn::new(hash.to_vec(), idx).with_sequence(seq));

    let arb_output = (any::<u64>(), prop::collection::vec(any::<u8>(), 0..64))
        .prop_map(|(value, script)| TxOut::to_script(value, Script::from_bytes(&script)));

    (
        prop::collection::vec(arb_input, 0..6),
        prop::collection::vec(arb_output, 0..6),
        any::<u32>(),
    )
        .prop_map(|(inputs, outputs, lock_time)| {
            let mut tx = Transaction::with_lock_time(lock_time);
            for input in inputs {
                tx.add_input(input);
            }
            for output in outputs {
                tx.add_output(output);
            }
            tx
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn unsigned_length_matches_formula(tx in arb_transaction()) {
        let bytes = serialize_unsigned(&tx).unwrap();
        let expected = 4 + 1 + tx.input_count() * 40 + 1 + tx.output_count() * 8;
        prop_assert_eq!(bytes.len(), expected);
        prop_assert_eq!(bytes.len(), unsigned_len(&tx));
    }

    #[test]
    fn signed_form_decodes_field_for_field(
        tx in arb_transaction(),
        unlock in prop::collection::vec(any::<u8>(), 0..80)
    ) {
        let unlocking = vec![Script::from_bytes(&unlock); tx.input_count()];
        let locking: Vec<Script> = tx
            .outputs()
            .iter()
            .map(|o| o.locking_script(Default::default()).unwrap())
            .collect();
        let bytes = serialize_signed(&tx, &unlocking, &locking).unwrap();
        let decoded = decode_signed(&bytes).unwrap();

        prop_assert_eq!(decoded.inputs.len(), tx.input_count());
        prop_assert_eq!(decoded.outputs.len(), tx.output_count());
        for (d, i) in decoded.inputs.iter().zip(tx.inputs()) {
            prop_assert_eq!(&d.previous_tx_hash[..], &i.previous_tx_hash[..]);
            prop_assert_eq!(d.previous_output_index, i.previous_output_index);
            prop_assert_eq!(d.sequence, i.sequence);
            prop_assert_eq!(d.unlocking_script.to_bytes(), &unlock[..]);
        }
        for ((d, o), l) in decoded.outputs.iter().zip(tx.outputs()).zip(&locking) {
            prop_assert_eq!(d.value, o.value);
            prop_assert_eq!(&d.locking_script, l);
        }
    }

    #[test]
    fn overspend_always_rejected(available in 0u64..u64::MAX, extra in 1u64..1000) {
        let amount = available.saturating_add(extra);
        prop_assume!(amount > available);
        let result = build(BURN_ADDRESS, &"00".repeat(32), amount, &AvailableOutput::new(available));
        let is_insufficient = matches!(result, Err(TransactionError::InsufficientFunds { .. }));
        prop_assert!(is_insufficient);
    }

    #[test]
    fn signed_reference_spend_verifies(
        seed in prop::array::uniform32(any::<u8>()),
        hash in prop::array::uniform32(any::<u8>()),
        value in 1u64..=21_000_000_00_000_000
    ) {
        if let Ok(key) = PrivateKey::from_bytes(&seed) {
            let tx = build(BURN_ADDRESS, &hex::encode(hash), value, &AvailableOutput::new(value)).unwrap();
            let config = SignerConfig::default();
            let signed = sign_with_config(&tx, &key, &config).unwrap();
            prop_assert!(verify(&tx, &signed.signature, &key.pub_key(), &config).unwrap());
        }
    }
}
