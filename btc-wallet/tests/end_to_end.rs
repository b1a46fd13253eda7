use btc_wallet::primitives::ec::PrivateKey;
use btc_wallet::script::Address;
use btc_wallet::transaction::serializer::{decode_signed, unsigned_hex};
use btc_wallet::transaction::signer::verify;
use btc_wallet::transaction::{build, sign_with_config, AvailableOutput, SignerConfig};
use btc_wallet::{generate, WalletError};

#[test]
fn generated_wallet_can_receive_and_sign() {
    let receiver = generate().unwrap();
    let sender = generate().unwrap();
    let sender_key = PrivateKey::from_hex(&sender.private_key_hex).unwrap();

    let tx = build(
        &receiver.address,
        &"ab".repeat(32),
        40_000,
        &AvailableOutput::new(50_000),
    )
    .unwrap();
    assert!(unsigned_hex(&tx).unwrap().starts_with("0100000001"));

    let config = SignerConfig::default();
    let signed = sign_with_config(&tx, &sender_key, &config).unwrap();
    assert!(verify(&tx, &signed.signature, &sender_key.pub_key(), &config).unwrap());

    let decoded = decode_signed(&signed.bytes).unwrap();
    let paid_to = Address::from_string(&receiver.address).unwrap();
    assert_eq!(decoded.outputs[0].value, 50_000);
    assert_eq!(decoded.outputs[0].locking_script, paid_to.lock_script());
}

#[test]
fn errors_convert_into_wallet_error() {
    let err: WalletError = build(
        "1BitcoinEaterAddressDontSendf59kuE",
        &"00".repeat(32),
        2,
        &AvailableOutput::new(1),
    )
    .unwrap_err()
    .into();
    assert!(matches!(err, WalletError::Transaction(_)));
    assert!(err.to_string().contains("insufficient"));
}
