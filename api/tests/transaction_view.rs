use algoscope::{
    errors::InvalidInputError,
    types::{Address, Note, NoteEncoding, TransactionType},
    TransactionView,
};
use base64::{prelude::BASE64_STANDARD, Engine};
use serde_json::json;
use testresult::TestResult;

mod common;

#[test]
fn payment_exposes_receiver_and_amount() -> TestResult {
    let record = common::record(json!({
        "id": "PAYTX",
        "tx-type": "pay",
        "sender": "SENDER",
        "fee": 1000,
        "confirmed-round": 42,
        "payment-transaction": { "receiver": "RECEIVER", "amount": 250_000 }
    }))?;
    let view = TransactionView::from_record(&record);

    assert_eq!(view.tx_type(), Some(TransactionType::Payment));
    assert_eq!(view.display_type_name(), Some("Payment"));
    assert_eq!(view.counterparty(), Some("RECEIVER"));
    assert_eq!(view.amount(), Some(250_000));
    assert_eq!(view.asset_id(), None);
    assert_eq!(view.app_id(), None);
    assert_eq!(view.block(), Some(42));
    assert_eq!(view.fee(), 1000);
    Ok(())
}

#[test]
fn created_asset_index_wins_over_payload_id() -> TestResult {
    let record = common::record(json!({
        "tx-type": "acfg",
        "created-asset-index": 31_566_704,
        "asset-config-transaction": {
            "asset-id": 0,
            "params": { "creator": "CREATOR", "total": 1000, "decimals": 2, "unit-name": "TOK" }
        }
    }))?;
    let view = TransactionView::from_record(&record);

    assert_eq!(view.asset_id(), Some(31_566_704));
    assert_eq!(view.counterparty(), None);
    assert_eq!(view.amount(), None);
    Ok(())
}

#[test]
fn asset_config_update_keeps_payload_id() -> TestResult {
    let record = common::record(json!({
        "tx-type": "acfg",
        "asset-config-transaction": { "asset-id": 77 }
    }))?;
    assert_eq!(TransactionView::from_record(&record).asset_id(), Some(77));
    Ok(())
}

#[test]
fn created_application_index_wins_over_payload_id() -> TestResult {
    let record = common::record(json!({
        "tx-type": "appl",
        "created-application-index": 1_234,
        "application-transaction": {
            "application-id": 0,
            "application-args": ["AA=="],
            "foreign-assets": [5]
        },
        "logs": ["bG9nMQ==", "FR98dQAAAAAAAAAq"]
    }))?;
    let view = TransactionView::from_record(&record);

    assert_eq!(view.app_id(), Some(1_234));
    assert_eq!(view.asset_id(), None);
    assert!(view.has_app_call_arguments());
    assert!(view.has_app_call_foreign_assets());
    assert!(!view.has_app_call_foreign_apps());
    assert!(!view.has_app_call_foreign_accounts());
    assert_eq!(view.return_value(), Some("FR98dQAAAAAAAAAq"));
    Ok(())
}

#[test]
fn msgpack_note_decodes_or_degrades_to_raw() -> TestResult {
    let structured = common::record(json!({ "tx-type": "pay", "note": "gaFhAQ==" }))?;
    assert_eq!(
        TransactionView::from_record(&structured).note(NoteEncoding::MsgPack),
        Some(Note::MsgPack(r#"{"a":1}"#.to_string()))
    );

    let plain = common::record(json!({ "tx-type": "pay", "note": "SGVsbG8gd29ybGQ=" }))?;
    let view = TransactionView::from_record(&plain);
    assert_eq!(
        view.note(NoteEncoding::MsgPack),
        Some(Note::Raw(b"Hello world".to_vec()))
    );
    assert_eq!(
        view.note(NoteEncoding::Text),
        Some(Note::Text("Hello world".to_string()))
    );
    assert_eq!(
        view.note(NoteEncoding::Base64),
        Some(Note::Base64("SGVsbG8gd29ybGQ=".to_string()))
    );
    Ok(())
}

#[test]
fn deeply_nested_msgpack_note_is_raw() -> TestResult {
    let mut bytes = vec![0x91u8; 512];
    bytes.push(0xc0);
    let note = BASE64_STANDARD.encode(&bytes);
    let record = common::record(json!({ "tx-type": "pay", "note": note }))?;

    assert_eq!(
        TransactionView::from_record(&record).note(NoteEncoding::MsgPack),
        Some(Note::Raw(bytes))
    );
    Ok(())
}

#[test]
fn multisig_addresses_follow_subsignature_order() -> TestResult {
    let record = common::record(json!({
        "tx-type": "pay",
        "signature": {
            "multisig": {
                "threshold": 1,
                "version": 1,
                "subsignature": [
                    { "public-key": "AgICAgICAgICAgICAgICAgICAgICAgICAgICAgICAgI=" },
                    { "public-key": "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE=", "signature": "c2ln" }
                ]
            }
        }
    }))?;
    let view = TransactionView::from_record(&record);

    assert!(view.is_multi_sig());
    assert!(!view.is_logic_sig());

    let addresses = view.multi_sig_signer_addresses();
    assert_eq!(addresses, vec![Address([2u8; 32]), Address([1u8; 32])]);
    for address in &addresses {
        let parsed: Address = address.to_string().parse()?;
        assert_eq!(&parsed, address);
    }
    Ok(())
}

#[test]
fn single_signature_has_no_multisig_addresses() -> TestResult {
    let record = common::record(json!({ "tx-type": "pay", "signature": { "sig": "c2ln" } }))?;
    assert!(TransactionView::from_record(&record)
        .multi_sig_signer_addresses()
        .is_empty());
    Ok(())
}

#[test]
fn inner_transactions_are_views_too() -> TestResult {
    let record = common::record(json!({
        "tx-type": "appl",
        "application-transaction": { "application-id": 9 },
        "inner-txns": [
            { "tx-type": "axfer", "asset-transfer-transaction": { "asset-id": 3, "amount": 5, "receiver": "R" } }
        ]
    }))?;
    let view = TransactionView::from_record(&record);

    assert!(view.has_inner_transactions());
    assert_eq!(view.inner_transactions().len(), 1);
    let inner = view.inner_transaction(0).ok_or("missing inner transaction")?;
    assert_eq!(inner.tx_type(), Some(TransactionType::AssetTransfer));
    assert_eq!(inner.asset_id(), Some(3));
    assert_eq!(inner.counterparty(), Some("R"));
    assert!(view.inner_transaction(1).is_none());
    Ok(())
}

#[test]
fn missing_record_is_rejected() {
    assert!(matches!(
        TransactionView::new(None),
        Err(InvalidInputError::MissingTransaction)
    ));
}
