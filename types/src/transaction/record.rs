use serde::{Deserialize, Serialize};

use crate::errors::{InvalidInputError, RecordError};

use super::payloads::{
    AppCallPayload, AssetConfigPayload, AssetFreezePayload, AssetTransferPayload, KeyRegPayload,
    PaymentPayload, StateProofPayload,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MultisigSubsignature {
    pub public_key: String,
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MultisigSignature {
    pub subsignature: Vec<MultisigSubsignature>,
    pub threshold: Option<u64>,
    pub version: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LogicSignature {
    pub logic: String,
    pub args: Vec<String>,
    pub signature: Option<String>,
    pub multisig_signature: Option<MultisigSignature>,
}

/// Authorization attached to a transaction. At most one of the fields is
/// expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TransactionSignature {
    pub sig: Option<String>,
    pub multisig: Option<MultisigSignature>,
    pub logicsig: Option<LogicSignature>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EvalDelta {
    pub action: u64,
    pub bytes: Option<String>,
    pub uint: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EvalDeltaKeyValue {
    pub key: String,
    pub value: EvalDelta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AccountStateDelta {
    pub address: String,
    pub delta: Vec<EvalDeltaKeyValue>,
}

/// A transaction as returned by the indexer, confirmed or pending.
///
/// Every field is optional on the wire; missing fields take their defaults.
/// Inner transactions share the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RawTransactionRecord {
    pub id: String,
    pub confirmed_round: Option<u64>,
    pub fee: u64,
    pub sender: String,
    pub tx_type: String,
    pub round_time: Option<i64>,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: Option<String>,
    pub genesis_hash: Option<String>,
    pub group: Option<String>,
    pub signature: Option<TransactionSignature>,
    pub note: Option<String>,
    pub logs: Option<Vec<String>>,
    pub sender_rewards: Option<u64>,
    pub receiver_rewards: Option<u64>,
    pub created_asset_index: Option<u64>,
    pub created_application_index: Option<u64>,
    pub inner_txns: Option<Vec<RawTransactionRecord>>,
    pub local_state_delta: Option<Vec<AccountStateDelta>>,
    pub global_state_delta: Option<Vec<EvalDeltaKeyValue>>,

    pub payment_transaction: Option<PaymentPayload>,
    pub asset_transfer_transaction: Option<AssetTransferPayload>,
    pub asset_freeze_transaction: Option<AssetFreezePayload>,
    pub asset_config_transaction: Option<AssetConfigPayload>,
    pub keyreg_transaction: Option<KeyRegPayload>,
    pub application_transaction: Option<AppCallPayload>,
    pub state_proof_transaction: Option<StateProofPayload>,
}

impl RawTransactionRecord {
    /// Builds a record from an untyped JSON value.
    ///
    /// A `null` value is a missing record and is reported as
    /// [`InvalidInputError::MissingTransaction`].
    pub fn from_json(value: serde_json::Value) -> Result<Self, RecordError> {
        if value.is_null() {
            return Err(InvalidInputError::MissingTransaction.into());
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_is_a_missing_record() {
        let err = RawTransactionRecord::from_json(serde_json::Value::Null).unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidInput(InvalidInputError::MissingTransaction)
        ));
    }

    #[test]
    fn non_object_is_a_deserialize_error() {
        let err = RawTransactionRecord::from_json(json!(42)).unwrap_err();
        assert!(matches!(err, RecordError::DeserializeError(_)));
    }

    #[test]
    fn reads_kebab_case_fields() {
        let record = RawTransactionRecord::from_json(json!({
            "id": "TXID",
            "confirmed-round": 10,
            "tx-type": "pay",
            "payment-transaction": { "receiver": "BOB", "amount": 5, "close-amount": 0 },
            "inner-txns": [{ "tx-type": "axfer" }],
            "unknown-field": true
        }))
        .unwrap();

        assert_eq!(record.confirmed_round, Some(10));
        assert_eq!(record.payment_transaction.as_ref().unwrap().amount, 5);
        assert_eq!(record.inner_txns.as_ref().unwrap()[0].tx_type, "axfer");
        assert_eq!(record.fee, 0);
    }
}
