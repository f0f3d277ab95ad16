//! Display-ready projection of indexer transaction records.
//!
//! [`TransactionView`] borrows a [`RawTransactionRecord`] and answers the
//! questions a transaction page asks: what kind of transaction is this, who
//! received what, which asset or application it touched, how it was
//! authorized and what its note says.
//!
//! Accessors never fail. A field that does not apply to the transaction type
//! is `None`, so check [`TransactionView::tx_type`] before rendering a
//! type-specific panel.
//!
//! ```rust
//! use algoscope::{TransactionView, types::RawTransactionRecord};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let record = RawTransactionRecord::from_json(serde_json::json!({
//!     "id": "TXID",
//!     "tx-type": "pay",
//!     "payment-transaction": { "receiver": "RECEIVER", "amount": 1000 }
//! }))?;
//! let view = TransactionView::from_record(&record);
//! assert_eq!(view.display_type_name(), Some("Payment"));
//! assert_eq!(view.amount(), Some(1000));
//! # Ok(())
//! # }
//! ```

use std::{fmt::Write, time::Duration};

use algoscope_types::{
    errors::InvalidInputError,
    transaction::{
        payloads::{AppCallPayload, AssetFreezePayload},
        record::{RawTransactionRecord, TransactionSignature},
    },
    Address, Amount, AppId, AssetId, Note, NoteEncoding, Round, TransactionPayload,
    TransactionType,
};
use chrono::{DateTime, Utc};
use tracing::trace;

use crate::{common::utils::humanize_duration, config::ExplorerConfig};

const TRANSACTION_TARGET: &str = "algoscope::transaction";

#[derive(Debug, Clone, Copy)]
pub struct TransactionView<'a> {
    record: &'a RawTransactionRecord,
}

impl<'a> TransactionView<'a> {
    /// Wraps a record that may be missing, failing with
    /// [`InvalidInputError::MissingTransaction`] when it is.
    pub fn new(record: Option<&'a RawTransactionRecord>) -> Result<Self, InvalidInputError> {
        record
            .map(Self::from_record)
            .ok_or(InvalidInputError::MissingTransaction)
    }

    pub const fn from_record(record: &'a RawTransactionRecord) -> Self {
        Self { record }
    }

    pub const fn record(&self) -> &'a RawTransactionRecord {
        self.record
    }

    pub fn id(&self) -> &'a str {
        &self.record.id
    }

    /// Round the transaction was confirmed in. `None` while pending.
    pub const fn block(&self) -> Option<Round> {
        self.record.confirmed_round
    }

    pub const fn fee(&self) -> Amount {
        self.record.fee
    }

    pub fn sender(&self) -> &'a str {
        &self.record.sender
    }

    /// The raw `tx-type` code, whether recognised or not.
    pub fn raw_type(&self) -> &'a str {
        &self.record.tx_type
    }

    pub fn tx_type(&self) -> Option<TransactionType> {
        TransactionType::from_code(&self.record.tx_type)
    }

    pub fn display_type_name(&self) -> Option<&'static str> {
        self.tx_type().map(|tx_type| match tx_type {
            TransactionType::Payment => "Payment",
            TransactionType::KeyRegistration => "Key registration",
            TransactionType::AssetConfig => "Asset config",
            TransactionType::AssetFreeze => "Asset freeze",
            TransactionType::AssetTransfer => "Transfer",
            TransactionType::AppCall => "App call",
            TransactionType::StateProof => "State proof",
        })
    }

    /// The payload matching the transaction type, if the record carries it.
    pub fn payload(&self) -> Option<TransactionPayload<'a>> {
        let record = self.record;
        let payload = match self.tx_type()? {
            TransactionType::Payment => {
                TransactionPayload::Payment(record.payment_transaction.as_ref()?)
            }
            TransactionType::KeyRegistration => {
                TransactionPayload::KeyRegistration(record.keyreg_transaction.as_ref()?)
            }
            TransactionType::AssetConfig => {
                TransactionPayload::AssetConfig(record.asset_config_transaction.as_ref()?)
            }
            TransactionType::AssetFreeze => {
                TransactionPayload::AssetFreeze(record.asset_freeze_transaction.as_ref()?)
            }
            TransactionType::AssetTransfer => {
                TransactionPayload::AssetTransfer(record.asset_transfer_transaction.as_ref()?)
            }
            TransactionType::AppCall => {
                TransactionPayload::AppCall(record.application_transaction.as_ref()?)
            }
            TransactionType::StateProof => {
                TransactionPayload::StateProof(record.state_proof_transaction.as_ref()?)
            }
        };
        Some(payload)
    }

    /// Receiver of a payment or asset transfer.
    pub fn counterparty(&self) -> Option<&'a str> {
        match self.payload()? {
            TransactionPayload::Payment(payment) => Some(payment.receiver.as_str()),
            TransactionPayload::AssetTransfer(transfer) => Some(transfer.receiver.as_str()),
            _ => None,
        }
    }

    pub fn amount(&self) -> Option<Amount> {
        match self.payload()? {
            TransactionPayload::Payment(payment) => Some(payment.amount),
            TransactionPayload::AssetTransfer(transfer) => Some(transfer.amount),
            _ => None,
        }
    }

    /// Account that received the remaining balance when the sender closed out.
    pub fn close_to(&self) -> Option<&'a str> {
        match self.payload()? {
            TransactionPayload::Payment(payment) => payment.close_remainder_to.as_deref(),
            TransactionPayload::AssetTransfer(transfer) => transfer.close_to.as_deref(),
            _ => None,
        }
    }

    pub fn close_amount(&self) -> Option<Amount> {
        match self.payload()? {
            TransactionPayload::Payment(payment) => payment.close_amount,
            TransactionPayload::AssetTransfer(transfer) => transfer.close_amount,
            _ => None,
        }
    }

    /// Asset touched by the transaction.
    ///
    /// A freshly created asset index takes precedence over the payload's own
    /// `asset-id`, which is zero or absent on creation.
    pub fn asset_id(&self) -> Option<AssetId> {
        let created = self.record.created_asset_index.filter(|index| *index != 0);
        match self.tx_type()? {
            TransactionType::AssetConfig => created.or_else(|| {
                self.record
                    .asset_config_transaction
                    .as_ref()
                    .and_then(|config| config.asset_id)
            }),
            TransactionType::AssetTransfer => created.or_else(|| {
                self.record
                    .asset_transfer_transaction
                    .as_ref()
                    .map(|transfer| transfer.asset_id)
            }),
            TransactionType::AssetFreeze => created.or_else(|| {
                self.record
                    .asset_freeze_transaction
                    .as_ref()
                    .map(|freeze| freeze.asset_id)
            }),
            _ => None,
        }
    }

    /// Application called. A created application index wins over the payload's
    /// `application-id`, which is zero on creation.
    pub fn app_id(&self) -> Option<AppId> {
        if self.tx_type()? != TransactionType::AppCall {
            return None;
        }
        self.record
            .created_application_index
            .filter(|index| *index != 0)
            .or_else(|| self.app_call_payload().map(|app| app.application_id))
    }

    fn asset_freeze_payload(&self) -> Option<&'a AssetFreezePayload> {
        match self.payload()? {
            TransactionPayload::AssetFreeze(freeze) => Some(freeze),
            _ => None,
        }
    }

    fn app_call_payload(&self) -> Option<&'a AppCallPayload> {
        match self.payload()? {
            TransactionPayload::AppCall(app) => Some(app),
            _ => None,
        }
    }

    pub fn asset_freeze_account(&self) -> Option<&'a str> {
        self.asset_freeze_payload()
            .map(|freeze| freeze.address.as_str())
    }

    pub fn asset_freeze_status(&self) -> Option<bool> {
        self.asset_freeze_payload()
            .map(|freeze| freeze.new_freeze_status)
    }

    pub const fn first_round(&self) -> Round {
        self.record.first_valid
    }

    pub const fn last_round(&self) -> Round {
        self.record.last_valid
    }

    pub fn genesis_id(&self) -> Option<&'a str> {
        self.record.genesis_id.as_deref()
    }

    pub fn genesis_hash(&self) -> Option<&'a str> {
        self.record.genesis_hash.as_deref()
    }

    pub fn group(&self) -> Option<&'a str> {
        self.record.group.as_deref()
    }

    pub const fn sender_rewards(&self) -> Option<Amount> {
        self.record.sender_rewards
    }

    pub const fn receiver_rewards(&self) -> Option<Amount> {
        self.record.receiver_rewards
    }

    pub fn signature(&self) -> Option<&'a TransactionSignature> {
        self.record.signature.as_ref()
    }

    pub fn is_multi_sig(&self) -> bool {
        self.signature()
            .is_some_and(|signature| signature.multisig.is_some())
    }

    pub fn is_logic_sig(&self) -> bool {
        self.signature()
            .is_some_and(|signature| signature.logicsig.is_some())
    }

    /// Addresses of the multisig participants, in sub-signature order.
    pub fn multi_sig_signer_addresses(&self) -> Vec<Address> {
        let Some(multisig) = self
            .signature()
            .and_then(|signature| signature.multisig.as_ref())
        else {
            return Vec::new();
        };

        multisig
            .subsignature
            .iter()
            .filter_map(|subsig| match Address::from_base64_public_key(&subsig.public_key) {
                Ok(address) => Some(address),
                Err(err) => {
                    trace!(target: TRANSACTION_TARGET, txn = %self.record.id, %err, "Skipping undecodable multisig key");
                    None
                }
            })
            .collect()
    }

    /// The note in the requested encoding. Undecodable MessagePack notes come
    /// back as [`Note::Raw`].
    pub fn note(&self, encoding: NoteEncoding) -> Option<Note> {
        let note = self.record.note.as_deref()?;
        Note::decode(note, encoding)
    }

    pub fn logs(&self) -> &'a [String] {
        self.record.logs.as_deref().unwrap_or_default()
    }

    pub fn has_logs(&self) -> bool {
        !self.logs().is_empty()
    }

    /// ABI methods return their value in the last log entry.
    pub fn return_value(&self) -> Option<&'a str> {
        self.logs().last().map(String::as_str)
    }

    pub fn has_local_state_delta(&self) -> bool {
        self.record
            .local_state_delta
            .as_ref()
            .is_some_and(|delta| !delta.is_empty())
    }

    pub fn has_global_state_delta(&self) -> bool {
        self.record
            .global_state_delta
            .as_ref()
            .is_some_and(|delta| !delta.is_empty())
    }

    pub fn has_inner_transactions(&self) -> bool {
        !self.inner_records().is_empty()
    }

    fn inner_records(&self) -> &'a [RawTransactionRecord] {
        self.record.inner_txns.as_deref().unwrap_or_default()
    }

    pub fn inner_transactions(&self) -> Vec<TransactionView<'a>> {
        self.inner_records()
            .iter()
            .map(TransactionView::from_record)
            .collect()
    }

    pub fn inner_transaction(&self, index: usize) -> Option<TransactionView<'a>> {
        self.inner_records()
            .get(index)
            .map(TransactionView::from_record)
    }

    pub fn has_app_call_arguments(&self) -> bool {
        self.app_call_payload()
            .is_some_and(|app| !app.application_args.is_empty())
    }

    pub fn has_app_call_foreign_assets(&self) -> bool {
        self.app_call_payload()
            .is_some_and(|app| !app.foreign_assets.is_empty())
    }

    pub fn has_app_call_foreign_apps(&self) -> bool {
        self.app_call_payload()
            .is_some_and(|app| !app.foreign_apps.is_empty())
    }

    pub fn has_app_call_foreign_accounts(&self) -> bool {
        self.app_call_payload()
            .is_some_and(|app| !app.accounts.is_empty())
    }

    /// Block time in seconds since the Unix epoch.
    pub const fn timestamp(&self) -> Option<i64> {
        self.record.round_time
    }

    fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp()?, 0)
    }

    /// Formats the block time in UTC using a `strftime` pattern, or the shared
    /// [`ExplorerConfig::timestamp_format`] when none is given. `None` when the
    /// record has no block time or the pattern is invalid.
    pub fn timestamp_display(&self, format: Option<&str>) -> Option<String> {
        let format = format.unwrap_or(ExplorerConfig::shared().timestamp_format.as_str());
        let mut rendered = String::new();
        // Invalid patterns fail the write instead of panicking in `to_string`.
        write!(rendered, "{}", self.datetime()?.format(format)).ok()?;
        Some(rendered)
    }

    /// How long ago the transaction was confirmed, e.g. `"3 days, 4 hours"`.
    pub fn timestamp_duration(&self) -> Option<String> {
        self.timestamp_duration_since(Utc::now())
    }

    pub fn timestamp_duration_since(&self, now: DateTime<Utc>) -> Option<String> {
        let elapsed = (now - self.datetime()?).to_std().unwrap_or(Duration::ZERO);
        Some(humanize_duration(elapsed, 2))
    }
}
