#![allow(dead_code)]

use std::sync::{Mutex, Once};

use algoscope::{
    errors::ExtensionError,
    signer::{ExtensionAccount, ExtensionHandle, SignedBlob, WalletTransaction},
    types::{utils::encode_msgpack, Address, NodeStatusBundle, RawTransactionRecord},
    UnsignedTransaction,
};
use rmpv::Value;
use serde_json::json;
use testresult::TestError;

pub const TESTNET_GENESIS_HASH: &str = "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=";
pub const SANDBOX_GENESIS_ID: &str = "sandnet-v1";

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn record(value: serde_json::Value) -> Result<RawTransactionRecord, TestError> {
    Ok(RawTransactionRecord::from_json(value)?)
}

pub fn node_bundle(value: serde_json::Value) -> Result<NodeStatusBundle, TestError> {
    let mut bundle = json!({ "status": {}, "versions": {}, "genesis": {}, "health": {} });
    if let (Some(base), Some(overrides)) = (bundle.as_object_mut(), value.as_object()) {
        for (key, section) in overrides {
            base.insert(key.clone(), section.clone());
        }
    }
    Ok(serde_json::from_value(bundle)?)
}

pub fn payment(sender: &Address, amount: u64) -> Result<UnsignedTransaction, TestError> {
    let txn = Value::Map(vec![
        (Value::from("amt"), Value::from(amount)),
        (Value::from("fee"), Value::from(1000)),
        (Value::from("rcv"), Value::Binary(vec![9u8; 32])),
        (Value::from("snd"), Value::Binary(sender.public_key().to_vec())),
        (Value::from("type"), Value::from("pay")),
    ]);
    Ok(UnsignedTransaction::from_msgpack(encode_msgpack(&txn)?))
}

/// Not a transaction: a bare MessagePack integer.
pub fn malformed() -> Result<UnsignedTransaction, TestError> {
    Ok(UnsignedTransaction::from_msgpack(encode_msgpack(
        &Value::from(7),
    )?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockResponse {
    /// Returns each request's bytes as its blob.
    Echo,
    /// Echoes, but leaves the blob at this index out.
    DropBlob(usize),
    /// Echoes, but returns one blob fewer than requested.
    Truncate,
    Reject,
}

/// Stand-in for the wallet extension injected into the page.
pub struct MockExtension {
    pub accounts: Vec<ExtensionAccount>,
    pub response: MockResponse,
    pub ledgers: Mutex<Vec<String>>,
    pub requests: Mutex<Vec<Vec<WalletTransaction>>>,
}

impl MockExtension {
    pub fn new(response: MockResponse) -> Self {
        Self {
            accounts: vec![
                ExtensionAccount {
                    address: Address([1u8; 32]).to_string(),
                    name: "alice".to_string(),
                },
                ExtensionAccount {
                    address: Address([2u8; 32]).to_string(),
                    name: "bob".to_string(),
                },
            ],
            response,
            ledgers: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ExtensionHandle for MockExtension {
    async fn connect(&self) -> Result<(), ExtensionError> {
        Ok(())
    }

    async fn accounts(&self, ledger: &str) -> Result<Vec<ExtensionAccount>, ExtensionError> {
        if let Ok(mut ledgers) = self.ledgers.lock() {
            ledgers.push(ledger.to_string());
        }
        Ok(self.accounts.clone())
    }

    async fn sign_txn(
        &self,
        transactions: Vec<WalletTransaction>,
    ) -> Result<Vec<SignedBlob>, ExtensionError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(transactions.clone());
        }

        let mut blobs: Vec<SignedBlob> = transactions
            .into_iter()
            .map(|transaction| SignedBlob {
                blob: Some(transaction.txn),
            })
            .collect();

        match self.response {
            MockResponse::Echo => {}
            MockResponse::DropBlob(index) => blobs[index].blob = None,
            MockResponse::Truncate => {
                blobs.pop();
            }
            MockResponse::Reject => {
                return Err(ExtensionError::Rejected("User declined".to_string()));
            }
        }
        Ok(blobs)
    }
}
