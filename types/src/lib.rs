pub mod address;
pub mod errors;
pub mod network;
pub mod node;
pub mod note;
pub mod transaction;
pub mod utils;

pub use address::Address;
pub use network::NetworkName;
pub use node::{BuildVersion, Genesis, Health, NodeStatus, NodeStatusBundle, VersionsCheck};
pub use note::{Note, NoteEncoding};
pub use transaction::{
    record::RawTransactionRecord, SignedTransaction, TransactionPayload, TransactionType,
    UnsignedTransaction,
};

pub type Round = u64;
pub type AssetId = u64;
pub type AppId = u64;
/// Amounts in the smallest unit of the asset (microalgos for the native one).
pub type Amount = u64;

/// An account exposed by a signer, as shown in the wallet picker.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SignerAccount {
    pub address: String,
    pub name: String,
}
