//! Core of an Algorand block explorer and developer console
//!
//! This crate turns raw node and indexer payloads into display-ready facts and
//! signs outgoing transactions:
//! - [Transaction projection](TransactionView): type, counterparty, amounts, asset and application ids, note decoding, timestamps
//! - [Node status projection](NodeView): network identity, consensus freshness, sync lag, protocol upgrades
//! - [Several ways to sign a transaction](signer): a local account key or a browser wallet extension
//! - [Network constants](ExplorerConfig) with TOML overrides
//!
//! Fetching the payloads and submitting signed transactions is left to the caller.
//!
//! # Example
//! ```rust
//! use algoscope::{NodeView, types::NodeStatusBundle};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bundle: NodeStatusBundle = serde_json::from_value(serde_json::json!({
//!     "status": { "last-round": 1200, "catchup-time": 0 },
//!     "versions": { "genesis_id": "testnet-v1.0", "genesis_hash_b64": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=" },
//!     "genesis": {},
//!     "health": { "round": 1180 }
//! }))?;
//!
//! let node = NodeView::from_bundle(&bundle);
//! assert!(node.is_testnet());
//! assert!(node.has_caught_up());
//! assert_eq!(node.indexer_lag_blocks(), 20);
//! # Ok(())
//! # }
//! ```

mod common;
mod config;
mod node;
mod transaction;

pub use algoscope_types as types;
pub mod errors;
pub mod signer;

pub use crate::{
    config::{
        ConsensusVersions, DispenserLinks, ExplorerConfig, GenesisConstants,
        DEFAULT_BLOCK_TIME_SECS, TIMESTAMP_DISPLAY_FORMAT,
    },
    node::{
        ConsensusValidation, NodeView, FUTURE_CONSENSUS_VERSION, INDEXER_LAG_TOLERANCE,
        PROTOCOL_UPGRADE_THRESHOLD,
    },
    signer::{Signer, SignerTrait},
    transaction::TransactionView,
    types::{
        Address, NetworkName, Note, NoteEncoding, RawTransactionRecord, SignedTransaction,
        SignerAccount, TransactionType, UnsignedTransaction,
    },
};
