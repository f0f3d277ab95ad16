//! Transaction signing for the explorer's wallet integrations
//!
//! The [`Signer`] wraps one of the two supported ways to sign Algorand transactions:
//! - [`WalletSigner`]: an in-process ed25519 account key
//! - [`BrowserExtensionSigner`]: a browser wallet extension reached through an [`ExtensionHandle`]
//!
//! Both take transactions in their canonical MessagePack encoding and return
//! signed transaction blobs ready for submission.
//!
//! # Examples
//!
//! ## Signing with a local account key
//! ```rust,no_run
//! use algoscope::signer::{Account, Signer, SignerTrait, WalletSigner};
//! use algoscope::types::UnsignedTransaction;
//!
//! # async fn example(unsigned: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let account = Account::from_secret_key(&[7u8; 32])?;
//! let signer = Signer::from(WalletSigner::new(Some(account)));
//!
//! let signed = signer
//!     .sign_transaction(&UnsignedTransaction::from_msgpack(unsigned))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Connecting a browser extension
//! ```rust,no_run
//! use std::sync::Arc;
//! use algoscope::signer::{BrowserExtensionSigner, ExtensionHandle, SignerTrait};
//!
//! # async fn example(handle: Arc<dyn ExtensionHandle>) -> Result<(), Box<dyn std::error::Error>> {
//! let signer = BrowserExtensionSigner::new(Some(handle));
//! let accounts = signer.connect("testnet").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Group signing
//! [`SignerTrait::sign_transaction_group`] is all-or-nothing: the signed list
//! keeps input order, and a single failure fails the whole group.

use algoscope_types::{SignedTransaction, SignerAccount, UnsignedTransaction};
use tracing::{debug, instrument};

use crate::errors::{ConnectError, SigningError};

pub use extension::{
    BrowserExtensionSigner, ExtensionAccount, ExtensionHandle, SignedBlob, WalletTransaction,
};
pub use wallet::{Account, WalletSigner};

pub mod extension;
pub mod wallet;

const SIGNER_TARGET: &str = "algoscope::signer";

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::WalletSigner {}
    impl Sealed for super::BrowserExtensionSigner {}
}

/// Common surface of the supported signers.
///
/// The set of signers is closed; use [`Signer`] to hold either one.
#[async_trait::async_trait]
pub trait SignerTrait: sealed::Sealed + Send + Sync {
    /// Signs one transaction given in its canonical MessagePack encoding.
    async fn sign_transaction(
        &self,
        transaction: &UnsignedTransaction,
    ) -> Result<SignedTransaction, SigningError>;

    /// Signs an atomic group. The output keeps input order; any failure fails the call.
    async fn sign_transaction_group(
        &self,
        transactions: &[UnsignedTransaction],
    ) -> Result<Vec<SignedTransaction>, SigningError>;

    /// Whether the signer can be used right now.
    fn is_available(&self) -> bool;

    /// Whether the signer works with the network, by lowercase network name.
    fn supports_network(&self, network: &str) -> bool;

    /// Connects to the signer for the network and returns the accounts it exposes.
    async fn connect(&self, network: &str) -> Result<Vec<SignerAccount>, ConnectError>;

    async fn disconnect(&self) {}
}

/// One of the supported signers.
#[derive(Debug, Clone)]
pub enum Signer {
    Wallet(WalletSigner),
    BrowserExtension(BrowserExtensionSigner),
}

impl Signer {
    pub fn as_signer(&self) -> &dyn SignerTrait {
        match self {
            Self::Wallet(signer) => signer,
            Self::BrowserExtension(signer) => signer,
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Wallet(_) => "wallet",
            Self::BrowserExtension(_) => "browser-extension",
        }
    }
}

impl From<WalletSigner> for Signer {
    fn from(signer: WalletSigner) -> Self {
        Self::Wallet(signer)
    }
}

impl From<BrowserExtensionSigner> for Signer {
    fn from(signer: BrowserExtensionSigner) -> Self {
        Self::BrowserExtension(signer)
    }
}

impl sealed::Sealed for Signer {}

#[async_trait::async_trait]
impl SignerTrait for Signer {
    #[instrument(skip(self, transaction), fields(signer = self.kind()))]
    async fn sign_transaction(
        &self,
        transaction: &UnsignedTransaction,
    ) -> Result<SignedTransaction, SigningError> {
        debug!(target: SIGNER_TARGET, txid = %transaction.id(), "Signing transaction");
        self.as_signer().sign_transaction(transaction).await
    }

    #[instrument(skip(self, transactions), fields(signer = self.kind(), count = transactions.len()))]
    async fn sign_transaction_group(
        &self,
        transactions: &[UnsignedTransaction],
    ) -> Result<Vec<SignedTransaction>, SigningError> {
        debug!(target: SIGNER_TARGET, "Signing transaction group");
        self.as_signer().sign_transaction_group(transactions).await
    }

    fn is_available(&self) -> bool {
        self.as_signer().is_available()
    }

    fn supports_network(&self, network: &str) -> bool {
        self.as_signer().supports_network(network)
    }

    #[instrument(skip(self), fields(signer = self.kind()))]
    async fn connect(&self, network: &str) -> Result<Vec<SignerAccount>, ConnectError> {
        debug!(target: SIGNER_TARGET, "Connecting signer");
        self.as_signer().connect(network).await
    }

    async fn disconnect(&self) {
        self.as_signer().disconnect().await
    }
}
