use std::sync::Arc;

use algoscope_types::{
    errors::DataConversionError, NetworkName, SignedTransaction, SignerAccount,
    UnsignedTransaction,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{
    common::utils::{from_base64, to_base64},
    errors::{ConnectError, ExtensionError, SigningError},
};

use super::SignerTrait;

const EXTENSION_SIGNER_TARGET: &str = "algoscope::signer::extension";

const SUPPORTED_NETWORKS: [NetworkName; 4] = [
    NetworkName::Testnet,
    NetworkName::Mainnet,
    NetworkName::Betanet,
    NetworkName::Sandbox,
];

/// One entry of a `signTxn` request: the transaction as base64 MessagePack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletTransaction {
    pub txn: String,
}

/// One entry of a `signTxn` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBlob {
    /// Base64 MessagePack of the signed transaction.
    #[serde(default)]
    pub blob: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionAccount {
    pub address: String,
    #[serde(default)]
    pub name: String,
}

impl From<ExtensionAccount> for SignerAccount {
    fn from(account: ExtensionAccount) -> Self {
        Self {
            address: account.address,
            name: account.name,
        }
    }
}

/// The wallet extension object injected into the page.
///
/// The encoding helpers mirror the extension's own and should not need overriding.
#[async_trait::async_trait]
pub trait ExtensionHandle: Send + Sync {
    async fn connect(&self) -> Result<(), ExtensionError>;

    /// Accounts the user exposed for the ledger, e.g. `TestNet`.
    async fn accounts(&self, ledger: &str) -> Result<Vec<ExtensionAccount>, ExtensionError>;

    async fn sign_txn(
        &self,
        transactions: Vec<WalletTransaction>,
    ) -> Result<Vec<SignedBlob>, ExtensionError>;

    fn msgpack_to_base64(&self, bytes: &[u8]) -> String {
        to_base64(bytes)
    }

    fn base64_to_msgpack(&self, encoded: &str) -> Result<Vec<u8>, DataConversionError> {
        Ok(from_base64(encoded)?)
    }
}

/// The extension's identifier for a network.
pub const fn ledger_name(network: NetworkName) -> &'static str {
    match network {
        NetworkName::Mainnet => "MainNet",
        NetworkName::Testnet => "TestNet",
        NetworkName::Betanet => "BetaNet",
        NetworkName::Sandbox => "SandNet",
    }
}

/// Signs through a browser wallet extension. Holds no key material.
#[derive(Clone, Default)]
pub struct BrowserExtensionSigner {
    handle: Option<Arc<dyn ExtensionHandle>>,
}

impl std::fmt::Debug for BrowserExtensionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserExtensionSigner")
            .field("installed", &self.handle.is_some())
            .finish()
    }
}

impl BrowserExtensionSigner {
    /// `None` stands for an extension that is not installed.
    pub fn new(handle: Option<Arc<dyn ExtensionHandle>>) -> Self {
        Self { handle }
    }

    fn supported_network(network: &str) -> Option<NetworkName> {
        SUPPORTED_NETWORKS
            .into_iter()
            .find(|supported| supported.as_str() == network)
    }

    async fn sign_batch(
        &self,
        transactions: &[UnsignedTransaction],
    ) -> Result<Vec<SignedTransaction>, SigningError> {
        let handle = self.handle.as_ref().ok_or(SigningError::NotInstalled)?;

        let request = transactions
            .iter()
            .map(|transaction| WalletTransaction {
                txn: handle.msgpack_to_base64(transaction.as_bytes()),
            })
            .collect();

        debug!(target: EXTENSION_SIGNER_TARGET, count = transactions.len(), "Requesting signatures from extension");
        let blobs = handle.sign_txn(request).await?;
        if blobs.len() != transactions.len() {
            return Err(SigningError::ResponseCountMismatch {
                expected: transactions.len(),
                got: blobs.len(),
            });
        }

        blobs
            .into_iter()
            .enumerate()
            .map(|(index, signed)| -> Result<SignedTransaction, SigningError> {
                let blob = signed
                    .blob
                    .ok_or(SigningError::MissingSignedTransaction(index))?;
                let bytes = handle.base64_to_msgpack(&blob)?;
                Ok(SignedTransaction::from_msgpack(bytes))
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl SignerTrait for BrowserExtensionSigner {
    #[instrument(skip(self, transaction))]
    async fn sign_transaction(
        &self,
        transaction: &UnsignedTransaction,
    ) -> Result<SignedTransaction, SigningError> {
        let mut signed = self.sign_batch(std::slice::from_ref(transaction)).await?;
        signed.pop().ok_or(SigningError::MissingSignedTransaction(0))
    }

    #[instrument(skip(self, transactions), fields(count = transactions.len()))]
    async fn sign_transaction_group(
        &self,
        transactions: &[UnsignedTransaction],
    ) -> Result<Vec<SignedTransaction>, SigningError> {
        self.sign_batch(transactions).await.inspect_err(|err| {
            warn!(target: EXTENSION_SIGNER_TARGET, error = %err, "Group signing failed");
        })
    }

    fn is_available(&self) -> bool {
        self.handle.is_some()
    }

    fn supports_network(&self, network: &str) -> bool {
        Self::supported_network(network).is_some()
    }

    #[instrument(skip(self))]
    async fn connect(&self, network: &str) -> Result<Vec<SignerAccount>, ConnectError> {
        let handle = self.handle.as_ref().ok_or(ConnectError::NotInstalled)?;
        let network_name = Self::supported_network(network)
            .ok_or_else(|| ConnectError::UnsupportedNetwork(network.to_string()))?;

        handle.connect().await?;
        let accounts = handle.accounts(ledger_name(network_name)).await?;
        debug!(target: EXTENSION_SIGNER_TARGET, count = accounts.len(), "Extension accounts received");

        Ok(accounts.into_iter().map(SignerAccount::from).collect())
    }
}
