use algoscope_types::{
    errors::DataConversionError,
    utils::{decode_msgpack_exact, encode_msgpack},
    Address, NetworkName, SignedTransaction, SignerAccount, UnsignedTransaction,
};
use ed25519_dalek::{Signer as _, SigningKey, SECRET_KEY_LENGTH};
use rmpv::Value;
use tracing::{debug, instrument, trace, warn};

use crate::errors::{ConnectError, SigningError};

use super::SignerTrait;

const WALLET_SIGNER_TARGET: &str = "algoscope::signer::wallet";

const SUPPORTED_NETWORKS: [NetworkName; 3] = [
    NetworkName::Betanet,
    NetworkName::Testnet,
    NetworkName::Mainnet,
];

/// An ed25519 account key and the address it controls.
#[derive(Clone)]
pub struct Account {
    signing_key: SigningKey,
    address: Address,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl Account {
    pub fn new(signing_key: SigningKey) -> Self {
        let address = Address::from_public_key(signing_key.verifying_key().to_bytes());
        Self {
            signing_key,
            address,
        }
    }

    /// Accepts a 32-byte seed or the 64-byte `seed || public key` form wallets export.
    pub fn from_secret_key(secret_key: &[u8]) -> Result<Self, DataConversionError> {
        let signing_key = match secret_key.len() {
            SECRET_KEY_LENGTH => {
                let mut seed = [0u8; SECRET_KEY_LENGTH];
                seed.copy_from_slice(secret_key);
                SigningKey::from_bytes(&seed)
            }
            64 => {
                let mut keypair = [0u8; 64];
                keypair.copy_from_slice(secret_key);
                SigningKey::from_keypair_bytes(&keypair).map_err(|_| {
                    DataConversionError::InvalidData(
                        "public key half does not match the seed".to_string(),
                    )
                })?
            }
            len => return Err(DataConversionError::IncorrectLength(len)),
        };
        Ok(Self::new(signing_key))
    }

    pub const fn address(&self) -> &Address {
        &self.address
    }

    pub fn verifying_key(&self) -> ed25519_dalek::VerifyingKey {
        self.signing_key.verifying_key()
    }
}

/// Signs with a key held in process memory.
#[derive(Debug, Clone, Default)]
pub struct WalletSigner {
    account: Option<Account>,
}

impl WalletSigner {
    pub const fn new(account: Option<Account>) -> Self {
        Self { account }
    }

    pub fn set_wallet(&mut self, account: Account) {
        debug!(target: WALLET_SIGNER_TARGET, address = %account.address, "Wallet account set");
        self.account = Some(account);
    }

    pub const fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    fn sign(&self, transaction: &UnsignedTransaction) -> Result<SignedTransaction, SigningError> {
        let account = self.account.as_ref().ok_or(SigningError::KeyNotAvailable)?;

        let decoded = decode_msgpack_exact(transaction.as_bytes())?;
        let Value::Map(fields) = &decoded else {
            return Err(SigningError::MalformedTransaction);
        };

        let signature = account.signing_key.sign(&transaction.bytes_to_sign());

        // Keys stay in canonical (sorted) order: sgnr, sig, txn.
        let mut signed = Vec::with_capacity(3);
        if is_rekeyed(fields, &account.address) {
            trace!(target: WALLET_SIGNER_TARGET, "Sender differs from signing key, adding auth address");
            signed.push((
                Value::from("sgnr"),
                Value::Binary(account.address.public_key().to_vec()),
            ));
        }
        signed.push((
            Value::from("sig"),
            Value::Binary(signature.to_bytes().to_vec()),
        ));
        signed.push((Value::from("txn"), decoded));

        let bytes = encode_msgpack(&Value::Map(signed))?;
        trace!(target: WALLET_SIGNER_TARGET, txid = %transaction.id(), "Transaction signed");
        Ok(SignedTransaction::from_msgpack(bytes))
    }
}

/// A transaction without a readable sender is treated as sent by the key's own address.
fn is_rekeyed(fields: &[(Value, Value)], address: &Address) -> bool {
    let sender = fields
        .iter()
        .find(|(key, _)| key.as_str() == Some("snd"))
        .and_then(|(_, value)| value.as_slice());
    match sender {
        Some(sender) => sender != address.public_key().as_slice(),
        None => false,
    }
}

#[async_trait::async_trait]
impl SignerTrait for WalletSigner {
    #[instrument(skip(self, transaction))]
    async fn sign_transaction(
        &self,
        transaction: &UnsignedTransaction,
    ) -> Result<SignedTransaction, SigningError> {
        self.sign(transaction)
    }

    #[instrument(skip(self, transactions), fields(count = transactions.len()))]
    async fn sign_transaction_group(
        &self,
        transactions: &[UnsignedTransaction],
    ) -> Result<Vec<SignedTransaction>, SigningError> {
        transactions
            .iter()
            .map(|transaction| self.sign(transaction))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| {
                warn!(target: WALLET_SIGNER_TARGET, error = %err, "Group signing failed");
            })
    }

    fn is_available(&self) -> bool {
        self.account.is_some()
    }

    fn supports_network(&self, network: &str) -> bool {
        SUPPORTED_NETWORKS
            .iter()
            .any(|supported| supported.as_str() == network)
    }

    /// The key is supplied by the caller, so there are no accounts to list.
    async fn connect(&self, network: &str) -> Result<Vec<SignerAccount>, ConnectError> {
        if !self.supports_network(network) {
            return Err(ConnectError::UnsupportedNetwork(network.to_string()));
        }
        Ok(Vec::new())
    }
}
