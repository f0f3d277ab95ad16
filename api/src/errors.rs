use algoscope_types::errors::DataConversionError;

pub use algoscope_types::errors::{InvalidInputError, RecordError};

/// Failure reported by the wallet extension itself.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    #[error("Request rejected by the extension: {0}")]
    Rejected(String),
    #[error("Extension returned malformed data: {0}")]
    Malformed(String),
}

#[derive(thiserror::Error, Debug)]
pub enum SigningError {
    #[error("Secret key is not available")]
    KeyNotAvailable,
    #[error("Wallet extension is not installed")]
    NotInstalled,
    #[error(transparent)]
    Rejected(#[from] ExtensionError),
    #[error("Transaction is not a MessagePack map")]
    MalformedTransaction,
    #[error("Extension returned no signed transaction for index {0}")]
    MissingSignedTransaction(usize),
    #[error("Extension returned {got} signed transactions, expected {expected}")]
    ResponseCountMismatch { expected: usize, got: usize },
    #[error("Data conversion error: {0}")]
    DataConversionError(#[from] DataConversionError),
}

#[derive(thiserror::Error, Debug)]
pub enum ConnectError {
    #[error("{0} is not supported by the signer")]
    UnsupportedNetwork(String),
    #[error("Wallet extension is not installed")]
    NotInstalled,
    #[error(transparent)]
    Extension(#[from] ExtensionError),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}
