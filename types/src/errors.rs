#[derive(thiserror::Error, Debug)]
pub enum DataConversionError {
    #[error("Base64 decoding error: {0}")]
    Base64DecodingError(#[from] base64::DecodeError),
    #[error("Base32 decoding error: {0}")]
    Base32DecodingError(#[from] data_encoding::DecodeError),
    #[error("MessagePack decoding error: {0}")]
    MsgPackDecodingError(#[from] rmpv::decode::Error),
    #[error("MessagePack encoding error: {0}")]
    MsgPackEncodingError(#[from] rmpv::encode::Error),
    #[error("Incorrect length: {0}")]
    IncorrectLength(usize),
    #[error("Address checksum mismatch")]
    ChecksumMismatch,
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("Invalid transaction: record is missing")]
    MissingTransaction,
}

#[derive(thiserror::Error, Debug)]
pub enum RecordError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    #[error("Failed to deserialize record: {0}")]
    DeserializeError(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkNameError {
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}
