use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use data_encoding::BASE32_NOPAD;
use sha2::{Digest, Sha512_256};

pub mod payloads;
pub mod record;

use crate::{errors::DataConversionError, utils::decode_msgpack_exact};

use self::payloads::{
    AppCallPayload, AssetConfigPayload, AssetFreezePayload, AssetTransferPayload, KeyRegPayload,
    PaymentPayload, StateProofPayload,
};

/// Domain separation prefix for transaction signing and ids.
pub const TRANSACTION_TAG: &[u8] = b"TX";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TransactionType {
    #[serde(rename = "pay")]
    Payment,
    #[serde(rename = "keyreg")]
    KeyRegistration,
    #[serde(rename = "acfg")]
    AssetConfig,
    #[serde(rename = "afrz")]
    AssetFreeze,
    #[serde(rename = "axfer")]
    AssetTransfer,
    #[serde(rename = "appl")]
    AppCall,
    #[serde(rename = "stpf")]
    StateProof,
}

impl TransactionType {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Payment => "pay",
            Self::KeyRegistration => "keyreg",
            Self::AssetConfig => "acfg",
            Self::AssetFreeze => "afrz",
            Self::AssetTransfer => "axfer",
            Self::AppCall => "appl",
            Self::StateProof => "stpf",
        }
    }

    /// Parses a wire code. Unknown codes are not an error, they have no type.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_str(code).ok()
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TransactionType {
    type Err = DataConversionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pay" => Ok(Self::Payment),
            "keyreg" => Ok(Self::KeyRegistration),
            "acfg" => Ok(Self::AssetConfig),
            "afrz" => Ok(Self::AssetFreeze),
            "axfer" => Ok(Self::AssetTransfer),
            "appl" => Ok(Self::AppCall),
            "stpf" => Ok(Self::StateProof),
            unknown => Err(DataConversionError::InvalidData(format!(
                "unknown transaction type: {unknown}"
            ))),
        }
    }
}

/// The type-specific part of a transaction record, borrowed from the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransactionPayload<'a> {
    Payment(&'a PaymentPayload),
    KeyRegistration(&'a KeyRegPayload),
    AssetConfig(&'a AssetConfigPayload),
    AssetFreeze(&'a AssetFreezePayload),
    AssetTransfer(&'a AssetTransferPayload),
    AppCall(&'a AppCallPayload),
    StateProof(&'a StateProofPayload),
}

impl TransactionPayload<'_> {
    pub const fn tx_type(&self) -> TransactionType {
        match self {
            Self::Payment(_) => TransactionType::Payment,
            Self::KeyRegistration(_) => TransactionType::KeyRegistration,
            Self::AssetConfig(_) => TransactionType::AssetConfig,
            Self::AssetFreeze(_) => TransactionType::AssetFreeze,
            Self::AssetTransfer(_) => TransactionType::AssetTransfer,
            Self::AppCall(_) => TransactionType::AppCall,
            Self::StateProof(_) => TransactionType::StateProof,
        }
    }
}

/// An unsigned transaction in its canonical MessagePack encoding.
///
/// The bytes are produced by whatever builds the transaction; they are only
/// inspected when signing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnsignedTransaction(Vec<u8>);

impl UnsignedTransaction {
    pub const fn from_msgpack(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The message an account key signs: the encoded transaction prefixed
    /// with [`TRANSACTION_TAG`].
    pub fn bytes_to_sign(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(TRANSACTION_TAG.len() + self.0.len());
        bytes.extend_from_slice(TRANSACTION_TAG);
        bytes.extend_from_slice(&self.0);
        bytes
    }

    pub fn id(&self) -> String {
        BASE32_NOPAD.encode(&Sha512_256::digest(self.bytes_to_sign()))
    }

    pub fn decode(&self) -> Result<rmpv::Value, DataConversionError> {
        decode_msgpack_exact(&self.0)
    }
}

/// A signed transaction blob ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignedTransaction(Vec<u8>);

impl SignedTransaction {
    pub const fn from_msgpack(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn decode(&self) -> Result<rmpv::Value, DataConversionError> {
        decode_msgpack_exact(&self.0)
    }
}
