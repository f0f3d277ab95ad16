use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

use base64::{prelude::BASE64_STANDARD, Engine};
use data_encoding::BASE32_NOPAD;
use sha2::{Digest, Sha512_256};

use crate::errors::DataConversionError;

pub const PUBLIC_KEY_LENGTH: usize = 32;
pub const CHECKSUM_LENGTH: usize = 4;
/// Length of the textual form of an [`Address`].
pub const ADDRESS_LENGTH: usize = 58;

/// Account address on the network: the ed25519 public key of the account.
///
/// The textual form is the unpadded base32 encoding of the public key followed
/// by the last four bytes of its SHA-512/256 digest.
#[derive(Copy, Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Address(pub [u8; PUBLIC_KEY_LENGTH]);

impl Address {
    pub const fn from_public_key(public_key: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(public_key)
    }

    /// Decodes a base64 public key as it appears in indexer responses.
    pub fn from_base64_public_key(public_key: &str) -> Result<Self, DataConversionError> {
        let bytes = BASE64_STANDARD.decode(public_key)?;
        Self::try_from(bytes.as_slice())
    }

    pub const fn public_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    fn checksum(&self) -> [u8; CHECKSUM_LENGTH] {
        let digest = Sha512_256::digest(self.0);
        let mut checksum = [0u8; CHECKSUM_LENGTH];
        checksum.copy_from_slice(&digest[digest.len() - CHECKSUM_LENGTH..]);
        checksum
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = DataConversionError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(DataConversionError::IncorrectLength(bytes.len()));
        }
        let mut buf = [0; PUBLIC_KEY_LENGTH];
        buf.copy_from_slice(bytes);
        Ok(Self(buf))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut bytes = Vec::with_capacity(PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH);
        bytes.extend_from_slice(&self.0);
        bytes.extend_from_slice(&self.checksum());
        f.write_str(&BASE32_NOPAD.encode(&bytes))
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = DataConversionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.len() != ADDRESS_LENGTH {
            return Err(DataConversionError::IncorrectLength(value.len()));
        }
        let bytes = BASE32_NOPAD.decode(value.as_bytes())?;
        if bytes.len() != PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH {
            return Err(DataConversionError::IncorrectLength(bytes.len()));
        }
        let (public_key, checksum) = bytes.split_at(PUBLIC_KEY_LENGTH);
        let address = Self::try_from(public_key)?;
        if address.checksum() != checksum {
            return Err(DataConversionError::ChecksumMismatch);
        }
        Ok(address)
    }
}

impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse()
            .map_err(|err: DataConversionError| serde::de::Error::custom(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_key_encodes_to_well_known_address() {
        let address = Address([0; 32]);
        assert_eq!(
            address.to_string(),
            "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ"
        );
    }

    #[test]
    fn parses_its_own_display() {
        let address = Address([7; 32]);
        let parsed: Address = address.to_string().parse().unwrap();
        assert_eq!(parsed, address);
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut text = Address([7; 32]).to_string();
        let last = text.pop().unwrap();
        text.push(if last == 'A' { 'B' } else { 'A' });
        assert!(matches!(
            text.parse::<Address>(),
            Err(DataConversionError::ChecksumMismatch) | Err(DataConversionError::Base32DecodingError(_))
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            "ABC".parse::<Address>(),
            Err(DataConversionError::IncorrectLength(3))
        ));
        assert!(Address::from_base64_public_key("AAAA").is_err());
    }

    #[test]
    fn serde_uses_text_form() {
        let address = Address([0; 32]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(
            json,
            "\"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ\""
        );
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
