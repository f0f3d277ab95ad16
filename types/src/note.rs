use base64::{prelude::BASE64_STANDARD, Engine};

use crate::utils::{decode_msgpack_exact, msgpack_to_json};

/// How to present a transaction note.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteEncoding {
    /// The note exactly as the indexer returned it.
    #[default]
    Base64,
    Text,
    MsgPack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    Base64(String),
    Text(String),
    /// JSON text of the decoded MessagePack value.
    MsgPack(String),
    /// Bytes that did not decode as MessagePack.
    Raw(Vec<u8>),
}

impl Note {
    /// Interprets a base64 note. Returns `None` only when the note itself is
    /// not valid base64; MessagePack failures fall back to [`Note::Raw`].
    pub fn decode(note: &str, encoding: NoteEncoding) -> Option<Self> {
        let decode_base64 = || BASE64_STANDARD.decode(note).ok();
        Some(match encoding {
            NoteEncoding::Base64 => Self::Base64(note.to_string()),
            NoteEncoding::Text => {
                Self::Text(String::from_utf8_lossy(&decode_base64()?).into_owned())
            }
            NoteEncoding::MsgPack => {
                let bytes = decode_base64()?;
                match decode_msgpack_exact(&bytes) {
                    Ok(value) => Self::MsgPack(msgpack_to_json(&value).to_string()),
                    Err(_) => Self::Raw(bytes),
                }
            }
        })
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base64(s) | Self::Text(s) | Self::MsgPack(s) => f.write_str(s),
            Self::Raw(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}
