use base64::{prelude::BASE64_STANDARD, Engine};
use serde_json::{Map, Number, Value as JsonValue};

use crate::errors::DataConversionError;

/// Deepest container nesting accepted when decoding MessagePack.
pub const MAX_MSGPACK_DEPTH: usize = 64;

/// Decodes exactly one MessagePack value. Trailing bytes and nesting deeper
/// than [`MAX_MSGPACK_DEPTH`] are errors.
pub fn decode_msgpack_exact(bytes: &[u8]) -> Result<rmpv::Value, DataConversionError> {
    let mut reader = bytes;
    let value = rmpv::decode::read_value_with_max_depth(&mut reader, MAX_MSGPACK_DEPTH)?;
    if !reader.is_empty() {
        return Err(DataConversionError::InvalidData(format!(
            "{} trailing bytes after MessagePack value",
            reader.len()
        )));
    }
    Ok(value)
}

pub fn encode_msgpack(value: &rmpv::Value) -> Result<Vec<u8>, DataConversionError> {
    let mut bytes = Vec::new();
    rmpv::encode::write_value(&mut bytes, value)?;
    Ok(bytes)
}

/// Renders a MessagePack value as JSON.
///
/// Binary and extension payloads become base64 strings, map keys that are not
/// strings are rendered through their JSON text.
pub fn msgpack_to_json(value: &rmpv::Value) -> JsonValue {
    match value {
        rmpv::Value::Nil => JsonValue::Null,
        rmpv::Value::Boolean(b) => JsonValue::Bool(*b),
        rmpv::Value::Integer(i) => {
            if let Some(u) = i.as_u64() {
                JsonValue::Number(u.into())
            } else if let Some(s) = i.as_i64() {
                JsonValue::Number(s.into())
            } else {
                JsonValue::Null
            }
        }
        rmpv::Value::F32(f) => Number::from_f64(f64::from(*f))
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        rmpv::Value::F64(f) => Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        rmpv::Value::String(s) => match s.as_str() {
            Some(s) => JsonValue::String(s.to_string()),
            None => JsonValue::String(String::from_utf8_lossy(s.as_bytes()).into_owned()),
        },
        rmpv::Value::Binary(bytes) => JsonValue::String(BASE64_STANDARD.encode(bytes)),
        rmpv::Value::Array(items) => JsonValue::Array(items.iter().map(msgpack_to_json).collect()),
        rmpv::Value::Map(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, value) in entries {
                let key = match key.as_str() {
                    Some(key) => key.to_string(),
                    None => msgpack_to_json(key).to_string(),
                };
                map.insert(key, msgpack_to_json(value));
            }
            JsonValue::Object(map)
        }
        rmpv::Value::Ext(kind, data) => {
            let mut map = Map::with_capacity(2);
            map.insert("type".to_string(), JsonValue::Number((*kind).into()));
            map.insert(
                "data".to_string(),
                JsonValue::String(BASE64_STANDARD.encode(data)),
            );
            JsonValue::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_single_value() {
        // {"a": 1}
        let value = decode_msgpack_exact(&[0x81, 0xa1, b'a', 0x01]).unwrap();
        assert_eq!(msgpack_to_json(&value).to_string(), r#"{"a":1}"#);
    }

    #[test]
    fn rejects_trailing_bytes() {
        assert!(matches!(
            decode_msgpack_exact(b"Hello"),
            Err(DataConversionError::InvalidData(_))
        ));
    }

    #[test]
    fn rejects_truncated_input() {
        // fixstr of length 5 with only two bytes present
        assert!(decode_msgpack_exact(&[0xa5, b'a', b'b']).is_err());
    }

    #[test]
    fn rejects_deep_nesting() {
        // Nested single-element arrays around a nil.
        let mut shallow = vec![0x91u8; 16];
        shallow.push(0xc0);
        assert!(decode_msgpack_exact(&shallow).is_ok());

        let mut deep = vec![0x91u8; 1024];
        deep.push(0xc0);
        assert!(matches!(
            decode_msgpack_exact(&deep),
            Err(DataConversionError::MsgPackDecodingError(_))
        ));
    }

    #[test]
    fn binary_becomes_base64() {
        let value = rmpv::Value::Binary(vec![1, 2, 3]);
        assert_eq!(msgpack_to_json(&value), JsonValue::String("AQID".to_string()));
    }

    #[test]
    fn encode_then_decode_preserves_map() {
        let value = rmpv::Value::Map(vec![(
            rmpv::Value::from("k"),
            rmpv::Value::from(-3),
        )]);
        let bytes = encode_msgpack(&value).unwrap();
        assert_eq!(decode_msgpack_exact(&bytes).unwrap(), value);
    }
}
