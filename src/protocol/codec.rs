//! JSON codec: wire records to JSON nodes, and envelopes to and from single lines of text.

use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ProtocolError;
use super::records::Envelope;

/// Converts records to and from JSON.
///
/// The dispatcher owns one instance; nothing here is global. Object keys keep declaration order
/// (`serde_json`'s `preserve_order`), so replies come out exactly as the server expects them.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Serialize a record into a JSON node.
    ///
    /// # Errors
    /// `ProtocolError::Encode` if the record can't be represented in JSON, including when two of
    /// its fields carry the same wire name.
    pub fn to_node<T: Serialize>(&self, record: &T) -> Result<Value, ProtocolError> {
        // serde_json happily writes duplicate keys; read the text back through a visitor that
        // refuses them
        let text = serde_json::to_vec(record).map_err(ProtocolError::Encode)?;
        let UniqueKeys(node) = serde_json::from_slice(&text).map_err(ProtocolError::Encode)?;
        Ok(node)
    }

    /// Interpret a JSON node as a record of type `T`.
    ///
    /// # Errors
    /// `ProtocolError::Decode` if fields are missing or have the wrong type.
    pub fn from_node<T: DeserializeOwned>(&self, node: Value) -> Result<T, ProtocolError> {
        serde_json::from_value(node).map_err(ProtocolError::Decode)
    }

    /// Parse one line of text as an envelope.
    pub fn decode_envelope(&self, line: &str) -> Result<Envelope, ProtocolError> {
        serde_json::from_str(line).map_err(ProtocolError::Decode)
    }

    /// Render an envelope as one line of text, without the trailing newline.
    pub fn encode_envelope(&self, envelope: &Envelope) -> Result<String, ProtocolError> {
        let node = self.to_node(envelope)?;
        serde_json::to_string(&node).map_err(ProtocolError::Encode)
    }
}

/// A JSON value whose objects are guaranteed to have no repeated keys.
struct UniqueKeys(Value);

impl<'de> Deserialize<'de> for UniqueKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(UniqueKeysVisitor).map(UniqueKeys)
    }
}

struct UniqueKeysVisitor;

impl<'de> Visitor<'de> for UniqueKeysVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        UniqueKeys::deserialize(deserializer).map(|u| u.0)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(UniqueKeys(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut object = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            if object.contains_key(&key) {
                return Err(de::Error::custom(format_args!(
                    "duplicate wire field `{}`",
                    key
                )));
            }
            let UniqueKeys(value) = map.next_value()?;
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::records::{CoordJson, GameType, JoinJson};
    use serde::ser::{SerializeStruct, Serializer};
    use serde_json::json;
    use std::collections::HashMap;

    /// Two fields sharing the wire name `x`.
    struct BadRecord;

    impl Serialize for BadRecord {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut record = serializer.serialize_struct("BadRecord", 2)?;
            record.serialize_field("x", "foo")?;
            record.serialize_field("x", "bar")?;
            record.end()
        }
    }

    #[test]
    fn duplicate_wire_names_fail_to_encode() {
        let err = JsonCodec.to_node(&BadRecord).unwrap_err();
        assert!(matches!(err, ProtocolError::Encode(_)));
        assert!(err.to_string().contains("duplicate wire field `x`"));
    }

    #[test]
    fn non_string_map_keys_fail_to_encode() {
        let mut bad = HashMap::new();
        bad.insert((1u8, 2u8), 3u8);
        assert!(matches!(
            JsonCodec.to_node(&bad),
            Err(ProtocolError::Encode(_))
        ));
    }

    #[test]
    fn keys_keep_declaration_order() {
        let join = JoinJson {
            name: "giovabattelli".to_string(),
            game_type: GameType::Single,
        };
        let node = JsonCodec.to_node(&join).unwrap();
        let envelope = Envelope::new("join", node);
        assert_eq!(
            JsonCodec.encode_envelope(&envelope).unwrap(),
            r#"{"method-name":"join","arguments":{"name":"giovabattelli","game-type":"SINGLE"}}"#
        );
    }

    #[test]
    fn decode_reports_missing_fields() {
        let err = JsonCodec
            .from_node::<CoordJson>(json!({ "x": 1 }))
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
        assert!(matches!(
            JsonCodec.decode_envelope(r#"{"arguments":[]}"#),
            Err(ProtocolError::Decode(_))
        ));
        assert!(matches!(
            JsonCodec.decode_envelope("not json"),
            Err(ProtocolError::Decode(_))
        ));
    }

    #[test]
    fn nested_values_survive_encoding() {
        let node = json!({ "a": [1, -2, 3.5, null, true, { "b": "c" }] });
        assert_eq!(JsonCodec.to_node(&node).unwrap(), node);
    }
}
