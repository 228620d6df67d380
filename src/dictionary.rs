//! Plain key/value views of the entities, for logs, fixtures and diffs.
//!
//! Keys and their order match the wire field names. Timestamps stay JSON
//! numbers, the status is written by its symbolic name and tags and aliases
//! become arrays of objects.

use serde_json::Value;

use crate::{
    entities::{
        KeyedCollection, KeyedEntry, Metric, ModelVersion, ModelVersionStatus, ModelVersionTag,
        RegisteredModel, RegisteredModelAlias, RegisteredModelTag,
    },
    error::{DecodeError, DictionaryError},
    proto,
};

/// An insertion ordered JSON object.
pub type Dictionary = serde_json::Map<String, Value>;

pub trait DictionaryEntity: Sized {
    fn to_dictionary(&self) -> Dictionary;

    /// Build the entity, failing on the first missing required key.
    ///
    /// Every field that is mandatory on the wire is required here, except
    /// `ModelVersion.status`, which defaults to `READY`. On top of that the
    /// dictionary requires `Metric` `value`/`timestamp`/`step` and
    /// `ModelVersion.creation_timestamp`. Other absent keys default exactly as
    /// they do when read from the wire.
    ///
    /// Keys this entity does not know are ignored; `null` counts as absent.
    fn from_dictionary(dictionary: &Dictionary) -> Result<Self, DictionaryError>;

    fn to_json_string(&self) -> String {
        Value::Object(self.to_dictionary()).to_string()
    }

    fn from_json_str(json: &str) -> Result<Self, DecodeError> {
        let dictionary: Dictionary = serde_json::from_str(json)?;
        Self::from_dictionary(&dictionary).map_err(|error| {
            tracing::debug!(%error, "rejecting dictionary");
            error.into()
        })
    }
}

fn type_name(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
    .to_string()
}

fn invalid(key: &str, expected: &'static str, found: &Value) -> DictionaryError {
    DictionaryError::InvalidType {
        key: key.to_string(),
        expected,
        found: type_name(found),
    }
}

fn lookup<'a>(dictionary: &'a Dictionary, key: &str) -> Option<&'a Value> {
    dictionary.get(key).filter(|value| !value.is_null())
}

type Reader<T> = fn(&str, &Value) -> Result<T, DictionaryError>;

fn required<T>(dictionary: &Dictionary, key: &str, read: Reader<T>) -> Result<T, DictionaryError> {
    let value =
        lookup(dictionary, key).ok_or_else(|| DictionaryError::MissingField(key.to_string()))?;
    read(key, value)
}

/// Absent keys take the value direct construction would give them.
fn optional<T: Default>(
    dictionary: &Dictionary,
    key: &str,
    read: Reader<T>,
) -> Result<T, DictionaryError> {
    lookup(dictionary, key).map_or_else(|| Ok(T::default()), |value| read(key, value))
}

fn as_string(key: &str, value: &Value) -> Result<String, DictionaryError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| invalid(key, "a string", value))
}

fn as_int(key: &str, value: &Value) -> Result<i64, DictionaryError> {
    value
        .as_i64()
        .ok_or_else(|| invalid(key, "an integer", value))
}

fn as_float(key: &str, value: &Value) -> Result<f64, DictionaryError> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(name) => proto::non_finite_from_name(name),
        _ => None,
    }
    .ok_or_else(|| invalid(key, "a float", value))
}

fn as_status(key: &str, value: &Value) -> Result<ModelVersionStatus, DictionaryError> {
    let name = as_string(key, value)?;
    name.parse().map_err(|_| DictionaryError::UnknownStatus {
        key: key.to_string(),
        status: name,
    })
}

fn float_value(value: f64) -> Value {
    proto::non_finite_name(value).map_or_else(|| Value::from(value), |name| Value::from(name))
}

fn pair(first: (&str, &str), second: (&str, &str)) -> Dictionary {
    let mut dictionary = Dictionary::new();
    dictionary.insert(first.0.to_string(), Value::from(first.1));
    dictionary.insert(second.0.to_string(), Value::from(second.1));
    dictionary
}

fn entries_value<E>(collection: &KeyedCollection<E>) -> Value
where
    E: DictionaryEntity + KeyedEntry,
{
    Value::Array(
        collection
            .to_vec()
            .iter()
            .map(|entry| Value::Object(entry.to_dictionary()))
            .collect(),
    )
}

fn entries<E>(dictionary: &Dictionary, key: &str) -> Result<KeyedCollection<E>, DictionaryError>
where
    E: DictionaryEntity + KeyedEntry,
{
    match lookup(dictionary, key) {
        None => Ok(KeyedCollection::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let path = format!("{}[{}]", key, i);
                match item {
                    Value::Object(object) => E::from_dictionary(object).map_err(|e| e.within(&path)),
                    other => Err(invalid(&path, "an object", other)),
                }
            })
            .collect(),
        Some(other) => Err(invalid(key, "an array", other)),
    }
}

impl DictionaryEntity for Metric {
    fn to_dictionary(&self) -> Dictionary {
        let mut dictionary = Dictionary::new();
        dictionary.insert("key".to_string(), Value::from(self.key.as_str()));
        dictionary.insert("value".to_string(), float_value(self.value));
        dictionary.insert("timestamp".to_string(), Value::from(self.timestamp));
        dictionary.insert("step".to_string(), Value::from(self.step));
        dictionary
    }

    fn from_dictionary(dictionary: &Dictionary) -> Result<Self, DictionaryError> {
        Ok(Metric {
            key: required(dictionary, "key", as_string)?,
            value: required(dictionary, "value", as_float)?,
            timestamp: required(dictionary, "timestamp", as_int)?,
            step: required(dictionary, "step", as_int)?,
        })
    }
}

impl DictionaryEntity for ModelVersionTag {
    fn to_dictionary(&self) -> Dictionary {
        pair(("key", self.key.as_str()), ("value", self.value.as_str()))
    }

    fn from_dictionary(dictionary: &Dictionary) -> Result<Self, DictionaryError> {
        Ok(ModelVersionTag {
            key: required(dictionary, "key", as_string)?,
            value: optional(dictionary, "value", as_string)?,
        })
    }
}

impl DictionaryEntity for RegisteredModelTag {
    fn to_dictionary(&self) -> Dictionary {
        pair(("key", self.key.as_str()), ("value", self.value.as_str()))
    }

    fn from_dictionary(dictionary: &Dictionary) -> Result<Self, DictionaryError> {
        Ok(RegisteredModelTag {
            key: required(dictionary, "key", as_string)?,
            value: optional(dictionary, "value", as_string)?,
        })
    }
}

impl DictionaryEntity for RegisteredModelAlias {
    fn to_dictionary(&self) -> Dictionary {
        pair(("alias", self.alias.as_str()), ("version", self.version.as_str()))
    }

    fn from_dictionary(dictionary: &Dictionary) -> Result<Self, DictionaryError> {
        Ok(RegisteredModelAlias {
            alias: required(dictionary, "alias", as_string)?,
            version: optional(dictionary, "version", as_string)?,
        })
    }
}

impl DictionaryEntity for ModelVersion {
    fn to_dictionary(&self) -> Dictionary {
        let mut dictionary = Dictionary::new();
        dictionary.insert("name".to_string(), Value::from(self.name.as_str()));
        dictionary.insert("version".to_string(), Value::from(self.version.as_str()));
        dictionary.insert(
            "creation_timestamp".to_string(),
            Value::from(self.creation_timestamp),
        );
        dictionary.insert(
            "last_updated_timestamp".to_string(),
            Value::from(self.last_updated_timestamp),
        );
        dictionary.insert("description".to_string(), Value::from(self.description.as_str()));
        dictionary.insert("user_id".to_string(), Value::from(self.user_id.as_str()));
        dictionary.insert("source".to_string(), Value::from(self.source.as_str()));
        dictionary.insert("run_id".to_string(), Value::from(self.run_id.as_str()));
        dictionary.insert("status".to_string(), Value::from(self.status.as_str()));
        dictionary.insert(
            "status_message".to_string(),
            Value::from(self.status_message.as_str()),
        );
        dictionary.insert("aliases".to_string(), entries_value(&self.aliases));
        dictionary.insert("tags".to_string(), entries_value(&self.tags));
        dictionary
    }

    fn from_dictionary(dictionary: &Dictionary) -> Result<Self, DictionaryError> {
        Ok(ModelVersion {
            name: required(dictionary, "name", as_string)?,
            version: required(dictionary, "version", as_string)?,
            creation_timestamp: required(dictionary, "creation_timestamp", as_int)?,
            last_updated_timestamp: optional(dictionary, "last_updated_timestamp", as_int)?,
            description: optional(dictionary, "description", as_string)?,
            user_id: optional(dictionary, "user_id", as_string)?,
            source: optional(dictionary, "source", as_string)?,
            run_id: optional(dictionary, "run_id", as_string)?,
            status: optional(dictionary, "status", as_status)?,
            status_message: optional(dictionary, "status_message", as_string)?,
            aliases: entries(dictionary, "aliases")?,
            tags: entries(dictionary, "tags")?,
        })
    }
}

impl DictionaryEntity for RegisteredModel {
    fn to_dictionary(&self) -> Dictionary {
        let mut dictionary = Dictionary::new();
        dictionary.insert("name".to_string(), Value::from(self.name.as_str()));
        dictionary.insert(
            "creation_timestamp".to_string(),
            Value::from(self.creation_timestamp),
        );
        dictionary.insert(
            "last_updated_timestamp".to_string(),
            Value::from(self.last_updated_timestamp),
        );
        dictionary.insert("description".to_string(), Value::from(self.description.as_str()));
        dictionary.insert("aliases".to_string(), entries_value(&self.aliases));
        dictionary.insert("tags".to_string(), entries_value(&self.tags));
        dictionary
    }

    fn from_dictionary(dictionary: &Dictionary) -> Result<Self, DictionaryError> {
        Ok(RegisteredModel {
            name: required(dictionary, "name", as_string)?,
            creation_timestamp: optional(dictionary, "creation_timestamp", as_int)?,
            last_updated_timestamp: optional(dictionary, "last_updated_timestamp", as_int)?,
            description: optional(dictionary, "description", as_string)?,
            aliases: entries(dictionary, "aliases")?,
            tags: entries(dictionary, "tags")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Dictionary {
        match value {
            Value::Object(object) => object,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn metric_keys_in_fixed_order() {
        let metric = Metric::new("accuracy", 0.95, 1_700_000_000_000, 3);
        let dictionary = metric.to_dictionary();
        assert_eq!(
            dictionary.keys().collect::<Vec<_>>(),
            vec!["key", "value", "timestamp", "step"]
        );
        assert_eq!(
            Value::Object(dictionary),
            json!({"key": "accuracy", "value": 0.95, "timestamp": 1_700_000_000_000i64, "step": 3})
        );
    }

    #[test]
    fn metric_accepts_integral_values() {
        let dictionary = object(json!({"key": "k", "value": 10000, "timestamp": 5, "step": 0}));
        let metric = Metric::from_dictionary(&dictionary).unwrap();
        assert_eq!(metric.value, 10000.0);
    }

    #[test]
    fn non_finite_metric_values_survive() {
        for value in [f64::INFINITY, f64::NEG_INFINITY].iter().copied() {
            let metric = Metric::new("loss", value, 1, 1);
            assert_eq!(Metric::from_dictionary(&metric.to_dictionary()).unwrap(), metric);
        }
        let nan = Metric::new("loss", f64::NAN, 1, 1);
        let dictionary = nan.to_dictionary();
        assert_eq!(dictionary["value"], "NaN");
        assert!(Metric::from_dictionary(&dictionary).unwrap().value.is_nan());
    }

    #[test]
    fn missing_metric_key_is_named() {
        let dictionary = object(json!({"key": "k", "value": 1.0, "timestamp": 5}));
        assert_eq!(
            Metric::from_dictionary(&dictionary),
            Err(DictionaryError::MissingField("step".to_string()))
        );
    }

    #[test]
    fn null_counts_as_missing() {
        let dictionary = object(json!({"name": null}));
        assert_eq!(
            RegisteredModel::from_dictionary(&dictionary),
            Err(DictionaryError::MissingField("name".to_string()))
        );
    }

    #[test]
    fn wrong_type_is_named() {
        let dictionary = object(json!({"key": "k", "value": 1.0, "timestamp": "soon", "step": 1}));
        assert_eq!(
            Metric::from_dictionary(&dictionary),
            Err(DictionaryError::InvalidType {
                key: "timestamp".to_string(),
                expected: "an integer",
                found: "a string".to_string(),
            })
        );
    }

    #[test]
    fn nested_errors_carry_their_path() {
        let dictionary = object(json!({
            "name": "model",
            "tags": [{"key": "a", "value": "1"}, {"value": "2"}],
        }));
        assert_eq!(
            RegisteredModel::from_dictionary(&dictionary),
            Err(DictionaryError::MissingField("tags[1].key".to_string()))
        );

        let dictionary = object(json!({"name": "model", "aliases": ["champion"]}));
        assert_eq!(
            RegisteredModel::from_dictionary(&dictionary),
            Err(DictionaryError::InvalidType {
                key: "aliases[0]".to_string(),
                expected: "an object",
                found: "a string".to_string(),
            })
        );
    }

    #[test]
    fn alias_version_defaults_like_the_wire() {
        let dictionary = object(json!({"alias": "champion"}));
        let from_dictionary = RegisteredModelAlias::from_dictionary(&dictionary).unwrap();
        let from_wire = <RegisteredModelAlias as crate::wire::WireEntity>::from_wire(proto::RegisteredModelAlias {
            alias: Some("champion".to_string()),
            version: None,
        })
        .unwrap();
        assert_eq!(from_dictionary, RegisteredModelAlias::new("champion", ""));
        assert_eq!(from_dictionary, from_wire);

        assert_eq!(
            RegisteredModelAlias::from_dictionary(&object(json!({"version": "1"}))),
            Err(DictionaryError::MissingField("alias".to_string()))
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let dictionary = object(json!({
            "name": "model",
            "version": "1",
            "creation_timestamp": 1,
            "status": "ARCHIVED",
        }));
        assert_eq!(
            ModelVersion::from_dictionary(&dictionary),
            Err(DictionaryError::UnknownStatus {
                key: "status".to_string(),
                status: "ARCHIVED".to_string(),
            })
        );
    }

    #[test]
    fn model_version_defaults_optional_keys() {
        let dictionary = object(json!({
            "name": "model",
            "version": "7",
            "creation_timestamp": 1,
            "unrelated": true,
        }));
        let version = ModelVersion::from_dictionary(&dictionary).unwrap();
        assert_eq!(
            version,
            ModelVersion {
                name: "model".to_string(),
                version: "7".to_string(),
                creation_timestamp: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn model_version_key_set() {
        let dictionary = ModelVersion::default().to_dictionary();
        assert_eq!(
            dictionary.keys().collect::<Vec<_>>(),
            vec![
                "name",
                "version",
                "creation_timestamp",
                "last_updated_timestamp",
                "description",
                "user_id",
                "source",
                "run_id",
                "status",
                "status_message",
                "aliases",
                "tags",
            ]
        );
        assert_eq!(dictionary["status"], "READY");
    }

    #[test]
    fn json_text_round_trip() {
        let model = RegisteredModel {
            name: "model".to_string(),
            tags: vec![RegisteredModelTag::new("empty", "")].into(),
            ..Default::default()
        };
        let text = model.to_json_string();
        assert_eq!(RegisteredModel::from_json_str(&text).unwrap(), model);
        assert!(matches!(
            RegisteredModel::from_json_str("{"),
            Err(DecodeError::Json(_))
        ));
    }
}
