use thiserror::Error;

/// A wire message that does not fit the schema this crate was built against.
///
/// Usually a sign that the peer speaks a different schema version, so there is
/// no point in retrying with the same message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{message}.{field} carries the unknown enum code {code}")]
    UnknownEnumCode {
        message: &'static str,
        field: &'static str,
        code: i32,
    },
    #[error("{message}.{field} carries the unknown enum name {name}")]
    UnknownEnumName {
        message: &'static str,
        field: &'static str,
        name: String,
    },
    #[error("the required field {field} of {message} is missing")]
    MissingField { message: &'static str, field: String },
}

impl SchemaError {
    /// Prefix the missing field with the path of the repeated element it was found in.
    pub(crate) fn within(self, message: &'static str, path: String) -> Self {
        match self {
            SchemaError::MissingField { field, .. } => SchemaError::MissingField {
                message,
                field: format!("{}.{}", path, field),
            },
            other => other,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("the required key {0} is missing")]
    MissingField(String),
    #[error("the key {key} should hold {expected}, found {found}")]
    InvalidType {
        key: String,
        expected: &'static str,
        found: String,
    },
    #[error("the key {key} holds the unknown model version status {status}")]
    UnknownStatus { key: String, status: String },
}

impl DictionaryError {
    /// Prefix the offending key with the path of the nested entry it was found in.
    pub(crate) fn within(self, path: &str) -> Self {
        match self {
            DictionaryError::MissingField(key) => {
                DictionaryError::MissingField(format!("{}.{}", path, key))
            }
            DictionaryError::InvalidType {
                key,
                expected,
                found,
            } => DictionaryError::InvalidType {
                key: format!("{}.{}", path, key),
                expected,
                found,
            },
            DictionaryError::UnknownStatus { key, status } => DictionaryError::UnknownStatus {
                key: format!("{}.{}", path, key),
                status,
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("the protobuf payload is malformed: {0}")]
    Protobuf(#[from] prost::DecodeError),
    #[error("the JSON payload is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}
