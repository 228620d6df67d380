//! Wire messages of the model registry protocol.
//!
//! The structs mirror `proto/model_registry.proto` field for field and carry
//! two encodings: protobuf binary through [`prost::Message`] and the REST JSON
//! form through serde. Every scalar field is optional on the wire, so absence
//! stays observable until the [`wire`](crate::wire) adapter decides what it
//! means.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ModelVersionStatus {
    PendingRegistration = 1,
    FailedRegistration = 2,
    Ready = 3,
}

impl ModelVersionStatus {
    /// Name of the enum value as it appears in the proto definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            ModelVersionStatus::PendingRegistration => "PENDING_REGISTRATION",
            ModelVersionStatus::FailedRegistration => "FAILED_REGISTRATION",
            ModelVersionStatus::Ready => "READY",
        }
    }

    pub fn from_str_name(value: &str) -> Option<Self> {
        match value {
            "PENDING_REGISTRATION" => Some(ModelVersionStatus::PendingRegistration),
            "FAILED_REGISTRATION" => Some(ModelVersionStatus::FailedRegistration),
            "READY" => Some(ModelVersionStatus::Ready),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Metric {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[prost(double, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_f64")]
    pub value: Option<f64>,
    #[prost(int64, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_str_int")]
    pub timestamp: Option<i64>,
    #[prost(int64, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_str_int")]
    pub step: Option<i64>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelVersionTag {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisteredModelTag {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisteredModelAlias {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelVersion {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[prost(int64, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_str_int")]
    pub creation_timestamp: Option<i64>,
    #[prost(int64, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_str_int")]
    pub last_updated_timestamp: Option<i64>,
    #[prost(string, optional, tag = "5")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[prost(string, optional, tag = "6")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[prost(string, optional, tag = "7")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[prost(string, optional, tag = "8")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    #[prost(enumeration = "ModelVersionStatus", optional, tag = "9")]
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_status_name")]
    pub status: Option<i32>,
    #[prost(string, optional, tag = "10")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[prost(message, repeated, tag = "11")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<RegisteredModelAlias>,
    #[prost(message, repeated, tag = "12")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ModelVersionTag>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisteredModel {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[prost(int64, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_str_int")]
    pub creation_timestamp: Option<i64>,
    #[prost(int64, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none", with = "opt_str_int")]
    pub last_updated_timestamp: Option<i64>,
    #[prost(string, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[prost(message, repeated, tag = "5")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<RegisteredModelAlias>,
    #[prost(message, repeated, tag = "6")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<RegisteredModelTag>,
}

// serialize Option<i64> as Option<str>, accept both on the way in
mod opt_str_int {
    use std::str::FromStr;

    use serde::de::{self, Deserializer};
    use serde::ser::{Serialize, Serializer};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrInt {
        Str(String),
        Int(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<StrOrInt>::deserialize(deserializer)? {
            Some(StrOrInt::Str(s)) => Ok(Some(i64::from_str(&s).map_err(de::Error::custom)?)),
            Some(StrOrInt::Int(int)) => Ok(Some(int)),
            None => Ok(None),
        }
    }

    pub fn serialize<S>(int: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = int.map(|int| int.to_string());
        s.serialize(serializer)
    }
}

/// JSON spelling of a float the JSON number syntax cannot carry.
pub(crate) fn non_finite_name(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

pub(crate) fn non_finite_from_name(name: &str) -> Option<f64> {
    match name {
        "NaN" => Some(f64::NAN),
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

// serialize non-finite doubles by name, finite ones as numbers
mod opt_f64 {
    use serde::de::{self, Deserializer};
    use serde::ser::Serializer;
    use serde::Deserialize;

    use super::{non_finite_from_name, non_finite_name};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrName {
        Num(f64),
        Name(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumOrName>::deserialize(deserializer)? {
            Some(NumOrName::Num(value)) => Ok(Some(value)),
            Some(NumOrName::Name(name)) => non_finite_from_name(&name)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("{} is not a double", name))),
            None => Ok(None),
        }
    }

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => match non_finite_name(*value) {
                Some(name) => serializer.serialize_some(name),
                None => serializer.serialize_some(value),
            },
            None => serializer.serialize_none(),
        }
    }
}

// serialize the status code by name; codes without a name stay numeric so
// the adapter can reject them
mod opt_status_name {
    use serde::de::{self, Deserializer};
    use serde::ser::Serializer;
    use serde::Deserialize;

    use super::ModelVersionStatus;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NameOrCode {
        Name(String),
        Code(i32),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NameOrCode>::deserialize(deserializer)? {
            Some(NameOrCode::Name(name)) => ModelVersionStatus::from_str_name(&name)
                .map(|status| Some(status as i32))
                .ok_or_else(|| de::Error::custom(format!("unknown model version status {}", name))),
            Some(NameOrCode::Code(code)) => Ok(Some(code)),
            None => Ok(None),
        }
    }

    pub fn serialize<S>(code: &Option<i32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match code {
            Some(code) => match ModelVersionStatus::try_from(*code) {
                Ok(status) => serializer.serialize_some(status.as_str_name()),
                Err(_) => serializer.serialize_some(code),
            },
            None => serializer.serialize_none(),
        }
    }
}
