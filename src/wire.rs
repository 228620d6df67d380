//! Mapping between the domain entities and the [`proto`] wire messages.
//!
//! Every conversion is a pure function producing a new value. Reading a message
//! fails with a [`SchemaError`] when a mandatory field is absent or the status
//! carries a code the schema does not know; every other absent field becomes
//! the empty string or zero. An absent tag value and an empty one therefore
//! read back the same.

use prost::Message;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    entities::{
        KeyedCollection, KeyedEntry, Metric, ModelVersion, ModelVersionStatus, ModelVersionTag,
        RegisteredModel, RegisteredModelAlias, RegisteredModelTag,
    },
    error::{DecodeError, SchemaError},
    proto,
};

/// An entity with a wire representation.
pub trait WireEntity: Sized {
    type Message: Message + Default + Serialize + DeserializeOwned;

    fn to_wire(&self) -> Self::Message;
    fn from_wire(message: Self::Message) -> Result<Self, SchemaError>;

    /// Encode as protobuf binary.
    fn encode_to_vec(&self) -> Vec<u8> {
        self.to_wire().encode_to_vec()
    }

    /// Decode from protobuf binary.
    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let message = Self::Message::decode(buf)?;
        Self::from_wire(message).map_err(|error| {
            tracing::debug!(%error, "rejecting protobuf message");
            error.into()
        })
    }

    /// Encode in the REST JSON form.
    fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_wire())
    }

    /// Decode from the REST JSON form.
    fn from_json(json: &str) -> Result<Self, DecodeError> {
        let message: Self::Message = serde_json::from_str(json)?;
        Self::from_wire(message).map_err(|error| {
            tracing::debug!(%error, "rejecting JSON message");
            error.into()
        })
    }
}

fn required(
    value: Option<String>,
    message: &'static str,
    field: &'static str,
) -> Result<String, SchemaError> {
    value.ok_or_else(|| SchemaError::MissingField {
        message,
        field: field.to_string(),
    })
}

/// Read a repeated field in wire order, feeding the last-write-wins collection.
fn collect_repeated<E>(
    messages: Vec<E::Message>,
    message: &'static str,
    field: &'static str,
) -> Result<KeyedCollection<E>, SchemaError>
where
    E: WireEntity + KeyedEntry,
{
    messages
        .into_iter()
        .enumerate()
        .map(|(i, m)| E::from_wire(m).map_err(|e| e.within(message, format!("{}[{}]", field, i))))
        .collect()
}

fn status_from_wire(code: Option<i32>) -> Result<ModelVersionStatus, SchemaError> {
    let code = code.ok_or_else(|| SchemaError::MissingField {
        message: "ModelVersion",
        field: "status".to_string(),
    })?;
    ModelVersionStatus::from_wire_code(code).ok_or(SchemaError::UnknownEnumCode {
        message: "ModelVersion",
        field: "status",
        code,
    })
}

impl WireEntity for Metric {
    type Message = proto::Metric;

    fn to_wire(&self) -> proto::Metric {
        proto::Metric {
            key: Some(self.key.clone()),
            value: Some(self.value),
            timestamp: Some(self.timestamp),
            step: Some(self.step),
        }
    }

    fn from_wire(message: proto::Metric) -> Result<Self, SchemaError> {
        Ok(Metric {
            key: required(message.key, "Metric", "key")?,
            value: message.value.unwrap_or_default(),
            timestamp: message.timestamp.unwrap_or_default(),
            step: message.step.unwrap_or_default(),
        })
    }
}

impl WireEntity for ModelVersionTag {
    type Message = proto::ModelVersionTag;

    fn to_wire(&self) -> proto::ModelVersionTag {
        proto::ModelVersionTag {
            key: Some(self.key.clone()),
            value: Some(self.value.clone()),
        }
    }

    fn from_wire(message: proto::ModelVersionTag) -> Result<Self, SchemaError> {
        Ok(ModelVersionTag {
            key: required(message.key, "ModelVersionTag", "key")?,
            value: message.value.unwrap_or_default(),
        })
    }
}

impl WireEntity for RegisteredModelTag {
    type Message = proto::RegisteredModelTag;

    fn to_wire(&self) -> proto::RegisteredModelTag {
        proto::RegisteredModelTag {
            key: Some(self.key.clone()),
            value: Some(self.value.clone()),
        }
    }

    fn from_wire(message: proto::RegisteredModelTag) -> Result<Self, SchemaError> {
        Ok(RegisteredModelTag {
            key: required(message.key, "RegisteredModelTag", "key")?,
            value: message.value.unwrap_or_default(),
        })
    }
}

impl WireEntity for RegisteredModelAlias {
    type Message = proto::RegisteredModelAlias;

    fn to_wire(&self) -> proto::RegisteredModelAlias {
        proto::RegisteredModelAlias {
            alias: Some(self.alias.clone()),
            version: Some(self.version.clone()),
        }
    }

    fn from_wire(message: proto::RegisteredModelAlias) -> Result<Self, SchemaError> {
        Ok(RegisteredModelAlias {
            alias: required(message.alias, "RegisteredModelAlias", "alias")?,
            version: message.version.unwrap_or_default(),
        })
    }
}

impl WireEntity for ModelVersion {
    type Message = proto::ModelVersion;

    fn to_wire(&self) -> proto::ModelVersion {
        proto::ModelVersion {
            name: Some(self.name.clone()),
            version: Some(self.version.clone()),
            creation_timestamp: Some(self.creation_timestamp),
            last_updated_timestamp: Some(self.last_updated_timestamp),
            description: Some(self.description.clone()),
            user_id: Some(self.user_id.clone()),
            source: Some(self.source.clone()),
            run_id: Some(self.run_id.clone()),
            status: Some(self.status.wire_code()),
            status_message: Some(self.status_message.clone()),
            aliases: self.aliases.to_vec().iter().map(WireEntity::to_wire).collect(),
            tags: self.tags.to_vec().iter().map(WireEntity::to_wire).collect(),
        }
    }

    fn from_wire(message: proto::ModelVersion) -> Result<Self, SchemaError> {
        Ok(ModelVersion {
            name: required(message.name, "ModelVersion", "name")?,
            version: required(message.version, "ModelVersion", "version")?,
            creation_timestamp: message.creation_timestamp.unwrap_or_default(),
            last_updated_timestamp: message.last_updated_timestamp.unwrap_or_default(),
            description: message.description.unwrap_or_default(),
            user_id: message.user_id.unwrap_or_default(),
            source: message.source.unwrap_or_default(),
            run_id: message.run_id.unwrap_or_default(),
            status: status_from_wire(message.status)?,
            status_message: message.status_message.unwrap_or_default(),
            aliases: collect_repeated(message.aliases, "ModelVersion", "aliases")?,
            tags: collect_repeated(message.tags, "ModelVersion", "tags")?,
        })
    }

    /// Decode from the REST JSON form, reporting an unknown status name as a
    /// [`SchemaError`] rather than malformed JSON.
    fn from_json(json: &str) -> Result<Self, DecodeError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(name) = value.get("status").and_then(serde_json::Value::as_str) {
            if proto::ModelVersionStatus::from_str_name(name).is_none() {
                tracing::debug!(status = name, "rejecting JSON message");
                return Err(SchemaError::UnknownEnumName {
                    message: "ModelVersion",
                    field: "status",
                    name: name.to_owned(),
                }
                .into());
            }
        }
        let message: proto::ModelVersion = serde_json::from_value(value)?;
        Self::from_wire(message).map_err(|error| {
            tracing::debug!(%error, "rejecting JSON message");
            error.into()
        })
    }
}

impl WireEntity for RegisteredModel {
    type Message = proto::RegisteredModel;

    fn to_wire(&self) -> proto::RegisteredModel {
        proto::RegisteredModel {
            name: Some(self.name.clone()),
            creation_timestamp: Some(self.creation_timestamp),
            last_updated_timestamp: Some(self.last_updated_timestamp),
            description: Some(self.description.clone()),
            aliases: self.aliases.to_vec().iter().map(WireEntity::to_wire).collect(),
            tags: self.tags.to_vec().iter().map(WireEntity::to_wire).collect(),
        }
    }

    fn from_wire(message: proto::RegisteredModel) -> Result<Self, SchemaError> {
        Ok(RegisteredModel {
            name: required(message.name, "RegisteredModel", "name")?,
            creation_timestamp: message.creation_timestamp.unwrap_or_default(),
            last_updated_timestamp: message.last_updated_timestamp.unwrap_or_default(),
            description: message.description.unwrap_or_default(),
            aliases: collect_repeated(message.aliases, "RegisteredModel", "aliases")?,
            tags: collect_repeated(message.tags, "RegisteredModel", "tags")?,
        })
    }
}
