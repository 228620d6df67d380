//! Entities of the MLflow model registry and their wire representations.
//!
//! [`entities`] holds the domain objects, [`proto`] the wire messages,
//! [`wire`] the mapping between both and [`dictionary`] a plain key/value view
//! of the entities for logs and fixtures.

pub mod dictionary;
pub mod entities;
pub mod error;
pub mod proto;
pub mod wire;

pub use dictionary::{Dictionary, DictionaryEntity};
pub use entities::{
    Metric, ModelVersion, ModelVersionStatus, ModelVersionTag, RegisteredModel,
    RegisteredModelAlias, RegisteredModelTag,
};
pub use error::{DecodeError, DictionaryError, SchemaError};
pub use wire::WireEntity;

/// Milliseconds since the unix epoch, the unit of every registry timestamp.
///
/// Clocks set before the epoch read as `0`.
pub fn current_time_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis().try_into().unwrap_or(i64::MAX))
        .unwrap_or(0)
}
