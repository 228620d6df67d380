//! Domain entities of the model registry.

mod alias;
mod collection;
mod metric;
mod model_version;
mod registered_model;
mod status;
mod tag;

pub use alias::RegisteredModelAlias;
pub use collection::{KeyedCollection, KeyedEntry};
pub use metric::Metric;
pub use model_version::ModelVersion;
pub use registered_model::RegisteredModel;
pub use status::{ModelVersionStatus, ParseStatusError};
pub use tag::{ModelVersionTag, RegisteredModelTag};

pub type ModelVersionTags = KeyedCollection<ModelVersionTag>;
pub type RegisteredModelTags = KeyedCollection<RegisteredModelTag>;
pub type Aliases = KeyedCollection<RegisteredModelAlias>;
