use super::collection::KeyedEntry;

/// A key/value annotation on a [`ModelVersion`](super::ModelVersion).
///
/// An empty `value` is a value like any other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelVersionTag {
    pub key: String,
    pub value: String,
}

/// A key/value annotation on a [`RegisteredModel`](super::RegisteredModel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredModelTag {
    pub key: String,
    pub value: String,
}

impl ModelVersionTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        ModelVersionTag {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl RegisteredModelTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        RegisteredModelTag {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<(String, String)> for ModelVersionTag {
    fn from((key, value): (String, String)) -> Self {
        ModelVersionTag { key, value }
    }
}

impl From<ModelVersionTag> for (String, String) {
    fn from(tag: ModelVersionTag) -> Self {
        (tag.key, tag.value)
    }
}

impl KeyedEntry for ModelVersionTag {
    const KIND: &'static str = "model version tag";
}

impl From<(String, String)> for RegisteredModelTag {
    fn from((key, value): (String, String)) -> Self {
        RegisteredModelTag { key, value }
    }
}

impl From<RegisteredModelTag> for (String, String) {
    fn from(tag: RegisteredModelTag) -> Self {
        (tag.key, tag.value)
    }
}

impl KeyedEntry for RegisteredModelTag {
    const KIND: &'static str = "registered model tag";
}
