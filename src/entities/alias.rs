use super::collection::KeyedEntry;

/// A named pointer to one version of a registered model.
///
/// `version` is the version identifier as a string. Nothing at this layer checks
/// that the version exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredModelAlias {
    pub alias: String,
    pub version: String,
}

impl RegisteredModelAlias {
    pub fn new(alias: impl Into<String>, version: impl Into<String>) -> Self {
        RegisteredModelAlias {
            alias: alias.into(),
            version: version.into(),
        }
    }
}

impl From<(String, String)> for RegisteredModelAlias {
    fn from((alias, version): (String, String)) -> Self {
        RegisteredModelAlias { alias, version }
    }
}

impl From<RegisteredModelAlias> for (String, String) {
    fn from(alias: RegisteredModelAlias) -> Self {
        (alias.alias, alias.version)
    }
}

impl KeyedEntry for RegisteredModelAlias {
    const KIND: &'static str = "registered model alias";
}
