use super::{Aliases, RegisteredModelTags};

/// A named model in the registry. `name` identifies it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisteredModel {
    pub name: String,
    pub creation_timestamp: i64,
    pub last_updated_timestamp: i64,
    pub description: String,
    pub aliases: Aliases,
    pub tags: RegisteredModelTags,
}

impl RegisteredModel {
    /// The version an alias points at, if the alias is set.
    pub fn version_for_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{RegisteredModelAlias, RegisteredModelTag};

    #[test]
    fn duplicate_alias_points_at_last_version() {
        let model = RegisteredModel {
            name: "model".to_string(),
            aliases: vec![
                RegisteredModelAlias::new("champion", "1"),
                RegisteredModelAlias::new("champion", "4"),
            ]
            .into(),
            tags: vec![RegisteredModelTag::new("team", "vision")].into(),
            ..Default::default()
        };
        assert_eq!(model.aliases.len(), 1);
        assert_eq!(model.version_for_alias("champion"), Some("4"));
        assert_eq!(model.version_for_alias("challenger"), None);
        assert_eq!(model.tags.get("team"), Some("vision"));
    }
}
