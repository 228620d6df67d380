use super::{Aliases, ModelVersionStatus, ModelVersionTags};

/// One registered version of a model.
///
/// The entity owns its tags and aliases. Build it with a struct literal, leaving
/// what is not known to `..Default::default()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelVersion {
    pub name: String,
    pub version: String,
    pub creation_timestamp: i64,
    pub last_updated_timestamp: i64,
    pub description: String,
    pub user_id: String,
    pub source: String,
    pub run_id: String,
    pub status: ModelVersionStatus,
    pub status_message: String,
    pub aliases: Aliases,
    pub tags: ModelVersionTags,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ModelVersionTag, RegisteredModelAlias};

    #[test]
    fn defaults_are_empty() {
        let version = ModelVersion::default();
        assert_eq!(version.status, ModelVersionStatus::Ready);
        assert!(version.tags.is_empty());
        assert!(version.aliases.is_empty());
        assert_eq!(version.description, "");
    }

    #[test]
    fn equality_compares_tags_as_sets() {
        let first = ModelVersion {
            name: "model".to_string(),
            version: "1".to_string(),
            tags: vec![ModelVersionTag::new("a", "1"), ModelVersionTag::new("b", "")].into(),
            aliases: vec![RegisteredModelAlias::new("prod", "1")].into(),
            ..Default::default()
        };
        let second = ModelVersion {
            tags: vec![ModelVersionTag::new("b", ""), ModelVersionTag::new("a", "1")].into(),
            ..first.clone()
        };
        assert_eq!(first, second);

        let third = ModelVersion {
            tags: vec![ModelVersionTag::new("a", "1")].into(),
            ..first.clone()
        };
        assert_ne!(first, third);
    }
}
