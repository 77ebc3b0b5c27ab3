//! Registry of resource kinds, indexed by URL path segment.

use crate::config::kinds::ALL_KINDS;
use crate::config::types::ResourceKind;
use crate::config::validator::validate;
use crate::error::ConfigError;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct Registry {
    pub kinds: Vec<&'static ResourceKind>,
    pub kind_by_path: HashMap<&'static str, &'static ResourceKind>,
}

impl Registry {
    /// Validate and index the given kinds.
    pub fn new(kinds: &[&'static ResourceKind]) -> Result<Self, ConfigError> {
        validate(kinds)?;
        let kind_by_path = kinds.iter().map(|k| (k.path_segment, *k)).collect();
        Ok(Registry {
            kinds: kinds.to_vec(),
            kind_by_path,
        })
    }

    /// Registry of every kind the backend serves.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(ALL_KINDS)
    }

    pub fn kind_by_path(&self, path: &str) -> Option<&'static ResourceKind> {
        self.kind_by_path.get(path).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_indexes_every_kind() {
        let registry = Registry::standard().unwrap();
        assert_eq!(registry.kinds.len(), ALL_KINDS.len());
        for kind in ALL_KINDS {
            assert_eq!(registry.kind_by_path(kind.path_segment).map(|k| k.table), Some(kind.table));
        }
        assert!(registry.kind_by_path("nope").is_none());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let kinds: Vec<&'static ResourceKind> = vec![ALL_KINDS[0], ALL_KINDS[0]];
        assert!(Registry::new(&kinds).is_err());
    }
}
