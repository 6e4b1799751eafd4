//! Cache key scheme.
//!
//! Maps a logical resource reference (collection, optional instance
//! identifier) to a deterministic key string. Collection-level entries use
//! the bare collection name; instance-level entries append the separator
//! and the identifier. Construction rejects any collection/separator pair
//! that could make two distinct references collide.

use moto_core::{MotoError, MotoResult, UserId};

/// Key generator for one resource collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScheme {
    collection: String,
    separator: char,
}

impl KeyScheme {
    /// Creates a key scheme for a collection.
    ///
    /// Fails when the collection name is empty, contains the separator, or
    /// the separator is a digit (identifiers are numeric, so a digit
    /// separator would break injectivity).
    pub fn new(collection: impl Into<String>, separator: char) -> MotoResult<Self> {
        let collection = collection.into();

        if collection.trim().is_empty() {
            return Err(MotoError::configuration(
                "cache collection name must not be empty",
            ));
        }
        if collection.contains(separator) {
            return Err(MotoError::configuration(format!(
                "separator '{}' appears in collection name '{}'",
                separator, collection
            )));
        }
        if separator.is_ascii_digit() {
            return Err(MotoError::configuration(
                "separator must not be a digit",
            ));
        }

        Ok(Self {
            collection,
            separator,
        })
    }

    /// Returns the collection name.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Key for the collection-level entry (list views).
    #[must_use]
    pub fn collection_key(&self) -> String {
        self.collection.clone()
    }

    /// Key for a single instance entry.
    #[must_use]
    pub fn instance_key(&self, id: UserId) -> String {
        format!("{}{}{}", self.collection, self.separator, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_key_is_bare_collection() {
        let keys = KeyScheme::new("users", ':').unwrap();
        assert_eq!(keys.collection_key(), "users");
    }

    #[test]
    fn test_instance_key_includes_identifier() {
        let keys = KeyScheme::new("users", ':').unwrap();
        assert_eq!(keys.instance_key(UserId::new(42)), "users:42");
    }

    #[test]
    fn test_collection_and_instance_keys_never_collide() {
        let keys = KeyScheme::new("users", ':').unwrap();
        for id in [0, 1, 42, i64::MAX] {
            assert_ne!(keys.collection_key(), keys.instance_key(UserId::new(id)));
        }
    }

    #[test]
    fn test_distinct_ids_yield_distinct_keys() {
        let keys = KeyScheme::new("users", ':').unwrap();
        assert_ne!(
            keys.instance_key(UserId::new(1)),
            keys.instance_key(UserId::new(11))
        );
        assert_ne!(
            keys.instance_key(UserId::new(12)),
            keys.instance_key(UserId::new(2))
        );
    }

    #[test]
    fn test_distinct_collections_yield_distinct_keys() {
        let users = KeyScheme::new("users", ':').unwrap();
        let drivers = KeyScheme::new("drivers", ':').unwrap();
        assert_ne!(users.collection_key(), drivers.collection_key());
        assert_ne!(
            users.instance_key(UserId::new(1)),
            drivers.instance_key(UserId::new(1))
        );
    }

    #[test]
    fn test_empty_collection_rejected() {
        assert!(KeyScheme::new("", ':').is_err());
        assert!(KeyScheme::new("   ", ':').is_err());
    }

    #[test]
    fn test_separator_in_collection_rejected() {
        assert!(KeyScheme::new("user:list", ':').is_err());
    }

    #[test]
    fn test_digit_separator_rejected() {
        assert!(KeyScheme::new("users", '7').is_err());
    }

    #[test]
    fn test_underscore_separator() {
        let keys = KeyScheme::new("user_list_response", ':').unwrap();
        assert_eq!(keys.collection_key(), "user_list_response");
        let keys = KeyScheme::new("users", '_').unwrap();
        assert_eq!(keys.instance_key(UserId::new(3)), "users_3");
    }
}
