use crate::StorageError;
use bytes::Bytes;

/// Object store abstraction: three verbs plus URL mapping.
///
/// Implementations perform a single remote call per method and never retry.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store `data` at `key`, replacing any existing object
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> Result<(), StorageError>;

    /// Keys starting with `prefix` (plain string prefix, not a directory match)
    async fn list_objects(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// Remove the object at `key`; deleting a missing key succeeds
    async fn delete_object(&self, key: &str) -> Result<(), StorageError>;

    /// Base URL objects are served from, without trailing slash
    fn public_url(&self) -> &str;

    /// Check if backend is local or remote
    fn is_remote(&self) -> bool;

    /// Public URL for a key
    fn get_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_url(), key)
    }

    /// Turns either a public URL produced by [`get_url`](Self::get_url) or a bare key into a key.
    fn key_from_location(&self, location: &str) -> String {
        let prefix = format!("{}/", self.public_url());
        location
            .strip_prefix(prefix.as_str())
            .unwrap_or(location)
            .to_string()
    }
}

/// Rejects keys that could escape a storage root.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = |reason: &str| Err(StorageError::InvalidKey(key.to_string(), reason.to_string()));

    if key.is_empty() {
        return invalid("key is empty");
    }
    if key.contains('\0') {
        return invalid("key contains null byte");
    }
    if key.starts_with('/') || key.starts_with('\\') {
        return invalid("absolute keys are not allowed");
    }
    if key.split(|c: char| c == '/' || c == '\\').any(|segment| segment == "..") {
        return invalid("key contains '..' segment");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    #[async_trait::async_trait]
    impl StorageBackend for Fixed {
        async fn put_object(&self, _: &str, _: Bytes, _: &str) -> Result<(), StorageError> {
            Ok(())
        }
        async fn list_objects(&self, _: &str) -> Result<Vec<String>, StorageError> {
            Ok(Vec::new())
        }
        async fn delete_object(&self, _: &str) -> Result<(), StorageError> {
            Ok(())
        }
        fn public_url(&self) -> &str {
            "https://bucket.s3.eu-west-1.amazonaws.com"
        }
        fn is_remote(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_url_and_key_mapping() {
        let backend = Fixed;
        let url = backend.get_url("uploads/a-1.webp");
        assert_eq!(url, "https://bucket.s3.eu-west-1.amazonaws.com/uploads/a-1.webp");
        assert_eq!(backend.key_from_location(&url), "uploads/a-1.webp");
        assert_eq!(backend.key_from_location("uploads/a-1.webp"), "uploads/a-1.webp");
        assert_eq!(
            backend.key_from_location("https://elsewhere.example/uploads/a.webp"),
            "https://elsewhere.example/uploads/a.webp"
        );
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("uploads/a.png").is_ok());
        assert!(validate_key("uploads/..hidden/a.png").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("uploads/../../etc").is_err());
        assert!(validate_key("uploads\\..\\x").is_err());
        assert!(validate_key("a\0b").is_err());
    }
}
