use crate::backend::{validate_key, StorageBackend};
use crate::StorageError;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Local filesystem storage backend
///
/// Keys map to paths relative to `root`. Content types are not persisted.
pub struct LocalBackend {
    root: PathBuf,
    public_url: String,
}

impl LocalBackend {
    pub fn new(root: PathBuf, public_url: String) -> Self {
        Self {
            root,
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(key.split('/').fold(self.root.clone(), |path, segment| path.join(segment)))
    }
}

fn collect_keys(root: &Path, prefix: &str) -> Vec<String> {
    let mut keys: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(root).ok()?;
            let key = relative
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join("/");
            key.starts_with(prefix).then_some(key)
        })
        .collect();
    keys.sort();
    keys
}

#[async_trait::async_trait]
impl StorageBackend for LocalBackend {
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let size = data.len();

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| StorageError::UploadError(key.to_string(), e.to_string()))?;

        tracing::debug!(key = %key, size_bytes = size, content_type = %content_type, "Stored object locally");
        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        if !tokio::fs::try_exists(&self.root).await? {
            return Ok(Vec::new());
        }

        let root = self.root.clone();
        let owned_prefix = prefix.to_string();
        tokio::task::spawn_blocking(move || collect_keys(&root, &owned_prefix))
            .await
            .map_err(|e| StorageError::ListError(prefix.to_string(), e.to_string()))
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key = %key, "Deleted local object");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteError(key.to_string(), e.to_string())),
        }
    }

    fn public_url(&self) -> &str {
        &self.public_url
    }

    fn is_remote(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> (tempfile::TempDir, LocalBackend) {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path().join("objects"), "http://localhost:8080/files/".to_string());
        (dir, backend)
    }

    #[tokio::test]
    async fn test_put_then_list() {
        let (_dir, backend) = backend();
        backend
            .put_object("uploads/a.txt", Bytes::from_static(b"a"), "text/plain")
            .await
            .unwrap();
        backend
            .put_object("uploads/nested/b.txt", Bytes::from_static(b"b"), "text/plain")
            .await
            .unwrap();
        backend
            .put_object("other/c.txt", Bytes::from_static(b"c"), "text/plain")
            .await
            .unwrap();

        let keys = backend.list_objects("uploads").await.unwrap();
        assert_eq!(keys, vec!["uploads/a.txt", "uploads/nested/b.txt"]);

        let stored = tokio::fs::read(backend.root().join("uploads").join("a.txt")).await.unwrap();
        assert_eq!(stored, b"a");
    }

    #[tokio::test]
    async fn test_list_is_stable_without_writes() {
        let (_dir, backend) = backend();
        backend
            .put_object("uploads/a.txt", Bytes::from_static(b"a"), "text/plain")
            .await
            .unwrap();

        let first = backend.list_objects("uploads").await.unwrap();
        let second = backend.list_objects("uploads").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_list_empty_root() {
        let (_dir, backend) = backend();
        assert!(backend.list_objects("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_key_and_is_idempotent() {
        let (_dir, backend) = backend();
        backend
            .put_object("uploads/a.txt", Bytes::from_static(b"a"), "text/plain")
            .await
            .unwrap();

        backend.delete_object("uploads/a.txt").await.unwrap();
        assert!(backend.list_objects("uploads").await.unwrap().is_empty());

        backend.delete_object("uploads/a.txt").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let (_dir, backend) = backend();
        let err = backend
            .put_object("../escape.txt", Bytes::from_static(b"x"), "text/plain")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(..)));
    }

    #[test]
    fn test_public_url_trailing_slash_trimmed() {
        let (_dir, backend) = backend();
        assert_eq!(backend.get_url("uploads/a.txt"), "http://localhost:8080/files/uploads/a.txt");
    }
}
