use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Filesystem sink. Parent directories are created on demand so a fresh
/// checkout without the assets tree still gets its PDF.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage
            .write_file("assets/policies/out.pdf", b"%PDF-1.7")
            .await
            .unwrap();

        let written = temp_dir.path().join("assets/policies/out.pdf");
        assert_eq!(fs::read(written).unwrap(), b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_write_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("out.pdf", b"first").await.unwrap();
        storage.write_file("out.pdf", b"second").await.unwrap();

        assert_eq!(fs::read(temp_dir.path().join("out.pdf")).unwrap(), b"second");
    }
}
