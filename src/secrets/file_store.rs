//! secrets::file_store
//!
//! Credentials in `~/.trellocli/secrets.toml`.
//!
//! The file is a flat TOML table of key to value. On Unix it is created
//! with mode 0600 before any content is written, and every update goes
//! through a temp file and a rename.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use super::traits::{SecretError, SecretStore};

/// File-backed secret store. This is the default provider.
#[derive(Debug)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    /// Store at `~/.trellocli/secrets.toml`.
    pub fn new() -> Result<Self, SecretError> {
        let home = dirs::home_dir()
            .ok_or_else(|| SecretError::ReadError("cannot determine home directory".into()))?;
        Ok(Self {
            path: home.join(".trellocli").join("secrets.toml"),
        })
    }

    /// Store at a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, SecretError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| SecretError::ReadError(format!("cannot read secrets file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SecretError::ReadError(format!("cannot parse secrets file: {}", e)))
    }

    fn write_all(&self, secrets: &BTreeMap<String, String>) -> Result<(), SecretError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SecretError::WriteError(format!("cannot create directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(secrets)
            .map_err(|e| SecretError::WriteError(format!("cannot serialize secrets: {}", e)))?;

        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| SecretError::WriteError(format!("cannot create temp file: {}", e)))?;

            #[cfg(unix)]
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| SecretError::WriteError(format!("cannot set permissions: {}", e)))?;

            file.write_all(content.as_bytes())
                .map_err(|e| SecretError::WriteError(format!("cannot write secrets: {}", e)))?;
            file.sync_all()
                .map_err(|e| SecretError::WriteError(format!("cannot sync to disk: {}", e)))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            fs::remove_file(&temp_path).ok();
            SecretError::WriteError(format!("cannot rename temp file: {}", e))
        })
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SecretError> {
        self.set_many(&[(key, value)])
    }

    fn delete(&self, key: &str) -> Result<(), SecretError> {
        self.delete_many(&[key])
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), SecretError> {
        let mut secrets = self.read_all()?;
        for (key, value) in entries {
            secrets.insert(key.to_string(), value.to_string());
        }
        self.write_all(&secrets)
    }

    fn delete_many(&self, keys: &[&str]) -> Result<(), SecretError> {
        let mut secrets = self.read_all()?;
        let before = secrets.len();
        for key in keys {
            secrets.remove(*key);
        }
        if secrets.len() == before {
            return Ok(());
        }
        self.write_all(&secrets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, FileSecretStore) {
        let temp = TempDir::new().expect("create temp dir");
        let store = FileSecretStore::with_path(temp.path().join("secrets.toml"));
        (temp, store)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (_temp, store) = test_store();
        assert!(store.get("trello.api_key").expect("get").is_none());
    }

    #[test]
    fn set_get_overwrite() {
        let (_temp, store) = test_store();
        store.set("trello.api_key", "k1").expect("set");
        store.set("trello.api_key", "k2").expect("overwrite");
        assert_eq!(
            store.get("trello.api_key").expect("get").as_deref(),
            Some("k2")
        );
    }

    #[test]
    fn set_many_writes_pair() {
        let (_temp, store) = test_store();
        store
            .set_many(&[("trello.oauth_token", "tok"), ("trello.oauth_secret", "sec")])
            .expect("set_many");

        let content = fs::read_to_string(store.path()).expect("read");
        assert!(content.contains("trello.oauth_token"));
        assert!(content.contains("trello.oauth_secret"));
    }

    #[test]
    fn delete_many_keeps_other_keys() {
        let (_temp, store) = test_store();
        store
            .set_many(&[
                ("trello.api_key", "k"),
                ("trello.oauth_token", "tok"),
                ("trello.oauth_secret", "sec"),
            ])
            .expect("set_many");

        store
            .delete_many(&["trello.oauth_token", "trello.oauth_secret"])
            .expect("delete_many");

        assert_eq!(store.get("trello.api_key").expect("get").as_deref(), Some("k"));
        assert!(store.get("trello.oauth_token").expect("get").is_none());
    }

    #[test]
    fn delete_without_file_does_not_create_one() {
        let (_temp, store) = test_store();
        store.delete("trello.oauth_token").expect("delete");
        assert!(!store.path().exists());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let temp = TempDir::new().expect("create temp dir");
        // A non-empty directory where the file should go makes the rename fail.
        let path = temp.path().join("secrets.toml");
        fs::create_dir(&path).expect("create dir");
        fs::write(path.join("occupant"), "x").expect("write occupant");
        let store = FileSecretStore::with_path(path.clone());

        let mut secrets = BTreeMap::new();
        secrets.insert("trello.api_key".to_string(), "k".to_string());
        let err = store.write_all(&secrets).unwrap_err();

        assert!(matches!(err, SecretError::WriteError(_)));
        assert!(!path.with_extension("tmp").exists());
        assert!(path.is_dir());
    }

    #[test]
    fn creates_parent_directory() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join(".trellocli").join("secrets.toml");
        let store = FileSecretStore::with_path(path.clone());

        store.set("trello.api_key", "k").expect("set");
        assert!(path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn file_mode_is_0600() {
        let (_temp, store) = test_store();
        store.set("trello.api_secret", "s").expect("set");

        let mode = fs::metadata(store.path()).expect("metadata").permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn corrupt_file_reports_parse_error_without_values() {
        let (_temp, store) = test_store();
        fs::write(store.path(), "trello.api_key = [unclosed").expect("write");

        let err = store.get("trello.api_key").unwrap_err();
        assert!(err.to_string().contains("cannot parse"));
    }

    #[test]
    fn values_with_special_characters_survive() {
        let (_temp, store) = test_store();
        let value = "a&b=c \"quoted\"\nnext";
        store.set("trello.api_secret", value).expect("set");

        let reopened = FileSecretStore::with_path(store.path().to_path_buf());
        assert_eq!(
            reopened.get("trello.api_secret").expect("get").as_deref(),
            Some(value)
        );
    }
}
