// Paths the provisioning flow works against. There are no flags or
// config files; the defaults reproduce the tool's fixed layout and the
// struct exists so tests can point the flow at a scratch directory.

use std::path::{Path, PathBuf};

/// Name of the credential store, relative to the working directory.
pub const DEFAULT_STORE_FILE: &str = "users.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Credential store file.
    pub store_path: PathBuf,
    /// Directory in which per-user directories are created.
    pub user_root: PathBuf,
}

impl Settings {
    /// Settings rooted at `dir`: the store is `dir/users.csv` and user
    /// directories are created directly inside `dir`.
    pub fn rooted_at(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Settings {
            store_path: dir.join(DEFAULT_STORE_FILE),
            user_root: dir.to_path_buf(),
        }
    }

    /// File name shown to the operator in prompts.
    pub fn store_display_name(&self) -> String {
        self.store_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.store_path.display().to_string())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            user_root: PathBuf::from("."),
        }
    }
}
