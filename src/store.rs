// Filesystem boundaries of the provisioning flow.
// - `LineStore`: the credential file (existence, creation, append, read).
// - `DirectoryCreator`: per-user directories.
// The flow only talks to these traits, so tests can swap in stubs.

use crate::error::{ProvisionError, Result};
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Line-oriented, append-only credential store.
pub trait LineStore {
    fn exists(&self) -> bool;
    /// Create the store as an empty file.
    fn create(&mut self) -> Result<()>;
    /// Append one already terminated line.
    fn append_line(&mut self, line: &str) -> Result<()>;
    /// All lines in file order, terminators stripped.
    fn read_lines(&self) -> Result<Vec<String>>;
}

/// Creates directories named after users.
pub trait DirectoryCreator {
    fn exists(&self, name: &str) -> bool;
    fn create(&mut self, name: &str) -> Result<()>;
}

/// Credential store backed by a plain UTF-8 file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineStore for FileStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn create(&mut self) -> Result<()> {
        File::create(&self.path).map_err(|e| ProvisionError::io("create", &self.path, e))?;
        debug!("created empty store {}", self.path.display());
        Ok(())
    }

    fn append_line(&mut self, line: &str) -> Result<()> {
        // Reopened per call so every record is on disk before the next prompt.
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| ProvisionError::io("open", &self.path, e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| ProvisionError::io("append to", &self.path, e))?;
        Ok(())
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        let file = File::open(&self.path).map_err(|e| ProvisionError::io("open", &self.path, e))?;
        BufReader::new(file)
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| ProvisionError::io("read", &self.path, e))
    }
}

/// Creates user directories directly inside `root`.
#[derive(Debug, Clone)]
pub struct FsDirectories {
    root: PathBuf,
}

impl FsDirectories {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsDirectories { root: root.into() }
    }
}

impl DirectoryCreator for FsDirectories {
    fn exists(&self, name: &str) -> bool {
        self.root.join(name).is_dir()
    }

    fn create(&mut self, name: &str) -> Result<()> {
        let path = self.root.join(name);
        // Single level only: a missing parent is reported, not created.
        fs::create_dir(&path).map_err(|e| ProvisionError::io("create directory", path, e))
    }
}
