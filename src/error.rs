//! Error type for the provisioning flow.
//!
//! Every fallible boundary (store access, directory creation, record
//! parsing, console input) maps to one tagged variant. Nothing is retried.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed record on line {line}: {content:?} (expected \"<digest>;<username>\")")]
    MalformedRecord { line: usize, content: String },
    #[error("invalid directory name: {0:?}")]
    InvalidDirectoryName(String),
    #[error("failed to read console input: {0}")]
    Prompt(#[from] io::Error),
}

impl ProvisionError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ProvisionError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
