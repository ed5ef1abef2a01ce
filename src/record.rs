// One line of the credential store: `<digest>;<username>`.

use crate::digest::credential_digest;
use crate::error::{ProvisionError, Result};

/// Field separator inside a record line.
pub const SEPARATOR: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub digest: String,
    pub username: String,
}

impl CredentialRecord {
    /// Build a record for a freshly entered name and password.
    pub fn new(name: &str, password: &str) -> Self {
        CredentialRecord {
            digest: credential_digest(name, password),
            username: name.to_string(),
        }
    }

    /// Serialized form, newline included.
    pub fn to_line(&self) -> String {
        format!("{}{}{}\n", self.digest, SEPARATOR, self.username)
    }

    /// Parse a stored line. `line_no` is 1-based and only used for errors.
    ///
    /// Splits on the first separator; everything after it is the username.
    /// The digest field is taken as-is.
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let trimmed = line.strip_suffix('\n').unwrap_or(line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        match trimmed.split_once(SEPARATOR) {
            Some((digest, username)) => Ok(CredentialRecord {
                digest: digest.to_string(),
                username: username.to_string(),
            }),
            None => Err(ProvisionError::MalformedRecord {
                line: line_no,
                content: trimmed.to_string(),
            }),
        }
    }
}
