// Credential digest: SHA-384 over the password bytes immediately followed
// by the name bytes, hex encoded. No separator and no random salt, so the
// same pair always hashes the same and ("ab", "c") / ("a", "bc") style
// splits share a digest. Existing stores depend on this exact scheme.

use sha2::{Digest, Sha384};

/// Length of a hex-encoded SHA-384 digest.
pub const DIGEST_HEX_LEN: usize = 96;

/// Hash a name/password pair the way the credential store expects.
pub fn credential_digest(name: &str, password: &str) -> String {
    let mut hasher = Sha384::new();
    hasher.update(password.as_bytes());
    hasher.update(name.as_bytes());
    hex::encode(hasher.finalize())
}

/// Whether `s` looks like a digest produced by [`credential_digest`].
pub fn is_digest(s: &str) -> bool {
    s.len() == DIGEST_HEX_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
