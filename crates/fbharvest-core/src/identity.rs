use sha2::{Digest, Sha256};

/// Stable cross-run key for an account URL: lowercase hex SHA-256 of the URL
/// exactly as listed in the input file.
#[must_use]
pub fn identity_hash(url: &str) -> String {
    format!("{:x}", Sha256::digest(url.as_bytes()))
}
