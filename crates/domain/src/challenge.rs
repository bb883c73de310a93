//! DNS-01 challenge naming and encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::DomainError;

pub const ACME_CHALLENGE_LABEL: &str = "_acme-challenge";

/// Fully qualified owner name of the challenge TXT record for `fqdn`.
pub fn challenge_record_name(fqdn: &str) -> Result<String, DomainError> {
    let fqdn = fqdn.trim().trim_end_matches('.');
    if fqdn.is_empty() {
        return Err(DomainError::InvalidInput(
            "domain name is required to build the challenge record name".to_string(),
        ));
    }
    Ok(format!(
        "{}.{}.",
        ACME_CHALLENGE_LABEL,
        fqdn.to_ascii_lowercase()
    ))
}

/// SHA-256 of the raw token, standard Base64, with `+` and `/` swapped for `-` and `_`.
///
/// `=` padding is kept.
pub fn encode_challenge(raw_token: &str) -> Result<String, DomainError> {
    if raw_token.is_empty() {
        return Err(DomainError::InvalidInput(
            "challenge token is required".to_string(),
        ));
    }
    let digest = Sha256::digest(raw_token.as_bytes());
    Ok(STANDARD
        .encode(digest)
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect())
}
