use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

/// Length of the PKCE code verifier, the maximum RFC 7636 allows.
const CODE_VERIFIER_LEN: usize = 128;

/// Random alphanumeric PKCE code verifier.
pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_VERIFIER_LEN)
        .map(char::from)
        .collect()
}

/// S256 code challenge for `verifier`: base64url of its SHA-256, unpadded.
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}
