// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ECDSA P-256 key generation and validation.

use ring::rand::SystemRandom;
use ring::signature::{ECDSA_P256_SHA256_FIXED_SIGNING, EcdsaKeyPair, KeyPair as _};
use warden_core::{KeyPair, WardenError};
use zeroize::Zeroizing;

/// Generate a fresh P-256 key pair.
///
/// The private key is a PKCS#8 v1 document; the public key is the
/// uncompressed SEC1 point (65 bytes, leading `0x04`).
pub fn generate_key_pair() -> Result<KeyPair, WardenError> {
    let rng = SystemRandom::new();
    let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, &rng)
        .map_err(|_| WardenError::KeyManager("failed to generate P-256 key".to_string()))?;
    let private_key = pkcs8.as_ref().to_vec();
    let public_key = public_key_of(&private_key)?;
    Ok(KeyPair {
        public_key,
        private_key,
    })
}

/// Check that `private_key` is a P-256 PKCS#8 document and return its
/// public point.
pub fn public_key_of(private_key: &[u8]) -> Result<Vec<u8>, WardenError> {
    let rng = SystemRandom::new();
    let pair = EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, private_key, &rng)
        .map_err(|e| WardenError::KeyManager(format!("invalid P-256 private key: {e}")))?;
    Ok(pair.public_key().as_ref().to_vec())
}

/// Validate and copy a private key into zeroize-on-drop storage.
pub fn validated_copy(private_key: &[u8]) -> Result<Zeroizing<Vec<u8>>, WardenError> {
    public_key_of(private_key)?;
    Ok(Zeroizing::new(private_key.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_key_has_uncompressed_public_point() {
        let pair = generate_key_pair().unwrap();
        assert_eq!(pair.public_key.len(), 65);
        assert!(hex::encode(&pair.public_key).starts_with("04"));
        assert_eq!(public_key_of(&pair.private_key).unwrap(), pair.public_key);
    }

    #[test]
    fn each_call_generates_a_new_key() {
        let a = generate_key_pair().unwrap();
        let b = generate_key_pair().unwrap();
        assert_ne!(a.private_key, b.private_key);
    }

    #[test]
    fn garbage_is_rejected() {
        let err = validated_copy(b"not a key").unwrap_err();
        assert!(matches!(err, WardenError::KeyManager(_)));
    }
}
