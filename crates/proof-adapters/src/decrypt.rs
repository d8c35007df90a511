//! Descifrado AEAD del artifact.
//!
//! Esquema: AES-256-GCM con formato de alambre `nonce(12) || ciphertext`
//! (el tag viaja dentro del ciphertext, como lo deja la crate aes-gcm).
//! La autenticación del tag garantiza que una clave equivocada o un blob
//! manipulado fallan sin filtrar plaintext parcial.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{Aes256Gcm, Key, Nonce};

use proof_core::errors::PipelineError;
use proof_core::ports::ArtifactDecryptor;
use proof_domain::{DecryptionKey, EncryptedArtifact};

/// Largo del nonce GCM al frente del blob.
pub const NONCE_LEN: usize = 12;
/// Largo del tag de autenticación al final del ciphertext.
const TAG_LEN: usize = 16;
/// Largo exigido del material de clave (AES-256).
const KEY_LEN: usize = 32;

pub struct AeadDecryptor;

impl AeadDecryptor {
    fn cipher_for(key: &DecryptionKey) -> Result<Aes256Gcm, PipelineError> {
        if key.len() != KEY_LEN {
            return Err(PipelineError::Decryption(format!("key must be {} bytes, got {}", KEY_LEN, key.len())));
        }
        Ok(Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes())))
    }
}

impl ArtifactDecryptor for AeadDecryptor {
    fn decrypt(&self, artifact: &EncryptedArtifact, key: &DecryptionKey) -> Result<Vec<u8>, PipelineError> {
        let cipher = Self::cipher_for(key)?;
        let blob = artifact.bytes();
        if blob.len() < NONCE_LEN + TAG_LEN {
            return Err(PipelineError::Decryption("ciphertext too short".into()));
        }
        let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
        cipher.decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
              .map_err(|_| PipelineError::Decryption("authentication failed".into()))
    }
}

/// Cifra un plaintext con el mismo esquema que espera el decryptor.
/// Para productores de artifacts y tests; el pipeline en sí nunca cifra.
pub fn seal(plaintext: &[u8], key: &DecryptionKey) -> Result<Vec<u8>, PipelineError> {
    let cipher = AeadDecryptor::cipher_for(key)?;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let ciphertext = cipher.encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
                           .map_err(|_| PipelineError::Internal("encryption failed".into()))?;
    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> DecryptionKey {
        DecryptionKey::from_bytes(vec![byte; KEY_LEN]).unwrap()
    }

    fn artifact(blob: Vec<u8>) -> EncryptedArtifact {
        EncryptedArtifact::new(blob, "application/json", None).unwrap()
    }

    #[test]
    fn seal_then_decrypt_round_trips() {
        let k = key(0x11);
        let blob = seal(b"hello sealed world", &k).unwrap();
        let plain = AeadDecryptor.decrypt(&artifact(blob), &k).unwrap();
        assert_eq!(plain, b"hello sealed world");
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let blob = seal(b"secret", &key(0x11)).unwrap();
        let err = AeadDecryptor.decrypt(&artifact(blob), &key(0x22)).unwrap_err();
        assert!(matches!(err, PipelineError::Decryption(_)));
    }

    #[test]
    fn tampered_ciphertext_fails_authentication() {
        let k = key(0x11);
        let mut blob = seal(b"secret", &k).unwrap();
        let last = blob.len() - 1;
        blob[last] ^= 0xff;
        let err = AeadDecryptor.decrypt(&artifact(blob), &k).unwrap_err();
        assert!(matches!(err, PipelineError::Decryption(_)));
    }

    #[test]
    fn truncated_blob_is_rejected() {
        let err = AeadDecryptor.decrypt(&artifact(vec![0u8; NONCE_LEN]), &key(0x11)).unwrap_err();
        assert!(matches!(err, PipelineError::Decryption(_)));
    }

    #[test]
    fn short_key_is_rejected() {
        let short = DecryptionKey::from_bytes(vec![0x01; 16]).unwrap();
        let blob = seal(b"x", &key(0x11)).unwrap();
        let err = AeadDecryptor.decrypt(&artifact(blob), &short).unwrap_err();
        assert!(matches!(err, PipelineError::Decryption(_)));
    }
}
