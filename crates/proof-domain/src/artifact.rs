//! Artifact cifrado recibido por el pipeline.
//!
//! Un `EncryptedArtifact` es una secuencia de bytes opaca más metadata
//! declarada por quien lo entrega (content type, submitter). Es inmutable
//! una vez construido: el Decryptor lo consume por referencia y nadie lo
//! escribe de vuelta.

use crate::DomainError;

/// Blob cifrado + metadata declarada. El pipeline nunca interpreta los
/// bytes antes de descifrarlos.
#[derive(Debug, Clone)]
pub struct EncryptedArtifact {
    bytes: Vec<u8>,
    content_type: String,
    submitter: Option<String>,
}

impl EncryptedArtifact {
    pub fn new(bytes: Vec<u8>, content_type: &str, submitter: Option<String>) -> Result<Self, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::Validation("encrypted artifact is empty".into()));
        }
        if content_type.trim().is_empty() {
            return Err(DomainError::Validation("content type must not be empty".into()));
        }
        Ok(Self { bytes,
                  content_type: content_type.to_string(),
                  submitter })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn submitter(&self) -> Option<&str> {
        self.submitter.as_deref()
    }

    /// Tamaño del blob cifrado (no del plaintext).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_blob() {
        let res = EncryptedArtifact::new(vec![], "application/json", None);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_blank_content_type() {
        let res = EncryptedArtifact::new(vec![1, 2, 3], "  ", None);
        assert!(res.is_err());
    }

    #[test]
    fn exposes_declared_metadata() {
        let art = EncryptedArtifact::new(vec![1, 2, 3], "application/json", Some("0xabc".into())).unwrap();
        assert_eq!(art.content_type(), "application/json");
        assert_eq!(art.submitter(), Some("0xabc"));
        assert_eq!(art.len(), 3);
    }
}
