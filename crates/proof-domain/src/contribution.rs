//! Representación estructurada del payload descifrado.
//!
//! Una `Contribution` se construye una sola vez (en el Input Loader) y a
//! partir de ahí viaja por referencia hacia los checks y el scorer: sólo
//! lectura, nunca mutación. El `content_hash` (SHA-256 del plaintext) es
//! su identidad: es la llave con la que se consulta el índice de
//! fingerprints para detectar duplicados.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::DomainError;

#[derive(Debug, Clone)]
pub struct Contribution {
    submitter: Option<String>,
    content_type: String,
    payload: Value,
    content_hash: String,
    size_bytes: usize,
}

impl Contribution {
    /// Construye la contribución a partir del plaintext ya parseado.
    /// `plaintext` son los bytes originales (pre-parseo); su hash queda
    /// fijado aquí y no se recalcula nunca más.
    pub fn from_plaintext(plaintext: &[u8],
                          payload: Value,
                          content_type: &str,
                          submitter: Option<String>)
                          -> Result<Self, DomainError> {
        if content_type.trim().is_empty() {
            return Err(DomainError::Validation("content type must not be empty".into()));
        }
        let mut hasher = Sha256::new();
        hasher.update(plaintext);
        let content_hash = hex::encode(hasher.finalize());
        Ok(Self { submitter,
                  content_type: content_type.to_string(),
                  payload,
                  content_hash,
                  size_bytes: plaintext.len() })
    }

    pub fn submitter(&self) -> Option<&str> {
        self.submitter.as_deref()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// SHA-256 hex del plaintext; identidad para deduplicación.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Acceso cómodo a un campo de primer nivel del payload.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    /// Registros individuales de la contribución, si el payload declara un
    /// arreglo bajo `field`. Un campo ausente o de otro tipo produce un
    /// slice vacío: los checks deciden qué significa eso.
    pub fn records(&self, field: &str) -> &[Value] {
        self.payload
            .get(field)
            .and_then(|v| v.as_array())
            .map(|a| a.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hash_is_stable_for_same_plaintext() {
        let bytes = br#"{"contribution":[]}"#;
        let a = Contribution::from_plaintext(bytes, json!({"contribution": []}), "application/json", None).unwrap();
        let b = Contribution::from_plaintext(bytes, json!({"contribution": []}), "application/json", None).unwrap();
        assert_eq!(a.content_hash(), b.content_hash());
        assert_eq!(a.size_bytes(), bytes.len());
    }

    #[test]
    fn hash_differs_for_different_plaintext() {
        let a = Contribution::from_plaintext(b"aaa", json!({}), "application/json", None).unwrap();
        let b = Contribution::from_plaintext(b"bbb", json!({}), "application/json", None).unwrap();
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn records_accessor_tolerates_missing_field() {
        let c = Contribution::from_plaintext(b"{}", json!({}), "application/json", None).unwrap();
        assert!(c.records("contribution").is_empty());
    }

    #[test]
    fn records_accessor_returns_array_items() {
        let payload = json!({ "contribution": [{"type": "A"}, {"type": "B"}] });
        let c = Contribution::from_plaintext(b"x", payload, "application/json", Some("0x1".into())).unwrap();
        assert_eq!(c.records("contribution").len(), 2);
        assert_eq!(c.submitter(), Some("0x1"));
    }
}
