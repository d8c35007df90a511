//! Clave de descifrado suministrada externamente.
//!
//! El pipeline la adquiere al arranque, la usa durante la llamada al
//! Decryptor y la descarta al terminar el proceso. Nunca se serializa,
//! nunca se loggea: `Debug` está redactado a propósito.

use std::fmt;

use crate::DomainError;

/// Handle opaco sobre el material de clave. Sin `Serialize`/`Deserialize`
/// ni `Display`: la única salida posible es el propio proceso olvidándola.
#[derive(Clone)]
pub struct DecryptionKey(Vec<u8>);

impl DecryptionKey {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::InvalidKey("key material is empty".into()));
        }
        Ok(Self(bytes))
    }

    /// Parsea la representación hex entregada por el proveedor de claves.
    pub fn from_hex(encoded: &str) -> Result<Self, DomainError> {
        let bytes = hex::decode(encoded.trim()).map_err(|e| DomainError::InvalidKey(e.to_string()))?;
        Self::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for DecryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecryptionKey(<redacted, {} bytes>)", self.0.len())
    }
}
