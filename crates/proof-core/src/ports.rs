//! Costuras del motor: los tres colaboradores que el orquestador invoca
//! pero no implementa. Las implementaciones concretas viven en
//! `proof-adapters`; el motor sólo conoce estos contratos.

use std::path::PathBuf;

use proof_domain::{Contribution, DecryptionKey, EncryptedArtifact, ProofResult};

use crate::errors::PipelineError;

/// Descifra el artifact con la clave suministrada. No debe filtrar
/// plaintext parcial en caso de fallo; el material de clave sólo vive
/// durante la llamada.
pub trait ArtifactDecryptor {
    fn decrypt(&self, artifact: &EncryptedArtifact, key: &DecryptionKey) -> Result<Vec<u8>, PipelineError>;
}

/// Parsea el plaintext a una `Contribution` según el esquema declarado.
/// Debe rechazar inputs que excedan el tamaño máximo ANTES de parsear.
pub trait ContributionLoader {
    fn load(&self, plaintext: &[u8], artifact: &EncryptedArtifact) -> Result<Contribution, PipelineError>;
}

/// Serializa el ProofResult al destino sellado y devuelve la ruta
/// escrita. Si hay firma configurada, un fallo al firmar es fatal.
pub trait ResultSink {
    fn write(&self, result: &ProofResult) -> Result<PathBuf, PipelineError>;
}
