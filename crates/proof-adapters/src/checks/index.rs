//! Índice de fingerprints: colaborador externo de sólo lectura.
//!
//! Se consulta por content hash; un miss significa "no visto antes", no
//! un error. Durante una invocación el índice es inmutable (quien lo
//! actualiza es el sistema de ingesta, fuera de este proceso).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use proof_core::errors::PipelineError;

pub trait FingerprintIndex: Send + Sync {
    /// ¿El fingerprint ya fue visto? Un `Err` aquí es un problema del
    /// colaborador (IO), no un duplicado.
    fn contains(&self, fingerprint: &str) -> Result<bool, PipelineError>;
}

/// Índice en memoria; útil para tests y para corridas sin índice externo
/// (todo resulta "no visto").
#[derive(Default)]
pub struct InMemoryFingerprintIndex {
    seen: BTreeSet<String>,
}

impl InMemoryFingerprintIndex {
    pub fn with_seen<I: IntoIterator<Item = String>>(seen: I) -> Self {
        Self { seen: seen.into_iter().collect() }
    }
}

impl FingerprintIndex for InMemoryFingerprintIndex {
    fn contains(&self, fingerprint: &str) -> Result<bool, PipelineError> {
        Ok(self.seen.contains(fingerprint))
    }
}

/// Índice respaldado por archivo: un fingerprint hex por línea. Se carga
/// completo al abrir y queda de sólo lectura por el resto de la corrida.
pub struct FileFingerprintIndex {
    seen: BTreeSet<String>,
}

impl FileFingerprintIndex {
    pub fn open(path: &Path) -> Result<Self, PipelineError> {
        let raw = fs::read_to_string(path).map_err(|e| {
                                              PipelineError::Internal(format!("cannot read fingerprint index {}: {}",
                                                                              path.display(),
                                                                              e))
                                          })?;
        let seen = raw.lines()
                      .map(|l| l.trim().to_lowercase())
                      .filter(|l| !l.is_empty())
                      .collect();
        Ok(Self { seen })
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl FingerprintIndex for FileFingerprintIndex {
    fn contains(&self, fingerprint: &str) -> Result<bool, PipelineError> {
        Ok(self.seen.contains(&fingerprint.to_lowercase()))
    }
}
