//! Input Loader: plaintext → `Contribution`.
//!
//! Orden de guardas, siempre el mismo para que el veredicto sea
//! determinista:
//! 1. límite de tamaño ANTES de parsear (guarda anti-agotamiento);
//! 2. parseo JSON (`Parse` si los bytes están malformados);
//! 3. content type declarado contra la allowlist del esquema;
//! 4. campos requeridos con su tipo (`SchemaValidation`).

use serde_json::Value;

use proof_core::errors::PipelineError;
use proof_core::ports::ContributionLoader;
use proof_domain::{Contribution, EncryptedArtifact, SchemaDescriptor};

pub struct JsonContributionLoader {
    schema: SchemaDescriptor,
    max_bytes: usize,
}

impl JsonContributionLoader {
    pub fn new(schema: SchemaDescriptor, max_bytes: usize) -> Self {
        Self { schema, max_bytes }
    }

    pub fn schema(&self) -> &SchemaDescriptor {
        &self.schema
    }
}

impl ContributionLoader for JsonContributionLoader {
    fn load(&self, plaintext: &[u8], artifact: &EncryptedArtifact) -> Result<Contribution, PipelineError> {
        if plaintext.len() > self.max_bytes {
            return Err(PipelineError::SchemaValidation(format!(
                "input of {} bytes exceeds configured maximum of {}",
                plaintext.len(),
                self.max_bytes
            )));
        }

        let payload: Value =
            serde_json::from_slice(plaintext).map_err(|e| PipelineError::Parse(e.to_string()))?;

        if !self.schema.accepts_content_type(artifact.content_type()) {
            return Err(PipelineError::SchemaValidation(format!(
                "content type '{}' is not accepted by schema '{}'",
                artifact.content_type(),
                self.schema.name
            )));
        }

        if let Some(violation) = self.schema.first_violation(&payload) {
            return Err(PipelineError::SchemaValidation(violation));
        }

        Contribution::from_plaintext(plaintext,
                                     payload,
                                     artifact.content_type(),
                                     artifact.submitter().map(|s| s.to_string()))
            .map_err(|e| PipelineError::SchemaValidation(e.to_string()))
    }
}
