//! Taxonomía de errores del pipeline.
//!
//! La política de propagación depende de la etapa:
//! - `Decryption` antes de Loading: fatal sin output posible.
//! - `Parse` / `SchemaValidation`: fatales para la contribución pero el
//!   pipeline aún escribe un ProofResult de diagnóstico.
//! - `CheckExecution` / `CheckTimeout`: capturados por check y degradados
//!   a un `ValidationOutcome` fallido; nunca abortan la corrida.
//! - `Write`: fatal; hubo resultado en memoria pero no pudo entregarse.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum PipelineError {
    #[error("decryption failed: {0}")]
    Decryption(String),
    #[error("malformed input: {0}")]
    Parse(String),
    #[error("schema validation failed: {0}")]
    SchemaValidation(String),
    #[error("check '{check}' failed to execute: {message}")]
    CheckExecution { check: String, message: String },
    #[error("check '{check}' exceeded its time budget")]
    CheckTimeout { check: String },
    #[error("could not write proof result: {0}")]
    Write(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PipelineError {
    /// ¿El fallo ocurre antes de poder razonar sobre la contribución?
    /// En ese caso no se emite ningún output (política "cannot reason
    /// about contribution").
    pub fn is_pre_contribution(&self) -> bool {
        matches!(self, PipelineError::Decryption(_))
    }
}
