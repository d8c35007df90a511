//! Tipos de evento de la corrida y estructura `RunEvent`.
//!
//! Rol en el pipeline:
//! - El `ProofEngine` emite eventos a un `EventStore` append-only en cada
//!   transición de etapa y por cada check evaluado.
//! - El log resultante es una traza de ejecución verificable: cada
//!   `StageFinished` lleva un fingerprint y `RunCompleted` cierra con el
//!   hash de los fingerprints ordenados.
//! - Los eventos son metadata de auditoría; el artefacto que consumen
//!   otros sistemas sigue siendo el ProofResult en el directorio sellado.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::PipelineError;
use crate::stage::Stage;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RunEventKind {
    /// Primer evento de toda corrida: fija el hash de configuración y la
    /// cantidad de checks registrados.
    RunInitialized { config_hash: String, check_count: usize },
    /// Una etapa comenzó. No implica éxito.
    StageStarted { stage: Stage },
    /// Una etapa terminó correctamente, con su fingerprint.
    StageFinished { stage: Stage, fingerprint: String },
    /// Una etapa falló. La corrida no continúa (sin retries in-process).
    StageFailed { stage: Stage, error: PipelineError },
    /// Un check individual fue evaluado (dentro de Validating).
    CheckEvaluated { check: String, passed: bool, contribution: f64 },
    /// Cierre: hash agregado de los fingerprints de etapa en orden.
    RunCompleted { run_fingerprint: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub seq: u64, // asignado por el EventStore (orden de append)
    pub run_id: Uuid,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>, // metadato; no entra en ningún fingerprint
}
