//! El proof final: veredicto estructurado de la corrida.
//!
//! Exactamente un `ProofResult` por invocación. El orden de los campos es
//! parte del contrato (serde serializa en orden de declaración y el
//! `schema_version` versiona ese layout), de modo que los consumidores
//! aguas abajo parsean de forma determinista.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ValidationOutcome;

/// Metadata auxiliar del proof. `error` sólo se puebla en el camino de
/// diagnóstico (fallos desde Loading en adelante).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofMetadata {
    pub run_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Veredicto final consumido por el Result Writer y por nadie más dentro
/// del proceso: el ciclo de vida termina al serializarlo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofResult {
    pub schema_version: u32,
    pub pipeline_version: String,
    pub valid: bool,
    pub score: f64,
    pub outcomes: Vec<ValidationOutcome>,
    pub metadata: ProofMetadata,
    pub ts: DateTime<Utc>,
}

impl ProofResult {
    /// Copia con el timestamp neutralizado; útil para comparar corridas
    /// (el determinismo se exige excluyendo `ts`).
    pub fn without_timestamp(&self) -> Self {
        let mut clone = self.clone();
        clone.ts = DateTime::<Utc>::UNIX_EPOCH;
        clone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationOutcome;

    fn sample() -> ProofResult {
        ProofResult { schema_version: 1,
                      pipeline_version: "1.0".into(),
                      valid: true,
                      score: 0.83333,
                      outcomes: vec![ValidationOutcome::passing("structural", 1.0),
                                     ValidationOutcome::failing("duplicate", "seen before")],
                      metadata: ProofMetadata { run_id: Uuid::new_v4(),
                                                submitter: Some("0xabc".into()),
                                                content_hash: Some("cafe".into()),
                                                error: None },
                      ts: Utc::now() }
    }

    #[test]
    fn serde_round_trip_yields_equal_object() {
        let proof = sample();
        let encoded = serde_json::to_vec(&proof).unwrap();
        let decoded: ProofResult = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(proof, decoded);
    }

    #[test]
    fn field_order_is_stable() {
        let proof = sample();
        let text = serde_json::to_string(&proof).unwrap();
        let schema_pos = text.find("schema_version").unwrap();
        let valid_pos = text.find("\"valid\"").unwrap();
        let ts_pos = text.find("\"ts\"").unwrap();
        assert!(schema_pos < valid_pos && valid_pos < ts_pos);
    }

    #[test]
    fn without_timestamp_equalizes_runs() {
        let a = sample();
        let mut b = a.clone();
        b.ts = Utc::now();
        assert_eq!(a.without_timestamp(), b.without_timestamp());
    }

    #[test]
    fn absent_error_is_omitted_from_serialization() {
        let proof = sample();
        let text = serde_json::to_string(&proof).unwrap();
        assert!(!text.contains("\"error\""));
    }
}
