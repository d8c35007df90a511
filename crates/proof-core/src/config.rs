//! Configuración del pipeline.
//!
//! Se construye una sola vez al arranque y viaja por referencia a través
//! del orquestador; no hay estado global mutable. El hash canónico de la
//! configuración entra en todos los fingerprints de etapa.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::PipelineError;
use crate::hashing::hash_value;
use proof_domain::SchemaDescriptor;

/// Política de scoring: pesos por check, set de hard-fail y umbral de
/// validez. Llaves ordenadas (BTree) para que la serialización sea
/// estable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPolicy {
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub hard_fail: BTreeSet<String>,
    pub threshold: f64,
}

impl ScoringPolicy {
    /// Peso configurado del check, o 1.0 si no aparece en la tabla.
    pub fn weight_of(&self, check: &str) -> f64 {
        self.weights.get(check).copied().unwrap_or(1.0)
    }

    /// ¿El fallo de este check fuerza invalidez sin importar el score?
    pub fn is_hard_fail(&self, check: &str) -> bool {
        self.hard_fail.contains(check)
    }

    /// Límites numéricos de la política: pesos finitos no negativos y
    /// umbral dentro de [0,1]. Un peso negativo haría que la media
    /// ponderada escape del rango [0,1] del score agregado, así que se
    /// rechaza antes de armar el engine.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if let Some((name, weight)) = self.weights.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
            return Err(PipelineError::Internal(format!(
                "weight for check '{}' must be a finite non-negative number, got {}",
                name, weight
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PipelineError::Internal(format!("threshold {} is outside [0,1]", self.threshold)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub schema: SchemaDescriptor,
    pub max_input_bytes: usize,
    pub scoring: ScoringPolicy,
    #[serde(default = "default_check_timeout_ms")]
    pub check_timeout_ms: u64,
    #[serde(default = "default_output_schema_version")]
    pub output_schema_version: u32,
    #[serde(default)]
    pub sign_output: bool,
}

fn default_check_timeout_ms() -> u64 {
    5_000
}

fn default_output_schema_version() -> u32 {
    constants::OUTPUT_SCHEMA_VERSION
}

impl PipelineConfig {
    pub fn check_timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms)
    }

    /// Invariantes numéricos de la configuración completa. La
    /// deserialización no valida rangos; esto corre al armar el engine y
    /// al cargar la configuración externa.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.scoring.validate()
    }

    /// Hash canónico de la configuración completa. Identifica la corrida
    /// junto con la versión del pipeline.
    pub fn config_hash(&self) -> String {
        let value = serde_json::to_value(self).expect("serialize pipeline config");
        hash_value(&value)
    }
}
